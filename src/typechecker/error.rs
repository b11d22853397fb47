use std::{error::Error, fmt::Display};

use crate::parser::ast::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub message: String,
    pub position: Position,
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} ({}:{}:{})", self.message, file, line, col)
    }
}

impl Error for TypeError {}
