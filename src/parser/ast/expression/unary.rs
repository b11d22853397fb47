use std::fmt::Display;

use crate::parser::ast::Position;

use super::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOperator {
    /// Prefix `-`
    Negate,
    /// Prefix `!`
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
        })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnaryExpression<T> {
    pub operator: UnaryOperator,
    pub operand: Expression<T>,
    pub info: T,
    pub position: Position,
}
