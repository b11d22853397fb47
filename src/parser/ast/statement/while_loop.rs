use crate::parser::ast::{Expression, Position};

use super::Block;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WhileLoop<T> {
    pub condition: Expression<T>,
    pub body: Block<T>,
    pub position: Position,
}
