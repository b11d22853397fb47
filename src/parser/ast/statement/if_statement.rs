use crate::parser::ast::{Expression, Position};

use super::Block;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IfStatement<T> {
    pub condition: Expression<T>,
    pub then_block: Block<T>,
    pub else_block: Option<Block<T>>,
    pub position: Position,
}
