use crate::parser::ast::{Expression, Position};

use super::{Block, Statement};

/// `for INIT; COND; INCR => body`. The initializer lives in its own scope
/// wrapping the loop.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ForLoop<T> {
    pub initializer: Option<Statement<T>>,
    pub condition: Option<Expression<T>>,
    pub increment: Option<Expression<T>>,
    pub body: Block<T>,
    pub position: Position,
}
