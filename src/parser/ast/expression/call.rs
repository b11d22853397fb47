use crate::parser::ast::Position;

use super::Expression;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CallExpression<T> {
    pub callee: Expression<T>,
    pub args: Vec<Expression<T>>,
    pub info: T,
    pub position: Position,
}
