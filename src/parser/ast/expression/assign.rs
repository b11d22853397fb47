use crate::parser::ast::Position;

use super::Expression;

/// `name = value`; only variables are valid assignment targets.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Assignment<T> {
    pub name: String,
    pub value: Expression<T>,
    pub info: T,
    pub position: Position,
}
