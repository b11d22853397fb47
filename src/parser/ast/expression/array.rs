use crate::parser::ast::Position;

use super::Expression;

/// `[e1, e2, …]`. The grammar and the type checker understand arrays; the
/// code generator does not.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrayLiteral<T> {
    pub elements: Vec<Expression<T>>,
    pub info: T,
    pub position: Position,
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrayAccess<T> {
    pub array: Expression<T>,
    pub index: Expression<T>,
    pub info: T,
    pub position: Position,
}
