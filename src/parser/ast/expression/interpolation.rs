use crate::parser::ast::Position;

use super::Expression;

/// One piece of an interpolated string: either a literal fragment or an
/// embedded expression.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InterpolationPart<T> {
    Fragment(String),
    Expression(Expression<T>),
}

/// `$"…{expr}…"`, already split into parts by the parser. The code
/// generator walks the parts without re-parsing anything.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpolatedString<T> {
    pub parts: Vec<InterpolationPart<T>>,
    pub info: T,
    pub position: Position,
}
