use crate::parser::ast::Position;

use super::Statement;

/// A sequence of statements, either a single inline statement after an
/// arrow or an INDENT/DEDENT-delimited group.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Block<T> {
    pub statements: Vec<Statement<T>>,
    pub position: Position,
}
