use crate::parser::ast::Position;

use super::Expression;

/// Operand of a postfix `++` or `--`; the surrounding
/// [`Expression`](super::Expression) variant decides the direction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StepExpression<T> {
    pub operand: Expression<T>,
    pub info: T,
    pub position: Position,
}
