use crate::parser::ast::{Expression, Position};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReturnStatement<T> {
    pub value: Option<Expression<T>>,
    pub position: Position,
}
