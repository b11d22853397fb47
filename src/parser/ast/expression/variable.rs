use crate::parser::ast::Position;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Variable<T> {
    pub name: String,
    pub info: T,
    pub position: Position,
}
