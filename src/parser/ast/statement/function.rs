use crate::parser::ast::{Position, TypeName};

use super::Block;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_name: TypeName,
    pub position: Position,
}

/// `fn NAME(params):RET =>` followed by an inline or indented body.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionDeclaration<T> {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: TypeName,
    pub body: Block<T>,
    pub info: T,
    pub position: Position,
}
