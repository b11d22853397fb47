use crate::parser::ast::{Expression, Position, TypeName};

/// `var NAME : TYPE [= EXPR]`. Without an initializer the slot is
/// zero-initialized by the code generator.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariableDeclaration<T> {
    pub name: String,
    pub type_name: TypeName,
    pub initializer: Option<Expression<T>>,
    pub info: T,
    pub position: Position,
}
