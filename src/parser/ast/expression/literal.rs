use crate::lexer::Literal;
use crate::parser::ast::Position;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LiteralExpression<T> {
    pub value: Literal,
    pub info: T,
    pub position: Position,
}
