mod array;
mod assign;
mod binary;
mod call;
mod interpolation;
mod literal;
mod step;
mod unary;
mod variable;

pub use self::array::*;
pub use self::assign::*;
pub use self::binary::*;
pub use self::call::*;
pub use self::interpolation::*;
pub use self::literal::*;
pub use self::step::*;
pub use self::unary::*;
pub use self::variable::*;

use super::Position;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expression<T> {
    Binary(Box<BinaryExpression<T>>),
    Unary(Box<UnaryExpression<T>>),
    Literal(LiteralExpression<T>),
    Variable(Variable<T>),
    Assign(Box<Assignment<T>>),
    Call(Box<CallExpression<T>>),
    Array(ArrayLiteral<T>),
    ArrayAccess(Box<ArrayAccess<T>>),
    Increment(Box<StepExpression<T>>),
    Decrement(Box<StepExpression<T>>),
    Interpolated(InterpolatedString<T>),
}

impl<T> Expression<T>
where
    T: Clone,
{
    pub fn info(&self) -> T {
        match self {
            Expression::Binary(inner) => inner.info.clone(),
            Expression::Unary(inner) => inner.info.clone(),
            Expression::Literal(inner) => inner.info.clone(),
            Expression::Variable(inner) => inner.info.clone(),
            Expression::Assign(inner) => inner.info.clone(),
            Expression::Call(inner) => inner.info.clone(),
            Expression::Array(inner) => inner.info.clone(),
            Expression::ArrayAccess(inner) => inner.info.clone(),
            Expression::Increment(inner) => inner.info.clone(),
            Expression::Decrement(inner) => inner.info.clone(),
            Expression::Interpolated(inner) => inner.info.clone(),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Expression::Binary(inner) => inner.position.clone(),
            Expression::Unary(inner) => inner.position.clone(),
            Expression::Literal(inner) => inner.position.clone(),
            Expression::Variable(inner) => inner.position.clone(),
            Expression::Assign(inner) => inner.position.clone(),
            Expression::Call(inner) => inner.position.clone(),
            Expression::Array(inner) => inner.position.clone(),
            Expression::ArrayAccess(inner) => inner.position.clone(),
            Expression::Increment(inner) => inner.position.clone(),
            Expression::Decrement(inner) => inner.position.clone(),
            Expression::Interpolated(inner) => inner.position.clone(),
        }
    }
}
