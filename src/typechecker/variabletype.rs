use std::{fmt::Display, str::FromStr};

use crate::parser::ast::TypeName;

/// The resolved type of a value in an Sn program.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VariableType {
    Int,
    Long,
    Double,
    Char,
    Str,
    Bool,
    Void,
    Nil,
    Array(Box<VariableType>),
    Func {
        params: Vec<VariableType>,
        return_type: Box<VariableType>,
    },
    /// Placeholder used while recovering from a type error; never part of
    /// a successfully checked module.
    Unknown,
}

pub struct VariableParseError(pub String);

impl FromStr for VariableType {
    type Err = VariableParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "long" => Ok(Self::Long),
            "double" => Ok(Self::Double),
            "char" => Ok(Self::Char),
            "str" => Ok(Self::Str),
            "bool" => Ok(Self::Bool),
            "void" => Ok(Self::Void),
            "nil" => Ok(Self::Nil),
            _ => Err(VariableParseError(format!("Invalid type '{s}'"))),
        }
    }
}

impl From<&TypeName> for VariableType {
    fn from(type_name: &TypeName) -> Self {
        match type_name {
            TypeName::Primitive(name) => name.parse().unwrap_or(VariableType::Unknown),
            TypeName::Array(inner) => VariableType::Array(Box::new(Self::from(inner.as_ref()))),
        }
    }
}

impl Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Int => f.write_str("int"),
            VariableType::Long => f.write_str("long"),
            VariableType::Double => f.write_str("double"),
            VariableType::Char => f.write_str("char"),
            VariableType::Str => f.write_str("str"),
            VariableType::Bool => f.write_str("bool"),
            VariableType::Void => f.write_str("void"),
            VariableType::Nil => f.write_str("nil"),
            VariableType::Array(inner) => write!(f, "array<{inner}>"),
            VariableType::Func {
                params,
                return_type,
            } => {
                let params = params
                    .iter()
                    .map(|param| param.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "fn({params}) -> {return_type}")
            }
            VariableType::Unknown => f.write_str("unknown"),
        }
    }
}

impl VariableType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            VariableType::Int | VariableType::Long | VariableType::Double
        )
    }

    /// Whether `print` (and interpolation) can render a value of this
    /// type.
    pub fn is_printable(&self) -> bool {
        matches!(
            self,
            VariableType::Int
                | VariableType::Long
                | VariableType::Double
                | VariableType::Char
                | VariableType::Str
                | VariableType::Bool
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!("int", VariableType::Int.to_string());
        assert_eq!(
            "array<int>",
            VariableType::Array(Box::new(VariableType::Int)).to_string()
        );
        assert_eq!(
            "fn(int,str) -> bool",
            VariableType::Func {
                params: vec![VariableType::Int, VariableType::Str],
                return_type: Box::new(VariableType::Bool),
            }
            .to_string()
        );
    }

    #[test]
    fn test_from_type_name() {
        let name = TypeName::Array(Box::new(TypeName::Primitive("double".to_string())));
        assert_eq!(
            VariableType::Array(Box::new(VariableType::Double)),
            VariableType::from(&name)
        );
    }
}
