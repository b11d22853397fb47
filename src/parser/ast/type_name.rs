use std::fmt::Display;

/// A type as written in the source, before the checker resolves it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeName {
    /// One of the primitive type keywords (`int`, `long`, `double`,
    /// `char`, `str`, `bool`, `void`).
    Primitive(String),
    /// `T[]`
    Array(Box<TypeName>),
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeName::Primitive(name) => f.write_str(name),
            TypeName::Array(inner) => write!(f, "{inner}[]"),
        }
    }
}
