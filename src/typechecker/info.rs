use super::variabletype::VariableType;

/// Type information the checker attaches to every expression.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeInfo {
    pub ty: VariableType,
}

impl TypeInfo {
    pub fn new(ty: VariableType) -> Self {
        Self { ty }
    }
}
