use crate::parser::ast::Position;

/// `import NAME`. Accepted and ignored; Sn has no cross-file module
/// loading.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Import {
    pub module: String,
    pub position: Position,
}
