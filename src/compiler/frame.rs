use std::collections::HashMap;

use crate::typechecker::VariableType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Parameter,
    Local,
}

/// A name bound within a function activation, with its home slot
/// expressed as a byte offset below `rbp`.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub ty: VariableType,
    pub kind: SymbolKind,
    pub offset: usize,
}

/// Scoped symbol table for a single function activation. Offsets are
/// assigned monotonically in declaration order: parameter `i` lands at
/// `16 + 8*i`, locals take the next free 8-byte slot. Lookup is bytewise
/// on the name, innermost scope first, so shadowing just works.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    scopes: Vec<HashMap<String, Symbol>>,
    next_offset: usize,
    max_offset: usize,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
            next_offset: 16,
            max_offset: 8,
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Bind a name in the innermost scope and hand out its frame offset.
    /// Existing entries are never removed; an inner binding shadows an
    /// outer one.
    pub fn add(&mut self, name: &str, ty: VariableType, kind: SymbolKind) -> usize {
        let offset = self.next_offset;
        self.next_offset += 8;
        self.max_offset = self.max_offset.max(offset);

        let symbol = Symbol { ty, kind, offset };
        self.scopes
            .last_mut()
            .expect("frame always has a scope")
            .insert(name.to_owned(), symbol);

        offset
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
        }

        None
    }

    /// Bytes the prologue has to reserve: the deepest slot plus one more,
    /// rounded up to keep `rsp` 16-byte aligned in the body.
    pub fn frame_size(&self) -> usize {
        (self.max_offset + 8).next_multiple_of(16)
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_offsets() {
        let mut frame = FrameBuilder::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            let offset = frame.add(name, VariableType::Int, SymbolKind::Parameter);
            assert_eq!(16 + 8 * i, offset);
        }
    }

    #[test]
    fn test_locals_continue_after_parameters() {
        let mut frame = FrameBuilder::new();
        frame.add("a", VariableType::Int, SymbolKind::Parameter);
        let offset = frame.add("x", VariableType::Str, SymbolKind::Local);
        assert_eq!(24, offset);
    }

    #[test]
    fn test_offsets_are_unique_across_scopes() {
        let mut frame = FrameBuilder::new();
        let outer = frame.add("x", VariableType::Int, SymbolKind::Local);
        frame.push();
        let inner = frame.add("x", VariableType::Int, SymbolKind::Local);

        assert_ne!(outer, inner);
        assert_eq!(inner, frame.lookup("x").unwrap().offset);
        frame.pop();
        assert_eq!(outer, frame.lookup("x").unwrap().offset);
    }

    #[test]
    fn test_frame_size_covers_every_offset() {
        let mut frame = FrameBuilder::new();
        assert_eq!(16, frame.frame_size());

        for i in 0..5 {
            frame.add(&format!("v{i}"), VariableType::Int, SymbolKind::Local);
        }
        // Deepest slot is 48; every offset must stay strictly below the
        // reserved frame.
        assert!(frame.frame_size() > 48);
        assert_eq!(0, frame.frame_size() % 16);
    }
}
