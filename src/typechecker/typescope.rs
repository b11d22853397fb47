use std::collections::HashMap;

use super::variabletype::VariableType;

/// Lexical scopes for the type checker. Name comparison is bytewise on
/// the identifier text; shadowing works by innermost-first lookup.
#[derive(Default, Debug, Clone)]
pub struct TypeScope {
    scope_stack: Vec<HashMap<String, VariableType>>,
}

impl TypeScope {
    /// Find a name by iterating over the scopes from the innermost
    /// outward.
    pub fn find(&self, name: &str) -> Option<VariableType> {
        for scope in self.scope_stack.iter().rev() {
            if let Some(variable_type) = scope.get(name) {
                return Some(variable_type.clone());
            }
        }

        None
    }

    /// Check if a name is present in the current scope.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.scope_stack
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    /// Push a new scope frame.
    pub fn push(&mut self) {
        self.scope_stack.push(HashMap::default());
    }

    /// Pop the last scope frame.
    pub fn pop(&mut self) {
        self.scope_stack.pop();
    }

    /// Bind a name in the current scope. Existing entries in outer scopes
    /// are never removed.
    pub fn set(&mut self, name: &str, value: VariableType) {
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name.to_owned(), value);
        }
    }
}

/// A scope with the built-in declarations in place. `print` is
/// special-cased by the checker itself because it accepts any printable
/// primitive; `to_string` is registered for forward compatibility and is
/// otherwise unused.
pub fn setup_scope() -> TypeScope {
    let mut scope = TypeScope::default();

    scope.push();
    scope.set(
        "to_string",
        VariableType::Func {
            params: vec![VariableType::Str],
            return_type: Box::new(VariableType::Str),
        },
    );

    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_match_wins() {
        let mut scope = setup_scope();
        scope.set("x", VariableType::Int);
        scope.push();
        scope.set("x", VariableType::Str);

        assert_eq!(Some(VariableType::Str), scope.find("x"));
        scope.pop();
        assert_eq!(Some(VariableType::Int), scope.find("x"));
    }

    #[test]
    fn test_lookup_is_by_name_not_identity() {
        let mut scope = setup_scope();
        let name = String::from("counter");
        scope.set(&name, VariableType::Long);

        let other = String::from("count") + "er";
        assert_eq!(Some(VariableType::Long), scope.find(&other));
    }
}
