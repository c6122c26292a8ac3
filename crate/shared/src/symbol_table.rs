use crate::symbol::Symbol;
use std::collections::HashMap;

/// A stack of lexical scopes.
///
/// Resolution walks from the innermost scope outward (spec §3): a name
/// missing from the current scope may still be found in an enclosing one.
/// Defining a name that already exists in the *current* scope is rejected
/// (`define` returns `Err`); defining it again in a nested scope shadows the
/// outer one instead, which is legal.
///
/// ### Example
/// ```
/// use hindustani_shared::{SymbolTable, Symbol};
///
/// let mut table = SymbolTable::new();
/// table.define(Symbol::variable("x", hindustani_types::Type::Number, 1)).unwrap();
/// assert!(table.lookup("x").is_some());
///
/// table.begin_scope();
/// table.define(Symbol::variable("x", hindustani_types::Type::Number, 2)).unwrap();
/// assert_eq!(table.lookup("x").unwrap().line, 2);
/// table.end_scope();
/// assert_eq!(table.lookup("x").unwrap().line, 1);
/// ```
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table with a single (global) scope.
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope. Never pops the global scope.
    pub fn end_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Defines `symbol` in the current scope.
    ///
    /// ### Returns
    /// `Err` with the conflicting name if it's already defined in this same
    /// scope (`RedefinitionError`, per spec §7); shadowing an outer scope is
    /// always allowed.
    pub fn define(&mut self, symbol: Symbol) -> Result<(), String> {
        let scope = self.scopes.last_mut().expect("global scope always present");
        if scope.contains_key(&symbol.name) {
            return Err(symbol.name);
        }
        scope.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Looks up `name`, walking from the innermost scope to the global one.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// True when `name` is already bound in the *current* scope only.
    pub fn defined_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .map(|scope| scope.contains_key(name))
            .unwrap_or(false)
    }

    /// All names visible from the current scope, innermost first — used to
    /// build "did you mean?" suggestions.
    pub fn visible_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        for scope in self.scopes.iter().rev() {
            names.extend(scope.keys().map(String::as_str));
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindustani_types::Type;

    #[test]
    fn redefinition_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();
        table.define(Symbol::variable("x", Type::Number, 1)).unwrap();
        assert!(table.define(Symbol::variable("x", Type::Number, 2)).is_err());
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let mut table = SymbolTable::new();
        table.define(Symbol::variable("x", Type::Number, 1)).unwrap();
        table.begin_scope();
        assert!(table.define(Symbol::variable("x", Type::Number, 5)).is_ok());
        assert_eq!(table.lookup("x").unwrap().line, 5);
        table.end_scope();
        assert_eq!(table.lookup("x").unwrap().line, 1);
    }

    #[test]
    fn lookup_walks_outward() {
        let mut table = SymbolTable::new();
        table.define(Symbol::variable("outer", Type::Number, 1)).unwrap();
        table.begin_scope();
        table.define(Symbol::variable("inner", Type::String, 2)).unwrap();
        assert!(table.lookup("outer").is_some());
        assert!(table.lookup("inner").is_some());
        table.end_scope();
        assert!(table.lookup("inner").is_none());
    }
}
