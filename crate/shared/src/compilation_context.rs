use crate::symbol::Symbol;
use crate::symbol_table::SymbolTable;

/// Builtins pre-populated into the global scope (spec §4.3), name paired
/// with fixed arity, or `None` for the variadic ones (`likho`, `likho_online`).
const BUILTINS: &[(&str, Option<usize>)] = &[
    ("likho", None),
    ("likho_online", None),
    ("length", Some(1)),
    ("append", Some(2)),
    ("pop", Some(1)),
    ("insert", Some(3)),
    ("sort", Some(1)),
    ("reverse", Some(1)),
    ("sum", Some(1)),
    ("min", None),
    ("max", None),
    ("upper", Some(1)),
    ("lower", Some(1)),
    ("split", Some(2)),
    ("join", Some(2)),
    ("replace", Some(3)),
    ("str", Some(1)),
    ("int", Some(1)),
    ("float", Some(1)),
    ("bool", Some(1)),
    ("type", Some(1)),
    ("abs", Some(1)),
    ("round", Some(1)),
    ("range", None),
];

/// Owns the symbol table across a whole compilation/run and seeds it with
/// the builtin function table before any user code is analyzed.
///
/// Grounded on the teacher's delegation style (`CompilationContext` wraps a
/// `SymbolTable` and forwards `begin_scope`/`end_scope`/lookups/defines) but
/// without a type registry: this language's type tags are a closed enum
/// (`hindustani_types::Type`), not an interned registry of user-defined types.
pub struct CompilationContext {
    symbol_table: SymbolTable,
}

impl Default for CompilationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilationContext {
    pub fn new() -> Self {
        let mut symbol_table = SymbolTable::new();
        for (name, param_count) in BUILTINS {
            let symbol = Symbol {
                name: name.to_string(),
                kind: crate::symbol::SymbolKind::Function,
                inferred_type: hindustani_types::Type::Func,
                line: 0,
                param_count: *param_count,
            };
            symbol_table
                .define(symbol)
                .unwrap_or_else(|_| panic!("duplicate builtin name '{name}'"));
        }
        CompilationContext { symbol_table }
    }

    pub fn begin_scope(&mut self) {
        self.symbol_table.begin_scope();
    }

    pub fn end_scope(&mut self) {
        self.symbol_table.end_scope();
    }

    pub fn define_symbol(&mut self, symbol: Symbol) -> Result<(), String> {
        self.symbol_table.define(symbol)
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbol_table.lookup(name)
    }

    pub fn defined_in_current_scope(&self, name: &str) -> bool {
        self.symbol_table.defined_in_current_scope(name)
    }

    pub fn is_builtin(name: &str) -> bool {
        BUILTINS.iter().any(|(n, _)| *n == name)
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.symbol_table.visible_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_visible_from_the_start() {
        let ctx = CompilationContext::new();
        assert!(ctx.lookup_symbol("likho").is_some());
        assert!(CompilationContext::is_builtin("likho"));
        assert!(!CompilationContext::is_builtin("naam"));
    }
}
