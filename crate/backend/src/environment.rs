use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

struct EnvironmentData {
    values: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A chained runtime scope: lookups and assignments walk outward through
/// `parent` until a binding is found. Cloning an `Environment` clones the
/// `Rc`, so closures capture the exact scope chain live at definition time
/// rather than a snapshot.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<EnvironmentData>>);

impl Environment {
    pub fn root() -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            values: HashMap::new(),
            parent: None,
        })))
    }

    pub fn child(parent: &Environment) -> Self {
        Environment(Rc::new(RefCell::new(EnvironmentData {
            values: HashMap::new(),
            parent: Some(parent.clone()),
        })))
    }

    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(v) = data.values.get(name) {
            return Some(v.clone());
        }
        data.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Assigns to the innermost scope already holding `name`, walking
    /// outward. Returns `false` if no scope defines it (the caller raises a
    /// `NameError`, it does not implicitly declare a global).
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut data = self.0.borrow_mut();
        if data.values.contains_key(name) {
            data.values.insert(name.to_string(), value);
            return true;
        }
        match &data.parent {
            Some(p) => p.assign(name, value),
            None => false,
        }
    }

    /// All names visible from this scope outward, nearest scope first, for
    /// "did you mean?" suggestions on an undefined-name error.
    pub fn visible_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let data = env.0.borrow();
            names.extend(data.values.keys().cloned());
            current = data.parent.clone();
        }
        names
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment({} bindings)", self.0.borrow().values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_sees_parent_bindings() {
        let root = Environment::root();
        root.define("x", Value::Int(1));
        let child = Environment::child(&root);
        assert!(matches!(child.get("x"), Some(Value::Int(1))));
    }

    #[test]
    fn child_shadowing_does_not_leak_to_parent() {
        let root = Environment::root();
        root.define("x", Value::Int(1));
        let child = Environment::child(&root);
        child.define("x", Value::Int(2));
        assert!(matches!(child.get("x"), Some(Value::Int(2))));
        assert!(matches!(root.get("x"), Some(Value::Int(1))));
    }

    #[test]
    fn assign_writes_through_to_defining_scope() {
        let root = Environment::root();
        root.define("x", Value::Int(1));
        let child = Environment::child(&root);
        assert!(child.assign("x", Value::Int(9)));
        assert!(matches!(root.get("x"), Some(Value::Int(9))));
    }

    #[test]
    fn assign_to_undefined_name_fails() {
        let root = Environment::root();
        assert!(!root.assign("missing", Value::Int(1)));
    }
}
