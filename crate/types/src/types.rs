use hindustani_derive::NamedEnum;
use std::fmt;

/// The closed set of type tags the semantic analyzer and interpreter reason
/// about. The language is dynamically typed; these tags drive the
/// best-effort checker in the analyzer and the runtime tag dispatch in the
/// interpreter. `Any` is the escape hatch used whenever static inference
/// can't pin down a concrete tag (e.g. a parameter with no declared use).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, NamedEnum)]
pub enum Type {
    #[name = "number"]
    Number,
    #[name = "string"]
    String,
    #[name = "bool"]
    Bool,
    #[name = "list"]
    List,
    #[name = "dict"]
    Dict,
    #[name = "func"]
    Func,
    #[name = "class"]
    Class,
    #[name = "none"]
    None,
    #[name = "any"]
    Any,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Type {
    /// `Any` abstains from every check; it is neither compatible nor
    /// incompatible with anything by itself, so call sites should branch on
    /// it before comparing tags.
    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }
}
