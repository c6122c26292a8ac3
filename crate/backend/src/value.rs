use hindustani_ir::FunctionDefStmt;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;

/// A user-defined function or lambda, closing over the environment active at
/// its definition site so nested functions see their enclosing locals.
#[derive(Debug)]
pub struct FunctionValue {
    pub name: String,
    pub params: Vec<String>,
    pub body: FunctionBody,
    pub closure: Environment,
}

/// `kaam` bodies are statement lists; `lambda` bodies are a single expression.
/// Both share `FunctionValue` rather than splitting into two value variants,
/// since every call site (arity check, call dispatch, `this`-binding) treats
/// them identically.
#[derive(Debug)]
pub enum FunctionBody {
    Block(Rc<Vec<hindustani_ir::Statement>>),
    Expression(Rc<hindustani_ir::Expression>),
}

pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

pub struct NativeFunctionValue {
    pub name: String,
    pub arity: Option<usize>,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    pub parent: Option<Rc<ClassValue>>,
    pub methods: RefCell<std::collections::HashMap<String, Rc<FunctionDefStmt>>>,
    pub method_closure: Environment,
}

impl ClassValue {
    /// Walks the inheritance chain, nearest class first, for method lookup.
    pub fn find_method(self: &Rc<Self>, name: &str) -> Option<(Rc<FunctionDefStmt>, Rc<ClassValue>)> {
        if let Some(m) = self.methods.borrow().get(name) {
            return Some((m.clone(), self.clone()));
        }
        self.parent.as_ref().and_then(|p| p.find_method(name))
    }

    pub fn is_subclass_of(self: &Rc<Self>, other: &str) -> bool {
        if self.name == other {
            return true;
        }
        self.parent.as_ref().is_some_and(|p| p.is_subclass_of(other))
    }
}

#[derive(Debug)]
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub fields: RefCell<IndexMap<String, Value>>,
}

/// Runtime values produced by the tree-walking interpreter (spec §4.5).
///
/// Mirrors the teacher's `Value` enum shape (a flat tagged union with
/// `Rc`/`RefCell` for the reference types) but the tag set follows
/// `hindustani_types::Type` instead of the teacher's fixed-width integer
/// ladder, since this language has one numeric family, not four.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Bool(bool),
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<IndexMap<String, Value>>>),
    Function(Rc<FunctionValue>),
    Native(Rc<NativeFunctionValue>),
    Class(Rc<ClassValue>),
    Instance(Rc<RefCell<InstanceValue>>),
    None,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Function(_) | Value::Native(_) => "func",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::None => "none",
        }
    }

    /// Truthiness used by `agar`/`jab_tak` conditions and `aur`/`ya` operands.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::None => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(l) => !l.borrow().is_empty(),
            Value::Dict(d) => !d.borrow().is_empty(),
            _ => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{}", if *b { "sach" } else { "jhoot" }),
            Value::List(items) => {
                let rendered: Vec<String> = items.borrow().iter().map(|v| v.debug_repr()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Dict(entries) => {
                let rendered: Vec<String> = entries
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{k}: {}", v.debug_repr()))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Function(func) => write!(f, "<kaam {}>", func.name),
            Value::Native(func) => write!(f, "<native {}>", func.name),
            Value::Class(class) => write!(f, "<class {}>", class.name),
            Value::Instance(inst) => write!(f, "<{} object>", inst.borrow().class.name),
            Value::None => write!(f, "khaali"),
        }
    }
}

impl Value {
    /// `String` values print quoted when nested inside a list/dict, the way
    /// Python's `repr` differs from `str`.
    fn debug_repr(&self) -> String {
        match self {
            Value::String(s) => format!("\"{s}\""),
            other => other.to_string(),
        }
    }
}

/// Arithmetic on runtime values (spec §4.5's type-preserving integer rules).
pub trait ArithmeticOps {
    fn add(&self, other: &Self) -> Result<Value, String>;
    fn subtract(&self, other: &Self) -> Result<Value, String>;
    fn multiply(&self, other: &Self) -> Result<Value, String>;
    fn divide(&self, other: &Self) -> Result<Value, String>;
    fn modulo(&self, other: &Self) -> Result<Value, String>;
    fn negate(&self) -> Result<Value, String>;
}

impl ArithmeticOps for Value {
    fn add(&self, other: &Self) -> Result<Value, String> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            (Value::String(a), Value::String(b)) => Ok(Value::String(Rc::from(format!("{a}{b}")))),
            (Value::List(a), Value::List(b)) => {
                let mut merged = a.borrow().clone();
                merged.extend(b.borrow().iter().cloned());
                Ok(Value::List(Rc::new(RefCell::new(merged))))
            }
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                Ok(Value::Float(a.as_number().unwrap() + b.as_number().unwrap()))
            }
            _ => Err(format!("cannot add {} and {}", self.type_name(), other.type_name())),
        }
    }

    fn subtract(&self, other: &Self) -> Result<Value, String> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_sub(*b))),
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                Ok(Value::Float(a.as_number().unwrap() - b.as_number().unwrap()))
            }
            _ => Err(format!("cannot subtract {} and {}", self.type_name(), other.type_name())),
        }
    }

    fn multiply(&self, other: &Self) -> Result<Value, String> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(*b))),
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                Ok(Value::Float(a.as_number().unwrap() * b.as_number().unwrap()))
            }
            _ => Err(format!("cannot multiply {} and {}", self.type_name(), other.type_name())),
        }
    }

    fn divide(&self, other: &Self) -> Result<Value, String> {
        match (self, other) {
            (Value::Int(_), Value::Int(b)) if *b == 0 => Err("division by zero".to_string()),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a / b)),
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                let divisor = b.as_number().unwrap();
                if divisor == 0.0 {
                    Err("division by zero".to_string())
                } else {
                    Ok(Value::Float(a.as_number().unwrap() / divisor))
                }
            }
            _ => Err(format!("cannot divide {} and {}", self.type_name(), other.type_name())),
        }
    }

    fn modulo(&self, other: &Self) -> Result<Value, String> {
        match (self, other) {
            (Value::Int(_), Value::Int(b)) if *b == 0 => Err("division by zero".to_string()),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a % b)),
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => {
                let divisor = b.as_number().unwrap();
                if divisor == 0.0 {
                    Err("division by zero".to_string())
                } else {
                    Ok(Value::Float(a.as_number().unwrap() % divisor))
                }
            }
            _ => Err(format!("cannot modulo {} and {}", self.type_name(), other.type_name())),
        }
    }

    fn negate(&self) -> Result<Value, String> {
        match self {
            Value::Int(i) => Ok(Value::Int(-i)),
            Value::Float(f) => Ok(Value::Float(-f)),
            other => Err(format!("cannot negate {}", other.type_name())),
        }
    }
}

/// Equality and ordering on runtime values.
pub trait ComparisonOps {
    fn value_eq(&self, other: &Self) -> bool;
    fn compare(&self, other: &Self) -> Result<std::cmp::Ordering, String>;
}

impl ComparisonOps for Value {
    fn value_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => a.as_number() == b.as_number(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::List(a), Value::List(b)) => {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.value_eq(y))
            }
            _ => false,
        }
    }

    fn compare(&self, other: &Self) -> Result<std::cmp::Ordering, String> {
        match (self, other) {
            (a, b) if a.as_number().is_some() && b.as_number().is_some() => a
                .as_number()
                .unwrap()
                .partial_cmp(&b.as_number().unwrap())
                .ok_or_else(|| "cannot order NaN".to_string()),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => Err(format!("cannot compare {} with {}", self.type_name(), other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_addition_stays_integer() {
        assert!(matches!(Value::Int(2).add(&Value::Int(3)).unwrap(), Value::Int(5)));
    }

    #[test]
    fn mixed_addition_promotes_to_float() {
        assert!(matches!(Value::Int(2).add(&Value::Float(0.5)).unwrap(), Value::Float(f) if f == 2.5));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(Value::Int(1).divide(&Value::Int(0)).is_err());
    }

    #[test]
    fn string_concatenation() {
        let result = Value::String(Rc::from("a")).add(&Value::String(Rc::from("b"))).unwrap();
        assert_eq!(result.to_string(), "ab");
    }

    #[test]
    fn list_equality_is_structural() {
        let a = Value::List(Rc::new(RefCell::new(vec![Value::Int(1), Value::Int(2)])));
        let b = Value::List(Rc::new(RefCell::new(vec![Value::Int(1), Value::Int(2)])));
        assert!(a.value_eq(&b));
    }

    #[test]
    fn falsy_values() {
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::String(Rc::from("")).is_truthy());
        assert!(Value::String(Rc::from("x")).is_truthy());
    }
}
