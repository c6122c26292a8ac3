use std::cell::RefCell;
use std::rc::Rc;

use crate::value::{NativeFn, Value};

/// Looks up a native function by name, matching the call-site-usable subset
/// of `hindustani_shared::compilation_context::BUILTINS` (the print/input
/// keywords are statements, not callables, so they are not in this table).
pub fn lookup(name: &str) -> Option<(NativeFn, Option<usize>)> {
    let entry: (NativeFn, Option<usize>) = match name {
        "length" => (length, Some(1)),
        "append" => (append, Some(2)),
        "pop" => (pop, Some(1)),
        "insert" => (insert, Some(3)),
        "sort" => (sort, Some(1)),
        "reverse" => (reverse, Some(1)),
        "sum" => (sum, Some(1)),
        "min" => (min, None),
        "max" => (max, None),
        "upper" => (upper, Some(1)),
        "lower" => (lower, Some(1)),
        "split" => (split, Some(2)),
        "join" => (join, Some(2)),
        "replace" => (replace, Some(3)),
        "str" => (to_str, Some(1)),
        "int" => (to_int, Some(1)),
        "float" => (to_float, Some(1)),
        "bool" => (to_bool, Some(1)),
        "type" => (type_of, Some(1)),
        "abs" => (abs, Some(1)),
        "round" => (round, Some(1)),
        "range" => (range, None),
        _ => return None,
    };
    Some(entry)
}

fn length(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => Ok(Value::Int(l.borrow().len() as i64)),
        Value::Dict(d) => Ok(Value::Int(d.borrow().len() as i64)),
        Value::String(s) => Ok(Value::Int(s.chars().count() as i64)),
        other => Err(format!("length() expects a list, dict, or string, found {}", other.type_name())),
    }
}

fn append(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => {
            l.borrow_mut().push(args[1].clone());
            Ok(Value::None)
        }
        other => Err(format!("append() expects a list, found {}", other.type_name())),
    }
}

fn pop(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => l.borrow_mut().pop().ok_or_else(|| "pop() on empty list".to_string()),
        other => Err(format!("pop() expects a list, found {}", other.type_name())),
    }
}

fn insert(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => {
            let index = expect_index(&args[1])?;
            let mut list = l.borrow_mut();
            if index > list.len() {
                return Err(format!("insert() index {index} out of bounds"));
            }
            list.insert(index, args[2].clone());
            Ok(Value::None)
        }
        other => Err(format!("insert() expects a list, found {}", other.type_name())),
    }
}

fn sort(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => {
            let mut items = l.borrow().clone();
            items.sort_by(|a, b| {
                use crate::value::ComparisonOps;
                a.compare(b).unwrap_or(std::cmp::Ordering::Equal)
            });
            Ok(Value::List(Rc::new(RefCell::new(items))))
        }
        other => Err(format!("sort() expects a list, found {}", other.type_name())),
    }
}

fn reverse(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => {
            let mut items = l.borrow().clone();
            items.reverse();
            Ok(Value::List(Rc::new(RefCell::new(items))))
        }
        other => Err(format!("reverse() expects a list, found {}", other.type_name())),
    }
}

fn sum(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::List(l) => {
            let mut total = 0.0;
            let mut all_int = true;
            let mut int_total: i64 = 0;
            for item in l.borrow().iter() {
                match item {
                    Value::Int(i) => {
                        int_total += i;
                        total += *i as f64;
                    }
                    Value::Float(f) => {
                        all_int = false;
                        total += f;
                    }
                    other => return Err(format!("sum() expects a list of numbers, found {}", other.type_name())),
                }
            }
            Ok(if all_int { Value::Int(int_total) } else { Value::Float(total) })
        }
        other => Err(format!("sum() expects a list, found {}", other.type_name())),
    }
}

fn min(args: &[Value]) -> Result<Value, String> {
    extremum(args, std::cmp::Ordering::Less)
}

fn max(args: &[Value]) -> Result<Value, String> {
    extremum(args, std::cmp::Ordering::Greater)
}

fn extremum(args: &[Value], wanted: std::cmp::Ordering) -> Result<Value, String> {
    use crate::value::ComparisonOps;
    let items: Vec<Value> = if args.len() == 1 {
        match &args[0] {
            Value::List(l) => l.borrow().clone(),
            other => return Err(format!("expects a list or multiple arguments, found {}", other.type_name())),
        }
    } else {
        args.to_vec()
    };
    let mut iter = items.into_iter();
    let mut best = iter.next().ok_or_else(|| "expects at least one value".to_string())?;
    for item in iter {
        if item.compare(&best)? == wanted {
            best = item;
        }
    }
    Ok(best)
}

fn upper(args: &[Value]) -> Result<Value, String> {
    expect_string(&args[0]).map(|s| Value::String(Rc::from(s.to_uppercase())))
}

fn lower(args: &[Value]) -> Result<Value, String> {
    expect_string(&args[0]).map(|s| Value::String(Rc::from(s.to_lowercase())))
}

fn split(args: &[Value]) -> Result<Value, String> {
    let s = expect_string(&args[0])?;
    let sep = expect_string(&args[1])?;
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::String(Rc::from(c.to_string()))).collect()
    } else {
        s.split(sep.as_ref()).map(|p| Value::String(Rc::from(p))).collect()
    };
    Ok(Value::List(Rc::new(RefCell::new(parts))))
}

fn join(args: &[Value]) -> Result<Value, String> {
    let sep = expect_string(&args[1])?;
    match &args[0] {
        Value::List(l) => {
            let parts: Vec<String> = l.borrow().iter().map(|v| v.to_string()).collect();
            Ok(Value::String(Rc::from(parts.join(sep.as_ref()))))
        }
        other => Err(format!("join() expects a list, found {}", other.type_name())),
    }
}

fn replace(args: &[Value]) -> Result<Value, String> {
    let s = expect_string(&args[0])?;
    let from = expect_string(&args[1])?;
    let to = expect_string(&args[2])?;
    Ok(Value::String(Rc::from(s.replace(from.as_ref(), &to))))
}

fn to_str(args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(Rc::from(args[0].to_string())))
}

fn to_int(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(f) => Ok(Value::Int(*f as i64)),
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| format!("cannot convert '{s}' to int")),
        other => Err(format!("cannot convert {} to int", other.type_name())),
    }
}

fn to_float(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| format!("cannot convert '{s}' to float")),
        other => Err(format!("cannot convert {} to float", other.type_name())),
    }
}

fn to_bool(args: &[Value]) -> Result<Value, String> {
    Ok(Value::Bool(args[0].is_truthy()))
}

fn type_of(args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(Rc::from(args[0].type_name())))
}

fn abs(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Int(i) => Ok(Value::Int(i.abs())),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        other => Err(format!("abs() expects a number, found {}", other.type_name())),
    }
}

fn round(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Int(i) => Ok(Value::Int(*i)),
        Value::Float(f) => Ok(Value::Int(f.round() as i64)),
        other => Err(format!("round() expects a number, found {}", other.type_name())),
    }
}

fn range(args: &[Value]) -> Result<Value, String> {
    let nums: Result<Vec<i64>, String> = args
        .iter()
        .map(|v| match v {
            Value::Int(i) => Ok(*i),
            other => Err(format!("range() expects integers, found {}", other.type_name())),
        })
        .collect();
    let nums = nums?;
    let (start, end, step) = match nums.as_slice() {
        [end] => (0, *end, 1),
        [start, end] => (*start, *end, 1),
        [start, end, step] => (*start, *end, *step),
        _ => return Err("range() expects 1 to 3 arguments".to_string()),
    };
    if step == 0 {
        return Err("range() step cannot be zero".to_string());
    }
    let mut values = Vec::new();
    let mut i = start;
    while (step > 0 && i < end) || (step < 0 && i > end) {
        values.push(Value::Int(i));
        i += step;
    }
    Ok(Value::List(Rc::new(RefCell::new(values))))
}

fn expect_string(value: &Value) -> Result<Rc<str>, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(format!("expected a string, found {}", other.type_name())),
    }
}

fn expect_index(value: &Value) -> Result<usize, String> {
    match value {
        Value::Int(i) if *i >= 0 => Ok(*i as usize),
        other => Err(format!("expected a non-negative integer index, found {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Value {
        let (func, _) = lookup(name).unwrap();
        func(args).unwrap()
    }

    #[test]
    fn length_of_string_counts_chars() {
        assert!(matches!(call("length", &[Value::String(Rc::from("hindi"))]), Value::Int(5)));
    }

    #[test]
    fn range_with_single_argument() {
        let result = call("range", &[Value::Int(3)]);
        assert_eq!(result.to_string(), "[0, 1, 2]");
    }

    #[test]
    fn min_over_varargs() {
        assert!(matches!(call("min", &[Value::Int(5), Value::Int(2), Value::Int(9)]), Value::Int(2)));
    }

    #[test]
    fn join_list_of_strings() {
        let list = Value::List(Rc::new(RefCell::new(vec![
            Value::String(Rc::from("a")),
            Value::String(Rc::from("b")),
        ])));
        let result = call("join", &[list, Value::String(Rc::from(", "))]);
        assert_eq!(result.to_string(), "a, b");
    }

    #[test]
    fn sort_orders_numbers() {
        let list = Value::List(Rc::new(RefCell::new(vec![Value::Int(3), Value::Int(1), Value::Int(2)])));
        let result = call("sort", &[list]);
        assert_eq!(result.to_string(), "[1, 2, 3]");
    }
}
