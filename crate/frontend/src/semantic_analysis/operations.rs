use hindustani_error::SemanticError;
use hindustani_ir::{BinaryOperator, SourceLocation, UnaryOperator};
use hindustani_types::Type;

fn type_mismatch(message: impl Into<String>, hindi: impl Into<String>, location: SourceLocation) -> SemanticError {
    use hindustani_error::{LocalizedMessage, TypeCheckError};
    SemanticError::TypeCheck(TypeCheckError {
        message: LocalizedMessage::new(message, hindi),
        location,
    })
}

/// Type rules for binary operators (spec §4.3). `Any` on either side is a
/// best-effort abstain: the check is skipped and `Any` propagates.
pub fn check_binary_op(
    op: BinaryOperator,
    left: Type,
    right: Type,
    location: SourceLocation,
) -> Result<Type, SemanticError> {
    if left.is_any() || right.is_any() {
        return Ok(Type::Any);
    }

    use BinaryOperator::*;
    let is_comparison = matches!(op, Equal | NotEqual | GreaterThan | LessThan | GreaterThanOrEqual | LessThanOrEqual);
    let is_arithmetic = matches!(op, Add | Subtract | Multiply | Divide | Modulo);

    match (op, left, right) {
        (Add, Type::Number, Type::Number)
        | (Subtract, Type::Number, Type::Number)
        | (Multiply, Type::Number, Type::Number)
        | (Divide, Type::Number, Type::Number)
        | (Modulo, Type::Number, Type::Number) => Ok(Type::Number),
        (_, Type::Number, Type::Number) if is_comparison => Ok(Type::Bool),
        (Add, Type::String, Type::String) => Ok(Type::String),
        (Add, Type::List, Type::List) => Ok(Type::List),
        (And, Type::Bool, Type::Bool) | (Or, Type::Bool, Type::Bool) => Ok(Type::Bool),
        (_, Type::String, Type::String) if is_comparison => Ok(Type::Bool),
        _ if is_arithmetic || op == And || op == Or => Err(type_mismatch(
            format!("cannot apply '{op}' to {left} and {right}"),
            format!("'{op}' को {left} और {right} पर लागू नहीं किया जा सकता"),
            location,
        )),
        _ if is_comparison => {
            if left == right {
                Ok(Type::Bool)
            } else {
                Err(type_mismatch(
                    format!("cannot compare {left} with {right}"),
                    format!("{left} की तुलना {right} से नहीं की जा सकती"),
                    location,
                ))
            }
        }
        _ => Err(type_mismatch(
            format!("cannot apply '{op}' to {left} and {right}"),
            format!("'{op}' को {left} और {right} पर लागू नहीं किया जा सकता"),
            location,
        )),
    }
}

/// Type rules for unary operators (spec §4.3).
pub fn check_unary_op(op: UnaryOperator, operand: Type, location: SourceLocation) -> Result<Type, SemanticError> {
    if operand.is_any() {
        return Ok(Type::Any);
    }
    match (op, operand) {
        (UnaryOperator::Negate, Type::Number) => Ok(Type::Number),
        (UnaryOperator::Not, Type::Bool) => Ok(Type::Bool),
        (UnaryOperator::Negate, other) => Err(type_mismatch(
            format!("unary '-' requires a number, found {other}"),
            format!("एकल '-' के लिए संख्या आवश्यक है, {other} मिला"),
            location,
        )),
        (UnaryOperator::Not, other) => Err(type_mismatch(
            format!("unary 'nahi' requires a bool, found {other}"),
            format!("एकल 'nahi' के लिए बूल आवश्यक है, {other} मिला"),
            location,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_arithmetic_yields_number() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(
            check_binary_op(BinaryOperator::Add, Type::Number, Type::Number, loc).unwrap(),
            Type::Number
        );
    }

    #[test]
    fn string_multiply_is_rejected() {
        let loc = SourceLocation::new(1, 1);
        assert!(check_binary_op(BinaryOperator::Multiply, Type::String, Type::String, loc).is_err());
    }

    #[test]
    fn any_abstains_from_checking() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(
            check_binary_op(BinaryOperator::Add, Type::Any, Type::Bool, loc).unwrap(),
            Type::Any
        );
    }

    #[test]
    fn unary_negate_requires_number() {
        let loc = SourceLocation::new(1, 1);
        assert!(check_unary_op(UnaryOperator::Negate, Type::Bool, loc).is_err());
    }
}
