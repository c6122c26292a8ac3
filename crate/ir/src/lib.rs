pub mod ast;
pub mod source_location;
pub mod visitor;

#[cfg(any(test, feature = "print-ast"))]
pub mod ast_printer;

pub use ast::{
    BinaryOperator, Expression, FunctionDefStmt, LiteralValue, Program, Statement, UnaryOperator,
};
pub use source_location::SourceLocation;
pub use visitor::Visitor;
