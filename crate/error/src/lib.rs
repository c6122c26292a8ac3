pub mod diagnostic;
pub mod language;
pub mod lexer_error;
pub mod parser_error;
pub mod runtime_error;
pub mod semantic_error;

pub use diagnostic::{Diagnostic, DiagnosticEngine};
pub use language::{ErrorLanguage, LocalizedMessage};
pub use lexer_error::{LexerError, LexerErrorCollection};
pub use parser_error::{ParserError, ParserErrorCollection};
pub use runtime_error::{
    AttributeError, DivisionByZeroError, FileIOError, ImportError, IndexError, NameError,
    RecursionError, RuntimeError, TypeError, UserException,
};
pub use semantic_error::{RedefinitionError, SemanticError, TypeCheckError, UndefinedNameError};
