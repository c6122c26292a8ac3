use crate::language::LocalizedMessage;
use hindustani_ir::SourceLocation;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct TypeCheckError {
    pub message: LocalizedMessage,
    pub location: SourceLocation,
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct UndefinedNameError {
    pub name: String,
    pub message: LocalizedMessage,
    pub location: SourceLocation,
    /// Edit-distance suggestions, at most 3, closest first (spec §7).
    pub suggestions: Vec<String>,
}

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct RedefinitionError {
    pub name: String,
    pub message: LocalizedMessage,
    pub location: SourceLocation,
    pub previous_location: SourceLocation,
}

/// Static errors found by the analyzer. Unlike the lexer/parser, the
/// analyzer always completes the full walk before returning its error list
/// (spec §7) — there is no early-exit batching type, just a `Vec<SemanticError>`.
#[derive(Debug, Error, Clone)]
pub enum SemanticError {
    #[error(transparent)]
    TypeCheck(#[from] TypeCheckError),
    #[error(transparent)]
    UndefinedName(#[from] UndefinedNameError),
    #[error(transparent)]
    Redefinition(#[from] RedefinitionError),
    #[error("{message}")]
    Other {
        message: LocalizedMessage,
        location: SourceLocation,
    },
}

impl SemanticError {
    pub fn other(message: LocalizedMessage, location: SourceLocation) -> Self {
        SemanticError::Other { message, location }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticError::TypeCheck(e) => e.location,
            SemanticError::UndefinedName(e) => e.location,
            SemanticError::Redefinition(e) => e.location,
            SemanticError::Other { location, .. } => *location,
        }
    }

    pub fn message(&self) -> &LocalizedMessage {
        match self {
            SemanticError::TypeCheck(e) => &e.message,
            SemanticError::UndefinedName(e) => &e.message,
            SemanticError::Redefinition(e) => &e.message,
            SemanticError::Other { message, .. } => message,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SemanticError::TypeCheck(_) => "TypeCheckError",
            SemanticError::UndefinedName(_) => "UndefinedNameError",
            SemanticError::Redefinition(_) => "RedefinitionError",
            SemanticError::Other { .. } => "SemanticError",
        }
    }
}
