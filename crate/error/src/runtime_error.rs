use crate::language::LocalizedMessage;
use hindustani_ir::SourceLocation;
use thiserror::Error;

macro_rules! simple_runtime_error {
    ($name:ident) => {
        #[derive(Debug, Error, Clone)]
        #[error("{message}")]
        pub struct $name {
            pub message: LocalizedMessage,
            pub location: SourceLocation,
        }
    };
}

simple_runtime_error!(TypeError);
simple_runtime_error!(NameError);
simple_runtime_error!(DivisionByZeroError);
simple_runtime_error!(IndexError);
simple_runtime_error!(AttributeError);
simple_runtime_error!(FileIOError);
simple_runtime_error!(ImportError);

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct RecursionError {
    pub message: LocalizedMessage,
    pub location: SourceLocation,
    pub depth: usize,
}

impl RecursionError {
    pub fn depth_exceeded(depth: usize, max: usize, location: SourceLocation) -> Self {
        RecursionError {
            message: LocalizedMessage::new(
                format!("recursion depth {depth} exceeded limit of {max}"),
                format!("पुनरावृत्ति गहराई {depth} सीमा {max} से अधिक"),
            ),
            location,
            depth,
        }
    }
}

/// A value thrown by user code via `uchalo`, rendered as its runtime string
/// form once it reaches a diagnostic boundary (uncaught at top level).
#[derive(Debug, Error, Clone)]
#[error("uncaught exception: {value}")]
pub struct UserException {
    pub value: String,
    pub location: SourceLocation,
}

/// Errors raised while executing a program that already passed semantic
/// analysis. The interpreter halts on the first one unless a user-level
/// `koshish`/`pakad` catches it (spec §7) — there is no batching type here.
#[derive(Debug, Error, Clone)]
pub enum RuntimeError {
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZeroError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error(transparent)]
    Recursion(#[from] RecursionError),
    #[error(transparent)]
    FileIO(#[from] FileIOError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    User(#[from] UserException),
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::Type(e) => e.location,
            RuntimeError::Name(e) => e.location,
            RuntimeError::DivisionByZero(e) => e.location,
            RuntimeError::Index(e) => e.location,
            RuntimeError::Attribute(e) => e.location,
            RuntimeError::Recursion(e) => e.location,
            RuntimeError::FileIO(e) => e.location,
            RuntimeError::Import(e) => e.location,
            RuntimeError::User(e) => e.location,
        }
    }

    pub fn message(&self) -> LocalizedMessage {
        match self {
            RuntimeError::Type(e) => e.message.clone(),
            RuntimeError::Name(e) => e.message.clone(),
            RuntimeError::DivisionByZero(e) => e.message.clone(),
            RuntimeError::Index(e) => e.message.clone(),
            RuntimeError::Attribute(e) => e.message.clone(),
            RuntimeError::Recursion(e) => e.message.clone(),
            RuntimeError::FileIO(e) => e.message.clone(),
            RuntimeError::Import(e) => e.message.clone(),
            RuntimeError::User(e) => LocalizedMessage::new(
                format!("uncaught exception: {}", e.value),
                format!("अनियंत्रित अपवाद: {}", e.value),
            ),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeError::Type(_) => "TypeError",
            RuntimeError::Name(_) => "NameError",
            RuntimeError::DivisionByZero(_) => "DivisionByZeroError",
            RuntimeError::Index(_) => "IndexError",
            RuntimeError::Attribute(_) => "AttributeError",
            RuntimeError::Recursion(_) => "RecursionError",
            RuntimeError::FileIO(_) => "FileIOError",
            RuntimeError::Import(_) => "ImportError",
            RuntimeError::User(_) => "UserException",
        }
    }
}
