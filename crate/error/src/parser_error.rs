use crate::language::LocalizedMessage;
use hindustani_ir::SourceLocation;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct ParserError {
    pub message: LocalizedMessage,
    pub location: SourceLocation,
}

impl ParserError {
    pub fn expected_token(expected: &str, found: &str, location: SourceLocation) -> Self {
        ParserError {
            message: LocalizedMessage::new(
                format!("expected '{expected}', found '{found}'"),
                format!("'{expected}' अपेक्षित था, '{found}' मिला"),
            ),
            location,
        }
    }

    pub fn missing_token(expected: &str, location: SourceLocation) -> Self {
        ParserError {
            message: LocalizedMessage::new(
                format!("missing '{expected}'"),
                format!("'{expected}' अनुपस्थित है"),
            ),
            location,
        }
    }

    pub fn invalid_syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        let msg = message.into();
        ParserError {
            message: LocalizedMessage::new(msg.clone(), format!("अमान्य वाक्य रचना: {msg}")),
            location,
        }
    }
}

/// A batch of every syntax error found in one parse; the parser
/// synchronizes past each error and keeps parsing (spec §4.2/§7).
#[derive(Debug, Error, Clone, Default)]
#[error("{} syntax error(s)", errors.len())]
pub struct ParserErrorCollection {
    pub errors: Vec<ParserError>,
}

impl ParserErrorCollection {
    pub fn push(&mut self, error: ParserError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
