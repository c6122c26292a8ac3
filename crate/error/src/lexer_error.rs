use crate::language::LocalizedMessage;
use hindustani_ir::SourceLocation;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct LexerError {
    pub message: LocalizedMessage,
    pub location: SourceLocation,
}

impl LexerError {
    pub fn unexpected_character(ch: char, location: SourceLocation) -> Self {
        LexerError {
            message: LocalizedMessage::new(
                format!("unexpected character '{ch}'"),
                format!("अप्रत्याशित वर्ण '{ch}'"),
            ),
            location,
        }
    }

    pub fn unterminated_string(location: SourceLocation) -> Self {
        LexerError {
            message: LocalizedMessage::new(
                "unterminated string literal",
                "अधूरा स्ट्रिंग लिटरल",
            ),
            location,
        }
    }

    pub fn invalid_number(text: &str, location: SourceLocation) -> Self {
        LexerError {
            message: LocalizedMessage::new(
                format!("invalid number literal '{text}'"),
                format!("अमान्य संख्या '{text}'"),
            ),
            location,
        }
    }
}

/// A batch of every lexical error found in one pass; the lexer never stops
/// at the first bad character (spec §4.1/§7).
#[derive(Debug, Error, Clone, Default)]
#[error("{} lexical error(s)", errors.len())]
pub struct LexerErrorCollection {
    pub errors: Vec<LexerError>,
}

impl LexerErrorCollection {
    pub fn push(&mut self, error: LexerError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
