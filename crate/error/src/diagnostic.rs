use crate::language::ErrorLanguage;
use crate::lexer_error::LexerErrorCollection;
use crate::parser_error::ParserErrorCollection;
use crate::runtime_error::RuntimeError;
use crate::semantic_error::SemanticError;
use colored::Colorize;
use hindustani_ir::SourceLocation;
use std::fmt;

/// A single rendered diagnostic line, in the spec's fixed wire format:
/// `[ErrorKind] Line L, Col C: message`. Suggestions ride alongside for the
/// richer terminal report but never appear inside this line itself.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: &'static str,
    pub location: SourceLocation,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Line {}, Col {}: {}",
            self.kind, self.location.line, self.location.column, self.message
        )
    }
}

/// Accumulates diagnostics across phases and renders them consistently.
///
/// Every phase funnels its error collection through here rather than
/// `eprintln!`-ing directly, so the report format (and the active
/// `ErrorLanguage`) stays in one place.
pub struct DiagnosticEngine {
    diagnostics: Vec<Diagnostic>,
    language: ErrorLanguage,
}

impl DiagnosticEngine {
    pub fn new(language: ErrorLanguage) -> Self {
        DiagnosticEngine {
            diagnostics: Vec::new(),
            language,
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend_lexer_errors(&mut self, errors: &LexerErrorCollection) {
        for e in &errors.errors {
            self.diagnostics.push(Diagnostic {
                kind: "LexerError",
                location: e.location,
                message: e.message.render(self.language),
                suggestions: Vec::new(),
            });
        }
    }

    pub fn extend_parser_errors(&mut self, errors: &ParserErrorCollection) {
        for e in &errors.errors {
            self.diagnostics.push(Diagnostic {
                kind: "ParserError",
                location: e.location,
                message: e.message.render(self.language),
                suggestions: Vec::new(),
            });
        }
    }

    pub fn extend_semantic_errors(&mut self, errors: &[SemanticError]) {
        for e in errors {
            let suggestions = match e {
                SemanticError::UndefinedName(u) => u.suggestions.clone(),
                _ => Vec::new(),
            };
            self.diagnostics.push(Diagnostic {
                kind: e.kind_name(),
                location: e.location(),
                message: e.message().render(self.language),
                suggestions,
            });
        }
    }

    pub fn push_runtime_error(&mut self, error: &RuntimeError) {
        self.diagnostics.push(Diagnostic {
            kind: error.kind_name(),
            location: error.location(),
            message: error.message().render(self.language),
            suggestions: Vec::new(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Prints every accumulated diagnostic to stderr, one `[Kind] Line L, Col
    /// C: message` line per diagnostic plus a colorized source snippet and
    /// any "did you mean?" suggestions underneath.
    pub fn report_all(&self, source: &str) {
        let lines: Vec<&str> = source.lines().collect();
        for d in &self.diagnostics {
            eprintln!("{} {}", "error".red().bold(), d);
            if let Some(text) = lines.get(d.location.line.saturating_sub(1)) {
                eprintln!("  {} line {}", "-->".cyan(), d.location.line);
                eprintln!("  {}", text);
                let marker = " ".repeat(d.location.column.saturating_sub(1)) + "^";
                eprintln!("  {}", marker.red().bold());
            }
            for s in &d.suggestions {
                eprintln!("  {} did you mean '{}'?", "help".green().bold(), s);
            }
        }
    }
}
