use hindustani_backend::{IRGenerator, Interpreter};
use hindustani_error::{DiagnosticEngine, ErrorLanguage, LexerErrorCollection};
use hindustani_frontend::{analyze, parse, tokenize_safe};

/// Drives the five pipeline phases in the order the language spec fixes:
/// lex, parse, and analyze unconditionally; IR generation only when a dump
/// was requested; the interpreter only if nothing upstream reported an
/// error.
///
/// Each phase funnels its errors into a single [`DiagnosticEngine`] rather
/// than stopping the pipeline outright, so a source file with, say, both a
/// lexical and a later semantic error gets both reported in one run.
pub struct CompilationPipeline {
    source: String,
    diagnostics: DiagnosticEngine,
}

/// What a pipeline run produced, beyond the diagnostics every run carries.
pub struct PipelineOutput {
    pub diagnostics: DiagnosticEngine,
    pub ir_dump: Option<String>,
}

impl CompilationPipeline {
    pub fn new(source: String, language: ErrorLanguage) -> Self {
        CompilationPipeline {
            source,
            diagnostics: DiagnosticEngine::new(language),
        }
    }

    /// Runs phases 1-3 unconditionally — a lexer error does not stop the
    /// parser from running over whatever tokens resulted, nor the analyzer
    /// from running over whatever program resulted — so one pass reports
    /// every diagnostic the source has, across all three phases at once.
    /// Phase 4 only runs if `dump_ir` is set, phase 5 only if no diagnostic
    /// has been raised by then.
    pub fn run(mut self, dump_ir: bool) -> PipelineOutput {
        let (tokens, lexer_errors) = tokenize_safe(&self.source);
        if !lexer_errors.is_empty() {
            self.diagnostics.extend_lexer_errors(&LexerErrorCollection {
                errors: lexer_errors,
            });
        }

        let program = match parse(&tokens) {
            Ok(program) => program,
            Err(errors) => {
                self.diagnostics.extend_parser_errors(&errors);
                return PipelineOutput {
                    diagnostics: self.diagnostics,
                    ir_dump: None,
                };
            }
        };

        if let Err(errors) = analyze(&program) {
            self.diagnostics.extend_semantic_errors(&errors);
        }

        let ir_dump = if dump_ir {
            Some(IRGenerator::new().generate(&program).dump())
        } else {
            None
        };

        if !self.diagnostics.is_empty() {
            return PipelineOutput {
                diagnostics: self.diagnostics,
                ir_dump,
            };
        }

        let mut interpreter = Interpreter::new();
        if let Err(err) = interpreter.run(&program) {
            self.diagnostics.push_runtime_error(&err);
        }

        PipelineOutput {
            diagnostics: self.diagnostics,
            ir_dump,
        }
    }
}
