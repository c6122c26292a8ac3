use crate::compilation_pipeline::CompilationPipeline;
use crate::exit;
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use colored::Colorize;
use hindustani_error::ErrorLanguage;
use hindustani_frontend::tokenize_safe;
use hindustani_ir::ast_printer::AstPrinter;
use std::fs;

/// Command line interface for the Hindustani language.
#[derive(ClapParser)]
#[command(
    version,
    about = "Hindustani programming language",
    long_about = "Hindustani is a small Hindi-keyword scripting language: a lexer, \
parser, semantic analyzer, 3AC IR dumper and tree-walking interpreter over one source file.",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Lang {
    English,
    Hindi,
    Bilingual,
}

impl From<Lang> for ErrorLanguage {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::English => ErrorLanguage::English,
            Lang::Hindi => ErrorLanguage::Hindi,
            Lang::Bilingual => ErrorLanguage::Bilingual,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a source file: lex, parse, analyze, then interpret if clean.
    Run {
        input: String,
        /// Language diagnostics are rendered in.
        #[arg(long, value_enum, default_value = "bilingual")]
        lang: Lang,
    },
    /// Print the token stream for a source file, one token per line.
    Tokens { input: String },
    /// Print the parsed AST in its lisp-like textual form.
    Ast { input: String },
    /// Print the 3AC IR dump for a source file, then run it as `run` would.
    Ir {
        input: String,
        #[arg(long, value_enum, default_value = "bilingual")]
        lang: Lang,
    },
}

pub fn run(cli: Cli) -> ! {
    let result = match cli.command {
        Commands::Run { input, lang } => run_file(&input, lang.into()),
        Commands::Tokens { input } => print_tokens(&input),
        Commands::Ast { input } => print_ast(&input),
        Commands::Ir { input, lang } => print_ir(&input, lang.into()),
    };
    match result {
        Ok(()) => std::process::exit(0),
        Err(code) => exit::with_code(code, ""),
    }
}

fn read_source(input: &str) -> Result<String, exit::Code> {
    fs::read_to_string(input).map_err(|e| {
        eprintln!("{}: {} ({})", "error".red().bold(), e, input);
        exit::Code::NoInput
    })
}

fn run_file(input: &str, lang: ErrorLanguage) -> Result<(), exit::Code> {
    let source = read_source(input)?;
    let output = run_pipeline_on_deep_stack(source.clone(), lang, false);
    if !output.diagnostics.is_empty() {
        output.diagnostics.report_all(&source);
        return Err(exit::Code::Software);
    }
    Ok(())
}

/// Tree-walking recursion up to `MAX_RECURSION_DEPTH` can overflow the
/// default 8MB thread stack before the interpreter's own guard trips, so the
/// pipeline (which owns the interpreter call) runs on a dedicated thread.
fn run_pipeline_on_deep_stack(
    source: String,
    lang: ErrorLanguage,
    dump_ir: bool,
) -> crate::compilation_pipeline::PipelineOutput {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(move || CompilationPipeline::new(source, lang).run(dump_ir))
        .expect("spawn interpreter thread")
        .join()
        .expect("interpreter thread panicked")
}

fn print_tokens(input: &str) -> Result<(), exit::Code> {
    let source = read_source(input)?;
    let (tokens, errors) = tokenize_safe(&source);
    for token in &tokens {
        println!("{token}");
    }
    if !errors.is_empty() {
        for e in &errors {
            eprintln!(
                "{} Line {}, Col {}: {}",
                "[LexerError]".red(),
                e.location.line,
                e.location.column,
                e.message
            );
        }
        return Err(exit::Code::Dataerr);
    }
    Ok(())
}

fn print_ast(input: &str) -> Result<(), exit::Code> {
    let source = read_source(input)?;
    let tokens = hindustani_frontend::tokenize(&source).map_err(|errors| {
        eprintln!("{errors:?}");
        exit::Code::Dataerr
    })?;
    let program = hindustani_frontend::parse(&tokens).map_err(|errors| {
        eprintln!("{errors:?}");
        exit::Code::Dataerr
    })?;
    println!("{}", AstPrinter::new().print_program(&program));
    Ok(())
}

fn print_ir(input: &str, lang: ErrorLanguage) -> Result<(), exit::Code> {
    let source = read_source(input)?;
    let output = run_pipeline_on_deep_stack(source.clone(), lang, true);
    if let Some(dump) = &output.ir_dump {
        println!("{dump}");
    }
    if !output.diagnostics.is_empty() {
        output.diagnostics.report_all(&source);
        return Err(exit::Code::Software);
    }
    Ok(())
}
