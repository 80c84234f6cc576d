//! pyllow-drv - Pipeline Driver
//!
//! Wires the three stages together: source text → tokens → tree →
//! execution. Data flows strictly forward; the first error aborts the
//! run and is formatted against the source by [`format_error`].
//!
//! ```text
//! Source (.plw)
//!      │
//!      ▼
//!  [pyllow-lex]  ──▶ token stream          (--emit-tokens stops here)
//!      │
//!      ▼
//!  [pyllow-par]  ──▶ arena AST             (--emit-ast stops here)
//!      │
//!      ▼
//!  [pyllow-eval] ──▶ values + scope effects
//! ```
//!
//! The driver owns no interpreter state itself; callers hold the
//! [`Interpreter`] so the interactive shell can keep its global scope
//! across submissions.

pub mod repl;

use pyllow_eval::Interpreter;
use pyllow_lex::{lex, Token};
use pyllow_par::{Ast, Parser};
use pyllow_util::{error, PyllowError, PyllowResult, Value};
use tracing::debug;

/// What stage of the pipeline to stop after.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmitStage {
    /// Lex only and print the token stream.
    Tokens,
    /// Parse only and print the tree.
    Ast,
    /// Run the whole pipeline.
    #[default]
    Execute,
}

/// Lex `source` into tokens.
pub fn tokenize(source: &str, path: &str) -> Vec<Token> {
    debug!(path, "lexing");
    lex(source, path)
}

/// Lex and parse `source` into a tree.
pub fn parse_source(source: &str, path: &str) -> PyllowResult<Ast> {
    let tokens = tokenize(source, path);
    debug!(path, tokens = tokens.len(), "parsing");
    Parser::new(tokens).parse()
}

/// Run the whole pipeline against `interpreter`, returning the executed
/// tree and the top-level expression results.
pub fn execute_source(
    source: &str,
    path: &str,
    interpreter: &mut Interpreter,
) -> PyllowResult<(Ast, Vec<Value>)> {
    let mut ast = parse_source(source, path)?;
    debug!(path, nodes = ast.len(), "executing");
    let values = interpreter.execute(&mut ast)?;
    Ok((ast, values))
}

/// Format `err` against the source it came from:
///
/// ```text
/// <path>
/// <ErrorKind> occurred on line <line>
/// <source line text>
/// <col spaces>^
/// <message>
/// ```
pub fn format_error(err: &PyllowError, source: &str) -> String {
    error::render(err, source)
}

/// Run `source` up to `stage`, printing stage output or a formatted
/// error to stdout. Returns false when the run failed.
pub fn run_source(
    source: &str,
    path: &str,
    stage: EmitStage,
    interpreter: &mut Interpreter,
) -> bool {
    match stage {
        EmitStage::Tokens => {
            for token in tokenize(source, path) {
                println!("{token}");
            }
            true
        }
        EmitStage::Ast => match parse_source(source, path) {
            Ok(ast) => {
                print!("{}", ast.dump());
                true
            }
            Err(err) => {
                print!("{}", format_error(&err, source));
                false
            }
        },
        EmitStage::Execute => match execute_source(source, path, interpreter) {
            Ok((_, values)) => {
                for value in values {
                    println!("{value}");
                }
                true
            }
            Err(err) => {
                print!("{}", format_error(&err, source));
                false
            }
        },
    }
}
