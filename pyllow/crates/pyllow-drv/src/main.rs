//! The `pyllow` binary.
//!
//! `pyllow program.plw` runs a source file; with no file the
//! interactive shell starts. `--emit-tokens` / `--emit-ast` stop the
//! pipeline early and print the intermediate form.

use anyhow::Context;
use clap::Parser;
use pyllow_drv::{repl, run_source, EmitStage};
use pyllow_eval::Interpreter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interpreter for the Pyllow language.
#[derive(Parser, Debug)]
#[command(name = "pyllow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the Pyllow language", long_about = None)]
struct Cli {
    /// Source file to run; the interactive shell starts when omitted
    file: Option<PathBuf>,

    /// Print the token stream and exit
    #[arg(long, conflicts_with = "emit_ast")]
    emit_tokens: bool,

    /// Print the parse tree and exit
    #[arg(long)]
    emit_ast: bool,

    /// Enable verbose phase logging
    #[arg(short, long, env = "PYLLOW_VERBOSE")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(file) = &cli.file else {
        return repl::run_shell();
    };

    let source = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let origin = file.display().to_string();

    let stage = if cli.emit_tokens {
        EmitStage::Tokens
    } else if cli.emit_ast {
        EmitStage::Ast
    } else {
        EmitStage::Execute
    };

    let mut interpreter = Interpreter::new();
    if !run_source(&source, &origin, stage, &mut interpreter) {
        std::process::exit(1);
    }
    Ok(())
}
