//! Interactive shell.
//!
//! Lines accumulate into a buffer; an empty line executes the buffer
//! against a persistent interpreter, so bindings survive between
//! submissions. Commands start with `/` on an empty buffer:
//!
//! - `/scope [name]` - print the global bindings (or one of them)
//! - `/tree` - dump the last executed tree
//! - `/help` - list commands
//! - `/exit` - leave the shell

use crate::{execute_source, format_error};
use pyllow_eval::Interpreter;
use pyllow_par::Ast;
use pyllow_util::position::DEFAULT_PATH;
use std::io::{self, BufRead, Write};

const COMMAND_PROMPT: &str = ">> ";
const INPUT_PROMPT: &str = " ~ ";

/// Run the shell until end of input or `/exit`.
pub fn run_shell() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut interpreter = Interpreter::new();
    let mut last_tree: Option<Ast> = None;
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() {
            COMMAND_PROMPT
        } else {
            INPUT_PROMPT
        };
        print!("{prompt}");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim_end();

        if buffer.is_empty() && line.starts_with('/') {
            if command(line, &interpreter, &last_tree) {
                break;
            }
            continue;
        }

        if line.is_empty() {
            if buffer.is_empty() {
                continue;
            }
            match execute_source(&buffer, DEFAULT_PATH, &mut interpreter) {
                Ok((ast, values)) => {
                    for value in values {
                        println!("{value}");
                    }
                    last_tree = Some(ast);
                }
                Err(err) => print!("{}", format_error(&err, &buffer)),
            }
            buffer.clear();
        } else {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    Ok(())
}

/// Handle one `/command` line. Returns true when the shell should exit.
fn command(line: &str, interpreter: &Interpreter, last_tree: &Option<Ast>) -> bool {
    let clean = line.trim_start_matches('/');
    let mut words = clean.split_whitespace();
    match words.next() {
        Some("scope") => match words.next() {
            Some(name) => match interpreter.globals().find(|(n, _)| *n == name) {
                Some((name, value)) => println!("{name}: {value}"),
                None => println!("{name} is not defined in global scope"),
            },
            None => {
                for (name, value) in interpreter.globals() {
                    println!("{name}: {value}");
                }
            }
        },
        Some("tree") => match last_tree {
            Some(ast) => print!("{}", ast.dump()),
            None => println!("nothing executed yet"),
        },
        Some("help") => {
            println!("/scope [name]: print global bindings");
            println!("/tree: dump the last executed tree");
            println!("/help: this list");
            println!("/exit: leave the shell");
        }
        Some("exit") | Some("quit") => return true,
        _ => println!("Invalid command"),
    }
    false
}
