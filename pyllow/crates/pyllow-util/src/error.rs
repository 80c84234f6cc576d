//! Core error types for the Pyllow pipeline.
//!
//! A single structured family, [`PyllowError`], covers every failure the
//! pipeline can report: syntax errors from the parser, name/type/value
//! errors and division by zero from the evaluator. Each error carries a
//! message and the [`Position`] it occurred at; there is no recovery, the
//! first error aborts the current parse or execution and propagates to
//! the driver boundary where [`render`] formats it against the source.

use crate::Position;
use std::fmt;
use thiserror::Error;

/// The category of a pipeline error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected or missing token, unbalanced delimiters.
    Syntax,
    /// Identifier lookup reached the root without a binding.
    Name,
    /// Operator applied to operands that do not support it.
    Type,
    /// Literal lexeme cannot be converted to its declared kind.
    Value,
    /// Right operand of `/` is numerically zero.
    ZeroDivision,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Value => "ValueError",
            ErrorKind::ZeroDivision => "ZeroDivisionError",
        };
        write!(f, "{name}")
    }
}

/// A structured error carrying its kind, message and source position.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind}: {message} ({position})")]
pub struct PyllowError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl PyllowError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }

    /// A syntax error.
    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Syntax, message, position)
    }

    /// A name error.
    pub fn name(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Name, message, position)
    }

    /// A type error.
    pub fn type_error(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Type, message, position)
    }

    /// A value error.
    pub fn value(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::Value, message, position)
    }

    /// A zero-division error.
    pub fn zero_division(message: impl Into<String>, position: Position) -> Self {
        Self::new(ErrorKind::ZeroDivision, message, position)
    }
}

/// Result type alias used throughout the pipeline.
pub type PyllowResult<T> = std::result::Result<T, PyllowError>;

/// Render `err` against its originating source text:
///
/// ```text
///
/// <path>
/// <ErrorKind> occurred on line <line>
/// <source line text>
/// <col spaces>^
/// <message>
/// ```
///
/// Returns the formatted text instead of printing so callers (and tests)
/// decide what to do with it.
pub fn render(err: &PyllowError, source: &str) -> String {
    let line_index = err.position.line.saturating_sub(1) as usize;
    let line_text = source.lines().nth(line_index).unwrap_or("");
    format!(
        "\n{path}\n{kind} occurred on line {line}\n{line_text}\n{caret}^\n{message}\n",
        path = err.position.path,
        kind = err.kind,
        line = err.position.line,
        line_text = line_text,
        caret = " ".repeat(err.position.column as usize),
        message = err.message,
    )
}
