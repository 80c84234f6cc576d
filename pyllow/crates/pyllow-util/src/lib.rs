//! pyllow-util - Core Utilities and Foundation Types
//!
//! This crate provides the foundation the rest of the Pyllow pipeline is
//! built on:
//!
//! - [`chardef`] - the canonical character table: symbols, keywords,
//!   operator precedence and associativity.
//! - [`position`] - `(line, column, path)` source locations attached to
//!   every token, AST node, value and error.
//! - [`error`] - the structured [`PyllowError`] family and the template
//!   renderer used by the driver.
//! - [`stream`] - a generic bidirectional cursor over an indexed
//!   sequence, specialized downstream for characters and tokens.
//! - [`value`] - the runtime value model (`Int`/`Float`/`Bool`) with its
//!   arithmetic, comparison and coercion rules.
//!
//! Everything here is deliberately dependency-light; the pipeline crates
//! (`pyllow-lex`, `pyllow-par`, `pyllow-eval`, `pyllow-drv`) all sit on
//! top of this one.

pub mod chardef;
pub mod error;
pub mod position;
pub mod stream;
pub mod value;

pub use chardef::{NumKind, SymbolTable, TokenKind};
pub use error::{ErrorKind, PyllowError, PyllowResult};
pub use position::Position;
pub use stream::Stream;
pub use value::{Value, ValueKind};

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
