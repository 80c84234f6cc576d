//! pyllow-lex - Lexical Analyzer
//!
//! The first pipeline stage: source text in, flat token stream out.
//!
//! The scanner is a single forward pass over the characters with one
//! pending lexeme and a handful of per-run flags (string, comment,
//! decimal, could-be-number). Boundaries are decided by membership in
//! the character table: a pending lexeme is flushed as an identifier the
//! moment the lookahead stops extending a known symbol, numbers emit at
//! their last digit, and symbols emit with maximal munch (`<=` wins over
//! `<` followed by `=`).
//!
//! Every token carries the `(line, column, path)` position the stream
//! reported at emission. The scan input always ends with the `" EOF "`
//! sentinel, so the token stream always ends with a terminal `Eof`
//! token.
//!
//! ```
//! use pyllow_lex::lex;
//! use pyllow_util::TokenKind;
//!
//! let tokens = lex("x = 1 + 2", "demo.plw");
//! assert_eq!(tokens.first().map(|t| t.kind), Some(TokenKind::Id));
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
//! ```

pub mod lexer;
pub mod stream;
pub mod token;

pub use lexer::lex;
pub use stream::RawStream;
pub use token::Token;
