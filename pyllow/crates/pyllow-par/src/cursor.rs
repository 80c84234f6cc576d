//! Reversible cursor over the token stream.
//!
//! The parser backs up a few tokens in places (assignment and call
//! lookahead), so the cursor is just an index into a vector, cheap to
//! rewind. `current` is the last consumed token; `peek_next` is the next
//! unconsumed one.

use pyllow_lex::Token;
use pyllow_util::{Position, Stream};

/// Token cursor for the parser.
pub struct TokenStream {
    inner: Stream<Token>,
}

impl TokenStream {
    /// Create a cursor positioned before the first token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            inner: Stream::new(tokens),
        }
    }

    /// The last consumed token.
    pub fn current(&self) -> Option<&Token> {
        self.inner.current()
    }

    /// Consume and return the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Token> {
        self.inner.next()
    }

    /// Rewind `n` tokens.
    pub fn prev(&mut self, n: usize) -> Option<&Token> {
        self.inner.prev(n)
    }

    /// Observe the next unconsumed token.
    pub fn peek_next(&self) -> Option<&Token> {
        self.inner.peek_next()
    }

    /// Observe the token `n` positions behind the current one.
    pub fn peek_prev(&self, n: usize) -> Option<&Token> {
        self.inner.peek_prev(n)
    }

    /// True while tokens remain past the cursor.
    pub fn is_not_finished(&self) -> bool {
        self.inner.is_not_finished()
    }

    /// Position of the next unconsumed token, falling back to the
    /// current one at the end of the stream.
    pub fn lookahead_position(&self) -> Position {
        self.peek_next()
            .or_else(|| self.current())
            .map(|t| t.position.clone())
            .unwrap_or_else(Position::dummy)
    }

    /// Position of the last consumed token. This is the position
    /// `expect` reports: when a required token is missing, the error
    /// points at the token *before* the gap.
    pub fn previous_position(&self) -> Position {
        self.current()
            .map(|t| t.position.clone())
            .unwrap_or_else(Position::dummy)
    }
}
