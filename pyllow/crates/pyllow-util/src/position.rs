//! Source positions.
//!
//! A [`Position`] is the `(line, column, path)` triple attached to every
//! token and AST node. It surfaces unchanged in every error so the driver
//! can point at the offending source line.

use std::fmt;
use std::sync::Arc;

/// Default origin used when no path is supplied (e.g. shell input).
pub const DEFAULT_PATH: &str = "_main_";

/// A source location: 1-based line, 0-based column, and the origin path.
///
/// The path is shared behind an `Arc` so positions stay cheap to clone
/// even though every token and node carries one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-based).
    pub line: u32,

    /// Column number (0-based).
    pub column: u32,

    /// Origin path, opaque to the core.
    pub path: Arc<str>,
}

impl Position {
    /// Create a new position.
    pub fn new(line: u32, column: u32, path: impl Into<Arc<str>>) -> Self {
        Self {
            line,
            column,
            path: path.into(),
        }
    }

    /// A placeholder position for tests and synthesized nodes.
    pub fn dummy() -> Self {
        Self::new(1, 0, DEFAULT_PATH)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_position() {
        let position = Position::new(3, 7, "test.plw");
        assert_eq!(position.line, 3);
        assert_eq!(position.column, 7);
        assert_eq!(&*position.path, "test.plw");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Position::new(1, 0, "test");
        let b = Position::new(1, 0, "test");
        let c = Position::new(1, 1, "test");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let position = Position::new(2, 5, "main.plw");
        assert_eq!(position.to_string(), "main.plw:2:5");
    }
}
