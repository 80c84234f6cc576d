//! Character table - canonical symbol and keyword definitions.
//!
//! This module is the single source of truth for the lexical surface of
//! the language: which strings are symbols, which token kind each one
//! maps to, how tightly each operator binds, and which operators
//! associate to the right.
//!
//! # Precedence (higher binds tighter)
//!
//! | Operators | Precedence |
//! |-----------|------------|
//! | `\|` | 2 |
//! | `&` | 3 |
//! | `!` | 4 |
//! | `<` `>` `<=` `>=` `==` `!=` | 7 |
//! | `+` `-` | 10 |
//! | `*` `/` | 20 |
//! | `^` | 25 |
//! | `.` | 30 |
//!
//! Right-associative set: `{^}`. `=` is not an expression operator; it
//! lexes as the distinct [`TokenKind::Assign`] consumed by the statement
//! rule.

use rustc_hash::FxHashMap;
use std::fmt;

/// Comment introducer; runs to the end of the line.
pub const COMMENT: char = '#';

/// String delimiter.
pub const STRING: char = '"';

/// The sentinel appended to every source text before scanning. The
/// matching lexeme emits the terminal [`TokenKind::Eof`] token.
pub const EOF_SENTINEL: &str = " EOF ";

/// Coarse token category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier.
    Id,
    /// Numeric literal; carries an `int`/`float` subtype.
    Num,
    /// String literal, delimiters excluded.
    Str,
    /// Expression operator.
    Op,
    /// The `=` of an assignment statement.
    Assign,
    /// `true` or `false`.
    Bool,
    /// The `if` keyword.
    If,
    /// The `else` keyword.
    Else,
    /// The reserved `null` keyword.
    Null,
    /// Argument separator `,`.
    Sep,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    BlockStart,
    /// `}`
    BlockEnd,
    /// `[`
    ListStart,
    /// `]`
    ListEnd,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Id => "id",
            TokenKind::Num => "num",
            TokenKind::Str => "str",
            TokenKind::Op => "op",
            TokenKind::Assign => "assign",
            TokenKind::Bool => "bool",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Null => "null",
            TokenKind::Sep => "sep",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::BlockStart => "BLOCKSTART",
            TokenKind::BlockEnd => "BLOCKEND",
            TokenKind::ListStart => "LISTSTART",
            TokenKind::ListEnd => "LISTEND",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{name}")
    }
}

/// Numeric subtype of a [`TokenKind::Num`] token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumKind {
    Int,
    Float,
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumKind::Int => write!(f, "int"),
            NumKind::Float => write!(f, "float"),
        }
    }
}

/// Every known symbol and keyword with its canonical token kind.
///
/// The lexer's maximal-munch rule works over full membership in this
/// table: a pending lexeme is emitted once appending the lookahead no
/// longer forms another entry.
pub const SYMBOLS: &[(&str, TokenKind)] = &[
    ("+", TokenKind::Op),
    ("-", TokenKind::Op),
    ("*", TokenKind::Op),
    ("/", TokenKind::Op),
    ("^", TokenKind::Op),
    (".", TokenKind::Op),
    ("<", TokenKind::Op),
    (">", TokenKind::Op),
    ("<=", TokenKind::Op),
    (">=", TokenKind::Op),
    ("==", TokenKind::Op),
    ("!=", TokenKind::Op),
    ("&", TokenKind::Op),
    ("|", TokenKind::Op),
    ("!", TokenKind::Op),
    ("=", TokenKind::Assign),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::ListStart),
    ("]", TokenKind::ListEnd),
    ("{", TokenKind::BlockStart),
    ("}", TokenKind::BlockEnd),
    (",", TokenKind::Sep),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("null", TokenKind::Null),
    ("true", TokenKind::Bool),
    ("false", TokenKind::Bool),
    ("EOF", TokenKind::Eof),
];

/// Is `c` part of the whitespace set?
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b')
}

/// Is `c` a decimal digit?
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Binding strength of `op`; higher binds tighter. `None` for strings
/// that are not expression operators.
pub fn precedence(op: &str) -> Option<u8> {
    match op {
        "|" => Some(2),
        "&" => Some(3),
        "!" => Some(4),
        "<" | ">" | "<=" | ">=" | "==" | "!=" => Some(7),
        "+" | "-" => Some(10),
        "*" | "/" => Some(20),
        "^" => Some(25),
        "." => Some(30),
        _ => None,
    }
}

/// Does `op` associate to the right?
pub fn is_right_associative(op: &str) -> bool {
    op == "^"
}

/// Can `op` appear in prefix position?
pub fn is_unary(op: &str) -> bool {
    matches!(op, "!" | "+" | "-")
}

/// Symbol lookup table answering the lexer's boundary questions.
///
/// Built once per lex run from [`SYMBOLS`].
pub struct SymbolTable {
    kinds: FxHashMap<&'static str, TokenKind>,
}

impl SymbolTable {
    /// Build the table from the canonical definitions.
    pub fn new() -> Self {
        let mut kinds = FxHashMap::default();
        for &(symbol, kind) in SYMBOLS {
            kinds.insert(symbol, kind);
        }
        Self { kinds }
    }

    /// Is `lexeme` a known symbol or keyword?
    pub fn is_symbol(&self, lexeme: &str) -> bool {
        self.kinds.contains_key(lexeme)
    }

    /// Is the single character `c` itself a known symbol?
    pub fn is_symbol_char(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let lexeme: &str = c.encode_utf8(&mut buf);
        self.kinds.contains_key(lexeme)
    }

    /// The canonical kind of `lexeme`, if it is a known symbol.
    pub fn kind_of(&self, lexeme: &str) -> Option<TokenKind> {
        self.kinds.get(lexeme).copied()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_kinds() {
        let table = SymbolTable::new();
        assert_eq!(table.kind_of("+"), Some(TokenKind::Op));
        assert_eq!(table.kind_of("<="), Some(TokenKind::Op));
        assert_eq!(table.kind_of("="), Some(TokenKind::Assign));
        assert_eq!(table.kind_of("("), Some(TokenKind::LParen));
        assert_eq!(table.kind_of("{"), Some(TokenKind::BlockStart));
        assert_eq!(table.kind_of("["), Some(TokenKind::ListStart));
        assert_eq!(table.kind_of(","), Some(TokenKind::Sep));
        assert_eq!(table.kind_of("if"), Some(TokenKind::If));
        assert_eq!(table.kind_of("true"), Some(TokenKind::Bool));
        assert_eq!(table.kind_of("false"), Some(TokenKind::Bool));
        assert_eq!(table.kind_of("null"), Some(TokenKind::Null));
        assert_eq!(table.kind_of("EOF"), Some(TokenKind::Eof));
        assert_eq!(table.kind_of("nope"), None);
    }

    #[test]
    fn test_multi_char_membership() {
        let table = SymbolTable::new();
        assert!(table.is_symbol("=="));
        assert!(table.is_symbol("!="));
        assert!(table.is_symbol(">="));
        assert!(!table.is_symbol("=!"));
        assert!(!table.is_symbol("iff"));
    }

    #[test]
    fn test_symbol_chars() {
        let table = SymbolTable::new();
        for c in "+-*/^=<>&|!.(){}[],".chars() {
            assert!(table.is_symbol_char(c), "expected symbol char: {c}");
        }
        assert!(!table.is_symbol_char('a'));
        assert!(!table.is_symbol_char('#'));
        assert!(!table.is_symbol_char('"'));
    }

    #[test]
    fn test_precedence_ordering() {
        // Spot-check the table against the documented ordering.
        assert!(precedence("|") < precedence("&"));
        assert!(precedence("&") < precedence("!"));
        assert!(precedence("!") < precedence("=="));
        assert!(precedence("==") < precedence("+"));
        assert!(precedence("+") < precedence("*"));
        assert!(precedence("*") < precedence("^"));
        assert!(precedence("^") < precedence("."));
        assert_eq!(precedence("+"), precedence("-"));
        assert_eq!(precedence("*"), precedence("/"));
        assert_eq!(precedence("="), None);
    }

    #[test]
    fn test_associativity() {
        assert!(is_right_associative("^"));
        assert!(!is_right_associative("+"));
        assert!(!is_right_associative("-"));
        assert!(!is_right_associative("/"));
    }

    #[test]
    fn test_unary_set() {
        assert!(is_unary("!"));
        assert!(is_unary("+"));
        assert!(is_unary("-"));
        assert!(!is_unary("*"));
        assert!(!is_unary("=="));
    }

    #[test]
    fn test_whitespace_set() {
        for c in [' ', '\t', '\n', '\r', '\x0b'] {
            assert!(is_whitespace(c));
        }
        assert!(!is_whitespace('a'));
        assert!(!is_whitespace('0'));
    }
}
