//! Core lexer implementation.
//!
//! One forward pass per invocation, with all scan state local to the
//! call. Recognition rules, checked per character in priority order:
//!
//! 1. A newline clears the in-comment flag.
//! 2. Inside a comment everything is consumed, nothing emitted.
//! 3. Whitespace outside a string, with no pending lexeme, is skipped.
//! 4. `"` toggles string mode; the closing quote emits `Str` with the
//!    accumulated payload, delimiters excluded.
//! 5. A non-empty pending lexeme followed by whitespace or a symbol
//!    character flushes as `Id`, unless the concatenation is itself a
//!    known symbol or a decimal is pending. A standalone boundary symbol
//!    is emitted in the same step, then the cursor backs up one so
//!    normal scanning resumes.
//! 6. Otherwise the character joins the pending lexeme.
//! 7. A lexeme of digits emits `Num` at its last digit, `float` iff a
//!    decimal point was crossed.
//! 8. `#` begins a comment.
//! 9. A pending lexeme matching a known symbol emits with maximal munch:
//!    only once appending the lookahead would not form a longer symbol.
//!    Keywords live in the same table, so `if`, `else`, `true`, `false`,
//!    `null` and the `EOF` sentinel lexeme all emit here.

use crate::stream::RawStream;
use crate::token::Token;
use pyllow_util::chardef::{self, SymbolTable, EOF_SENTINEL};
use pyllow_util::{NumKind, Position, TokenKind};

/// Lex `raw` into a token sequence ending with a terminal `Eof` token.
///
/// The `path` is opaque to the core; it lands in every token position
/// and from there in every error message.
pub fn lex(raw: &str, path: &str) -> Vec<Token> {
    let padded = format!("{raw}{EOF_SENTINEL}");
    let mut stream = RawStream::new(&padded, path);
    let symbols = SymbolTable::new();

    let mut tokens: Vec<Token> = Vec::new();
    let mut tok = String::new();
    let mut is_string = false;
    let mut is_comment = false;
    let mut is_decimal = false;
    let mut could_be_num = true;

    while stream.is_not_finished() {
        let Some(c) = stream.next() else { break };

        if c == '\n' {
            is_comment = false;
        }

        if (chardef::is_whitespace(c) && !is_string && tok.is_empty()) || is_comment {
            continue;
        }

        if c == chardef::STRING {
            is_string = !is_string;
            if !is_string {
                emit(
                    &mut tokens,
                    TokenKind::Str,
                    std::mem::take(&mut tok),
                    None,
                    stream.position(),
                );
                could_be_num = true;
            } else {
                tok.clear();
            }
            continue;
        }

        // Identifier boundary: flush the pending lexeme unless the
        // boundary character extends it into a known symbol.
        if !tok.is_empty()
            && !is_string
            && !is_decimal
            && (chardef::is_whitespace(c) || symbols.is_symbol_char(c))
            && !symbols.is_symbol(&extend(&tok, Some(c)))
        {
            emit(
                &mut tokens,
                TokenKind::Id,
                std::mem::take(&mut tok),
                None,
                stream.position(),
            );
            could_be_num = true;
            if symbols.is_symbol_char(c) && !symbols.is_symbol(&extend_char(c, stream.peek_next()))
            {
                if let Some(kind) = symbols.kind_of(&c.to_string()) {
                    stream.next();
                    emit(&mut tokens, kind, c.to_string(), None, stream.position());
                    could_be_num = true;
                }
            }
            stream.prev();
            continue;
        }

        tok.push(c);

        if tok.chars().count() == 1 && !chardef::is_digit(c) {
            could_be_num = false;
        }

        if is_string {
            continue;
        }

        let lookahead = stream.peek_next();

        if chardef::is_digit(c)
            && !lookahead.map_or(false, chardef::is_digit)
            && could_be_num
        {
            // One decimal point is permitted per numeric lexeme.
            if lookahead == Some('.') && !is_decimal {
                is_decimal = true;
            } else {
                let subtype = if is_decimal {
                    NumKind::Float
                } else {
                    NumKind::Int
                };
                emit(
                    &mut tokens,
                    TokenKind::Num,
                    std::mem::take(&mut tok),
                    Some(subtype),
                    stream.position(),
                );
                could_be_num = true;
                is_decimal = false;
            }
        } else if tok.len() == 1 && c == chardef::COMMENT {
            is_comment = true;
            tok.clear();
            could_be_num = true;
        } else if symbols.is_symbol(&tok) && !symbols.is_symbol(&extend(&tok, lookahead)) {
            if let Some(kind) = symbols.kind_of(&tok) {
                emit(
                    &mut tokens,
                    kind,
                    std::mem::take(&mut tok),
                    None,
                    stream.position(),
                );
                could_be_num = true;
            }
        }
    }

    // The sentinel normally produces the terminal token; degenerate
    // pending states (an unterminated string, a dangling decimal) must
    // not leave the stream without one.
    if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        tokens.push(Token::new(TokenKind::Eof, "EOF", stream.position()));
    }

    tokens
}

fn extend(tok: &str, c: Option<char>) -> String {
    match c {
        Some(c) => format!("{tok}{c}"),
        None => tok.to_string(),
    }
}

fn extend_char(c: char, next: Option<char>) -> String {
    match next {
        Some(n) => format!("{c}{n}"),
        None => c.to_string(),
    }
}

fn emit(
    tokens: &mut Vec<Token>,
    kind: TokenKind,
    value: String,
    subtype: Option<NumKind>,
    position: Position,
) {
    tokens.push(Token {
        kind,
        value,
        subtype,
        position,
    });
}
