//! Expression parsing by precedence climbing.
//!
//! The expression rule takes a minimum precedence and loops over
//! operator tokens, recursing with the lookahead's precedence whenever
//! the lookahead binds tighter than the operator in hand, or equally for
//! the right-associative `^`. Left-associative chains therefore build a
//! left-leaning spine, `^` chains a right-leaning one:
//!
//! | Operators | Precedence | Associativity |
//! |-----------|------------|---------------|
//! | `\|` | 2 | Left |
//! | `&` | 3 | Left |
//! | `<` `>` `<=` `>=` `==` `!=` | 7 | Left |
//! | `+` `-` | 10 | Left |
//! | `*` `/` | 20 | Left |
//! | `^` | 25 | Right |
//! | `.` | 30 | Left (reserved) |
//!
//! Parenthesized sub-expressions recurse with the threshold reset to
//! zero and the closing `)` expected afterwards; parenthesis extent is
//! tracked purely by this recursion. Unary `!`, `+`, `-` fold over a
//! single following value token when the preceding context is not a
//! value. Calls are recognized before anything else when the upcoming
//! tokens are `IDENT (`.

use crate::ast::{BinaryOp, MonoKind, NodeId, NodeKind, UnaryOp};
use crate::Parser;
use pyllow_lex::Token;
use pyllow_util::{chardef, PyllowError, PyllowResult, TokenKind};

impl Parser {
    /// Parse an expression with a minimum operator precedence.
    ///
    /// `nlhs` supplies an already-parsed left operand (used by the
    /// climbing recursion). Returns `Ok(None)` when the stream is at its
    /// end instead of an expression, so callers can treat "no more
    /// statements" separately from a malformed expression.
    pub(crate) fn expression(
        &mut self,
        nlhs: Option<NodeId>,
        min_precedence: u8,
    ) -> PyllowResult<Option<NodeId>> {
        if nlhs.is_none() {
            if let Some(call) = self.call()? {
                return Ok(Some(call));
            }
        }

        let mut lhs = match nlhs {
            Some(lhs) => lhs,
            None => match self.operand()? {
                Some(lhs) => lhs,
                None => return Ok(None),
            },
        };

        loop {
            let Some(op_token) = self.stream.peek_next().cloned() else {
                break;
            };
            if op_token.kind != TokenKind::Op {
                break;
            }
            let Some(prec) = chardef::precedence(&op_token.value) else {
                break;
            };
            if prec < min_precedence {
                break;
            }
            self.stream.next();

            let Some(op) = BinaryOp::from_symbol(&op_token.value) else {
                // `!` binds in the table but has no binary variant.
                return Err(PyllowError::syntax("Invalid syntax", op_token.position));
            };

            let mut rhs = match self.operand()? {
                Some(rhs) => rhs,
                None => {
                    return Err(PyllowError::syntax(
                        "Invalid syntax",
                        self.stream.previous_position(),
                    ))
                }
            };

            // Climb while the lookahead binds tighter, or equally for a
            // right-associative operator.
            loop {
                let Some(next_token) = self.stream.peek_next() else {
                    break;
                };
                if next_token.kind != TokenKind::Op {
                    break;
                }
                let Some(next_prec) = chardef::precedence(&next_token.value) else {
                    break;
                };
                let climbs = next_prec > prec
                    || (next_prec == prec && chardef::is_right_associative(&op_token.value));
                if !climbs {
                    break;
                }
                match self.expression(Some(rhs), next_prec)? {
                    Some(new_rhs) => rhs = new_rhs,
                    None => break,
                }
            }

            let node = self
                .ast
                .push(NodeKind::Binary(op), op_token.position.clone());
            self.ast.attach(node, lhs);
            self.ast.attach(node, rhs);
            lhs = node;
        }

        Ok(Some(lhs))
    }

    /// One operand: a parenthesized sub-expression, a folded unary, or a
    /// value atom. `Ok(None)` at the end of the stream (the cursor backs
    /// up so the terminal token stays observable).
    fn operand(&mut self) -> PyllowResult<Option<NodeId>> {
        let Some(token) = self.stream.next().cloned() else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::Eof => {
                self.stream.prev(1);
                Ok(None)
            }
            TokenKind::LParen => {
                if let Some(next) = self.stream.peek_next() {
                    if next.kind == TokenKind::RParen {
                        // Empty parenthesized expression.
                        return Err(PyllowError::syntax(
                            "Invalid syntax",
                            next.position.clone(),
                        ));
                    }
                }
                let inner = match self.expression(None, 0)? {
                    Some(inner) => inner,
                    None => {
                        return Err(PyllowError::syntax(
                            "Invalid syntax",
                            self.stream.previous_position(),
                        ))
                    }
                };
                self.expect(TokenKind::RParen)?;
                Ok(Some(inner))
            }
            TokenKind::Op if chardef::is_unary(&token.value) => {
                let preceding_is_value = self
                    .stream
                    .peek_prev(1)
                    .map(|t| t.is_value() || t.kind == TokenKind::RParen)
                    .unwrap_or(false);
                let next_is_value = self
                    .stream
                    .peek_next()
                    .map(|t| t.is_value())
                    .unwrap_or(false);
                if preceding_is_value || !next_is_value {
                    return Err(PyllowError::syntax("Invalid syntax", token.position));
                }
                let Some(value_token) = self.stream.next().cloned() else {
                    return Err(PyllowError::syntax("Invalid syntax", token.position));
                };
                let leaf = self.mono(&value_token)?;
                let Some(op) = UnaryOp::from_symbol(&token.value) else {
                    return Err(PyllowError::syntax("Invalid syntax", token.position));
                };
                let node = self
                    .ast
                    .push(NodeKind::Unary(op), value_token.position.clone());
                self.ast.attach(node, leaf);
                Ok(Some(node))
            }
            TokenKind::Num | TokenKind::Id | TokenKind::Bool | TokenKind::Str => {
                Ok(Some(self.mono(&token)?))
            }
            _ => Err(PyllowError::syntax("Invalid syntax", token.position)),
        }
    }

    /// Promote a value token to a leaf expression. Tokens of any other
    /// kind are a syntax error at their own position.
    fn mono(&mut self, token: &Token) -> PyllowResult<NodeId> {
        let kind = match (token.kind, token.subtype) {
            (TokenKind::Num, Some(pyllow_util::NumKind::Float)) => MonoKind::Float,
            (TokenKind::Num, _) => MonoKind::Int,
            (TokenKind::Bool, _) => MonoKind::Bool,
            (TokenKind::Id, _) => MonoKind::Id,
            (TokenKind::Str, _) => MonoKind::Str,
            _ => {
                return Err(PyllowError::syntax(
                    "Invalid syntax",
                    token.position.clone(),
                ))
            }
        };
        Ok(self.ast.push(
            NodeKind::Mono {
                kind,
                value: token.value.clone(),
            },
            token.position.clone(),
        ))
    }

    /// Call lookahead: `IDENT (` starts an argument list running to the
    /// matching `)`. Declines (and rewinds) otherwise. The call is
    /// returned as the whole expression; calls never take part in the
    /// binary operator loop.
    fn call(&mut self) -> PyllowResult<Option<NodeId>> {
        if !self.accept(TokenKind::Id) {
            return Ok(None);
        }
        let Some(id_token) = self.stream.current().cloned() else {
            return Ok(None);
        };
        if !self.accept(TokenKind::LParen) {
            self.stream.prev(1);
            return Ok(None);
        }

        let node = self.ast.push(
            NodeKind::Call {
                id: id_token.value.clone(),
            },
            id_token.position,
        );

        if self.accept(TokenKind::RParen) {
            return Ok(Some(node));
        }
        loop {
            let argument = match self.expression(None, 0)? {
                Some(argument) => argument,
                None => {
                    return Err(PyllowError::syntax(
                        "Invalid syntax",
                        self.stream.previous_position(),
                    ))
                }
            };
            self.ast.attach(node, argument);
            if self.accept(TokenKind::Sep) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            break;
        }
        Ok(Some(node))
    }
}
