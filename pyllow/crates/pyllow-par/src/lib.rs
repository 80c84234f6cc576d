//! pyllow-par - Parser (Syntactic Analyzer)
//!
//! Tokens in, arena AST out. The grammar is small:
//!
//! ```text
//! program     := statement*
//! statement   := assign | if | expression
//! assign      := IDENT '=' expression
//! if          := 'if' expression block ('else' (if | block))?
//! block       := '{' statement* '}'
//! expression  := precedence climbing over operators,
//!                '(' expression ')', unary, atom, call
//! call        := IDENT '(' (expression (',' expression)*)? ')'
//! atom        := NUMBER | IDENT | BOOL | STRING
//! ```
//!
//! Statements are recognized by recursive descent; expressions by
//! precedence climbing (see [`mod@expr`]). The parser consumes the whole
//! token stream up to and including the terminal `Eof`; any residue is a
//! syntax error. Errors are returned, never panicked, and carry the
//! position of the offending token (the previous token's when something
//! required is missing).

pub mod ast;
pub mod cursor;
pub mod expr;

pub use ast::{Ast, BinaryOp, MonoKind, Node, NodeId, NodeKind, UnaryOp};
pub use cursor::TokenStream;

use pyllow_lex::Token;
use pyllow_util::{PyllowError, PyllowResult, TokenKind};

/// Recursive-descent parser over a token stream.
pub struct Parser {
    stream: TokenStream,
    ast: Ast,
}

impl Parser {
    /// Create a parser over `tokens`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            ast: Ast::new(),
        }
    }

    /// Parse the whole program: statements against the root until the
    /// statement rule declines, then the lookahead must be the terminal
    /// `Eof` with nothing after it.
    pub fn parse(mut self) -> PyllowResult<Ast> {
        let root = self.ast.root();
        while self.statement(root)? {}

        match self.stream.peek_next() {
            Some(token) if token.kind != TokenKind::Eof => {
                return Err(PyllowError::syntax(
                    "Invalid syntax",
                    token.position.clone(),
                ));
            }
            _ => {}
        }
        self.stream.next();
        if self.stream.is_not_finished() {
            return Err(PyllowError::syntax(
                "Invalid syntax",
                self.stream.lookahead_position(),
            ));
        }

        self.ast.set_parents();
        Ok(self.ast)
    }

    /// One statement attached to `target`. Returns false at the end of
    /// the statement list (`Eof`, or `}` closing the enclosing block).
    fn statement(&mut self, target: NodeId) -> PyllowResult<bool> {
        let Some(token) = self.stream.peek_next().cloned() else {
            return Ok(false);
        };
        if matches!(token.kind, TokenKind::Eof | TokenKind::BlockEnd) {
            return Ok(false);
        }

        if let Some(assign) = self.assignment()? {
            self.ast.attach(target, assign);
            return Ok(true);
        }

        match token.kind {
            TokenKind::Num | TokenKind::Id | TokenKind::Bool | TokenKind::Op => {
                match self.expression(None, 0)? {
                    Some(expression) => {
                        self.ast.attach(target, expression);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            TokenKind::If => {
                self.stream.next();
                let statement = self.if_statement()?;
                self.ast.attach(target, statement);
                Ok(true)
            }
            _ => match self.expression(None, 0)? {
                Some(expression) => {
                    self.ast.attach(target, expression);
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }

    /// Assignment lookahead: `IDENT '=' expression`. Declines (and
    /// rewinds) when the next tokens are not an assignment.
    fn assignment(&mut self) -> PyllowResult<Option<NodeId>> {
        if !self.accept(TokenKind::Id) {
            return Ok(None);
        }
        let Some(id_token) = self.stream.current().cloned() else {
            return Ok(None);
        };
        if !self.accept(TokenKind::Assign) {
            self.stream.prev(1);
            return Ok(None);
        }

        let value = match self.expression(None, 0)? {
            Some(value) => value,
            None => {
                return Err(PyllowError::syntax(
                    "Invalid syntax, missing expression",
                    self.stream.previous_position(),
                ))
            }
        };
        let node = self.ast.push(
            NodeKind::Assign {
                id: id_token.value.clone(),
            },
            id_token.position,
        );
        self.ast.attach(node, value);
        Ok(Some(node))
    }

    /// `if` statement, the keyword already consumed: condition, block,
    /// optional `else` with either a nested `if` or a block.
    fn if_statement(&mut self) -> PyllowResult<NodeId> {
        let keyword_position = self.stream.previous_position();

        let condition = match self.expression(None, 0)? {
            Some(condition) => condition,
            None => {
                return Err(PyllowError::syntax(
                    "Invalid syntax: missing condition",
                    self.stream.previous_position(),
                ))
            }
        };
        let block = self.block()?;

        let node = self.ast.push(NodeKind::If, keyword_position);
        self.ast.attach(node, condition);
        self.ast.attach(node, block);

        if self.accept(TokenKind::Else) {
            if self.accept(TokenKind::If) {
                let alternative = self.if_statement()?;
                self.ast.attach(node, alternative);
            } else {
                let alternative = self.block()?;
                self.ast.attach(node, alternative);
            }
        }

        Ok(node)
    }

    /// `{ statement* }`. Empty blocks are valid.
    fn block(&mut self) -> PyllowResult<NodeId> {
        self.expect_value("{")?;
        let node = self
            .ast
            .push(NodeKind::Block, self.stream.previous_position());
        while self.statement(node)? {}
        self.expect_value("}")?;
        Ok(node)
    }

    /// Consume the next token if its kind matches.
    fn accept(&mut self, kind: TokenKind) -> bool {
        match self.stream.peek_next() {
            Some(token) if token.kind == kind => {
                self.stream.next();
                true
            }
            _ => false,
        }
    }

    /// Consume the next token if its lexeme matches.
    fn accept_value(&mut self, value: &str) -> bool {
        match self.stream.peek_next() {
            Some(token) if token.value == value => {
                self.stream.next();
                true
            }
            _ => false,
        }
    }

    /// Like [`Parser::accept`], but a failure is a syntax error at the
    /// previous token's position.
    fn expect(&mut self, kind: TokenKind) -> PyllowResult<()> {
        if self.accept(kind) {
            return Ok(());
        }
        Err(PyllowError::syntax(
            "Invalid syntax",
            self.stream.previous_position(),
        ))
    }

    /// Like [`Parser::accept_value`], but a failure names the missing
    /// lexeme.
    fn expect_value(&mut self, value: &str) -> PyllowResult<()> {
        if self.accept_value(value) {
            return Ok(());
        }
        Err(PyllowError::syntax(
            format!("Invalid syntax, missing {value}"),
            self.stream.previous_position(),
        ))
    }
}

/// Lex-free convenience: parse an already-lexed token vector.
pub fn parse(tokens: Vec<Token>) -> PyllowResult<Ast> {
    Parser::new(tokens).parse()
}
