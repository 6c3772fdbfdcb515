//! The parser (spec §4.2): precedence-climbing for expressions,
//! recursive-descent for statements, scopes, and if-elif-else chains.
//!
//! Grounded in the reference `Parser` (`examples/original_source/src/parser.hpp`)
//! for the overall `peek`/`consume`-over-a-token-vector shape, and in
//! `faxc_par::expr`'s binding-power table for how a Pratt-style precedence
//! climb reads in Rust — collapsed here to the two levels spec §4.2 actually
//! defines (additive, multiplicative) rather than `faxc`'s nine.

use crate::ast::{BinOp, BinaryExpr, Expr, IfPred, IfStmt, Program, Scope, Stmt, Term};
use crate::error::ParseError;
use ilc_lex::{bin_precedence, Token, TokenKind};
use ilc_util::Arena;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    arena: &'a Arena,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, arena: &'a Arena) -> Self {
        Self {
            tokens,
            pos: 0,
            arena,
        }
    }

    fn peek(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.pos + offset).copied()
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.peek(offset).map(|t| t.kind)
    }

    fn consume(&mut self) -> Token {
        let tok = self.tokens[self.pos];
        self.pos += 1;
        tok
    }

    /// The line of the most recently *consumed* token, or line 1 if nothing
    /// has been consumed yet. Spec §4.2/§7 define the blamed line of an
    /// "expected X" diagnostic as this — the line of the token that was
    /// actually consumed last — never the line of the offending,
    /// still-unconsumed token that triggered the error.
    fn last_consumed_line(&self) -> u32 {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|t| t.line).unwrap_or(1)
    }

    fn current_line(&self) -> u32 {
        self.peek(0).map(|t| t.line).unwrap_or_else(|| self.last_consumed_line())
    }

    /// Consume the next token if it has kind `kind`, else produce the
    /// "expected X on line N" diagnostic spec §7 calls for, blaming the
    /// last consumed token's line (spec §4.2/§7.2), not the offending
    /// token's own line.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek(0) {
            Some(tok) if tok.kind == kind => Ok(self.consume()),
            Some(_) => Err(ParseError::expected(kind, self.last_consumed_line())),
            None => Err(ParseError::UnexpectedEof {
                expected: kind.describe(),
            }),
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    // ------------------------------------------------------------------
    // Program / statements
    // ------------------------------------------------------------------

    pub fn parse_program(&mut self) -> Result<Program<'a>, ParseError> {
        let mut stmts = Vec::new();
        while self.peek(0).is_some() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program {
            stmts: self.arena.alloc_slice(&stmts),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt<'a>, ParseError> {
        match self.peek_kind(0) {
            Some(TokenKind::Return) => {
                let line = self.consume().line;
                self.expect(TokenKind::LParen)?;
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Return { expr, line })
            }
            Some(TokenKind::Let) => {
                let line = self.consume().line;
                let ident = self.expect(TokenKind::Ident)?;
                self.expect(TokenKind::Eq)?;
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Let {
                    name: ident.lexeme.expect("ident token carries a lexeme"),
                    expr,
                    line,
                })
            }
            Some(TokenKind::Ident) if self.peek_kind(1) == Some(TokenKind::Eq) => {
                let ident = self.consume();
                let line = ident.line;
                self.consume(); // '='
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Assign {
                    name: ident.lexeme.expect("ident token carries a lexeme"),
                    expr,
                    line,
                })
            }
            Some(TokenKind::LBrace) => Ok(Stmt::Scope(self.parse_scope()?)),
            Some(TokenKind::If) => Ok(Stmt::If(self.parse_if()?)),
            Some(_) => Err(ParseError::InvalidStatement {
                line: self.current_line(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "a statement",
            }),
        }
    }

    fn parse_scope(&mut self) -> Result<&'a Scope<'a>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.peek(0).is_none() {
                return Err(ParseError::UnexpectedEof {
                    expected: TokenKind::RBrace.describe(),
                });
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(self.arena.alloc(Scope {
            stmts: self.arena.alloc_slice(&stmts),
        }))
    }

    fn parse_if(&mut self) -> Result<&'a IfStmt<'a>, ParseError> {
        let line = self.expect(TokenKind::If)?.line;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        let scope = self.parse_scope()?;
        let pred = self.parse_if_pred()?;
        Ok(self.arena.alloc(IfStmt {
            cond,
            scope,
            pred,
            line,
        }))
    }

    fn parse_if_pred(&mut self) -> Result<Option<&'a IfPred<'a>>, ParseError> {
        match self.peek_kind(0) {
            Some(TokenKind::Elif) => {
                let line = self.consume().line;
                self.expect(TokenKind::LParen)?;
                let cond = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                let scope = self.parse_scope()?;
                let pred = self.parse_if_pred()?;
                Ok(Some(self.arena.alloc(IfPred::Elif {
                    cond,
                    scope,
                    pred,
                    line,
                })))
            }
            Some(TokenKind::Else) => {
                let line = self.consume().line;
                let scope = self.parse_scope()?;
                Ok(Some(self.arena.alloc(IfPred::Else { scope, line })))
            }
            _ => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Expressions (precedence climbing)
    // ------------------------------------------------------------------

    fn parse_expr(&mut self, min_prec: u8) -> Result<&'a Expr<'a>, ParseError> {
        let mut left = self.parse_term_expr()?;

        loop {
            let Some(kind) = self.peek_kind(0) else { break };
            let Some(prec) = bin_precedence(kind) else { break };
            if prec < min_prec {
                break;
            }
            let op = match kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => unreachable!("bin_precedence only returns Some for operator kinds"),
            };
            self.consume();
            // Left-associative: the right-hand recursion requires strictly
            // higher precedence than this operator's own.
            let right = self.parse_expr(prec + 1)?;
            left = self.arena.alloc(Expr::Binary(BinaryExpr { op, left, right }));
        }

        Ok(left)
    }

    fn parse_term_expr(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let term = self.parse_term()?;
        Ok(self.arena.alloc(Expr::Term(term)))
    }

    fn parse_term(&mut self) -> Result<Term<'a>, ParseError> {
        match self.peek_kind(0) {
            Some(TokenKind::Int) => {
                let tok = self.consume();
                Ok(Term::Int(tok.lexeme.expect("int token carries a lexeme")))
            }
            Some(TokenKind::Ident) => {
                let tok = self.consume();
                Ok(Term::Ident {
                    name: tok.lexeme.expect("ident token carries a lexeme"),
                    line: tok.line,
                })
            }
            Some(TokenKind::LParen) => {
                self.consume();
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(Term::Paren(inner))
            }
            Some(_) => Err(ParseError::InvalidExpression {
                line: self.current_line(),
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: "an expression",
            }),
        }
    }
}

/// Parse a complete token stream into a [`Program`], allocating every node
/// in `arena`.
pub fn parse<'a>(tokens: Vec<Token>, arena: &'a Arena) -> Result<Program<'a>, ParseError> {
    Parser::new(tokens, arena).parse_program()
}
