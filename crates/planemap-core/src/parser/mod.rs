//! Parser for plane-map formulas
//!
//! This module implements a Pratt parser (top-down operator precedence). The
//! parser pulls tokens from the lexer one at a time, keeping a single token
//! of lookahead, and builds an [`Expr`] tree.
//!
//! Binding powers, loosest first:
//!
//! | token            | left bp | prefix bp |
//! |------------------|---------|-----------|
//! | `+`, binary `-`  | 10      |           |
//! | `*`, `/`         | 20      |           |
//! | `sin cos exp`    |         | 25        |
//! | unary `-`        |         | 30        |
//!
//! Binary operators parse their right operand at their own binding power, so
//! equal-precedence chains associate to the left.
//!
//! # Example
//!
//! ```
//! use planemap_core::parser::Parser;
//!
//! let expr = Parser::parse_expression("2 + 3 * 4").unwrap();
//! assert_eq!(expr.to_string(), "(2 + (3 * 4))");
//! ```

mod error;

pub use error::{ParseError, ParseErrorKind};

use crate::ast::{BinOp, Expr, Func, Node, NodeId, NodeKind};
use crate::complex::Complex;
use crate::lexer::{Lexer, Span, Token, TokenKind};

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum nesting of sub-expressions before parsing gives up
pub const MAX_NESTING: u32 = 128;

/// The formula parser
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    /// One-token lookahead
    current: Token,
    /// Current sub-expression nesting
    depth: u32,
    /// Nodes emitted so far, operands before operators
    nodes: Vec<Node>,
}

impl<'source> Parser<'source> {
    /// Create a parser and prime its lookahead
    pub fn new(source: &'source str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
            nodes: Vec::new(),
        })
    }

    /// Parse a complete formula; the whole input must be consumed
    pub fn parse_expression(source: &str) -> ParseResult<Expr> {
        let mut parser = Parser::new(source)?;
        parser.parse_expr(0)?;
        parser.expect_end()?;
        Ok(Expr::from_post_order(parser.nodes))
    }

    // ==================== Token Management ====================

    /// The lookahead token
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Take the lookahead token and lex the next one
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Require that the input is exhausted
    fn expect_end(&self) -> ParseResult<()> {
        let found = self.current.kind;
        if found == TokenKind::End {
            return Ok(());
        }
        let error = ParseError::new(ParseErrorKind::TrailingInput { found }, self.current.span);
        Err(if found.starts_expression() {
            error.with_hint("use '*' to multiply adjacent terms")
        } else {
            error
        })
    }

    // ==================== Node Emission ====================

    /// Append a node; its operands must already be emitted
    fn emit(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.nodes.push(Node::new(kind, span));
        self.nodes.len() - 1
    }

    fn span_of(&self, id: NodeId) -> Span {
        self.nodes[id].span
    }

    // ==================== Expression Parsing (Pratt Parser) ====================

    /// Parse an expression whose operators bind tighter than `min_bp`,
    /// returning the id of its root node
    fn parse_expr(&mut self, min_bp: u8) -> ParseResult<NodeId> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep { limit: MAX_NESTING },
                self.current.span,
            ));
        }

        self.depth += 1;
        let result = self.parse_expr_inner(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_expr_inner(&mut self, min_bp: u8) -> ParseResult<NodeId> {
        let mut left = self.prefix()?;

        // Chains of equal or looser operators loop here instead of recursing
        while self.current.kind.left_binding_power() > min_bp {
            let op_token = self.advance()?;
            left = self.infix(op_token, left)?;
        }

        Ok(left)
    }

    /// Begin a sub-expression with the lookahead token (nud)
    fn prefix(&mut self) -> ParseResult<NodeId> {
        if !self.current.kind.starts_expression() {
            let found = self.current.kind;
            let error = ParseError::new(ParseErrorKind::UnexpectedToken { found }, self.current.span);
            return Err(if found == TokenKind::End {
                error.with_hint("the formula ends where an operand is expected")
            } else {
                error
            });
        }

        let token = self.advance()?;
        let span = token.span;
        let kind = match token.kind {
            TokenKind::Z => NodeKind::Var,
            TokenKind::X => NodeKind::Re,
            TokenKind::Y => NodeKind::Im,
            TokenKind::I => NodeKind::Const(Complex::I),
            TokenKind::Number(value) => NodeKind::Const(Complex::real(value)),
            TokenKind::LParen => return self.group(token),
            TokenKind::Minus => {
                let operand = self.prefix_operand(&token)?;
                let span = span.merge(self.span_of(operand));
                return Ok(self.emit(NodeKind::Neg(operand), span));
            }
            TokenKind::Sin | TokenKind::Cos | TokenKind::Exp => {
                let func = match token.kind {
                    TokenKind::Sin => Func::Sin,
                    TokenKind::Cos => Func::Cos,
                    _ => Func::Exp,
                };
                let arg = self.prefix_operand(&token)?;
                let span = span.merge(self.span_of(arg));
                return Ok(self.emit(NodeKind::Call { func, arg }, span));
            }
            found => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken { found },
                    span,
                ))
            }
        };

        Ok(self.emit(kind, span))
    }

    /// Parse the operand of a prefix operator at its binding power
    fn prefix_operand(&mut self, op_token: &Token) -> ParseResult<NodeId> {
        let bp = op_token.kind.prefix_binding_power().unwrap_or(0);
        self.parse_expr(bp)
    }

    /// Parse a parenthesized group; the group adds no node of its own
    fn group(&mut self, open: Token) -> ParseResult<NodeId> {
        let inner = self.parse_expr(0)?;

        if self.current.kind != TokenKind::RParen {
            return Err(ParseError::new(
                ParseErrorKind::UnmatchedParen {
                    open: open.span.start,
                },
                self.current.span,
            )
            .with_hint(format!(
                "the '(' at offset {} is never closed",
                open.span.start
            )));
        }
        self.advance()?;

        Ok(inner)
    }

    /// Extend `left` with a binary operator (led)
    fn infix(&mut self, op_token: Token, left: NodeId) -> ParseResult<NodeId> {
        let op = match op_token.kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            found => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken { found },
                    op_token.span,
                ))
            }
        };

        let right = self.parse_expr(op_token.kind.left_binding_power())?;
        let span = self.span_of(left).merge(self.span_of(right));
        Ok(self.emit(NodeKind::Binary { op, left, right }, span))
    }
}
