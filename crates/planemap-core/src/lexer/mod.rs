//! Lexer for plane-map formulas
//!
//! The lexer hands out one token per request so the parser can stop at the
//! first error without scanning the rest of the input. It recognizes:
//! - the variables `z`, `x`, `y` and the constant `i`
//! - the functions `sin`, `cos`, `exp` (fixed three-letter keywords)
//! - the operators `+ - * /` and parentheses
//! - decimal literals such as `3`, `0.25` or `7.`

#![allow(clippy::cast_possible_truncation)] // Formulas are short; u32 offsets are plenty

mod span;
mod token;

pub use span::Span;
pub use token::{TokenKind, CALL_BP, NEGATE_BP, PRODUCT_BP, SUM_BP};

use logos::Logos;
use thiserror::Error;

/// A token with its kind and location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("unrecognized character '{0}'")]
    UnexpectedChar(char),
}

/// A lexer error with location information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// On-demand formula lexer
#[derive(Debug, Clone)]
pub struct Lexer<'source> {
    source: &'source str,
    /// Byte offset of the next unread character
    position: usize,
}

impl<'source> Lexer<'source> {
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Tokenize the entire source, stopping after `End` or at the first error
    pub fn tokenize(source: &str) -> Result<Vec<Token>, SpannedError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::End {
                return Ok(tokens);
            }
        }
    }

    /// The source being lexed
    #[must_use]
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Byte offset of the next unread character
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the next token.
    ///
    /// Once the input is exhausted every call returns `End` at the source
    /// length without moving further. On error the position is left in front
    /// of the offending character.
    pub fn next_token(&mut self) -> Result<Token, SpannedError> {
        let remaining = &self.source[self.position..];
        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                // span is relative to the remaining slice, after skipped whitespace
                let range = logos_lexer.span();
                let start = self.position + range.start;
                let end = self.position + range.end;
                self.position = end;
                Ok(Token::new(kind, Span::from_range(start..end)))
            }
            Some(Err(())) => {
                let start = self.position + logos_lexer.span().start;
                let ch = self.source[start..].chars().next().unwrap_or('\u{fffd}');
                Err(SpannedError::new(
                    LexError::UnexpectedChar(ch),
                    Span::from_range(start..start + ch.len_utf8()),
                ))
            }
            None => {
                self.position = self.source.len();
                Ok(Token::new(
                    TokenKind::End,
                    Span::empty_at(self.position as u32),
                ))
            }
        }
    }
}
