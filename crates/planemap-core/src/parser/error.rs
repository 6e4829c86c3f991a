//! Parser error types for plane-map formulas

use crate::lexer::{LexError, Span, SpannedError, TokenKind};
use thiserror::Error;

/// A parse error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Source location where the error was detected
    pub span: Span,
    /// Optional hint for fixing the error
    pub hint: Option<String>,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            hint: None,
        }
    }

    /// Add a hint to this error
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Byte offset at which the problem was detected
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.start as usize
    }
}

impl From<SpannedError> for ParseError {
    fn from(err: SpannedError) -> Self {
        let error = ParseError::new(ParseErrorKind::Lex(err.error), err.span);
        match err.error {
            LexError::UnexpectedChar(c) if c.is_alphabetic() => {
                error.with_hint("known names are z, x, y, i, sin, cos and exp")
            }
            LexError::UnexpectedChar(_) => error,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.span.start)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {found}, expected an operand")]
    UnexpectedToken { found: TokenKind },

    /// `open` is the offset of the unclosed `(`
    #[error("missing ')'")]
    UnmatchedParen { open: u32 },

    #[error("unexpected {found} after a complete formula")]
    TrailingInput { found: TokenKind },

    #[error("formula nests deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}
