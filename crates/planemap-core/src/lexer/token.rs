//! Token kinds for formula source, with their binding powers

use logos::Logos;

/// The kind of token produced by the lexer
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum TokenKind {
    // ========== Variables ==========
    /// The free variable
    #[token("z")]
    Z,
    /// Real part of the free variable
    #[token("x")]
    X,
    /// Imaginary part of the free variable
    #[token("y")]
    Y,

    // ========== Constants ==========
    /// Imaginary unit
    #[token("i")]
    I,

    /// Decimal literal, folded to its value while lexing
    #[regex(r"[0-9]+(\.[0-9]*)?", |lex| decimal_value(lex.slice()))]
    Number(f64),

    // ========== Functions ==========
    #[token("sin")]
    Sin,
    #[token("cos")]
    Cos,
    #[token("exp")]
    Exp,

    // ========== Operators ==========
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    // ========== Delimiters ==========
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // ========== Special ==========
    /// End of input (added by the lexer, not matched by logos)
    End,
}

/// Binding power of `+` and binary `-`
pub const SUM_BP: u8 = 10;
/// Binding power of `*` and `/`
pub const PRODUCT_BP: u8 = 20;
/// Right binding power of `sin`, `cos` and `exp`
pub const CALL_BP: u8 = 25;
/// Right binding power of unary `-`
pub const NEGATE_BP: u8 = 30;

impl TokenKind {
    /// How tightly this token binds when it follows a complete expression.
    /// Zero means it cannot appear in infix position.
    #[must_use]
    pub const fn left_binding_power(&self) -> u8 {
        match self {
            Self::Plus | Self::Minus => SUM_BP,
            Self::Star | Self::Slash => PRODUCT_BP,
            _ => 0,
        }
    }

    /// Binding power used to parse the operand of a prefix operator, or
    /// `None` if the token is not a prefix operator.
    #[must_use]
    pub const fn prefix_binding_power(&self) -> Option<u8> {
        match self {
            Self::Minus => Some(NEGATE_BP),
            Self::Sin | Self::Cos | Self::Exp => Some(CALL_BP),
            _ => None,
        }
    }

    /// Returns true if this token can begin an expression
    #[must_use]
    pub const fn starts_expression(&self) -> bool {
        matches!(
            self,
            Self::Z
                | Self::X
                | Self::Y
                | Self::I
                | Self::Number(_)
                | Self::LParen
                | Self::Minus
                | Self::Sin
                | Self::Cos
                | Self::Exp
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Z => write!(f, "z"),
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::I => write!(f, "i"),
            Self::Number(_) => write!(f, "number"),
            Self::Sin => write!(f, "sin"),
            Self::Cos => write!(f, "cos"),
            Self::Exp => write!(f, "exp"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::End => write!(f, "end of input"),
        }
    }
}

/// Value of a decimal literal: accumulate the integer digits, then the
/// fractional digits, and divide the latter by 10^count.
fn decimal_value(lexeme: &str) -> f64 {
    let (int_part, frac_part) = lexeme.split_once('.').unwrap_or((lexeme, ""));

    let mut value = 0.0;
    for digit in int_part.bytes() {
        value = value * 10.0 + f64::from(digit - b'0');
    }

    let mut fraction = 0.0;
    let mut scale = 1.0;
    for digit in frac_part.bytes() {
        fraction = fraction * 10.0 + f64::from(digit - b'0');
        scale *= 10.0;
    }

    value + fraction / scale
}
