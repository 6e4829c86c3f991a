//! Planemap Core - formula compiler for complex plane mappings
//!
//! This crate turns a formula over a complex variable, such as
//! `exp(i*z) + 1/z`, into a [`PlaneMap`] that can be evaluated at any point:
//! - Complex: pair-of-reals arithmetic and `sin`, `cos`, `exp`
//! - Lexer: on-demand tokenization of formula source
//! - Parser: Pratt parser building the expression tree
//! - PlaneMap: the compiled, thread-safe `complex -> complex` function
//! - Sampling: lines and grids pushed through a map
//!
//! # Example
//!
//! ```
//! use planemap_core::{parse, Complex};
//!
//! let map = parse("(2+3)*4 + i").unwrap();
//! assert_eq!(map.eval(Complex::ZERO), Complex::new(20.0, 1.0));
//!
//! let err = parse("1 2").unwrap_err();
//! assert_eq!(err.offset(), 2);
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Complex arithmetic
pub mod complex;

/// Lexer module - tokenization of formula source
pub mod lexer;

/// Expression tree produced by the parser
pub mod ast;

/// Parser module - converts tokens into an expression tree
pub mod parser;

/// Compiled formulas
pub mod plane_map;

/// View configuration file support
pub mod config;

/// Line and grid sampling
pub mod sampling;

pub use complex::Complex;
pub use config::{ConfigError, ViewConfig};
pub use parser::{ParseError, ParseErrorKind};
pub use plane_map::PlaneMap;

/// Parse a formula into a [`PlaneMap`].
///
/// The whole string must form a single expression. On failure nothing is
/// returned but the error, which carries the offset of the problem.
pub fn parse(source: &str) -> Result<PlaneMap, ParseError> {
    PlaneMap::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn parse_entry_point() {
        let map = parse("z").unwrap();
        let z = Complex::new(0.5, -0.25);
        assert_eq!(map.eval(z), z);
        assert!(parse("(").is_err());
    }
}
