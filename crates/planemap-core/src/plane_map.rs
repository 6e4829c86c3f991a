//! Compiled formulas: pure functions from one complex plane to another

use std::sync::Arc;

use rayon::prelude::*;

use crate::ast::{Expr, Node, NodeKind};
use crate::complex::Complex;
use crate::lexer::Span;
use crate::parser::{ParseError, Parser};

/// A parsed formula, callable as `complex -> complex`.
///
/// The node list is shared behind an `Arc`, so clones are cheap and a map can be
/// evaluated from several threads at once. Evaluation reads only the captured
/// constants and its argument.
#[derive(Debug, Clone)]
pub struct PlaneMap {
    source: Arc<str>,
    expr: Arc<Expr>,
}

impl PlaneMap {
    /// Parse `source` into a plane map
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        match Parser::parse_expression(source) {
            Ok(expr) => {
                tracing::debug!(source, nodes = expr.node_count(), "parsed formula");
                Ok(Self {
                    source: Arc::from(source),
                    expr: Arc::new(expr),
                })
            }
            Err(err) => {
                tracing::debug!(source, offset = err.offset(), error = %err, "rejected formula");
                Err(err)
            }
        }
    }

    /// The map `z -> z`
    #[must_use]
    pub fn identity() -> Self {
        Self {
            source: Arc::from("z"),
            expr: Arc::new(Expr::from_post_order(vec![Node::new(
                NodeKind::Var,
                Span::new(0, 1),
            )])),
        }
    }

    /// Evaluate the map at `z`
    #[must_use]
    pub fn eval(&self, z: Complex) -> Complex {
        self.expr.eval(z)
    }

    /// Borrow the map as a plain closure
    pub fn as_fn(&self) -> impl Fn(Complex) -> Complex + Send + Sync + '_ {
        move |z| self.eval(z)
    }

    /// The formula this map was parsed from
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression tree
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Map every point in order
    #[must_use]
    pub fn map_points(&self, points: &[Complex]) -> Vec<Complex> {
        points.iter().map(|&z| self.eval(z)).collect()
    }

    /// Map every point in order, spreading the work over the rayon pool
    #[must_use]
    pub fn map_points_par(&self, points: &[Complex]) -> Vec<Complex> {
        points.par_iter().map(|&z| self.eval(z)).collect()
    }
}

impl Default for PlaneMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::str::FromStr for PlaneMap {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Complex> {
        (-5..=5)
            .flat_map(|re| {
                (-5..=5).map(move |im| Complex::new(f64::from(re) * 0.3, f64::from(im) * 0.7))
            })
            .collect()
    }

    #[test]
    fn test_identity() {
        let map = PlaneMap::default();
        assert_eq!(map.source(), "z");
        for z in samples() {
            assert_eq!(map.eval(z), z);
        }
    }

    #[test]
    fn test_parse_keeps_source() {
        let map: PlaneMap = "z * z + 1".parse().unwrap();
        assert_eq!(map.source(), "z * z + 1");
        assert_eq!(map.expr().to_string(), "((z * z) + 1)");
    }

    #[test]
    fn test_map_points_par_matches_sequential() {
        let map = PlaneMap::parse("exp(z) / (z - 2*i)").unwrap();
        let points = samples();
        let sequential = map.map_points(&points);
        let parallel = map.map_points_par(&points);
        assert_eq!(sequential.len(), points.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert!(a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits());
        }
    }

    #[test]
    fn test_as_fn() {
        let map = PlaneMap::parse("2*z").unwrap();
        let f = map.as_fn();
        assert_eq!(f(Complex::new(1.0, -1.0)), Complex::new(2.0, -2.0));
    }

    #[test]
    fn test_shared_across_threads() {
        let map = PlaneMap::parse("sin(z) * cos(z)").unwrap();
        let expected: Vec<Complex> = map.map_points(&samples());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let map = map.clone();
                std::thread::spawn(move || map.map_points(&samples()))
            })
            .collect();

        for handle in handles {
            let got = handle.join().unwrap();
            assert_eq!(got, expected);
        }
    }
}
