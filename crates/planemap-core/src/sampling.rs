//! Sampling of lines and grids in the source plane
//!
//! A grid is a set of vertical and horizontal lines covering the square
//! `[-plane_size, plane_size]^2`. Each line is sampled at `steps + 1` evenly
//! spaced points, and [`map_grid`] pushes every point through a [`PlaneMap`]
//! to get the image of the grid in the target plane. Drawing is left to the
//! caller; the hue on each line only records where it sits in the window.

#![allow(clippy::cast_precision_loss)] // step and line counts are far below 2^52

use rayon::prelude::*;
use serde::Serialize;

use crate::complex::Complex;
use crate::config::ViewConfig;
use crate::plane_map::PlaneMap;

/// Base hue (degrees) of the leftmost vertical line
const VERTICAL_HUE: f64 = 300.0;
/// Base hue (degrees) of the bottom horizontal line
const HORIZONTAL_HUE: f64 = 120.0;
/// Hue sweep across the window
const HUE_SPAN: f64 = 180.0;

/// `steps + 1` evenly spaced points from `from` to `to`, both included.
///
/// With `steps == 0` the result is just `from`.
#[must_use]
pub fn interpolate_line(from: Complex, to: Complex, steps: usize) -> Vec<Complex> {
    if steps == 0 {
        return vec![from];
    }

    let n = steps as f64;
    let step = Complex::new((to.re - from.re) / n, (to.im - from.im) / n);
    (0..=steps)
        .map(|k| {
            let k = k as f64;
            Complex::new(from.re + k * step.re, from.im + k * step.im)
        })
        .collect()
}

/// Direction of a grid line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Constant real part
    Vertical,
    /// Constant imaginary part
    Horizontal,
}

/// One sampled grid line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLine {
    pub orientation: Orientation,
    /// The fixed coordinate: `x` for vertical lines, `y` for horizontal ones
    pub offset: f64,
    /// Hue in degrees
    pub hue: f64,
    /// Sampled points, in the source plane until mapped
    pub points: Vec<Complex>,
}

impl GridLine {
    /// The same line with every point pushed through `map`
    #[must_use]
    pub fn map_through(&self, map: &PlaneMap) -> Self {
        Self {
            orientation: self.orientation,
            offset: self.offset,
            hue: self.hue,
            points: map.map_points(&self.points),
        }
    }
}

/// Fixed coordinates of the grid lines along one axis
fn grid_offsets(config: &ViewConfig) -> impl Iterator<Item = f64> {
    let size = config.plane_size;
    let spacing = size / config.grid_divisions as f64;
    (0..config.grid_divisions.saturating_mul(2)).map(move |k| -size + k as f64 * spacing)
}

/// Position of `offset` across the window, from 0 at the low edge to 1 at the high edge
fn window_fraction(offset: f64, size: f64) -> f64 {
    (offset + size) / (2.0 * size)
}

/// Sample the grid in the source plane: all vertical lines left to right,
/// then all horizontal lines bottom to top.
#[must_use]
pub fn grid_lines(config: &ViewConfig) -> Vec<GridLine> {
    let size = config.plane_size;

    let vertical = grid_offsets(config).map(|x| GridLine {
        orientation: Orientation::Vertical,
        offset: x,
        hue: VERTICAL_HUE + HUE_SPAN * window_fraction(x, size),
        points: interpolate_line(
            Complex::new(x, -size),
            Complex::new(x, size),
            config.steps,
        ),
    });

    let horizontal = grid_offsets(config).map(|y| GridLine {
        orientation: Orientation::Horizontal,
        offset: y,
        hue: HORIZONTAL_HUE + HUE_SPAN * window_fraction(y, size),
        points: interpolate_line(
            Complex::new(-size, y),
            Complex::new(size, y),
            config.steps,
        ),
    });

    vertical.chain(horizontal).collect()
}

/// Image of the sampled grid under `map`, lines mapped in parallel
#[must_use]
pub fn map_grid(map: &PlaneMap, config: &ViewConfig) -> Vec<GridLine> {
    let lines = grid_lines(config);
    tracing::trace!(
        formula = map.source(),
        lines = lines.len(),
        steps = config.steps,
        "mapping grid"
    );
    lines.par_iter().map(|line| line.map_through(map)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints() {
        let from = Complex::new(-1.0, 2.0);
        let to = Complex::new(3.0, -2.0);
        let points = interpolate_line(from, to, 4);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], from);
        assert_eq!(points[2], Complex::new(1.0, 0.0));
        assert_eq!(points[4], to);
    }

    #[test]
    fn test_interpolate_zero_steps() {
        let from = Complex::new(1.0, 1.0);
        assert_eq!(interpolate_line(from, Complex::ZERO, 0), vec![from]);
    }

    #[test]
    fn test_grid_layout() {
        let config = ViewConfig::new()
            .with_plane_size(2.0)
            .with_grid_divisions(2)
            .with_steps(10);
        let lines = grid_lines(&config);

        // 2 * divisions per axis
        assert_eq!(lines.len(), 8);
        let offsets: Vec<f64> = lines[..4].iter().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![-2.0, -1.0, 0.0, 1.0]);
        assert!(lines[..4]
            .iter()
            .all(|l| l.orientation == Orientation::Vertical));
        assert!(lines[4..]
            .iter()
            .all(|l| l.orientation == Orientation::Horizontal));

        for line in &lines {
            assert_eq!(line.points.len(), 11);
        }

        let first = &lines[0];
        assert_eq!(first.points[0], Complex::new(-2.0, -2.0));
        assert_eq!(first.points[10], Complex::new(-2.0, 2.0));
        assert_eq!(first.hue, 300.0);

        let last_horizontal = &lines[7];
        assert_eq!(last_horizontal.points[0], Complex::new(-2.0, 1.0));
        assert_eq!(last_horizontal.hue, 120.0 + 180.0 * 0.75);
    }

    #[test]
    fn test_map_grid_identity_is_unchanged() {
        let config = ViewConfig::new().with_grid_divisions(3).with_steps(20);
        assert_eq!(map_grid(&PlaneMap::identity(), &config), grid_lines(&config));
    }

    #[test]
    fn test_map_grid_applies_formula() {
        let config = ViewConfig::new().with_grid_divisions(1).with_steps(2);
        let map = PlaneMap::parse("2*z").unwrap();
        let mapped = map_grid(&map, &config);
        let source = grid_lines(&config);

        assert_eq!(mapped.len(), source.len());
        for (image, line) in mapped.iter().zip(&source) {
            assert_eq!(image.offset, line.offset);
            assert_eq!(image.hue, line.hue);
            for (w, z) in image.points.iter().zip(&line.points) {
                assert_eq!(w.re, 2.0 * z.re);
                assert_eq!(w.im, 2.0 * z.im);
            }
        }
    }
}
