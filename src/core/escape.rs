//! Escape-time evaluation of the Mandelbrot iteration `z ← z² + c`.
//!
//! Everything runs in f64. Accuracy at deep zoom is bounded by that: past
//! roughly 1e-13 of plane extent adjacent pixels collapse onto the same
//! double, which is the documented precision limit of the viewer.

use crate::core::data::complex::Complex;

/// Escape threshold `|z|²` for the discrete host path.
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Escape threshold `|z|²` for the continuous-coloring path. The double-log
/// smoothing term needs the orbit well clear of the escape circle before the
/// fractional part stabilizes, hence the wider radius.
pub const COLORING_ESCAPE_RADIUS_SQ: f64 = 16.0;

/// Number of iterations until `|z|² ≥ 4`, or `cap` if the orbit never
/// escapes (treated as set-interior).
#[must_use]
pub fn escape_iterations(c: Complex, cap: i32) -> i32 {
    let mut z = Complex::new(0.0, 0.0);

    for iteration in 0..cap {
        if z.magnitude_squared() >= ESCAPE_RADIUS_SQ {
            return iteration;
        }
        z = z * z + c;
    }

    cap
}

/// Continuous iteration estimate for anti-banded coloring, or `None` when the
/// orbit stays bounded through `cap` iterations.
///
/// Mirrors the device-side formula exactly: escape at radius² 16, then
/// `i - log2(log2(|z|)) + 4`.
#[must_use]
pub fn smooth_escape(c: Complex, cap: i32) -> Option<f64> {
    let mut z = Complex::new(0.0, 0.0);

    for iteration in 0..cap {
        let magnitude_squared = z.magnitude_squared();
        if magnitude_squared >= COLORING_ESCAPE_RADIUS_SQ {
            let dist = magnitude_squared.sqrt();
            return Some(f64::from(iteration) - dist.log2().log2() + 4.0);
        }
        z = z * z + c;
    }

    None
}
