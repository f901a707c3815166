//! The one pixel-to-complex-plane transform shared by every consumer.
//!
//! Conventions, fixed here and relied on everywhere else:
//!
//! - Pixel coordinates are backing-store (physical) pixels with the origin at
//!   the top-left corner and Y growing downward. Pointer coordinates arrive in
//!   logical window points and are scaled per axis before use.
//! - Plane coordinates put the imaginary axis upward. The vertical flip
//!   between the two happens exactly once, in [`normalized_from_pixel`].
//!   Device-side code reads bottom-up fragment coordinates and therefore
//!   applies no flip of its own.
//! - Normalization divides by the shorter viewport edge, so `zoom` spans the
//!   same plane distance on both axes regardless of aspect ratio.

use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;

/// Dimensionless viewport-centered offset of a physical pixel, in units of
/// the shorter viewport edge. Multiplying by `zoom` yields a plane offset
/// from the view center.
#[must_use]
pub fn normalized_from_pixel(pixel_x: f64, pixel_y: f64, viewport: &Viewport) -> Complex {
    let min_dim = viewport.min_pixel_dim();
    Complex {
        real: (pixel_x - 0.5 * f64::from(viewport.pixel_width())) / min_dim,
        imag: (0.5 * f64::from(viewport.pixel_height()) - pixel_y) / min_dim,
    }
}

/// [`normalized_from_pixel`] for a pointer position in logical coordinates.
#[must_use]
pub fn normalized_from_pointer(pointer_x: f64, pointer_y: f64, viewport: &Viewport) -> Complex {
    let (scale_x, scale_y) = viewport.pointer_scale();
    normalized_from_pixel(pointer_x * scale_x, pointer_y * scale_y, viewport)
}

/// Maps a physical pixel to its complex-plane point under the given camera.
#[must_use]
pub fn pixel_to_plane(
    pixel_x: f64,
    pixel_y: f64,
    viewport: &Viewport,
    center: Complex,
    zoom: f64,
) -> Complex {
    center + normalized_from_pixel(pixel_x, pixel_y, viewport) * zoom
}

/// Maps a logical pointer position to its complex-plane point.
#[must_use]
pub fn pointer_to_plane(
    pointer_x: f64,
    pointer_y: f64,
    viewport: &Viewport,
    center: Complex,
    zoom: f64,
) -> Complex {
    center + normalized_from_pointer(pointer_x, pointer_y, viewport) * zoom
}
