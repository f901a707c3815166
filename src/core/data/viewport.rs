use std::error::Error;
use std::fmt;

pub const DEFAULT_PIXEL_WIDTH: u32 = 1024;
pub const DEFAULT_PIXEL_HEIGHT: u32 = 768;

/// Render-target geometry: the backing-store resolution in physical pixels
/// plus the logical (window-point) size pointer events are reported in. The
/// two differ on high-density displays.
///
/// Invariant: all dimensions are strictly positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pixel_width: u32,
    pixel_height: u32,
    logical_width: f64,
    logical_height: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    NonPositiveDimensions {
        pixel_width: u32,
        pixel_height: u32,
        logical_width: f64,
        logical_height: f64,
    },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimensions {
                pixel_width,
                pixel_height,
                logical_width,
                logical_height,
            } => {
                write!(
                    f,
                    "viewport dimensions must be positive, got {pixel_width}x{pixel_height} physical / {logical_width}x{logical_height} logical"
                )
            }
        }
    }
}

impl Error for ViewportError {}

/// Outcome of a resize request. `Unchanged` lets callers skip render-target
/// reallocation when the window system repeats the current size.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewportUpdate {
    Resized,
    Unchanged,
    Rejected,
}

impl Viewport {
    pub fn new(
        pixel_width: u32,
        pixel_height: u32,
        logical_width: f64,
        logical_height: f64,
    ) -> Result<Self, ViewportError> {
        if pixel_width == 0
            || pixel_height == 0
            || !(logical_width > 0.0)
            || !(logical_height > 0.0)
        {
            return Err(ViewportError::NonPositiveDimensions {
                pixel_width,
                pixel_height,
                logical_width,
                logical_height,
            });
        }

        Ok(Self {
            pixel_width,
            pixel_height,
            logical_width,
            logical_height,
        })
    }

    /// Applies a resize event. Degenerate dimensions are ignored (the previous
    /// geometry stays in place) and a repeat of the current geometry reports
    /// `Unchanged`.
    pub fn resize(
        &mut self,
        pixel_width: u32,
        pixel_height: u32,
        logical_width: f64,
        logical_height: f64,
    ) -> ViewportUpdate {
        let Ok(next) = Self::new(pixel_width, pixel_height, logical_width, logical_height) else {
            return ViewportUpdate::Rejected;
        };

        if next == *self {
            return ViewportUpdate::Unchanged;
        }

        *self = next;
        ViewportUpdate::Resized
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    #[must_use]
    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    #[must_use]
    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    /// The shorter physical edge. Defines the isotropic zoom unit.
    #[must_use]
    pub fn min_pixel_dim(&self) -> f64 {
        f64::from(self.pixel_width.min(self.pixel_height))
    }

    /// Per-axis physical-pixels-per-logical-point factors for converting
    /// pointer coordinates to backing-store coordinates.
    #[must_use]
    pub fn pointer_scale(&self) -> (f64, f64) {
        (
            f64::from(self.pixel_width) / self.logical_width,
            f64::from(self.pixel_height) / self.logical_height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pixel_width: DEFAULT_PIXEL_WIDTH,
            pixel_height: DEFAULT_PIXEL_HEIGHT,
            logical_width: f64::from(DEFAULT_PIXEL_WIDTH),
            logical_height: f64::from(DEFAULT_PIXEL_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_pixel_dims() {
        let result = Viewport::new(0, 600, 800.0, 600.0);

        assert_eq!(
            result,
            Err(ViewportError::NonPositiveDimensions {
                pixel_width: 0,
                pixel_height: 600,
                logical_width: 800.0,
                logical_height: 600.0,
            })
        );
    }

    #[test]
    fn test_new_rejects_non_positive_logical_dims() {
        assert!(Viewport::new(800, 600, -800.0, 600.0).is_err());
        assert!(Viewport::new(800, 600, 800.0, 0.0).is_err());
        assert!(Viewport::new(800, 600, f64::NAN, 600.0).is_err());
    }

    #[test]
    fn test_resize_applies_new_dims() {
        let mut viewport = Viewport::default();

        let update = viewport.resize(1920, 1080, 960.0, 540.0);

        assert_eq!(update, ViewportUpdate::Resized);
        assert_eq!(viewport.pixel_width(), 1920);
        assert_eq!(viewport.pixel_height(), 1080);
    }

    #[test]
    fn test_resize_same_dims_is_idempotent() {
        let mut viewport = Viewport::new(800, 600, 800.0, 600.0).unwrap();
        let before = viewport;

        let first = viewport.resize(800, 600, 800.0, 600.0);
        let second = viewport.resize(800, 600, 800.0, 600.0);

        assert_eq!(first, ViewportUpdate::Unchanged);
        assert_eq!(second, ViewportUpdate::Unchanged);
        assert_eq!(viewport, before);
    }

    #[test]
    fn test_resize_zero_dims_keeps_previous_geometry() {
        let mut viewport = Viewport::new(800, 600, 800.0, 600.0).unwrap();

        let update = viewport.resize(0, 0, 0.0, 0.0);

        assert_eq!(update, ViewportUpdate::Rejected);
        assert_eq!(viewport.pixel_width(), 800);
        assert_eq!(viewport.pixel_height(), 600);
    }

    #[test]
    fn test_min_pixel_dim_uses_shorter_edge() {
        let viewport = Viewport::new(800, 600, 800.0, 600.0).unwrap();

        assert_eq!(viewport.min_pixel_dim(), 600.0);
    }

    #[test]
    fn test_pointer_scale_on_high_density_display() {
        let viewport = Viewport::new(1600, 1200, 800.0, 600.0).unwrap();

        assert_eq!(viewport.pointer_scale(), (2.0, 2.0));
    }
}
