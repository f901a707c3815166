//! Per-frame trade between fidelity and latency.
//!
//! While the user pans or zooms, the frame renders at a quarter of the
//! presentation resolution per axis and the complexity map drops to a single
//! sample per tile; both snap back to full quality once the interaction
//! flags decay. The chosen target size is remembered so the offscreen target
//! only reallocates when it actually changes.

use crate::core::complexity::EstimatorQuality;
use crate::core::data::viewport::Viewport;
use crate::core::view::state::ViewState;

/// Linear downscale per axis applied while interacting.
pub const INTERACTIVE_DOWNSCALE: u32 = 4;

/// Resolution and estimator quality selected for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub render_width: u32,
    pub render_height: u32,
    pub estimator_quality: EstimatorQuality,
    /// Set when the offscreen target must be (re)allocated before drawing.
    pub target_changed: bool,
}

#[derive(Debug, Default)]
pub struct AdaptiveRenderScheduler {
    last_render_width: u32,
    last_render_height: u32,
}

impl AdaptiveRenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan_frame(&mut self, view: &ViewState, viewport: &Viewport) -> FramePlan {
        let interacting = view.is_interacting();

        let (render_width, render_height) = if interacting {
            (
                (viewport.pixel_width() / INTERACTIVE_DOWNSCALE).max(1),
                (viewport.pixel_height() / INTERACTIVE_DOWNSCALE).max(1),
            )
        } else {
            (viewport.pixel_width(), viewport.pixel_height())
        };

        let target_changed =
            render_width != self.last_render_width || render_height != self.last_render_height;
        self.last_render_width = render_width;
        self.last_render_height = render_height;

        FramePlan {
            render_width,
            render_height,
            estimator_quality: if interacting {
                EstimatorQuality::Preview
            } else {
                EstimatorQuality::Full
            },
            target_changed,
        }
    }
}
