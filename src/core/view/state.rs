use log::warn;

use crate::core::data::complex::Complex;

pub const DEFAULT_CENTER_REAL: f64 = -0.5;
pub const DEFAULT_CENTER_IMAG: f64 = 0.0;
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Hard floor for `zoom`. Below roughly this extent adjacent pixels collapse
/// onto the same f64, so deeper values would only accumulate underflow.
pub const MIN_ZOOM: f64 = 1e-13;

pub const BASE_ITERATION_CAP: i32 = 256;
pub const MAX_ITERATION_CAP: i32 = 2000;
/// Iterations added to the cap per decade of zoom-in.
pub const ITERATIONS_PER_DECADE: f64 = 100.0;

/// Input-free polls before the interaction flags fall back to idle.
pub const INTERACTION_DEBOUNCE_FRAMES: u32 = 10;

/// Iteration cap as a function of zoom depth: the base cap plus 100 per
/// decade below a plane extent of 1.0, clamped to [256, 2000].
#[must_use]
pub fn iteration_cap_for_zoom(zoom: f64) -> i32 {
    let depth_bonus = (-zoom.log10() * ITERATIONS_PER_DECADE).round() as i32;
    (BASE_ITERATION_CAP + depth_bonus).clamp(BASE_ITERATION_CAP, MAX_ITERATION_CAP)
}

/// Camera model plus interaction bookkeeping.
///
/// `center` and `zoom` are free to mutate between frames; `begin_frame`
/// re-establishes the invariants (positive zoom, derived cap) before anything
/// reads them for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: Complex,
    pub zoom: f64,
    iteration_cap: i32,
    panning: bool,
    zooming: bool,
    idle_countdown: u32,
    debounce_armed: bool,
}

/// What `begin_frame` did, for logging and scheduling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameBeginReport {
    pub zoom_clamped: bool,
    pub became_idle: bool,
    pub iteration_cap: i32,
}

impl ViewState {
    /// Per-frame maintenance, run after input dispatch and before estimation
    /// or rendering: debounce decay, zoom floor, iteration-cap recompute.
    pub fn begin_frame(&mut self) -> FrameBeginReport {
        let mut report = FrameBeginReport::default();

        if !(self.zoom >= MIN_ZOOM) {
            warn!(
                "zoom {} under the precision floor, clamping to {MIN_ZOOM:e}",
                self.zoom
            );
            self.zoom = MIN_ZOOM;
            report.zoom_clamped = true;
        }

        if self.debounce_armed {
            // The poll that delivered the input does not count as idle.
            self.debounce_armed = false;
        } else if self.idle_countdown > 0 {
            self.idle_countdown -= 1;
            if self.idle_countdown == 0 && (self.panning || self.zooming) {
                self.panning = false;
                self.zooming = false;
                report.became_idle = true;
            }
        }

        self.iteration_cap = iteration_cap_for_zoom(self.zoom);
        report.iteration_cap = self.iteration_cap;
        report
    }

    /// Restores the startup camera and drops any in-progress interaction.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn mark_panning(&mut self) {
        self.panning = true;
        self.arm_debounce();
    }

    pub fn mark_zooming(&mut self) {
        self.zooming = true;
        self.arm_debounce();
    }

    fn arm_debounce(&mut self) {
        self.idle_countdown = INTERACTION_DEBOUNCE_FRAMES;
        self.debounce_armed = true;
    }

    #[must_use]
    pub fn iteration_cap(&self) -> i32 {
        self.iteration_cap
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        self.panning || self.zooming
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: Complex::new(DEFAULT_CENTER_REAL, DEFAULT_CENTER_IMAG),
            zoom: DEFAULT_ZOOM,
            iteration_cap: iteration_cap_for_zoom(DEFAULT_ZOOM),
            panning: false,
            zooming: false,
            idle_countdown: 0,
            debounce_armed: false,
        }
    }
}
