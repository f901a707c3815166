//! Input occurrences delivered to the view layer during the poll step.
//!
//! The windowing shell translates whatever its event source produces into
//! these values, so every camera mutation is a plain function of state and
//! event and can be exercised without a window system.

/// Which physical pointer button an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Vertical scroll amount. Positive is wheel-away, which zooms in.
    Scroll { delta_y: f64 },
    /// Pointer moved to a new position, in logical window coordinates.
    PointerMove { x: f64, y: f64 },
    /// A pointer button changed press state.
    PointerButton { button: PointerButton, pressed: bool },
    /// Window geometry changed. Carries both the backing-store resolution
    /// and the logical size pointer events are reported in.
    Resize {
        pixel_width: u32,
        pixel_height: u32,
        logical_width: f64,
        logical_height: f64,
    },
}
