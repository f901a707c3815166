/// Last observed pointer position, in logical window coordinates, plus the
/// primary-button state that drives panning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub primary_held: bool,
}
