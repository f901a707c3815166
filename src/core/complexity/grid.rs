/// Tiles per axis of the complexity map.
pub const GRID_SIZE: usize = 64;

/// Coarse per-tile iteration budgets covering the viewport, normalized by the
/// global iteration cap into [0, 1].
///
/// Row-major in texture orientation: row 0 is the bottom row of the screen,
/// matching how the device samples the uploaded map. The backing buffer is
/// allocated once and rewritten in place every frame.
#[derive(Debug, Clone)]
pub struct ComplexityGrid {
    values: Vec<f32>,
}

impl ComplexityGrid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: vec![1.0; GRID_SIZE * GRID_SIZE],
        }
    }

    #[must_use]
    pub fn get(&self, tile_x: usize, tile_y: usize) -> f32 {
        self.values[tile_y * GRID_SIZE + tile_x]
    }

    pub(crate) fn set(&mut self, tile_x: usize, tile_y: usize, value: f32) {
        self.values[tile_y * GRID_SIZE + tile_x] = value;
    }

    /// Flat row-major view for texture upload.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl Default for ComplexityGrid {
    fn default() -> Self {
        Self::new()
    }
}
