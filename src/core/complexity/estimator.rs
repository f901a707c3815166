//! Coarse per-tile iteration-budget prediction.
//!
//! Once per frame the estimator sparsely samples the escape iteration over a
//! 64×64 tile grid and classifies each tile. Tiles whose samples escape
//! near-uniformly get a budget just above their observed maximum; everything
//! else (cap hits, spread-out counts) keeps the full budget so boundary
//! regions are never starved. The device evaluator then caps per-pixel work
//! at the tile budget, which skips most iterations in large uniform regions.

use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;
use crate::core::escape::escape_iterations;
use crate::core::mapping;

use super::grid::{ComplexityGrid, GRID_SIZE};

/// Max-min iteration spread below which a tile counts as uniform.
pub const SIMPLE_TILE_SPREAD: i32 = 2;
/// Smallest safety margin added on top of a simple tile's observed maximum.
pub const MIN_SAFETY_MARGIN: i32 = 32;
/// Relative safety margin over a simple tile's observed maximum.
pub const SAFETY_MARGIN_FACTOR: f64 = 0.2;
/// No tile budget may denormalize below this many iterations.
pub const MIN_TILE_ITERATIONS: i32 = 16;

/// Sampling density for one rebuild pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EstimatorQuality {
    /// 3×3 samples per tile.
    Full,
    /// Single center sample per tile; used while the user is interacting.
    Preview,
}

impl EstimatorQuality {
    #[must_use]
    pub fn samples_per_axis(self) -> usize {
        match self {
            Self::Full => 3,
            Self::Preview => 1,
        }
    }
}

/// Counters from one rebuild pass, for diagnostics and the HUD.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EstimateReport {
    pub simple_tiles: usize,
    pub full_budget_tiles: usize,
    pub samples_taken: usize,
}

/// Owns the complexity grid and rewrites it in place from the current view.
#[derive(Debug, Default)]
pub struct ComplexityEstimator {
    grid: ComplexityGrid,
}

impl ComplexityEstimator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: ComplexityGrid::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &ComplexityGrid {
        &self.grid
    }

    /// Recomputes every tile budget for the given camera. The previous grid
    /// contents are irrelevant; nothing is carried across frames.
    pub fn rebuild(
        &mut self,
        viewport: &Viewport,
        center: Complex,
        zoom: f64,
        iteration_cap: i32,
        quality: EstimatorQuality,
    ) -> EstimateReport {
        let samples_per_axis = quality.samples_per_axis();
        let tile_width = f64::from(viewport.pixel_width()) / GRID_SIZE as f64;
        let tile_height = f64::from(viewport.pixel_height()) / GRID_SIZE as f64;
        let pixel_height = f64::from(viewport.pixel_height());

        let mut report = EstimateReport {
            simple_tiles: 0,
            full_budget_tiles: 0,
            samples_taken: 0,
        };

        for tile_y in 0..GRID_SIZE {
            for tile_x in 0..GRID_SIZE {
                let mut min_iterations = i32::MAX;
                let mut max_iterations = 0;
                let mut hit_cap = false;

                for sample_y in 0..samples_per_axis {
                    for sample_x in 0..samples_per_axis {
                        let fraction_x = (sample_x as f64 + 0.5) / samples_per_axis as f64;
                        let fraction_y = (sample_y as f64 + 0.5) / samples_per_axis as f64;
                        // Tile rows count from the bottom of the screen;
                        // the mapping expects top-down pixel coordinates.
                        let pixel_x = (tile_x as f64 + fraction_x) * tile_width;
                        let pixel_y =
                            pixel_height - (tile_y as f64 + fraction_y) * tile_height;

                        let c =
                            mapping::pixel_to_plane(pixel_x, pixel_y, viewport, center, zoom);
                        let iterations = escape_iterations(c, iteration_cap);

                        min_iterations = min_iterations.min(iterations);
                        max_iterations = max_iterations.max(iterations);
                        hit_cap |= iterations >= iteration_cap;
                        report.samples_taken += 1;
                    }
                }

                let simple = is_simple_tile(min_iterations, max_iterations, hit_cap);
                if simple {
                    report.simple_tiles += 1;
                } else {
                    report.full_budget_tiles += 1;
                }

                self.grid
                    .set(tile_x, tile_y, tile_budget(simple, max_iterations, iteration_cap));
            }
        }

        report
    }
}

fn is_simple_tile(min_iterations: i32, max_iterations: i32, hit_cap: bool) -> bool {
    !hit_cap && (max_iterations - min_iterations) < SIMPLE_TILE_SPREAD
}

fn tile_budget(simple: bool, max_iterations: i32, iteration_cap: i32) -> f32 {
    if !simple {
        return 1.0;
    }

    let margin = MIN_SAFETY_MARGIN
        .max((f64::from(max_iterations) * SAFETY_MARGIN_FACTOR).round() as i32);
    let predicted = iteration_cap
        .min(max_iterations + margin)
        .max(MIN_TILE_ITERATIONS);

    predicted as f32 / iteration_cap as f32
}
