pub mod estimator;
pub mod grid;

pub use estimator::{ComplexityEstimator, EstimateReport, EstimatorQuality};
pub use grid::{ComplexityGrid, GRID_SIZE};
