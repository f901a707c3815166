pub mod adapters;
pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
#[cfg(feature = "gui")]
pub mod presenters;
pub mod storage;

pub use controllers::snapshot::snapshot_to_ppm;
pub use self::core::complexity::{ComplexityEstimator, EstimatorQuality};
pub use self::core::data::{Complex, Viewport};
pub use self::core::escape::escape_iterations;
pub use self::core::view::ViewState;

#[cfg(feature = "gui")]
pub use input::gui::run_viewer;
