//! Windowed shell for interactive exploration: an eframe application with a
//! GL-painted canvas and an egui control panel.

mod app;
mod hud;
mod run;

pub use run::run_viewer;
