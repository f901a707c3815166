//! Presentation backends. The GL presenter draws the fractal itself; the UI
//! chrome around it is egui's concern and lives under `input::gui`.

pub mod gl;
