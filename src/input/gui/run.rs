//! Viewer bootstrap.

use eframe::egui;

use super::app::ViewerApp;

/// Opens the interactive viewer window. Does not return until it is closed.
pub fn run_viewer() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(800.0, 600.0))
            .with_min_inner_size(egui::vec2(200.0, 200.0)),
        renderer: eframe::Renderer::Glow,
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "Fractal Dive",
        native_options,
        Box::new(|cc| Box::new(ViewerApp::new(cc))),
    )
}
