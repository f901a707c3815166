//! Floating control panel drawn over the fractal canvas.
//!
//! The window lives on its own egui layer, so dragging it around or clicking
//! its widgets never reaches the canvas underneath.

use eframe::egui;

use crate::core::data::Complex;

/// Runtime strategy switches, mutated directly by the HUD widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSettings {
    pub smooth_coloring: bool,
    pub use_budget_map: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            smooth_coloring: true,
            use_budget_map: true,
        }
    }
}

/// Read-only values the HUD displays for the frame being built.
pub struct HudData {
    pub zoom: f64,
    pub center: Complex,
    pub iteration_cap: i32,
    pub render_width: u32,
    pub render_height: u32,
    pub capped_tiles: usize,
    pub total_tiles: usize,
    pub frame_interval_ms: f64,
    pub host_ms: f64,
}

/// Button presses the caller acts on after layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HudResponse {
    pub reset_clicked: bool,
    pub screenshot_clicked: bool,
}

pub fn draw_hud(
    ctx: &egui::Context,
    data: &HudData,
    settings: &mut ViewerSettings,
) -> HudResponse {
    let mut response = HudResponse::default();

    egui::Window::new("Controls")
        .default_pos([10.0, 10.0])
        .default_size([250.0, 220.0])
        .show(ctx, |ui| {
            ui.heading("Fractal Dive");
            ui.separator();

            ui.label(format!("Zoom: {:.3e}", data.zoom));
            ui.label(format!(
                "Center: ({:.12}, {:.12})",
                data.center.real, data.center.imag
            ));
            ui.label(format!("Iteration cap: {}", data.iteration_cap));
            ui.label(format!(
                "Render target: {}x{}",
                data.render_width, data.render_height
            ));
            ui.label(format!(
                "Capped tiles: {} / {}",
                data.capped_tiles, data.total_tiles
            ));
            ui.label(format!(
                "Frame: {:.1} ms (host {:.2} ms)",
                data.frame_interval_ms, data.host_ms
            ));

            ui.separator();
            ui.checkbox(&mut settings.smooth_coloring, "Smooth coloring");
            ui.checkbox(&mut settings.use_budget_map, "Complexity budget map");

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Reset view").clicked() {
                    response.reset_clicked = true;
                }
                if ui.button("Save screenshot").clicked() {
                    response.screenshot_clicked = true;
                }
            });
        });

    response
}
