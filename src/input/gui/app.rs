//! The interactive viewer application.
//!
//! Each `update` call is one pass of the frame loop: translate egui input
//! into view events, advance the camera, rebuild the complexity budgets,
//! plan the frame fidelity, stage everything for the GL painter, and lay
//! out the HUD.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use eframe::egui;
use eframe::glow;

use crate::adapters::pixel_format;
use crate::controllers::snapshot::color_frequency;
use crate::core::complexity::{ComplexityEstimator, EstimateReport, GRID_SIZE};
use crate::core::data::Viewport;
use crate::core::scheduling::AdaptiveRenderScheduler;
use crate::core::view::{InputEvent, PointerButton, PointerState, ViewState, dispatch_event};
use crate::presenters::gl::{FrameUniforms, GlRenderer};
use crate::storage::write_ppm::write_ppm;

use super::hud::{self, HudData, ViewerSettings};

pub struct ViewerApp {
    gl: Arc<glow::Context>,
    renderer: Arc<Mutex<GlRenderer>>,
    view: ViewState,
    pointer: PointerState,
    viewport: Viewport,
    estimator: ComplexityEstimator,
    scheduler: AdaptiveRenderScheduler,
    settings: ViewerSettings,
    timing: FrameTiming,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let gl = cc
            .gl
            .clone()
            .expect("the viewer needs eframe's glow backend");
        let renderer = GlRenderer::new(&gl).expect("Failed to build the fractal renderer");

        Self {
            gl,
            renderer: Arc::new(Mutex::new(renderer)),
            view: ViewState::default(),
            pointer: PointerState::default(),
            viewport: Viewport::default(),
            estimator: ComplexityEstimator::new(),
            scheduler: AdaptiveRenderScheduler::new(),
            settings: ViewerSettings::default(),
            timing: FrameTiming::default(),
        }
    }

    /// Runs the camera and staging side of one frame and emits the paint
    /// callback for the canvas.
    fn fractal_canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) -> FrameSummary {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());

        for event in collect_canvas_events(ctx, &response) {
            dispatch_event(&mut self.view, &mut self.pointer, &mut self.viewport, event);
        }

        let report = self.view.begin_frame();
        let plan = self.scheduler.plan_frame(&self.view, &self.viewport);
        let estimate = self.estimator.rebuild(
            &self.viewport,
            self.view.center,
            self.view.zoom,
            report.iteration_cap,
            plan.estimator_quality,
        );

        let uniforms = FrameUniforms {
            center: self.view.center,
            zoom: self.view.zoom,
            iteration_cap: report.iteration_cap,
            color_frequency: color_frequency(self.view.zoom) as f32,
            smooth_coloring: self.settings.smooth_coloring,
            apply_budget: self.settings.use_budget_map,
            render_width: plan.render_width,
            render_height: plan.render_height,
        };
        match self.renderer.lock() {
            Ok(mut renderer) => renderer.stage_frame(uniforms, self.estimator.grid()),
            Err(_) => log::error!("renderer lock poisoned; frame not staged"),
        }

        let renderer = Arc::clone(&self.renderer);
        painter.add(egui::PaintCallback {
            rect: response.rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                match renderer.lock() {
                    Ok(mut renderer) => renderer.paint(painter.gl(), &info),
                    Err(_) => log::error!("renderer lock poisoned; frame skipped"),
                }
            })),
        });

        FrameSummary {
            iteration_cap: report.iteration_cap,
            render_width: plan.render_width,
            render_height: plan.render_height,
            estimate,
        }
    }

    /// Captures the last rendered frame and writes it as a PPM file.
    /// Failures are logged; the session keeps running.
    fn save_screenshot(&self) {
        let captured = match self.renderer.lock() {
            Ok(renderer) => renderer.capture_frame(&self.gl),
            Err(_) => {
                log::error!("renderer lock poisoned; screenshot skipped");
                return;
            }
        };
        let frame = match captured {
            Ok(frame) => frame,
            Err(error) => {
                log::error!("screenshot capture failed: {error}");
                return;
            }
        };

        let mut rgb = vec![0u8; frame.width as usize * frame.height as usize * 3];
        pixel_format::copy_rgba_to_rgb(&frame.pixels, &mut rgb);
        // GL rows come back bottom-up.
        pixel_format::flip_rows_vertically(&mut rgb, frame.width as usize * 3);

        let path = screenshot_path();
        let written = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| write_ppm(&rgb, frame.width, frame.height, &path));
        match written {
            Ok(()) => log::info!("screenshot saved to {}", path.display()),
            Err(error) => {
                log::error!("could not save screenshot to {}: {error}", path.display());
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_started = self.timing.begin();

        let summary = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.fractal_canvas(ctx, ui))
            .inner;

        let hud_data = HudData {
            zoom: self.view.zoom,
            center: self.view.center,
            iteration_cap: summary.iteration_cap,
            render_width: summary.render_width,
            render_height: summary.render_height,
            capped_tiles: summary.estimate.simple_tiles,
            total_tiles: GRID_SIZE * GRID_SIZE,
            frame_interval_ms: self.timing.frame_interval.as_secs_f64() * 1000.0,
            host_ms: self.timing.host_work.as_secs_f64() * 1000.0,
        };
        let hud_response = hud::draw_hud(ctx, &hud_data, &mut self.settings);
        if hud_response.reset_clicked {
            self.view.reset();
        }
        if hud_response.screenshot_clicked {
            self.save_screenshot();
        }

        self.timing.record_host_work(frame_started);
        // The interaction debounce counts polls, so the loop must keep
        // running even when no input arrives.
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            match self.renderer.lock() {
                Ok(mut renderer) => renderer.destroy(gl),
                Err(_) => log::error!("renderer lock poisoned; GL resources not released"),
            }
        }
    }
}

struct FrameSummary {
    iteration_cap: i32,
    render_width: u32,
    render_height: u32,
    estimate: EstimateReport,
}

/// Translates this frame's egui input on the canvas into view events.
///
/// A `Resize` and a `PointerMove` are emitted every frame; the dispatch
/// layer treats repeats of the same geometry or position as no-ops, so
/// neither disturbs the interaction flags.
fn collect_canvas_events(ctx: &egui::Context, response: &egui::Response) -> Vec<InputEvent> {
    let rect = response.rect;
    let mut events = Vec::new();

    let pixels_per_point = ctx.pixels_per_point();
    events.push(InputEvent::Resize {
        pixel_width: (rect.width() * pixels_per_point).round() as u32,
        pixel_height: (rect.height() * pixels_per_point).round() as u32,
        logical_width: f64::from(rect.width()),
        logical_height: f64::from(rect.height()),
    });

    if response.drag_started_by(egui::PointerButton::Primary) {
        events.push(InputEvent::PointerButton {
            button: PointerButton::Primary,
            pressed: true,
        });
    }

    if let Some(position) = ctx.input(|i| i.pointer.latest_pos()) {
        let local = position - rect.min;
        events.push(InputEvent::PointerMove {
            x: f64::from(local.x),
            y: f64::from(local.y),
        });
    }

    if response.hovered() {
        let delta_y = ctx.input(|i| i.raw_scroll_delta.y);
        if delta_y != 0.0 {
            events.push(InputEvent::Scroll {
                delta_y: f64::from(delta_y),
            });
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        events.push(InputEvent::PointerButton {
            button: PointerButton::Primary,
            pressed: false,
        });
    }

    events
}

fn screenshot_path() -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    PathBuf::from("output").join(format!("screenshot_{stamp}.ppm"))
}

#[derive(Debug, Default)]
struct FrameTiming {
    previous_frame: Option<Instant>,
    frame_interval: Duration,
    host_work: Duration,
}

impl FrameTiming {
    /// Marks the start of a frame and returns its timestamp. The gap to the
    /// previous frame becomes the displayed frame interval.
    fn begin(&mut self) -> Instant {
        let now = Instant::now();
        if let Some(previous) = self.previous_frame.replace(now) {
            self.frame_interval = now - previous;
        }
        now
    }

    fn record_host_work(&mut self, started: Instant) {
        self.host_work = started.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_first_frame_has_no_interval() {
        let mut timing = FrameTiming::default();

        timing.begin();

        assert_eq!(timing.frame_interval, Duration::ZERO);
    }

    #[test]
    fn the_second_frame_measures_the_gap() {
        let mut timing = FrameTiming::default();

        timing.begin();
        std::thread::sleep(Duration::from_millis(2));
        timing.begin();

        assert!(timing.frame_interval >= Duration::from_millis(2));
    }

    #[test]
    fn screenshots_land_in_the_output_directory() {
        let path = screenshot_path();

        assert!(path.starts_with("output"));
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("ppm"));
    }
}
