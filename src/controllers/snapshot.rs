//! Offline CPU rendering of one full-quality frame.
//!
//! The snapshot path evaluates the same smooth escape and cosine palette the
//! device shader uses, so an exported image matches what the viewer shows at
//! rest. Rows are computed in parallel; this is an offline export, the
//! interactive loop itself stays single-threaded.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::core::data::viewport::Viewport;
use crate::core::escape::smooth_escape;
use crate::core::mapping;
use crate::core::view::state::ViewState;
use crate::storage::write_ppm::write_ppm;

pub const SNAPSHOT_WIDTH: u32 = 1600;
pub const SNAPSHOT_HEIGHT: u32 = 1200;

/// Color cycling rate, raised as the view dives deeper so neighbouring
/// iteration bands stay distinguishable.
#[must_use]
pub fn color_frequency(zoom: f64) -> f64 {
    0.1 + (-zoom.log10()).max(0.0) * 0.05
}

/// Cosine palette shared with the device shader. Interior points (no escape)
/// are rendered black by the caller.
#[must_use]
pub fn escape_color(smooth: f64, frequency: f64) -> [u8; 3] {
    let t = smooth * frequency;
    let channel = |phase: f64| {
        let value = 0.5 + 0.5 * (3.0 + t + phase).cos();
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };

    [channel(0.0), channel(0.6), channel(1.0)]
}

/// Renders the camera's frame to tightly packed RGB, top row first.
#[must_use]
pub fn render_frame_rgb(view: &ViewState, viewport: &Viewport) -> Vec<u8> {
    let width = viewport.pixel_width() as usize;
    let height = viewport.pixel_height() as usize;
    let cap = view.iteration_cap();
    let frequency = color_frequency(view.zoom);

    let mut pixels = vec![0u8; width * height * 3];
    pixels
        .par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let c = mapping::pixel_to_plane(
                    x as f64 + 0.5,
                    y as f64 + 0.5,
                    viewport,
                    view.center,
                    view.zoom,
                );
                if let Some(smooth) = smooth_escape(c, cap) {
                    let rgb = escape_color(smooth, frequency);
                    row[x * 3..x * 3 + 3].copy_from_slice(&rgb);
                }
            }
        });

    pixels
}

/// Renders the default view at snapshot resolution and writes it as PPM.
pub fn snapshot_to_ppm(filepath: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let viewport = Viewport::new(
        SNAPSHOT_WIDTH,
        SNAPSHOT_HEIGHT,
        f64::from(SNAPSHOT_WIDTH),
        f64::from(SNAPSHOT_HEIGHT),
    )?;
    let view = ViewState::default();

    println!("Rendering Mandelbrot set...");
    println!("Image size: {SNAPSHOT_WIDTH}x{SNAPSHOT_HEIGHT}");
    println!("Max iterations: {}", view.iteration_cap());

    let start = Instant::now();
    let pixels = render_frame_rgb(&view, &viewport);
    println!("Duration:   {:?}", start.elapsed());

    if let Some(parent) = filepath.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_ppm(&pixels, SNAPSHOT_WIDTH, SNAPSHOT_HEIGHT, &filepath)?;
    println!("Saved to {}", filepath.as_ref().display());

    Ok(())
}
