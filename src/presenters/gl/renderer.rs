//! Owner of the GL objects behind the interactive view: the fractal shader
//! program, the complexity-budget texture, and the lazily sized offscreen
//! target the frame is rendered into before being stretched onto the canvas.
//!
//! The renderer is driven in two phases per frame. `stage_frame` runs during
//! UI construction and only records data; `paint` runs later inside the egui
//! paint callback, where a GL context is current, and issues the actual calls.

use std::num::NonZeroU32;
use std::{error::Error, fmt};

use eframe::egui;
use eframe::glow::{self, HasContext};

use crate::core::complexity::{ComplexityGrid, GRID_SIZE};
use crate::core::data::Complex;
use crate::core::view::state::{
    BASE_ITERATION_CAP, DEFAULT_CENTER_IMAG, DEFAULT_CENTER_REAL, DEFAULT_ZOOM,
};

use super::shaders::{FRAGMENT_SHADER, VERTEX_SHADER};

#[derive(Debug, PartialEq)]
pub enum RendererError {
    ShaderCompile(String),
    ProgramLink(String),
    ResourceAllocation(String),
    IncompleteFramebuffer(u32),
    NoFrameRendered,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderCompile(log) => {
                write!(f, "Shader compilation failed: {log}")
            }
            Self::ProgramLink(log) => {
                write!(f, "Shader program link failed: {log}")
            }
            Self::ResourceAllocation(message) => {
                write!(f, "Could not allocate a GL resource: {message}")
            }
            Self::IncompleteFramebuffer(status) => {
                write!(f, "Offscreen framebuffer is incomplete (status 0x{status:x})")
            }
            Self::NoFrameRendered => {
                write!(f, "No frame has been rendered yet")
            }
        }
    }
}

impl Error for RendererError {}

/// Everything the fragment pass needs for one frame, in host form.
#[derive(Debug, Clone, Copy)]
pub struct FrameUniforms {
    pub center: Complex,
    pub zoom: f64,
    pub iteration_cap: i32,
    pub color_frequency: f32,
    pub smooth_coloring: bool,
    pub apply_budget: bool,
    pub render_width: u32,
    pub render_height: u32,
}

/// RGBA pixels read back from the offscreen target, bottom row first.
pub struct CapturedFrame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

struct StagedFrame {
    uniforms: FrameUniforms,
    budget_values: Vec<f32>,
    budget_dirty: bool,
}

impl Default for StagedFrame {
    fn default() -> Self {
        Self {
            uniforms: FrameUniforms {
                center: Complex::new(DEFAULT_CENTER_REAL, DEFAULT_CENTER_IMAG),
                zoom: DEFAULT_ZOOM,
                iteration_cap: BASE_ITERATION_CAP,
                color_frequency: 0.1,
                smooth_coloring: true,
                apply_budget: true,
                render_width: 1,
                render_height: 1,
            },
            budget_values: vec![1.0; GRID_SIZE * GRID_SIZE],
            budget_dirty: true,
        }
    }
}

struct OffscreenTarget {
    framebuffer: glow::Framebuffer,
    color_texture: glow::Texture,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    fn create(gl: &glow::Context, width: u32, height: u32) -> Result<Self, RendererError> {
        unsafe {
            let color_texture = gl
                .create_texture()
                .map_err(RendererError::ResourceAllocation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(color_texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            let framebuffer = gl
                .create_framebuffer()
                .map_err(RendererError::ResourceAllocation)?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color_texture),
                0,
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(color_texture);
                return Err(RendererError::IncompleteFramebuffer(status));
            }

            Ok(Self {
                framebuffer,
                color_texture,
                width,
                height,
            })
        }
    }

    fn destroy(self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.framebuffer);
            gl.delete_texture(self.color_texture);
        }
    }
}

/// GL state the paint callback touches and must hand back intact; the
/// callback runs in the middle of the UI renderer's own pass.
struct SavedGlState {
    draw_framebuffer: i32,
    read_framebuffer: i32,
    viewport: [i32; 4],
    scissor_enabled: bool,
}

impl SavedGlState {
    fn capture(gl: &glow::Context) -> Self {
        unsafe {
            let mut viewport = [0i32; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            Self {
                draw_framebuffer: gl.get_parameter_i32(glow::DRAW_FRAMEBUFFER_BINDING),
                read_framebuffer: gl.get_parameter_i32(glow::READ_FRAMEBUFFER_BINDING),
                viewport,
                scissor_enabled: gl.is_enabled(glow::SCISSOR_TEST),
            }
        }
    }

    fn restore(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(
                glow::DRAW_FRAMEBUFFER,
                framebuffer_from_raw(self.draw_framebuffer),
            );
            gl.bind_framebuffer(
                glow::READ_FRAMEBUFFER,
                framebuffer_from_raw(self.read_framebuffer),
            );
            gl.viewport(
                self.viewport[0],
                self.viewport[1],
                self.viewport[2],
                self.viewport[3],
            );
            if self.scissor_enabled {
                gl.enable(glow::SCISSOR_TEST);
            }
        }
    }
}

fn framebuffer_from_raw(raw: i32) -> Option<glow::Framebuffer> {
    NonZeroU32::new(raw as u32).map(glow::NativeFramebuffer)
}

/// Splits a double into the `(low, high)` bit halves `packDouble2x32`
/// expects. The GLSL builtin takes the 32 least significant bits first.
fn f64_bit_halves(value: f64) -> (u32, u32) {
    let bits = value.to_bits();
    (bits as u32, (bits >> 32) as u32)
}

pub struct GlRenderer {
    program: glow::Program,
    vao: glow::VertexArray,
    budget_texture: glow::Texture,
    offscreen: Option<OffscreenTarget>,
    staged: StagedFrame,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, RendererError> {
        let program = compile_program(gl)?;
        let vao = unsafe { gl.create_vertex_array() }.map_err(RendererError::ResourceAllocation)?;
        let budget_texture = create_budget_texture(gl)?;
        Ok(Self {
            program,
            vao,
            budget_texture,
            offscreen: None,
            staged: StagedFrame::default(),
        })
    }

    /// Records the camera and the complexity budgets for the next `paint`.
    /// No GL calls happen here.
    pub fn stage_frame(&mut self, uniforms: FrameUniforms, grid: &ComplexityGrid) {
        self.staged.uniforms = uniforms;
        self.staged.budget_values.copy_from_slice(grid.values());
        self.staged.budget_dirty = true;
    }

    /// Renders the staged frame into the offscreen target and stretches it
    /// onto the canvas area of whatever framebuffer the caller had bound.
    pub fn paint(&mut self, gl: &glow::Context, info: &egui::PaintCallbackInfo) {
        let saved = SavedGlState::capture(gl);
        let target = framebuffer_from_raw(saved.draw_framebuffer);
        let result = self.draw_frame(gl, info, target);
        saved.restore(gl);
        if let Err(error) = result {
            log::error!("fractal pass failed: {error}");
        }
    }

    fn draw_frame(
        &mut self,
        gl: &glow::Context,
        info: &egui::PaintCallbackInfo,
        target: Option<glow::Framebuffer>,
    ) -> Result<(), RendererError> {
        // The UI renderer clips with scissor; it must not crop the offscreen
        // pass or the blit.
        unsafe { gl.disable(glow::SCISSOR_TEST) };

        let width = self.staged.uniforms.render_width;
        let height = self.staged.uniforms.render_height;
        let framebuffer = self.ensure_offscreen(gl, width, height)?;
        self.upload_budget_map(gl);

        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.viewport(0, 0, width as i32, height as i32);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.budget_texture));
            self.apply_uniforms(gl);
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
            gl.bind_vertex_array(None);
            gl.use_program(None);

            let canvas = info.viewport_in_pixels();
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(framebuffer));
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, target);
            gl.blit_framebuffer(
                0,
                0,
                width as i32,
                height as i32,
                canvas.left_px,
                canvas.from_bottom_px,
                canvas.left_px + canvas.width_px,
                canvas.from_bottom_px + canvas.height_px,
                glow::COLOR_BUFFER_BIT,
                glow::LINEAR,
            );
        }
        Ok(())
    }

    fn ensure_offscreen(
        &mut self,
        gl: &glow::Context,
        width: u32,
        height: u32,
    ) -> Result<glow::Framebuffer, RendererError> {
        if let Some(target) = &self.offscreen {
            if target.width == width && target.height == height {
                return Ok(target.framebuffer);
            }
        }
        if let Some(stale) = self.offscreen.take() {
            stale.destroy(gl);
        }
        let target = OffscreenTarget::create(gl, width, height)?;
        log::debug!("offscreen target allocated at {width}x{height}");
        let framebuffer = target.framebuffer;
        self.offscreen = Some(target);
        Ok(framebuffer)
    }

    fn upload_budget_map(&mut self, gl: &glow::Context) {
        if !self.staged.budget_dirty {
            return;
        }
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.budget_texture));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                GRID_SIZE as i32,
                GRID_SIZE as i32,
                glow::RED,
                glow::FLOAT,
                glow::PixelUnpackData::Slice(bytemuck::cast_slice(&self.staged.budget_values)),
            );
        }
        self.staged.budget_dirty = false;
    }

    fn apply_uniforms(&self, gl: &glow::Context) {
        let uniforms = &self.staged.uniforms;
        unsafe {
            gl.uniform_2_f32(
                gl.get_uniform_location(self.program, "u_resolution").as_ref(),
                uniforms.render_width as f32,
                uniforms.render_height as f32,
            );

            let (low, high) = f64_bit_halves(uniforms.center.real);
            gl.uniform_2_u32(
                gl.get_uniform_location(self.program, "u_center_re").as_ref(),
                low,
                high,
            );
            let (low, high) = f64_bit_halves(uniforms.center.imag);
            gl.uniform_2_u32(
                gl.get_uniform_location(self.program, "u_center_im").as_ref(),
                low,
                high,
            );
            let (low, high) = f64_bit_halves(uniforms.zoom);
            gl.uniform_2_u32(
                gl.get_uniform_location(self.program, "u_zoom").as_ref(),
                low,
                high,
            );

            gl.uniform_1_i32(
                gl.get_uniform_location(self.program, "u_iteration_cap").as_ref(),
                uniforms.iteration_cap,
            );
            gl.uniform_1_f32(
                gl.get_uniform_location(self.program, "u_color_freq").as_ref(),
                uniforms.color_frequency,
            );
            gl.uniform_1_i32(
                gl.get_uniform_location(self.program, "u_smooth_coloring").as_ref(),
                i32::from(uniforms.smooth_coloring),
            );
            gl.uniform_1_i32(
                gl.get_uniform_location(self.program, "u_apply_budget").as_ref(),
                i32::from(uniforms.apply_budget),
            );
            gl.uniform_1_i32(
                gl.get_uniform_location(self.program, "u_budget_map").as_ref(),
                0,
            );
        }
    }

    /// Reads the last rendered frame back from the offscreen target.
    pub fn capture_frame(&self, gl: &glow::Context) -> Result<CapturedFrame, RendererError> {
        let Some(target) = &self.offscreen else {
            return Err(RendererError::NoFrameRendered);
        };
        let width = target.width;
        let height = target.height;
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        unsafe {
            let previous = gl.get_parameter_i32(glow::READ_FRAMEBUFFER_BINDING);
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(target.framebuffer));
            gl.read_pixels(
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, framebuffer_from_raw(previous));
        }
        Ok(CapturedFrame {
            pixels,
            width,
            height,
        })
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            if let Some(target) = self.offscreen.take() {
                target.destroy(gl);
            }
            gl.delete_texture(self.budget_texture);
            gl.delete_vertex_array(self.vao);
            gl.delete_program(self.program);
        }
    }
}

fn compile_program(gl: &glow::Context) -> Result<glow::Program, RendererError> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(RendererError::ResourceAllocation)?;
        let shader_sources = [
            (glow::VERTEX_SHADER, VERTEX_SHADER),
            (glow::FRAGMENT_SHADER, FRAGMENT_SHADER),
        ];

        let mut shaders = Vec::with_capacity(shader_sources.len());
        for (shader_type, shader_source) in shader_sources {
            let shader = gl
                .create_shader(shader_type)
                .map_err(RendererError::ResourceAllocation)?;
            gl.shader_source(shader, shader_source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let info_log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                gl.delete_program(program);
                return Err(RendererError::ShaderCompile(info_log));
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        if !linked {
            let info_log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(RendererError::ProgramLink(info_log));
        }
        Ok(program)
    }
}

fn create_budget_texture(gl: &glow::Context) -> Result<glow::Texture, RendererError> {
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(RendererError::ResourceAllocation)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        let initial = vec![1.0f32; GRID_SIZE * GRID_SIZE];
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::R32F as i32,
            GRID_SIZE as i32,
            GRID_SIZE as i32,
            0,
            glow::RED,
            glow::FLOAT,
            Some(bytemuck::cast_slice(&initial)),
        );
        // Budgets are per tile; interpolating across tile edges would blend caps.
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        Ok(texture)
    }
}
