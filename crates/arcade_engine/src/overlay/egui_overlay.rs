//! egui overlay drawn through the shared GL context

use super::input::EguiInput;
use super::{Overlay, OverlayError, OverlayFrame};
use crate::input::InputEvent;
use crate::render::Resolution;
use glow::HasContext;
use std::sync::Arc;

/// Pick the egui shader dialect for a GLSL version directive such as
/// `"#version 430 core"` or `"#version 300 es"`
pub fn shader_version_for(glsl_version: &str) -> Option<egui_glow::ShaderVersion> {
    let mut parts = glsl_version.split_whitespace();
    if parts.next()? != "#version" {
        return None;
    }
    let number: u32 = parts.next()?.parse().ok()?;
    let es = parts.next() == Some("es");

    Some(match (es, number) {
        (true, n) if n >= 300 => egui_glow::ShaderVersion::Es300,
        (true, _) => egui_glow::ShaderVersion::Es100,
        (false, n) if n >= 140 => egui_glow::ShaderVersion::Gl140,
        (false, _) => egui_glow::ShaderVersion::Gl120,
    })
}

struct PendingFrame {
    raw_input: egui::RawInput,
    resolution: Resolution,
}

/// Overlay backed by an egui context and the egui_glow painter
pub struct EguiOverlay {
    ctx: Option<egui::Context>,
    painter: Option<egui_glow::Painter>,
    gl: Arc<glow::Context>,
    input: EguiInput,
    frame: Option<PendingFrame>,
    panels: Vec<(String, Vec<String>)>,
}

impl EguiOverlay {
    /// Create the overlay context and its GL renderer
    ///
    /// Must be called with the context that `gl` wraps current.
    pub fn new(gl: Arc<glow::Context>, glsl_version: &str) -> Result<Self, OverlayError> {
        let shader_version = shader_version_for(glsl_version);
        if shader_version.is_none() {
            log::warn!("Unrecognised GLSL version {glsl_version:?}, letting the renderer detect it");
        }

        let painter = egui_glow::Painter::new(Arc::clone(&gl), "", shader_version, false)
            .map_err(|e| OverlayError::Renderer(e.to_string()))?;
        log::info!("Overlay initialized (GLSL {glsl_version})");

        Ok(Self {
            ctx: Some(egui::Context::default()),
            painter: Some(painter),
            gl,
            input: EguiInput::new(),
            frame: None,
            panels: Vec::new(),
        })
    }

    fn draw(&mut self, ctx: &egui::Context, frame: PendingFrame) -> Result<(), OverlayError> {
        let panels = std::mem::take(&mut self.panels);
        let output = ctx.run(frame.raw_input, |ctx| {
            for (title, lines) in &panels {
                egui::Window::new(title.as_str()).show(ctx, |ui| {
                    for line in lines {
                        ui.label(line.as_str());
                    }
                });
            }
        });

        let painter = self.painter.as_mut().ok_or(OverlayError::NotInitialized)?;
        let primitives = ctx.tessellate(output.shapes, output.pixels_per_point);
        painter.paint_and_update_textures(
            [frame.resolution.width, frame.resolution.height],
            output.pixels_per_point,
            &primitives,
            &output.textures_delta,
        );

        // The painter leaves its own blend state behind
        unsafe {
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }
        Ok(())
    }
}

impl Overlay for EguiOverlay {
    fn handle_event(&mut self, event: &InputEvent) {
        self.input.handle_event(event);
    }

    fn begin_frame(&mut self, frame: OverlayFrame) {
        self.panels.clear();
        let raw_input =
            self.input
                .take_raw_input(frame.resolution, frame.pixels_per_point, frame.time);
        self.frame = Some(PendingFrame {
            raw_input,
            resolution: frame.resolution,
        });
    }

    fn debug_panel(&mut self, title: &str, lines: &[String]) {
        self.panels.push((title.to_string(), lines.to_vec()));
    }

    fn end_frame(&mut self) -> Result<(), OverlayError> {
        let ctx = self.ctx.clone().ok_or(OverlayError::NotInitialized)?;
        let frame = self.frame.take().ok_or(OverlayError::FrameNotStarted)?;
        self.draw(&ctx, frame)
    }

    fn shutdown_renderer(&mut self) {
        if let Some(mut painter) = self.painter.take() {
            painter.destroy();
            log::debug!("Overlay renderer destroyed");
        }
    }

    fn shutdown_platform(&mut self) {
        self.input.shutdown();
    }

    fn destroy_context(&mut self) {
        self.frame = None;
        self.panels.clear();
        if self.ctx.take().is_some() {
            log::debug!("Overlay context destroyed");
        }
    }
}
