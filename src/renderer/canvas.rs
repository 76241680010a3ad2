//! Canvas 2D context surface (browser only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};

/// Draws onto an HTML canvas through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a canvas element, returns `None` if it has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, context })
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.context.begin_path();
        let _ = self.context.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.context.close_path();
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.context.set_fill_style_str(color.as_css());
        self.circle_path(center, radius);
        self.context.fill();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.context.set_fill_style_str(color.as_css());
        self.context
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.context.set_stroke_style_str(color.as_css());
        self.context
            .stroke_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.context.set_fill_style_str(color.as_css());
        let _ = self.context.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
