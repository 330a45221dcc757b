//! Canvas 2D implementation of the line sink
use nalgebra::Point2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;
use wf3d_core::{Rgb, Surface};

/// Strokes wireframe lines onto a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Rgb, line_width: f32) {
        self.context.set_line_width(line_width as f64);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
    }
}
