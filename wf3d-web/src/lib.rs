//! WF3D Web - canvas-based wireframe renderer for browsers
//!
//! The page owns the event listeners and the animation loop: it forwards
//! keyboard, pointer and resize events to a `WebRenderer` and calls
//! `frame(timestamp)` from `requestAnimationFrame`.
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wf3d_core::{ControllerConfig, Key, Scene, SceneController, Viewport};

mod canvas;

pub use canvas::CanvasSurface;

#[wasm_bindgen]
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    controller: SceneController,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the canvas with the given element id and build the demo
    /// scene. `now` is the page's current `performance.now()`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, now: f64) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let (scene, camera) = Scene::demo();
        let viewport = Viewport::new(canvas.width(), canvas.height());
        log::info!("web renderer attached to '{}' ({}x{})", canvas_id, canvas.width(), canvas.height());

        Ok(WebRenderer {
            canvas,
            surface: CanvasSurface::new(context),
            controller: SceneController::new(scene, camera, viewport, ControllerConfig::default(), now),
        })
    }

    /// Render a frame and return the instantaneous FPS (0 if unknown)
    pub fn frame(&mut self, timestamp: f64) -> Result<u32, JsValue> {
        let stats = self.controller.tick(timestamp, &mut self.surface);
        let fps = stats.fps.unwrap_or(0);

        let context = self.surface.context();
        context.set_fill_style(&JsValue::from_str("white"));
        context.fill_text(&format!("{fps} FPS"), 10.0, 10.0)?;
        Ok(fps)
    }

    /// `KeyboardEvent.key` of a pressed key
    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = Key::from_name(key) {
            self.controller.input_mut().key_down(key);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = Key::from_name(key) {
            self.controller.input_mut().key_up(key);
        }
    }

    /// `movementX` / `movementY` of a pointer event
    pub fn pointer_move(&mut self, dx: f32, dy: f32) {
        self.controller.input_mut().pointer_moved(dx, dy);
    }

    /// Primary click. Returns true when the page should request pointer lock.
    pub fn click(&mut self) -> bool {
        !self.controller.input().is_captured()
    }

    /// Pointer lock was granted or lost
    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.controller.input_mut().set_captured(locked);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.controller.resize(width, height);
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(())
}
