//! JavaScript-facing handle for the backdrop effect.
//!
//! The host page owns the frame loop: it constructs a [`WebBackdrop`] once
//! and calls [`frame`](WebBackdrop::frame) from `requestAnimationFrame`,
//! forwarding pointer and resize events as they arrive (throttled however
//! the page sees fit).

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::effects::{Backdrop, BackdropConfig};
use crate::web::{canvas_by_id, fit_canvas_to_display, init_web_logging, webgl2_context};

/// The backdrop effect bound to a canvas element.
#[wasm_bindgen]
pub struct WebBackdrop {
    gl: glow::Context,
    canvas: web_sys::HtmlCanvasElement,
    backdrop: Backdrop,
}

#[wasm_bindgen]
impl WebBackdrop {
    /// Build the effect on the canvas with the given element id.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebBackdrop, JsValue> {
        init_web_logging();

        let canvas = canvas_by_id(canvas_id).map_err(|e| JsValue::from_str(&e))?;
        let (width, height) = fit_canvas_to_display(&canvas);
        let gl = webgl2_context(&canvas).map_err(|e| JsValue::from_str(&e))?;

        let backdrop = Backdrop::new(
            &gl,
            BackdropConfig::default(),
            width as i32,
            height as i32,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("backdrop ready on #{canvas_id} ({width}x{height})");

        Ok(Self {
            gl,
            canvas,
            backdrop,
        })
    }

    /// Render one frame; `time_ms` is the `requestAnimationFrame` timestamp.
    pub fn frame(&mut self, time_ms: f64) {
        self.backdrop.render(&self.gl, (time_ms / 1000.0) as f32);
    }

    /// Update the pointer position, in CSS pixels relative to the canvas.
    ///
    /// Normalized here to [-1, 1]² with +Y up so the shaders see clip-space
    /// coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let width = self.canvas.client_width().max(1) as f32;
        let height = self.canvas.client_height().max(1) as f32;

        let nx = x / width * 2.0 - 1.0;
        let ny = -(y / height * 2.0 - 1.0);
        self.backdrop.set_pointer(Vec2::new(nx, ny));
    }

    /// Re-fit the canvas backing store to its CSS size and resize the
    /// pipeline to match.
    pub fn resize(&mut self) {
        let (width, height) = fit_canvas_to_display(&self.canvas);
        self.backdrop
            .resize(&self.gl, width as i32, height as i32);
    }
}
