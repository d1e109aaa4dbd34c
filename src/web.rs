//! Browser glue: logging setup, canvas lookup and WebGL2 context
//! acquisition.

use wasm_bindgen::JsCast;

/// Set up panic reporting and console logging for the browser.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Look up a canvas element by id.
pub fn canvas_by_id(canvas_id: &str) -> Result<web_sys::HtmlCanvasElement, String> {
    let window = web_sys::window().ok_or("no global window exists")?;
    let document = window.document().ok_or("no document exists")?;
    let element = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| format!("no element with id {canvas_id:?}"))?;
    element
        .dyn_into()
        .map_err(|_| format!("element {canvas_id:?} is not a canvas"))
}

/// Size the canvas backing store to its CSS size times the device pixel
/// ratio, and return the resulting drawable dimensions.
///
/// The CSS size itself belongs to the page's stylesheet; only the
/// resolution is touched here.
pub fn fit_canvas_to_display(canvas: &web_sys::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web_sys::window()
        .map(|window| window.device_pixel_ratio())
        .unwrap_or(1.0);

    let css_width = canvas.client_width().max(1) as f64;
    let css_height = canvas.client_height().max(1) as f64;

    let width = (css_width * dpr) as u32;
    let height = (css_height * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    log::debug!("canvas backing store: {width}x{height} (dpr {dpr})");
    (width, height)
}

/// Acquire a WebGL2 context from the canvas and wrap it for the pipeline.
pub fn webgl2_context(canvas: &web_sys::HtmlCanvasElement) -> Result<glow::Context, String> {
    let context = canvas
        .get_context("webgl2")
        .map_err(|_| "failed to query the webgl2 context".to_string())?
        .ok_or("webgl2 is not supported by this browser")?;
    let context: web_sys::WebGl2RenderingContext = context
        .dyn_into()
        .map_err(|_| "webgl2 context has an unexpected type".to_string())?;
    Ok(glow::Context::from_webgl2_context(context))
}
