//! WASM bridge for Sketchpad — binds the drawing controller to an HTML page.
//!
//! Compiled via `wasm-pack build --target web`. The page constructs one
//! `Sketchpad`, which wires the canvas, text box and window listeners, then
//! forwards toolbar commands through the methods below.

mod dom;
mod surface;

pub use surface::{CanvasSnapshot, CanvasSurface};

use dom::{App, SharedApp};
use sketch_core::{SketchConfig, SketchError};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// The page-level drawing app.
#[wasm_bindgen]
pub struct Sketchpad {
    app: SharedApp,
    grid: Option<HtmlElement>,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Mount onto the page elements with the given ids.
    ///
    /// `config_json` is an optional `SketchConfig` object; missing fields use
    /// the toolbar defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        toolbar_id: &str,
        text_input_id: &str,
        grid_id: Option<String>,
        config_json: Option<String>,
    ) -> Result<Sketchpad, JsValue> {
        init_console();

        let config =
            SketchConfig::from_json(config_json.as_deref().unwrap_or("")).map_err(js_error)?;
        let app = App::mount(canvas_id, toolbar_id, text_input_id, &config)?;

        let grid = match grid_id {
            Some(id) => {
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .ok_or("no document")?;
                Some(dom::element::<HtmlElement>(&document, &id)?)
            }
            None => None,
        };

        log::info!("sketchpad mounted on #{canvas_id}");
        Ok(Sketchpad { app, grid })
    }

    /// Select a palette color by name (`red`, `green`, `blue`, `black`) or hex.
    pub fn set_color(&self, value: &str) -> Result<(), JsValue> {
        self.app
            .borrow_mut()
            .controller
            .set_color_str(value)
            .map_err(js_error)
    }

    /// Select a tool by name: `pen`, `eraser`, `line`, `rectangle`, `circle`, `text`.
    pub fn set_tool(&self, name: &str) -> Result<(), JsValue> {
        self.app
            .borrow_mut()
            .controller
            .set_tool_str(name)
            .map_err(js_error)
    }

    pub fn tool_name(&self) -> String {
        self.app.borrow().controller.tool().name().to_string()
    }

    pub fn set_pen_width(&self, width: u32) {
        self.app.borrow_mut().controller.set_pen_width(width);
    }

    pub fn set_eraser_width(&self, width: u32) {
        self.app.borrow_mut().controller.set_eraser_width(width);
    }

    pub fn set_shape_width(&self, width: u32) {
        self.app.borrow_mut().controller.set_shape_width(width);
    }

    pub fn set_font_size(&self, size_px: u32) {
        let mut app = self.app.borrow_mut();
        app.controller.set_font_size(size_px);
        app.sync_text_box();
    }

    pub fn set_font_family(&self, family: &str) {
        let mut app = self.app.borrow_mut();
        app.controller.set_font_family(family);
        app.sync_text_box();
    }

    /// Wipe the canvas (undoable).
    pub fn clear(&self) {
        self.app.borrow_mut().controller.clear();
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&self) -> bool {
        self.app.borrow_mut().controller.undo()
    }

    /// Show or hide the grid overlay element. Purely cosmetic.
    pub fn set_grid_visible(&self, visible: bool) -> Result<(), JsValue> {
        let Some(grid) = &self.grid else {
            log::warn!("no grid element configured");
            return Ok(());
        };
        grid.style()
            .set_property("display", if visible { "block" } else { "none" })
    }

    /// Current toolbar style as JSON.
    pub fn style_json(&self) -> String {
        self.app.borrow().controller.style_json()
    }
}

fn js_error(err: SketchError) -> JsValue {
    log::warn!("{err}");
    JsValue::from_str(&err.to_string())
}

fn init_console() {
    console_error_panic_hook::set_once();
    // a second Sketchpad on the page finds the logger already installed
    let _ = console_log::init_with_level(log::Level::Debug);
}
