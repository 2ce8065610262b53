//! DOM wiring for the sketchpad page.
//!
//! One `App` holds the controller and the page elements it drives. Listener
//! closures share it through `Rc<RefCell<_>>`; every listener is registered
//! exactly once, when the app is mounted.

use crate::surface::CanvasSurface;
use sketch_core::{Point, SketchConfig};
use sketch_editor::{COMMIT_KEY, ClickTarget, DrawingController, InputEvent, Modifiers};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent, Node,
    Window,
};

pub struct App {
    pub controller: DrawingController<CanvasSurface>,
    window: Window,
    toolbar: HtmlElement,
    text_input: HtmlElement,
}

pub type SharedApp = Rc<RefCell<App>>;

impl App {
    /// Look up the page elements and size the canvas to the viewport.
    pub fn mount(
        canvas_id: &str,
        toolbar_id: &str,
        text_input_id: &str,
        config: &SketchConfig,
    ) -> Result<SharedApp, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = element(&document, canvas_id)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let toolbar: HtmlElement = element(&document, toolbar_id)?;
        let text_input: HtmlElement = element(&document, text_input_id)?;

        let controller = DrawingController::from_config(CanvasSurface::new(canvas, ctx), config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut app = App {
            controller,
            window,
            toolbar,
            text_input,
        };
        app.fit_to_viewport();
        app.sync_text_box();

        let app = Rc::new(RefCell::new(app));
        bind_listeners(&app)?;
        Ok(app)
    }

    /// Viewport width minus the toolbar, by viewport height.
    fn viewport_size(&self) -> (u32, u32) {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        let width = dimension(self.window.inner_width()) - self.toolbar.offset_width() as f64;
        let height = dimension(self.window.inner_height());
        (width.max(0.0) as u32, height.max(0.0) as u32)
    }

    fn fit_to_viewport(&mut self) {
        let (width, height) = self.viewport_size();
        self.controller.handle(&InputEvent::Resize { width, height });
    }

    /// Client coordinates to canvas coordinates, measured now.
    fn local_point(&self, event: &MouseEvent) -> Point {
        let rect = self.controller.surface().canvas().get_bounding_client_rect();
        Point::new(
            event.client_x() as f64 - rect.left(),
            event.client_y() as f64 - rect.top(),
        )
    }

    fn click_target(&self, target: Option<EventTarget>) -> ClickTarget {
        let Some(node) = target.and_then(|t| t.dyn_into::<Node>().ok()) else {
            return ClickTarget::Outside;
        };
        let canvas: &Node = self.controller.surface().canvas();
        let text_input: &Node = &self.text_input;
        if node.is_same_node(Some(canvas)) {
            ClickTarget::Surface
        } else if text_input.contains(Some(&node)) {
            ClickTarget::TextBox
        } else {
            ClickTarget::Outside
        }
    }

    /// Mirror the controller's text box onto the floating element.
    pub fn sync_text_box(&self) {
        let style = self.text_input.style();
        let result = match self.controller.text_box() {
            Some(text_box) => {
                let rect = self.controller.surface().canvas().get_bounding_client_rect();
                let left = format!("{}px", text_box.anchor.x + rect.left());
                let top = format!("{}px", text_box.anchor.y + rect.top());
                style
                    .set_property("display", "block")
                    .and_then(|_| style.set_property("left", &left))
                    .and_then(|_| style.set_property("top", &top))
                    .and_then(|_| style.set_property("font", &text_box.font.css()))
            }
            None => style.set_property("display", "none"),
        };
        if let Err(err) = result {
            log::warn!("text box style update failed: {err:?}");
        }
    }

    /// Hand the typed text and the box's measured position to the
    /// controller ahead of a commit.
    fn capture_text_box(&mut self) {
        let content = self.text_input.inner_text();
        let boxed = self.text_input.get_bounding_client_rect();
        let canvas = self.controller.surface().canvas().get_bounding_client_rect();
        let entry = self.controller.text_entry_mut();
        entry.set_content(content);
        entry.relocate(Point::new(
            boxed.left() - canvas.left(),
            boxed.top() - canvas.top(),
        ));
    }

    fn on_mouse(&mut self, event: &MouseEvent, kind: &str) {
        let p = self.local_point(event);
        let input = match kind {
            "mousedown" => InputEvent::pointer_down(p.x, p.y),
            "mousemove" => InputEvent::pointer_move(p.x, p.y),
            _ => InputEvent::pointer_up(p.x, p.y),
        };
        self.controller.handle(&input);
    }

    fn on_click(&mut self, event: &MouseEvent) {
        let target = self.click_target(event.target());
        let p = self.local_point(event);
        let was_closed = !self.controller.text_entry().is_open();
        let changed = self.controller.handle(&InputEvent::Click {
            x: p.x,
            y: p.y,
            target,
        });
        if !changed {
            return;
        }
        if was_closed && self.controller.text_box().is_some() {
            self.text_input.set_inner_text("");
        }
        self.sync_text_box();
        if self.controller.text_box().is_some() {
            if let Err(err) = self.text_input.focus() {
                log::warn!("text box focus failed: {err:?}");
            }
        }
    }

    fn on_key(&mut self, event: &KeyboardEvent) {
        let key = event.key();
        if key == COMMIT_KEY && self.controller.text_entry().is_open() {
            self.capture_text_box();
        }
        let modifiers = Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        };
        let in_field = is_editable(event.target());
        let was_open = self.controller.text_entry().is_open();
        if self.controller.handle(&InputEvent::Key {
            key,
            modifiers,
            in_field,
        }) {
            event.prevent_default();
        }
        if was_open && !self.controller.text_entry().is_open() {
            self.sync_text_box();
        }
    }
}

/// Whether keystrokes aimed at `target` are text editing of their own.
fn is_editable(target: Option<EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    target.is_instance_of::<HtmlInputElement>()
        || target.is_instance_of::<HtmlTextAreaElement>()
        || target.is_instance_of::<HtmlSelectElement>()
        || target
            .dyn_ref::<HtmlElement>()
            .is_some_and(|el| el.is_content_editable())
}

pub fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

fn listen<E, F>(target: &EventTarget, event_type: &str, mut callback: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            callback(event);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_listeners(app: &SharedApp) -> Result<(), JsValue> {
    let (canvas, window): (EventTarget, EventTarget) = {
        let borrowed = app.borrow();
        (
            borrowed.controller.surface().canvas().clone().into(),
            borrowed.window.clone().into(),
        )
    };

    for kind in ["mousedown", "mousemove", "mouseup"] {
        let app = Rc::clone(app);
        listen(&canvas, kind, move |event: MouseEvent| {
            app.borrow_mut().on_mouse(&event, kind);
        })?;
    }

    let shared = Rc::clone(app);
    listen(&window, "click", move |event: MouseEvent| {
        shared.borrow_mut().on_click(&event);
    })?;

    let shared = Rc::clone(app);
    listen(&window, "keydown", move |event: KeyboardEvent| {
        shared.borrow_mut().on_key(&event);
    })?;

    let shared = Rc::clone(app);
    listen(&window, "resize", move |_: Event| {
        shared.borrow_mut().fit_to_viewport();
    })?;

    log::debug!("sketchpad listeners bound");
    Ok(())
}
