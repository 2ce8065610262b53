//! Canvas2D surface.
//!
//! Draws through an HTML `<canvas>` via `CanvasRenderingContext2d`.
//! Snapshots are `ImageData` captures taken with `getImageData`.

use sketch_core::{Color, CompositeMode, FontSpec, Outline, Point, StrokeStyle, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Pixel capture of the canvas. `None` when the canvas had no area.
#[derive(Debug, Clone)]
pub struct CanvasSnapshot(Option<ImageData>);

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn apply_composite(&self, composite: CompositeMode) {
        report(
            "globalCompositeOperation",
            self.ctx.set_global_composite_operation(composite.as_css()),
        );
    }
}

impl Surface for CanvasSurface {
    type Snapshot = CanvasSnapshot;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Setting the canvas dimensions reallocates and clears its buffer.
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn snapshot(&self) -> CanvasSnapshot {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if w == 0 || h == 0 {
            return CanvasSnapshot(None);
        }
        match self.ctx.get_image_data(0.0, 0.0, w as f64, h as f64) {
            Ok(data) => CanvasSnapshot(Some(data)),
            Err(err) => {
                log::warn!("getImageData failed: {err:?}");
                CanvasSnapshot(None)
            }
        }
    }

    /// `putImageData` writes the overlapping region and leaves the rest.
    fn restore(&mut self, snapshot: &CanvasSnapshot) {
        if let Some(data) = &snapshot.0 {
            report("putImageData", self.ctx.put_image_data(data, 0.0, 0.0));
        }
    }

    fn clear(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn stroke(&mut self, outline: &Outline, style: &StrokeStyle) {
        let ctx = &self.ctx;
        self.apply_composite(style.composite);
        ctx.set_stroke_style_str(&css_color(style.color));
        ctx.set_line_width(style.width);
        ctx.set_line_cap(style.cap.as_css());
        ctx.set_line_join(style.join.as_css());

        ctx.begin_path();
        match *outline {
            Outline::Segment(line) => {
                ctx.move_to(line.p0.x, line.p0.y);
                ctx.line_to(line.p1.x, line.p1.y);
            }
            Outline::Rect(rect) => {
                ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
            }
            Outline::Circle(circle) => {
                report(
                    "arc",
                    ctx.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU),
                );
            }
        }
        ctx.stroke();
        log::trace!("STROKE {outline:?} w={}", style.width);
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        color: Color,
        composite: CompositeMode,
    ) {
        self.apply_composite(composite);
        self.ctx.set_font(&font.css());
        self.ctx.set_fill_style_str(&css_color(color));
        report("fillText", self.ctx.fill_text(text, origin.x, origin.y));
    }
}

fn css_color(color: Color) -> String {
    color.to_hex()
}

/// Canvas calls only fail on invalid arguments; log and carry on.
fn report(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{what} failed: {err:?}");
    }
}
