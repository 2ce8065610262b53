//! Software RGBA surface.
//!
//! Strokes are rasterized by sampling pixel centers against the exact stroke
//! geometry, without anti-aliasing, so results are deterministic and easy to
//! compare. A pixel `(x, y)` is covered when `(x + 0.5, y + 0.5)` lies inside
//! the stroked region.

use crate::text::FontBook;
use image::{Rgba, RgbaImage};
use sketch_core::geometry::{corner_rect, distance_to_rect_edge, distance_to_segment};
use sketch_core::{
    Color, CompositeMode, FontSpec, LineCap, LineJoin, Outline, Point, Rect, SketchError,
    StrokeStyle, Surface,
};
use std::sync::Arc;

/// Shared, immutable copy of a raster's pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSnapshot(Arc<RgbaImage>);

pub struct RasterSurface {
    pixels: RgbaImage,
    fonts: FontBook,
}

impl RasterSurface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            fonts: FontBook::default(),
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return None;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Color::rgba(r, g, b, a))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// True if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_count(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[3] != 0).count()
    }

    /// Smallest pixel rectangle `(x0, y0, x1, y1)`, inclusive, containing
    /// every painted pixel.
    pub fn painted_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in self.pixels.enumerate_pixels() {
            if p.0[3] == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }

    /// Make a font available to `fill_text` under `family`.
    pub fn register_font(&mut self, family: &str, data: Vec<u8>) -> Result<(), SketchError> {
        self.fonts.register(family, data)
    }

    fn cover<F>(&mut self, bounds: Rect, style: &StrokeStyle, covered: F)
    where
        F: Fn(Point) -> bool,
    {
        let (width, height) = (self.pixels.width(), self.pixels.height());
        let Some((x0, y0, x1, y1)) = pixel_span(bounds, width, height) else {
            return;
        };
        let mut count = 0usize;
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if covered(center) {
                    blend(&mut self.pixels, x, y, style.color, 1.0, style.composite);
                    count += 1;
                }
            }
        }
        log::trace!("STROKE {count} px, {:?}", style.composite);
    }
}

impl Surface for RasterSurface {
    type Snapshot = RasterSnapshot;

    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    fn snapshot(&self) -> RasterSnapshot {
        RasterSnapshot(Arc::new(self.pixels.clone()))
    }

    fn restore(&mut self, snapshot: &RasterSnapshot) {
        let source = &snapshot.0;
        if source.dimensions() == self.pixels.dimensions() {
            self.pixels.clone_from(source);
            return;
        }
        let w = source.width().min(self.pixels.width());
        let h = source.height().min(self.pixels.height());
        for y in 0..h {
            for x in 0..w {
                self.pixels.put_pixel(x, y, *source.get_pixel(x, y));
            }
        }
    }

    fn clear(&mut self) {
        for p in self.pixels.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    fn stroke(&mut self, outline: &Outline, style: &StrokeStyle) {
        let half = style.width / 2.0;
        if half <= 0.0 {
            return;
        }
        match *outline {
            Outline::Segment(line) => {
                let (a, b) = (line.p0, line.p1);
                let reach = half * std::f64::consts::SQRT_2;
                let bounds = corner_rect(a, b).inflate(reach, reach);
                match style.cap {
                    LineCap::Round => {
                        self.cover(bounds, style, |p| distance_to_segment(p, a, b) <= half)
                    }
                    LineCap::Butt => self.cover(bounds, style, |p| in_band(p, a, b, half, 0.0)),
                    LineCap::Square => {
                        self.cover(bounds, style, |p| in_band(p, a, b, half, half))
                    }
                }
            }
            Outline::Rect(rect) => {
                let rect = rect.abs();
                // a closed path with no extent strokes nothing on a canvas
                if rect.width() == 0.0 && rect.height() == 0.0 {
                    return;
                }
                let outer = rect.inflate(half, half);
                let inner = rect.inflate(-half, -half);
                let frame = move |p: Point| contains(outer, p) && !strictly_contains(inner, p);
                match style.join {
                    LineJoin::Miter => self.cover(outer, style, frame),
                    LineJoin::Round => {
                        self.cover(outer, style, |p| distance_to_rect_edge(p, rect) <= half)
                    }
                    LineJoin::Bevel => self.cover(outer, style, |p| {
                        frame(p) && bevel_keeps(p, rect, half)
                    }),
                }
            }
            Outline::Circle(circle) => {
                let (center, radius) = (circle.center, circle.radius);
                if radius == 0.0 {
                    return;
                }
                let reach = radius + half;
                let bounds = Rect::new(
                    center.x - reach,
                    center.y - reach,
                    center.x + reach,
                    center.y + reach,
                );
                self.cover(bounds, style, |p| (p.distance(center) - radius).abs() <= half);
            }
        }
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        color: Color,
        composite: CompositeMode,
    ) {
        let Some(face) = self.fonts.get(&font.family) else {
            log::warn!("no font registered for family {:?}; text skipped", font.family);
            return;
        };
        let pixels = &mut self.pixels;
        crate::text::draw_line(&face, text, origin, font.size_px as f32, |x, y, coverage| {
            if x >= 0 && y >= 0 && (x as u32) < pixels.width() && (y as u32) < pixels.height() {
                blend(pixels, x as u32, y as u32, color, coverage, composite);
            }
        });
    }
}

/// Clamp a float rectangle to the integer pixel range it may touch.
fn pixel_span(bounds: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let clamp = |v: f64, max: u32| v.max(0.0).min(max as f64) as u32;
    let x0 = clamp(bounds.x0.floor(), width);
    let y0 = clamp(bounds.y0.floor(), height);
    let x1 = clamp(bounds.x1.ceil(), width);
    let y1 = clamp(bounds.y1.ceil(), height);
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

fn strictly_contains(rect: Rect, p: Point) -> bool {
    p.x > rect.x0 && p.x < rect.x1 && p.y > rect.y0 && p.y < rect.y1
}

/// Band of half-width `half` around segment `a`–`b`, extended by `extend`
/// past both ends. A degenerate segment only paints when extended.
fn in_band(p: Point, a: Point, b: Point, half: f64, extend: f64) -> bool {
    let d = b - a;
    let len = d.hypot();
    if len == 0.0 {
        return extend > 0.0 && (p.x - a.x).abs() <= extend && (p.y - a.y).abs() <= extend;
    }
    let dir = d / len;
    let rel = p - a;
    let along = rel.dot(dir);
    let across = rel.cross(dir).abs();
    across <= half && along >= -extend && along <= len + extend
}

/// Outside a rectangle corner, a bevel join keeps only the triangle within
/// `half` (in taxicab distance) of the corner.
fn bevel_keeps(p: Point, rect: Rect, half: f64) -> bool {
    let dx = (rect.x0 - p.x).max(p.x - rect.x1);
    let dy = (rect.y0 - p.y).max(p.y - rect.y1);
    if dx <= 0.0 || dy <= 0.0 {
        return true;
    }
    dx + dy <= half
}

/// Composite one source pixel with straight (non-premultiplied) alpha.
fn blend(
    pixels: &mut RgbaImage,
    x: u32,
    y: u32,
    color: Color,
    coverage: f32,
    composite: CompositeMode,
) {
    let src_a = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst = pixels.get_pixel_mut(x, y);
    let [dr, dg, db, da] = dst.0;
    let dst_a = da as f32 / 255.0;

    match composite {
        CompositeMode::DestinationOut => {
            let out_a = dst_a * (1.0 - src_a);
            let a = (out_a * 255.0).round() as u8;
            *dst = if a == 0 { Rgba([0, 0, 0, 0]) } else { Rgba([dr, dg, db, a]) };
        }
        CompositeMode::SourceOver => {
            if src_a >= 1.0 {
                *dst = Rgba(color.to_array());
                return;
            }
            let out_a = src_a + dst_a * (1.0 - src_a);
            let mix = |s: u8, d: u8| -> u8 {
                let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
                v.round().clamp(0.0, 255.0) as u8
            };
            *dst = Rgba([
                mix(color.r, dr),
                mix(color.g, dg),
                mix(color.b, db),
                (out_a * 255.0).round() as u8,
            ]);
        }
    }
}
