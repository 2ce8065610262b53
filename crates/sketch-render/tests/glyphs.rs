//! Integration tests: glyph rasterization with a real font face.
//!
//! The fixture is DejaVu Sans Mono (Bitstream Vera license, see
//! `fixtures/DejaVuSansMono.LICENSE`).

use pretty_assertions::assert_eq;
use sketch_core::{Color, CompositeMode, FontSpec, Point, Surface};
use sketch_render::{FontBook, RasterSurface};

const FONT: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");

fn solid_pixels(surface: &RasterSurface) -> usize {
    let Some((x0, y0, x1, y1)) = surface.painted_bounds() else {
        return 0;
    };
    (x0..=x1)
        .flat_map(|x| (y0..=y1).map(move |y| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|p| p.a == 255))
        .count()
}

fn surface_with_font(family: &str) -> RasterSurface {
    let mut surface = RasterSurface::new(120, 60);
    surface.register_font(family, FONT.to_vec()).unwrap();
    surface
}

// ─── FontBook ───────────────────────────────────────────────────────────

#[test]
fn families_resolve_case_insensitively() {
    let mut book = FontBook::default();
    book.register("Arial", FONT.to_vec()).unwrap();
    assert!(book.get("arial").is_some());
    assert!(book.get("ARIAL").is_some());
    assert!(book.get("Georgia").is_none());
}

#[test]
fn garbage_font_data_is_rejected() {
    let mut book = FontBook::default();
    assert!(book.register("Broken", vec![0; 64]).is_err());
    assert!(book.get("Broken").is_none());
}

// ─── draw_line ──────────────────────────────────────────────────────────

#[test]
fn descenders_reach_below_the_baseline() {
    let mut book = FontBook::default();
    book.register("Mono", FONT.to_vec()).unwrap();
    let face = book.get("mono").unwrap();

    let lowest = |text: &str| {
        let mut max_y = i64::MIN;
        sketch_render::text::draw_line(&face, text, Point::new(0.0, 30.0), 20.0, |_, y, _| {
            max_y = max_y.max(y);
        });
        max_y
    };
    assert!(lowest("x") < 30);
    assert!(lowest("g") >= 30);
}

// ─── fill_text ──────────────────────────────────────────────────────────

#[test]
fn text_sits_right_of_origin_on_the_baseline() {
    let mut surface = surface_with_font("Arial");
    let font = FontSpec::new(16, "Arial");
    let origin = Point::new(20.0, 36.0);
    surface.fill_text("Hello", origin, &font, Color::RED, CompositeMode::SourceOver);

    let (x0, y0, x1, y1) = surface.painted_bounds().unwrap();
    assert!(x0 >= 20, "text starts left of its origin at x={x0}");
    assert!(x1 > x0 + 30, "five glyphs span only {x0}..={x1}");
    // cap height of a 16px face sits well below the em top
    assert!((20..=28).contains(&y0), "top at y={y0}");
    // no descenders in "Hello"
    assert!((33..=36).contains(&y1), "bottom at y={y1}");
    assert!(surface.painted_count() > 50);
    assert!(solid_pixels(&surface) > 0, "no fully covered glyph pixel");
}

#[test]
fn family_lookup_ignores_case_when_drawing() {
    let mut surface = surface_with_font("dejavu mono");
    let font = FontSpec::new(16, "DejaVu Mono");
    let origin = Point::new(10.0, 30.0);
    surface.fill_text("A", origin, &font, Color::BLUE, CompositeMode::SourceOver);
    assert!(!surface.is_blank());
}

#[test]
fn erasing_text_clears_what_it_covered() {
    let mut surface = surface_with_font("Arial");
    let font = FontSpec::new(16, "Arial");
    let origin = Point::new(20.0, 36.0);
    surface.fill_text("Hello", origin, &font, Color::RED, CompositeMode::SourceOver);
    surface.fill_text("Hello", origin, &font, Color::RED, CompositeMode::DestinationOut);
    // partially covered edge pixels keep a residue of alpha
    assert_eq!(solid_pixels(&surface), 0);
}
