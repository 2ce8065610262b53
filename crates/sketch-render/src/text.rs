//! Glyph rasterization for committed text.
//!
//! Fonts are registered by family name; lookups are case-insensitive so
//! `"arial"` and `"Arial"` resolve to the same face.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use sketch_core::{Point, SketchError};
use std::collections::HashMap;

#[derive(Default)]
pub struct FontBook {
    faces: HashMap<String, FontArc>,
}

impl FontBook {
    pub fn register(&mut self, family: &str, data: Vec<u8>) -> Result<(), SketchError> {
        let face = FontArc::try_from_vec(data).map_err(|e| SketchError::Font(e.to_string()))?;
        log::debug!("registered font family {family:?}");
        self.faces.insert(family.to_ascii_lowercase(), face);
        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<FontArc> {
        self.faces.get(&family.to_ascii_lowercase()).cloned()
    }
}

/// Lay out `text` on a single baseline starting at `origin` and report every
/// covered pixel with its coverage in `0.0..=1.0`.
pub fn draw_line<F>(face: &FontArc, text: &str, origin: Point, size_px: f32, mut plot: F)
where
    F: FnMut(i64, i64, f32),
{
    let scale = PxScale::from(size_px);
    let scaled = face.as_scaled(scale);
    let baseline = origin.y as f32;
    let mut caret = origin.x as f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        let Some(outlined) = face.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            plot(
                bounds.min.x as i64 + gx as i64,
                bounds.min.y as i64 + gy as i64,
                coverage,
            );
        });
    }
}
