//! Per-tool rendering rules.
//!
//! Freehand tools (pen, eraser) stroke each new pointer segment as it
//! arrives. Shape tools (line, rectangle, circle) are a pure function of the
//! pre-interaction snapshot, the anchor and the live pointer: every frame
//! restores the snapshot and strokes one outline.
//!
//! | Tool | Outline | Cap / join |
//! |------|---------|------------|
//! | Line | segment anchor → pointer | round cap |
//! | Rectangle | corners anchor, pointer | miter join |
//! | Circle | centered on anchor, floored radius | — |

use sketch_core::geometry::{circle_clears_left_edge, corner_rect, pixel_distance};
use sketch_core::{
    Circle, Color, CompositeMode, Line, LineCap, LineJoin, Outline, Point, StrokeStyle,
    StyleState, Surface, Tool,
};

/// Color used for the eraser. Only its alpha matters under `DestinationOut`.
pub const ERASER_INK: Color = Color::BLACK;

/// Stroke settings for a freehand tool, or `None` for other tools.
pub fn freehand_style(tool: Tool, style: &StyleState) -> Option<StrokeStyle> {
    let (color, width, composite) = match tool {
        Tool::Pen => (style.color, style.pen_width, CompositeMode::SourceOver),
        Tool::Eraser => (ERASER_INK, style.eraser_width, CompositeMode::DestinationOut),
        _ => return None,
    };
    Some(
        StrokeStyle::new(color, width as f64)
            .with_cap(LineCap::Round)
            .with_join(LineJoin::Round)
            .with_composite(composite),
    )
}

/// Outline a shape tool draws from `start` (anchor) to `current` (pointer).
///
/// Returns `None` for non-shape tools and for a circle whose left edge would
/// reach the surface's left boundary.
pub fn shape_outline(tool: Tool, start: Point, current: Point) -> Option<Outline> {
    match tool {
        Tool::Line => Some(Outline::Segment(Line::new(start, current))),
        Tool::Rectangle => Some(Outline::Rect(corner_rect(start, current))),
        Tool::Circle => {
            let radius = pixel_distance(start, current);
            circle_clears_left_edge(start, radius)
                .then(|| Outline::Circle(Circle::new(start, radius)))
        }
        Tool::Pen | Tool::Eraser | Tool::Text => None,
    }
}

/// Stroke settings for a shape outline.
pub fn shape_style(
    outline: &Outline,
    color: Color,
    width: u32,
    composite: CompositeMode,
) -> StrokeStyle {
    let base = StrokeStyle::new(color, width as f64).with_composite(composite);
    match outline {
        Outline::Segment(_) => base.with_cap(LineCap::Round),
        Outline::Rect(_) => base.with_join(LineJoin::Miter),
        Outline::Circle(_) => base,
    }
}

/// Repaint one shape preview frame: restore `base`, then stroke the shape for
/// the current anchor/pointer pair. Returns whether a shape was drawn.
pub fn render_shape_frame<S: Surface>(
    surface: &mut S,
    base: &S::Snapshot,
    tool: Tool,
    start: Point,
    current: Point,
    style: &StyleState,
    composite: CompositeMode,
) -> bool {
    surface.restore(base);
    let Some(outline) = shape_outline(tool, start, current) else {
        log::trace!("SHAPE {tool} suppressed at {current:?}");
        return false;
    };
    let stroke = shape_style(&outline, style.color, style.shape_width, composite);
    surface.stroke(&outline, &stroke);
    true
}
