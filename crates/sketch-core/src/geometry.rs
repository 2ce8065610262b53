//! Elementary geometry shared by the controller and the renderers.

use kurbo::{Point, Rect};

/// Whole-pixel distance between two points (floored Euclidean distance).
pub fn pixel_distance(a: Point, b: Point) -> f64 {
    a.distance(b).floor()
}

/// Axis-aligned rectangle with `a` and `b` as opposite corners, in either
/// drag direction.
pub fn corner_rect(a: Point, b: Point) -> Rect {
    Rect::new(a.x, a.y, b.x, b.y).abs()
}

/// A circle is only drawn while its left edge stays right of the surface's
/// left boundary.
pub fn circle_clears_left_edge(center: Point, radius: f64) -> bool {
    center.x - radius > 0.0
}

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    let len_sq = d.hypot2();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(d) / len_sq).clamp(0.0, 1.0);
    p.distance(a + d * t)
}

/// Distance from `p` to the outline (not the interior) of `rect`.
pub fn distance_to_rect_edge(p: Point, rect: Rect) -> f64 {
    let inside = p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1;
    if inside {
        (p.x - rect.x0)
            .min(rect.x1 - p.x)
            .min(p.y - rect.y0)
            .min(rect.y1 - p.y)
    } else {
        let dx = (rect.x0 - p.x).max(0.0).max(p.x - rect.x1);
        let dy = (rect.y0 - p.y).max(0.0).max(p.y - rect.y1);
        dx.hypot(dy)
    }
}
