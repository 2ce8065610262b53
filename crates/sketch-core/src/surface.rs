//! The drawing surface abstraction.
//!
//! A `Surface` is a raster the controller paints into. It knows how to stroke
//! a handful of outlines, draw a line of text, and capture/restore its whole
//! pixel content. The browser canvas and the software raster both implement
//! it, so the controller never touches a concrete pixel buffer.

use crate::model::{Color, FontSpec};
use kurbo::{Circle, Line, Point, Rect};

/// How new pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Punch transparency wherever the source is drawn.
    DestinationOut,
}

impl CompositeMode {
    /// Name used by `CanvasRenderingContext2D.globalCompositeOperation`.
    pub fn as_css(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_css(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn as_css(self) -> &'static str {
        match self {
            LineJoin::Miter => "miter",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }
}

/// Geometry that can be stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    /// Straight segment. A zero-length segment with round caps is a dot.
    Segment(Line),
    /// Closed axis-aligned rectangle.
    Rect(Rect),
    /// Full circle.
    Circle(Circle),
}

/// Everything a stroke needs besides its geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub composite: CompositeMode,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::default(),
            join: LineJoin::default(),
            composite: CompositeMode::default(),
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_composite(mut self, composite: CompositeMode) -> Self {
        self.composite = composite;
        self
    }
}

/// A paintable raster with whole-surface snapshots.
pub trait Surface {
    /// Immutable copy of the full pixel content. Cloning should be cheap.
    type Snapshot: Clone;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reallocate the pixel buffer. Existing content is lost.
    fn resize(&mut self, width: u32, height: u32);

    fn snapshot(&self) -> Self::Snapshot;

    /// Write a snapshot back at the origin. Pixels outside the snapshot's
    /// extent are left untouched.
    fn restore(&mut self, snapshot: &Self::Snapshot);

    /// Wipe every pixel to transparent.
    fn clear(&mut self);

    fn stroke(&mut self, outline: &Outline, style: &StrokeStyle);

    /// Draw one line of text with its baseline starting at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &FontSpec,
        color: Color,
        composite: CompositeMode,
    );
}
