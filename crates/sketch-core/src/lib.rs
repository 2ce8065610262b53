pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod model;
pub mod surface;

pub use config::{DEFAULT_UNDO_DEPTH, SketchConfig};
pub use error::SketchError;
pub use history::UndoHistory;
pub use model::*;
pub use surface::{CompositeMode, LineCap, LineJoin, Outline, StrokeStyle, Surface};

// Re-export kurbo geometry so downstream crates share one `Point` type
pub use kurbo::{Circle, Line, Point, Rect};
