//! Startup configuration.
//!
//! Hosts pass a JSON object; every field is optional and falls back to the
//! toolbar defaults. Names are validated here so a bad config fails once at
//! startup instead of on the first pointer event.

use crate::error::SketchError;
use crate::model::{Color, Tool};
use serde::{Deserialize, Serialize};

/// Number of snapshots kept for undo.
pub const DEFAULT_UNDO_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Applies to strokes, shapes, text and clear alike.
    pub undo_depth: usize,
    pub color: String,
    pub tool: String,
    pub pen_width: u32,
    pub eraser_width: u32,
    pub shape_width: u32,
    pub font_size: u32,
    pub font_family: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            undo_depth: DEFAULT_UNDO_DEPTH,
            color: "red".to_string(),
            tool: Tool::Pen.name().to_string(),
            pen_width: 10,
            eraser_width: 10,
            shape_width: 10,
            font_size: 16,
            font_family: "Arial".to_string(),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config. An empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, SketchError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SketchError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SketchError> {
        self.tool
            .parse::<Tool>()
            .map_err(|e| SketchError::InvalidConfig(e.to_string()))?;
        Color::from_name_or_hex(&self.color)
            .map_err(|e| SketchError::InvalidConfig(e.to_string()))?;
        if self.font_size == 0 {
            return Err(SketchError::InvalidConfig(
                "font_size must be positive".to_string(),
            ));
        }
        if self.font_family.trim().is_empty() {
            return Err(SketchError::InvalidConfig(
                "font_family must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
