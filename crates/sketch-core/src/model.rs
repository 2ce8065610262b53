//! Drawing state data model.
//!
//! Everything the controller needs to remember between events that is not
//! pixel data: the active tool, the paint color, stroke widths and the text
//! font. Values arrive from trusted UI controls, so the only validation here
//! is at the string boundary (tool names, color names, hex codes).

use crate::config::SketchConfig;
use crate::error::SketchError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel, not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const RED: Color = Color::rgb(0xE3, 0x4A, 0x4A);
    pub const GREEN: Color = Color::rgb(0x33, 0xAC, 0x4E);
    pub const BLUE: Color = Color::rgb(0x3C, 0x8D, 0xED);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// The toolbar palette, in button order.
    pub const PALETTE: [(&'static str, Color); 4] = [
        ("red", Color::RED),
        ("green", Color::GREEN),
        ("blue", Color::BLUE),
        ("black", Color::BLACK),
    ];

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let r = hex_val(bytes[0])? * 17;
                let g = hex_val(bytes[1])? * 17;
                let b = hex_val(bytes[2])? * 17;
                let a = match bytes.get(3) {
                    Some(&c) => hex_val(c)? * 17,
                    None => 255,
                };
                Some(Self::rgba(r, g, b, a))
            }
            6 | 8 => {
                let pair = |i: usize| -> Option<u8> {
                    Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { pair(6)? } else { 255 };
                Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, a))
            }
            _ => None,
        }
    }

    /// Look up a palette name (`"red"`, `"green"`, …), falling back to hex.
    pub fn from_name_or_hex(value: &str) -> Result<Self, SketchError> {
        let trimmed = value.trim();
        Self::PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, color)| *color)
            .or_else(|| Self::from_hex(trimmed))
            .ok_or_else(|| SketchError::InvalidColor(value.to_string()))
    }

    /// Emit as uppercase hex, with alpha only when not opaque.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_name_or_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Tools ───────────────────────────────────────────────────────────────

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    Line,
    Rectangle,
    Circle,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Pen,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Text => "text",
        }
    }

    /// Pen and eraser paint incrementally along the pointer path.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }

    /// Shape tools repaint a preview from the anchor on every move.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }
}

impl FromStr for Tool {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SketchError::UnknownTool(s.to_string()))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Font / Text ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_px: u32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size_px: u32, family: impl Into<String>) -> Self {
        Self {
            size_px,
            family: family.into(),
        }
    }

    /// CSS font shorthand, e.g. `16px Arial`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(16, "Arial")
    }
}

// ─── Style state ─────────────────────────────────────────────────────────

/// Tool and paint settings chosen in the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    pub color: Color,
    pub tool: Tool,
    pub pen_width: u32,
    pub eraser_width: u32,
    pub shape_width: u32,
    pub font: FontSpec,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            color: Color::RED,
            tool: Tool::Pen,
            pen_width: 10,
            eraser_width: 10,
            shape_width: 10,
            font: FontSpec::default(),
        }
    }
}

impl StyleState {
    /// Build the initial style from a configuration.
    pub fn from_config(config: &SketchConfig) -> Result<Self, SketchError> {
        Ok(Self {
            color: Color::from_name_or_hex(&config.color)?,
            tool: config.tool.parse()?,
            pen_width: config.pen_width,
            eraser_width: config.eraser_width,
            shape_width: config.shape_width,
            font: FontSpec::new(config.font_size, config.font_family.clone()),
        })
    }
}
