//! Floating text box state.
//!
//! Pointer-down with the text tool arms a one-shot activation; the following
//! click on the surface opens the box there. Enter commits the box content,
//! an outside click dismisses it.

use sketch_core::{FontSpec, Point};

/// The visible text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// Top-left corner in surface coordinates.
    pub anchor: Point,
    pub font: FontSpec,
}

/// Text ready to be drawn onto the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommit {
    pub content: String,
    pub anchor: Point,
}

#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    armed: bool,
    open: Option<TextBox>,
    content: String,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear pending content and wait for the next surface click.
    pub fn arm(&mut self) {
        self.content.clear();
        self.armed = true;
    }

    /// Drop a pending activation without touching an already open box.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consume the armed activation and open the box at `anchor`.
    /// Returns `false` when nothing was armed.
    pub fn open_at(&mut self, anchor: Point, font: FontSpec) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;
        self.open = Some(TextBox { anchor, font });
        true
    }

    pub fn text_box(&self) -> Option<&TextBox> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Move the open box, e.g. after the host measured where it really is.
    pub fn relocate(&mut self, anchor: Point) {
        if let Some(text_box) = &mut self.open {
            text_box.anchor = anchor;
        }
    }

    /// Keep the open box styled like the text it will produce.
    pub fn set_font(&mut self, font: FontSpec) {
        if let Some(text_box) = &mut self.open {
            text_box.font = font;
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Close the box and hand back what was typed. `None` if it wasn't open.
    pub fn commit(&mut self) -> Option<TextCommit> {
        let text_box = self.open.take()?;
        Some(TextCommit {
            content: self.content.clone(),
            anchor: text_box.anchor,
        })
    }

    /// Hide the box without committing.
    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }
}
