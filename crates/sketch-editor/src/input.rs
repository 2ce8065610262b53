//! Input abstraction layer.
//!
//! Normalizes DOM (or native) events into a unified `InputEvent` enum that
//! the controller dispatches on. Coordinates are already in surface space.

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Where a click landed, as far as the text-entry flow cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The drawing surface itself.
    Surface,
    /// The floating text box.
    TextBox,
    /// Anything else on the page.
    Outside,
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the surface.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the surface.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// A completed click. `x`/`y` are only meaningful for `Surface`.
    Click { x: f64, y: f64, target: ClickTarget },

    /// Key pressed. `in_field` is set when focus sits in an editable page
    /// control (toolbar input, select, text area, the text box itself).
    Key {
        key: String,
        modifiers: Modifiers,
        in_field: bool,
    },

    /// Viewport changed; the surface is reallocated at this size.
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self::Key {
            key: key.into(),
            modifiers: Modifiers::NONE,
            in_field: false,
        }
    }
}
