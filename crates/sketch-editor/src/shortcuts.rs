//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s so the bridge
//! only forwards raw key events. Shortcuts are suppressed while the text box
//! is open; that check lives in the controller.

use sketch_core::Tool;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SelectTool(Tool),
    Undo,
    /// Wipe the whole surface (undoable).
    Clear,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && !shift && !alt {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "Delete" | "Backspace" => Some(ShortcutAction::Clear),
                _ => None,
            };
        }

        if cmd || shift || alt {
            return None;
        }

        let tool = match key {
            "p" | "P" => Tool::Pen,
            "e" | "E" => Tool::Eraser,
            "l" | "L" => Tool::Line,
            "r" | "R" => Tool::Rectangle,
            "c" | "C" => Tool::Circle,
            "t" | "T" => Tool::Text,
            _ => return None,
        };
        Some(ShortcutAction::SelectTool(tool))
    }
}
