pub mod controller;
pub mod input;
pub mod shortcuts;
pub mod text_entry;
pub mod tools;

pub use controller::{COMMIT_KEY, DrawingController};
pub use input::{ClickTarget, InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use text_entry::{TextBox, TextCommit, TextEntry};
