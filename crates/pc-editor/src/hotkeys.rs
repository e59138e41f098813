//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `HotkeyAction`s. The editor
//! executes the action; the host calls `preventDefault` whenever one was
//! resolved.

use crate::input::{FocusTarget, KeyEvent};

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    // ── Edit ──
    Delete,
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    /// Copy then paste.
    Duplicate,
    /// Flush the pending auto-save now.
    Save,
    SelectAll,

    // ── Text ──
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
}

/// Resolves key events into hotkey actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘, on other
/// platforms `ctrl` serves the same role.
pub struct Hotkeys;

impl Hotkeys {
    /// Resolve a key event to an action. Returns `None` if the combo has no
    /// binding or focus is in a text field.
    pub fn resolve(event: &KeyEvent) -> Option<HotkeyAction> {
        if event.target == FocusTarget::TextInput {
            return None;
        }

        let cmd = event.ctrl || event.meta;
        if cmd {
            return match event.key.as_str() {
                "z" | "Z" => Some(HotkeyAction::Undo),
                "y" | "Y" => Some(HotkeyAction::Redo),
                "c" | "C" => Some(HotkeyAction::Copy),
                "v" | "V" => Some(HotkeyAction::Paste),
                "d" | "D" => Some(HotkeyAction::Duplicate),
                "x" | "X" => Some(HotkeyAction::Cut),
                "s" | "S" => Some(HotkeyAction::Save),
                "a" | "A" => Some(HotkeyAction::SelectAll),
                "b" | "B" => Some(HotkeyAction::ToggleBold),
                "i" | "I" => Some(HotkeyAction::ToggleItalic),
                "u" | "U" => Some(HotkeyAction::ToggleUnderline),
                "Delete" | "Backspace" => Some(HotkeyAction::Delete),
                _ => None,
            };
        }

        match event.key.as_str() {
            "Delete" | "Backspace" => Some(HotkeyAction::Delete),
            _ => None,
        }
    }
}

/// Bold toggle: heavy weights drop to 500, everything else goes to 700.
pub fn toggled_weight(current: u16) -> u16 {
    if current > 500 { 500 } else { 700 }
}
