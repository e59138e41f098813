//! Host input events.

/// Pointer input in surface coordinates (before the viewport inverse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, shift: bool },
    PointerMove { x: f64, y: f64, shift: bool },
    PointerUp { x: f64, y: f64 },
}

/// Where keyboard focus was when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    #[default]
    Canvas,
    /// An `<input>` or `<textarea>`; shortcuts must not fire.
    TextInput,
}

/// A keydown, as the host saw it. `key` is the `KeyboardEvent.key` value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    pub target: FocusTarget,
}

impl KeyEvent {
    /// A plain key press on the canvas.
    pub fn key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    /// `Ctrl` + key on the canvas.
    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::key(key)
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.target = FocusTarget::TextInput;
        self
    }
}
