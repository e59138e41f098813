pub mod clipboard;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod history;
pub mod hotkeys;
pub mod image;
pub mod input;
pub mod persist;
pub mod style;
pub mod tools;
pub mod viewport;

pub use clipboard::Clipboard;
pub use config::EditorConfig;
pub use crate::image::{BytesImageLoader, ImageError, ImageLoader, LoadedImage};
pub use editor::{Alignment, Editor, ExportFile, InitOptions, TextOptions};
pub use error::EditorError;
pub use events::{SceneListener, dispatch};
pub use history::{History, Snapshot};
pub use hotkeys::{HotkeyAction, Hotkeys};
pub use input::{FocusTarget, InputEvent, KeyEvent};
pub use persist::{
    AutoSaver, Clock, DocumentStore, ManualClock, MemoryStore, MonotonicClock, PersistError,
    SavePayload, SaveStatus,
};
pub use style::{ActiveStyle, Selection, StyleDefaults};
pub use tools::{PenTool, SelectTool, Tool, ToolAction, ToolKind};
