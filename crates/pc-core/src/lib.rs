pub mod color;
pub mod document;
pub mod id;
pub mod model;
pub mod scene;

pub use color::Color;
pub use document::{Document, DocumentError, PERSISTED_KEYS, SCHEMA_VERSION, SceneDocument};
pub use id::ObjectId;
pub use model::*;
pub use scene::{Brush, Scene, SceneEvent};

// Re-export kurbo so downstream crates share one geometry version
pub use kurbo;
