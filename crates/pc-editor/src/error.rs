use pc_core::DocumentError;
use pc_render::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor is not initialized")]
    NotInitialized,
    #[error("invalid workspace size {width}x{height}")]
    InvalidWorkspaceSize { width: f64, height: f64 },
    #[error("scene has no workspace")]
    MissingWorkspace,
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
