//! Error types for rendering.

use crate::loader::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No compiler registered for content type '{0}'")]
    NoCompiler(String),

    #[error("Component at '{0}' is not a view compiler")]
    NotACompiler(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
