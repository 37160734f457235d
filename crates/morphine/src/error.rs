//! Error types for the morphine binary.

use painless::{BuildError, ConfigError, RenderError};

#[derive(Debug, thiserror::Error)]
pub enum MorphineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to assemble the morphine app: {0}")]
    Build(#[from] BuildError),

    #[error("Failed to render output: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
