//! Error types for request processing.

use crate::config::ConfigError;
use crate::request::EntryKind;

/// Errors raised while turning raw input into a [`Request`](crate::Request).
///
/// Dispatch never fails with these; it answers with a response instead. They surface
/// only from [`Router::process`](super::Router::process) and are translated by
/// [`App::execute`](crate::App::execute).
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("No URI given for {0} entry")]
    EmptyUri(EntryKind),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RouterError {
    /// HTTP-style status used when the error is answered with a response.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::EmptyUri(_) => 404,
            RouterError::UnsupportedMethod(_) => 405,
            RouterError::Config(_) => 500,
        }
    }
}
