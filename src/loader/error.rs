//! # Loader Errors

/// Errors raised while resolving or loading a component.
///
/// The first three variants are programmer errors: the namespace itself is wrong and
/// retrying cannot help. [`LoadError::Source`] comes from a component source that
/// declares a location but cannot produce it, which may be transient.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Malformed namespace '{namespace}': {reason}")]
    MalformedNamespace { namespace: String, reason: String },

    #[error("Unknown component kind '{kind}' in namespace '{namespace}'")]
    UnknownComponentKind { namespace: String, kind: String },

    #[error("Direct instantiation of adapter base '{0}' is forbidden")]
    DirectAdapterInstantiationForbidden(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl LoadError {
    pub fn malformed(namespace: &str, reason: impl Into<String>) -> Self {
        LoadError::MalformedNamespace {
            namespace: namespace.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the namespace itself.
    pub fn is_programmer_error(&self) -> bool {
        !self.is_retryable()
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Source(_))
    }
}

/// A declared source location that could not be read.
#[derive(Debug, thiserror::Error)]
#[error("Source '{location}' is unreadable: {reason}")]
pub struct SourceError {
    pub location: String,
    pub reason: String,
}

impl SourceError {
    pub fn new(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            reason: reason.into(),
        }
    }
}
