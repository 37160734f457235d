//! Error types for app assembly.

use crate::loader::LoadError;
use crate::router::RouterError;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("'{namespace}' has no {slot} implementation")]
    NoSlot {
        namespace: String,
        slot: &'static str,
    },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Router(#[from] RouterError),
}
