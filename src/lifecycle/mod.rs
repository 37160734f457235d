//! # Lifecycle
//!
//! App assembly and process bootstrap: [`AppBuilder`] declares components and builds an
//! [`App`], [`AppRegistry`] holds the apps of one process, and [`tracing::setup_tracing`]
//! installs the log subscriber.

mod app;
mod apps;
mod error;
pub mod tracing;

pub use app::{App, AppBuilder};
pub use apps::AppRegistry;
pub use error::BuildError;
