//! # Morphine
//!
//! The command line companion of painless. Every operation is an ordinary workflow in a
//! small painless app, so a command goes through the same processing, dispatch and
//! rendering as any other call:
//!
//! ```text
//! morphine gen users ──▶ "GET generate/main/users" ──▶ generate/main ──▶ cli-text output
//! ```
//!
//! Exit status is non-zero whenever the response status is 400 or above.

pub mod cli;
pub mod error;
pub mod project;
pub mod workflows;

pub use cli::{process_string, Cli, Operation};
pub use error::MorphineError;
pub use project::Project;

use painless::{App, Config, ContentType, EntryPoint, Response};
use std::sync::Arc;

/// Name the morphine app registers its components under.
pub const APP_NAME: &str = "morphine";

/// Builds the morphine app for `project`.
///
/// Routing always uses the built-in grammar, whatever the project configures, so the
/// process strings built by [`process_string`] keep mapping to the operation workflows.
pub fn build_app(project: Arc<Project>) -> Result<App, MorphineError> {
    let builder = App::builder(APP_NAME).config(Config::with_defaults());
    Ok(workflows::register(builder, project).build()?)
}

/// Runs `raw` as a command line call.
///
/// An argument ending in an unknown `.suffix` leaves the response with a content type
/// no compiler serves; such responses are printed as cli text instead.
pub async fn execute(app: &App, raw: &str) -> Response {
    let mut response = app.execute(&EntryPoint::Cli, raw).await;
    if matches!(response.content_type, Some(ContentType::Other(_))) {
        response.content_type = Some(ContentType::CliText);
    }
    response
}
