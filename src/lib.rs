//! # Painless
//!
//! > **A component-loading web and CLI framework core.**
//!
//! Every call, whether it arrives over HTTP, from the command line, from another app or
//! from inside the process, takes the same path:
//!
//! ```text
//! entry point ──▶ Router::process ──▶ Request ──▶ Router::dispatch ──▶ Response ──▶ render
//!                                                     │                               │
//!                                                     ▼                               ▼
//!                                      Loader: workflow/<module>/<workflow>   Loader: view-compiler/<type>
//! ```
//!
//! ## 🏗️ Design
//!
//! ### Core and Extension
//! Components are named by slash-delimited namespaces (`system/config`,
//! `workflow/blog/post`). For each one the [`Loader`] knows a *core* implementation
//! shipped with the framework and an *extension* the app provides. When both exist the
//! extension wins, and the app only has to declare what it wants to replace.
//!
//! ### Registration instead of Discovery
//! Components are declared up front as factories on an [`AppBuilder`] (or any
//! [`ComponentSource`](loader::ComponentSource)). The loader defines a type the first time
//! it is asked for and caches one instance per namespace in the app's
//! [`ComponentRegistry`](loader::ComponentRegistry).
//!
//! ### No Globals
//! Config, definitions and cached instances belong to an [`App`]. Several apps can share
//! a process through an [`AppRegistry`] without seeing each other's components.
//!
//! ### Failures are Responses
//! Dispatch always produces a [`Response`]: 404 when nothing handles the route, 405 when
//! the workflow has no hook for the verb, 500 when the hook fails or panics.
//! [`App::execute`] extends the same guarantee to routing failures.
//!
//! ## 🗺️ Module Tour
//!
//! - [`loader`]: namespace resolution, load options, definitions and the registry.
//! - [`router`]: entry points, the route grammar, request processing and dispatch.
//! - [`request`] / [`response`]: the values passed between them.
//! - [`workflow`]: the handler trait apps implement.
//! - [`render`]: view compilers for html, json, cli-text and raw output.
//! - [`config`]: flat JSON config documents.
//! - [`lifecycle`]: app assembly and tracing setup.
//! - [`mock`]: scripted workflows for tests.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use painless::{App, EntryPoint, Request, Response, Workflow, WorkflowResult};
//! use serde_json::json;
//!
//! struct ListPosts;
//!
//! #[async_trait]
//! impl Workflow for ListPosts {
//!     async fn get(&self, _request: &Request) -> WorkflowResult {
//!         Ok(Response::ok(json!(["first post", "second post"])))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = App::builder("blog")
//!         .workflow("posts", "list", || ListPosts)
//!         .build()
//!         .unwrap();
//!
//!     let response = app.execute(&EntryPoint::Cli, "posts/list").await;
//!     assert_eq!(response.status, 200);
//!     assert_eq!(app.render(&response).unwrap(), "first post\nsecond post\n");
//! }
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod config;
pub mod lifecycle;
pub mod loader;
pub mod mock;
pub mod render;
pub mod request;
pub mod response;
pub mod router;
pub mod workflow;

pub use config::{Config, ConfigError};
pub use lifecycle::{App, AppBuilder, AppRegistry, BuildError};
pub use loader::{Component, LoadError, LoadOptions, Loader};
pub use render::{Compiler, RenderError};
pub use request::{ContentType, EntryKind, Method, ParamStyle, ParamView, Params, Request};
pub use response::Response;
pub use router::{EntryPoint, HttpEnvironment, Router, RouterError};
pub use workflow::{Workflow, WorkflowError, WorkflowResult};
