//! # Apps
//!
//! An [`App`] is one configured application: its config, its loader (with the loader's
//! own definition table and component registry) and its router. Nothing is shared
//! between apps, so several can live in one process without seeing each other's
//! components.
//!
//! Apps are assembled with [`AppBuilder`], which is where factories are declared:
//!
//! ```rust
//! use painless::{App, Config, Request, Response, Workflow, WorkflowResult};
//! use async_trait::async_trait;
//! use serde_json::json;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Workflow for Hello {
//!     async fn get(&self, request: &Request) -> WorkflowResult {
//!         let who = request.params().at(0).unwrap_or("world");
//!         Ok(Response::ok(json!(format!("hello {who}"))))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = App::builder("acme")
//!         .config(Config::with_defaults())
//!         .workflow("hello", "main", || Hello)
//!         .build()
//!         .unwrap();
//!
//!     let response = app.call("hello/main/ada").await;
//!     assert_eq!(app.render(&response).unwrap(), "hello ada");
//! }
//! ```

use super::error::BuildError;
use crate::config::Config;
use crate::loader::{Component, ComponentSource, Loader, Namespace, StaticSource};
use crate::render::{self, builtin_compilers, RenderError};
use crate::request::Request;
use crate::response::{Response, NOT_FOUND_MESSAGE};
use crate::router::{EntryPoint, Router, RouterError};
use crate::workflow::Workflow;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A configured application.
pub struct App {
    name: String,
    config: Arc<Config>,
    loader: Arc<Loader>,
    router: Router,
}

impl App {
    pub fn builder(name: impl Into<String>) -> AppBuilder {
        AppBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn loader(&self) -> &Arc<Loader> {
        &self.loader
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Turns `raw` into a request without dispatching it.
    pub fn process(&self, entry: &EntryPoint, raw: &str) -> Result<Request, RouterError> {
        self.router.process(entry, raw)
    }

    /// Processes and dispatches `raw`. Always answers: routing failures are turned into
    /// error responses here.
    #[instrument(skip(self, entry), fields(app = %self.name, entry = %entry.kind()))]
    pub async fn execute(&self, entry: &EntryPoint, raw: &str) -> Response {
        let request = match self.router.process(entry, raw) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, status = e.status(), "Routing failed");
                let mut response = match e {
                    RouterError::EmptyUri(_) => Response::not_found(NOT_FOUND_MESSAGE),
                    RouterError::UnsupportedMethod(_) => Response::method_not_supported(),
                    RouterError::Config(e) => Response::server_error(e.to_string()),
                };
                response.agent = entry.agent();
                response.content_type = Some(entry.kind().default_content_type());
                return response;
            }
        };
        self.router.dispatch(request).await
    }

    /// Executes `raw` as an internal call.
    pub async fn call(&self, raw: &str) -> Response {
        self.execute(&EntryPoint::Internal, raw).await
    }

    /// Compiles `response` with this app's compiler for its content type.
    pub fn render(&self, response: &Response) -> Result<String, RenderError> {
        render::render(&self.loader, response)
    }
}

enum Slot {
    Core,
    Extension,
}

/// Declares an app's components and builds it.
pub struct AppBuilder {
    name: String,
    config: Config,
    pending: Vec<(String, Slot, Factory)>,
    sources: Vec<Arc<dyn ComponentSource>>,
}

type Factory = Box<dyn Fn() -> Component + Send + Sync>;

impl AppBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Config::with_defaults(),
            pending: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Replaces the config. The built-in defaults are used otherwise.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Declares the workflow `workflow/<module>/<flow>`.
    pub fn workflow<W, F>(self, module: &str, flow: &str, factory: F) -> Self
    where
        W: Workflow,
        F: Fn() -> W + Send + Sync + 'static,
    {
        self.component(&format!("workflow/{module}/{flow}"), move || {
            Component::workflow(factory())
        })
    }

    /// Declares the app's own implementation of `namespace`.
    pub fn component<F>(mut self, namespace: &str, factory: F) -> Self
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.pending
            .push((namespace.to_string(), Slot::Extension, Box::new(factory)));
        self
    }

    /// Declares the framework implementation of `namespace`. Only system and library
    /// namespaces have one.
    pub fn core_component<F>(mut self, namespace: &str, factory: F) -> Self
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.pending
            .push((namespace.to_string(), Slot::Core, Box::new(factory)));
        self
    }

    /// Adds a source searched after the declared components.
    pub fn source(mut self, source: Arc<dyn ComponentSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Resolves every declaration and builds the app. Fails on a malformed namespace or
    /// an invalid route configuration.
    pub fn build(self) -> Result<App, BuildError> {
        let mut declared = StaticSource::new();
        for (namespace, slot, factory) in self.pending {
            let descriptor = Namespace::parse(&namespace)?.describe(&self.name);
            let (candidate, slot) = match slot {
                Slot::Core => (descriptor.core, "core"),
                Slot::Extension => (descriptor.extension, "extension"),
            };
            let candidate = candidate.ok_or(BuildError::NoSlot {
                namespace: namespace.clone(),
                slot,
            })?;
            declared.register(candidate.location, factory);
        }
        for (content_type, factory) in builtin_compilers() {
            declared.register_default(
                format!("{}/view-compiler/{}", self.name, content_type),
                factory,
            );
        }

        let mut loader = Loader::new(self.name.clone()).with_source(Arc::new(declared));
        for source in self.sources {
            loader = loader.with_source(source);
        }
        let loader = Arc::new(loader);
        let router = Router::new(&self.config, loader.clone())?;

        info!(app = %self.name, "App built");
        Ok(App {
            name: self.name,
            config: Arc::new(self.config),
            loader,
            router,
        })
    }
}
