//! # Workflow Trait
//!
//! A workflow is the unit of request handling for one `(module, workflow)` pair, the way
//! a controller is in other frameworks. The router resolves it through the loader and
//! calls the handler matching the request's [`Method`].
//!
//! # Provided Methods (Verb Hooks)
//! Every verb hook has a default implementation that answers
//! [`WorkflowError::MethodNotSupported`]. A workflow overrides only the verbs it serves;
//! the router turns the default answer into a 405.
//!
//! ```rust
//! use async_trait::async_trait;
//! use painless::{Request, Response, Workflow, WorkflowResult};
//! use serde_json::json;
//!
//! struct HelloWorld;
//!
//! #[async_trait]
//! impl Workflow for HelloWorld {
//!     async fn get(&self, request: &Request) -> WorkflowResult {
//!         let name = request.params().at(0).unwrap_or("world");
//!         Ok(Response::ok(json!({ "greeting": format!("hello {name}") })))
//!     }
//! }
//! ```

use crate::loader::LoadError;
use crate::request::{Method, Request};
use crate::response::Response;
use async_trait::async_trait;

pub type WorkflowResult = Result<Response, WorkflowError>;

/// Errors a workflow handler can return.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum WorkflowError {
    /// The workflow has no handler for this verb.
    #[error("Method not supported: {0}")]
    MethodNotSupported(Method),

    /// A module, workflow or resource the handler needed does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure. The message becomes user visible in the 500 response.
    #[error("{0}")]
    Failed(String),
}

impl From<String> for WorkflowError {
    fn from(msg: String) -> Self {
        WorkflowError::Failed(msg)
    }
}

impl From<&str> for WorkflowError {
    fn from(msg: &str) -> Self {
        WorkflowError::Failed(msg.to_string())
    }
}

impl From<std::io::Error> for WorkflowError {
    fn from(e: std::io::Error) -> Self {
        WorkflowError::Failed(e.to_string())
    }
}

impl From<LoadError> for WorkflowError {
    fn from(e: LoadError) -> Self {
        WorkflowError::Failed(e.to_string())
    }
}

/// Request handler for a `(module, workflow)` pair.
///
/// Instances may be cached by the loader and shared between requests, so handlers take
/// `&self` and receive the dispatched [`Request`] as an argument.
#[async_trait]
pub trait Workflow: Send + Sync + 'static {
    async fn get(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::MethodNotSupported(Method::Get))
    }

    async fn post(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::MethodNotSupported(Method::Post))
    }

    async fn put(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::MethodNotSupported(Method::Put))
    }

    async fn delete(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::MethodNotSupported(Method::Delete))
    }

    async fn options(&self, _request: &Request) -> WorkflowResult {
        Err(WorkflowError::MethodNotSupported(Method::Options))
    }
}

/// Calls the verb hook matching `request.method()`.
pub async fn invoke(workflow: &dyn Workflow, request: &Request) -> WorkflowResult {
    match request.method() {
        Method::Get => workflow.get(request).await,
        Method::Post => workflow.post(request).await,
        Method::Put => workflow.put(request).await,
        Method::Delete => workflow.delete(request).await,
        Method::Options => workflow.options(request).await,
    }
}
