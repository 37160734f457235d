//! # Router
//!
//! Takes a call from raw input to a response:
//!
//! ```text
//! raw input ──process──▶ Request ──dispatch──▶ Response
//!              │                     │
//!              ├─ method + URI        ├─ loader: workflow/<module>/<workflow>
//!              └─ map_uri             └─ verb hook, failures → 404 / 405 / 500
//! ```
//!
//! Nothing is retried. Processing either yields a [`Request`] or a [`RouterError`];
//! dispatch always yields a [`Response`].

mod entry;
mod error;
mod grammar;

pub use entry::{EntryPoint, HttpEnvironment};
pub use error::RouterError;
pub use grammar::{RouteMap, RouteMatch, RouteToken};

use crate::config::Config;
use crate::loader::{LoadError, LoadOptions, Loader};
use crate::request::{Method, Params, Request};
use crate::response::{Response, NOT_FOUND_MESSAGE};
use crate::workflow::{invoke, WorkflowError};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Maps inbound calls to workflows and runs them.
pub struct Router {
    routes: RouteMap,
    loader: Arc<Loader>,
}

impl Router {
    /// Builds a router from the routing keys in `config`. Fails fast on a bad grammar or
    /// alias table.
    pub fn new(config: &Config, loader: Arc<Loader>) -> Result<Self, RouterError> {
        Ok(Self {
            routes: RouteMap::from_config(config)?,
            loader,
        })
    }

    pub fn routes(&self) -> &RouteMap {
        &self.routes
    }

    pub fn loader(&self) -> &Arc<Loader> {
        &self.loader
    }

    pub fn map_uri<S: AsRef<str>>(&self, segments: &[S]) -> Result<RouteMatch, RouterError> {
        Ok(self.routes.map_uri(segments)?)
    }

    /// Normalizes `raw` from `entry` into a [`Request`].
    ///
    /// `raw` may start with a method token (`"POST blog/post"`). Without one, HTTP uses
    /// the transport method and every other entry uses GET. HTTP reads the URI from the
    /// transport when `raw` names none; the other entries require one.
    pub fn process(&self, entry: &EntryPoint, raw: &str) -> Result<Request, RouterError> {
        let (explicit, target) = split_method(raw)?;
        let kind = entry.kind();

        let (method, uri) = match entry {
            EntryPoint::Http(env) => {
                let uri = if target.is_empty() {
                    env.path()
                } else {
                    target.to_string()
                };
                (explicit.unwrap_or(env.method), uri)
            }
            _ => {
                if target.is_empty() {
                    return Err(RouterError::EmptyUri(kind));
                }
                (explicit.unwrap_or(Method::Get), target.to_string())
            }
        };

        let segments: Vec<&str> = uri.split('/').collect();
        let matched = self.map_uri(&segments)?;
        let content_type = matched
            .content_type
            .unwrap_or_else(|| kind.default_content_type());

        let mut params = Params::new(matched.params);
        if let EntryPoint::Http(env) = entry {
            match method {
                Method::Get => params.extend_named(env.query_pairs()),
                Method::Post | Method::Put => params.extend_named(env.form_pairs()),
                Method::Delete | Method::Options => {}
            }
        }

        debug!(%kind, %method, %uri, module = %matched.module, workflow = %matched.workflow, "Processed");
        let request = Request::new(method, matched.module, matched.workflow)
            .with_params(params)
            .with_content_type(content_type)
            .with_agent(entry.agent())
            .with_entry(kind);
        Ok(match matched.suffix {
            Some(suffix) => request.with_suffix(suffix),
            None => request,
        })
    }

    /// Runs the workflow named by `request` and answers with its response.
    ///
    /// * nothing resolves for `(module, workflow)` → 404
    /// * the workflow has no hook for the method → 405
    /// * the hook fails or panics → 500 with the failure message
    #[instrument(skip(self, request), fields(module = %request.module(), workflow = %request.workflow(), method = %request.method()))]
    pub async fn dispatch(&self, request: Request) -> Response {
        let namespace = format!("workflow/{}/{}", request.module(), request.workflow());
        let component = match self.loader.load(&namespace, LoadOptions::ALL) {
            Ok(component) => component,
            Err(e @ LoadError::Source(_)) => {
                error!(%namespace, error = %e, "Workflow source failed");
                return Response::server_error(e.to_string()).for_request(&request);
            }
            Err(e) => {
                warn!(%namespace, error = %e, "Unroutable namespace");
                None
            }
        };
        let Some(workflow) = component.and_then(|c| c.as_workflow()) else {
            info!(%namespace, status = 404, "Not found");
            return Response::not_found(NOT_FOUND_MESSAGE).for_request(&request);
        };

        let task_request = request.clone();
        let outcome =
            tokio::spawn(async move { invoke(workflow.as_ref(), &task_request).await }).await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(WorkflowError::MethodNotSupported(_))) => Response::method_not_supported(),
            Ok(Err(WorkflowError::NotFound(what))) => Response::not_found(what),
            Ok(Err(e)) => {
                warn!(error = %e, "Workflow failed");
                Response::server_error(e.to_string())
            }
            Err(join_error) => {
                let message = if join_error.is_panic() {
                    panic_message(join_error.into_panic())
                } else {
                    join_error.to_string()
                };
                error!(error = %message, "Workflow panicked");
                Response::server_error(message)
            }
        };
        info!(status = response.status, "Dispatched");
        response.for_request(&request)
    }
}

/// Splits an optional leading method token off `raw`.
///
/// A word followed by a URI must be a method when it is all uppercase. A lone word is
/// a method only when it is an uppercase known method; anything else is the URI.
fn split_method(raw: &str) -> Result<(Option<Method>, &str), RouterError> {
    let raw = raw.trim();
    let Some((head, tail)) = raw.split_once(char::is_whitespace) else {
        return Ok(match raw.parse::<Method>() {
            Ok(method) if is_upper_word(raw) => (Some(method), ""),
            _ => (None, raw),
        });
    };
    if let Ok(method) = head.parse::<Method>() {
        return Ok((Some(method), tail.trim()));
    }
    if is_upper_word(head) {
        return Err(RouterError::UnsupportedMethod(head.to_string()));
    }
    Ok((None, raw))
}

fn is_upper_word(word: &str) -> bool {
    word.len() >= 3 && word.chars().all(|c| c.is_ascii_uppercase())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => message.to_string(),
            Err(_) => "workflow panicked".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_prefix_is_optional() {
        assert_eq!(
            split_method("POST blog/post").unwrap(),
            (Some(Method::Post), "blog/post")
        );
        assert_eq!(split_method("blog/post").unwrap(), (None, "blog/post"));
        assert_eq!(split_method("  GET  ").unwrap(), (Some(Method::Get), ""));
    }

    #[test]
    fn unknown_uppercase_token_is_rejected() {
        assert!(matches!(
            split_method("PATCH blog/post"),
            Err(RouterError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn lone_uppercase_word_is_a_uri() {
        assert_eq!(split_method("FAQ").unwrap(), (None, "FAQ"));
        assert_eq!(split_method("PATCH").unwrap(), (None, "PATCH"));
        assert_eq!(split_method("DELETE").unwrap(), (Some(Method::Delete), ""));
        assert_eq!(split_method("delete").unwrap(), (None, "delete"));
    }

    #[test]
    fn method_token_is_case_insensitive_before_a_uri() {
        assert_eq!(
            split_method("get ready").unwrap(),
            (Some(Method::Get), "ready")
        );
        assert_eq!(split_method("hello world").unwrap(), (None, "hello world"));
    }
}
