//! # Responses
//!
//! A [`Response`] is what every dispatch ends in, successful or not. Workflows build
//! them; the router synthesizes them for routing and execution failures. Either way the
//! renderer always receives a status, a message and a payload.

use crate::request::{ContentType, Method, Request};
use serde_json::Value;

pub const NOT_FOUND_MESSAGE: &str = "Controller/workflow not found";
pub const METHOD_NOT_SUPPORTED_MESSAGE: &str = "Method not supported";

/// The outcome of a dispatched request.
///
/// The back-references (`module`, `workflow`, `method`, `agent`, `content_type`) are
/// filled from the originating request by [`Response::for_request`] unless the workflow
/// already set them.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub message: String,
    pub payload: Value,
    pub module: String,
    pub workflow: String,
    pub method: Option<Method>,
    pub agent: String,
    pub content_type: Option<ContentType>,
}

impl Response {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            payload: Value::Null,
            module: String::new(),
            workflow: String::new(),
            method: None,
            agent: String::new(),
            content_type: None,
        }
    }

    /// 200 with a payload.
    pub fn ok(payload: Value) -> Self {
        Self::new(200, "OK").with_payload(payload)
    }

    /// 201 with a payload.
    pub fn created(payload: Value) -> Self {
        Self::new(201, "Created").with_payload(payload)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn method_not_supported() -> Self {
        Self::new(405, METHOD_NOT_SUPPORTED_MESSAGE)
    }

    /// 500 carrying the failure's message.
    pub fn server_error(message: impl AsRef<str>) -> Self {
        Self::new(500, format!("General server error: {}", message.as_ref()))
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fills any back-reference the workflow left unset from `request`.
    pub fn for_request(mut self, request: &Request) -> Self {
        if self.module.is_empty() {
            self.module = request.module().to_string();
        }
        if self.workflow.is_empty() {
            self.workflow = request.workflow().to_string();
        }
        if self.agent.is_empty() {
            self.agent = request.agent().to_string();
        }
        self.method.get_or_insert(request.method());
        self.content_type
            .get_or_insert_with(|| request.content_type().clone());
        self
    }

    /// The content type to compile with; raw when nothing was recorded.
    pub fn output_type(&self) -> ContentType {
        self.content_type.clone().unwrap_or(ContentType::Raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn for_request_keeps_workflow_choices() {
        let request = Request::new(Method::Post, "shop", "cart").with_agent("curl");
        let response = Response::ok(json!({"n": 1}))
            .with_content_type(ContentType::Json)
            .for_request(&request);
        assert_eq!(response.module, "shop");
        assert_eq!(response.workflow, "cart");
        assert_eq!(response.agent, "curl");
        assert_eq!(response.method, Some(Method::Post));
        assert_eq!(response.content_type, Some(ContentType::Json));
    }

    #[test]
    fn server_error_prefixes_message() {
        let response = Response::server_error("boom");
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "General server error: boom");
        assert!(!response.is_success());
    }
}
