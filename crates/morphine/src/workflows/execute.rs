use super::arguments;
use crate::project::Project;
use async_trait::async_trait;
use painless::{EntryKind, Request, Response, Workflow, WorkflowResult};
use std::sync::Arc;
use tracing::debug;

/// Dispatches an internal call against a fresh morphine app and returns its response.
/// A response left at the internal default content type is rendered the way the
/// calling entry renders.
pub struct ExecuteWorkflow {
    project: Arc<Project>,
}

impl ExecuteWorkflow {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }
}

#[async_trait]
impl Workflow for ExecuteWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let uri = arguments(request).join("/");
        if uri.is_empty() {
            return Ok(Response::bad_request("usage: morphine execute <uri>"));
        }
        let app = crate::build_app(self.project.clone()).map_err(|e| e.to_string())?;
        debug!(%uri, "Executing internal call");
        let mut response = app.call(&uri).await;
        if response.content_type == Some(EntryKind::Internal.default_content_type()) {
            response.content_type = None;
        }
        Ok(response)
    }
}
