use super::arguments;
use crate::project::Project;
use async_trait::async_trait;
use painless::{Request, Response, Workflow, WorkflowError, WorkflowResult};
use serde_json::Value;
use std::sync::Arc;

/// Shows project config entries.
pub struct ConfigWorkflow {
    project: Arc<Project>,
}

impl ConfigWorkflow {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }
}

#[async_trait]
impl Workflow for ConfigWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let config = self.project.config().map_err(|e| e.to_string())?;
        let pattern = arguments(request).join("/");
        let entries = if pattern.is_empty() {
            config.matching("*")
        } else {
            config.matching(&pattern)
        };
        if entries.is_empty() {
            return Err(WorkflowError::NotFound(format!(
                "No config entries match '{pattern}'"
            )));
        }
        Ok(Response::ok(Value::Object(entries.into_iter().collect())))
    }
}
