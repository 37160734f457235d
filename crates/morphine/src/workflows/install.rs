use super::arguments;
use crate::project::Project;
use async_trait::async_trait;
use painless::config::{Config, CONFIG_FILE};
use painless::{Request, Response, Workflow, WorkflowResult};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Writes a default config into a project directory.
pub struct InstallWorkflow {
    project: Arc<Project>,
}

impl InstallWorkflow {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }
}

#[async_trait]
impl Workflow for InstallWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let dir = self.project.path(&arguments(request).join("/"));
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Ok(Response::bad_request(format!(
                "{} already exists; use `morphine update` to add missing keys",
                path.display()
            )));
        }

        tokio::fs::create_dir_all(&dir).await?;
        let document = Config::with_defaults()
            .to_json_pretty()
            .map_err(|e| e.to_string())?;
        tokio::fs::write(&path, document).await?;
        info!(path = %path.display(), "Installed config");

        Ok(Response::created(json!(format!("Wrote {}", path.display()))))
    }
}
