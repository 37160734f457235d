use super::arguments;
use crate::project::Project;
use async_trait::async_trait;
use painless::config::{Config, CONFIG_FILE};
use painless::{Request, Response, Workflow, WorkflowError, WorkflowResult};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Adds default keys missing from an existing config. Values already present are
/// never touched.
pub struct UpdateWorkflow {
    project: Arc<Project>,
}

impl UpdateWorkflow {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }
}

#[async_trait]
impl Workflow for UpdateWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let dir = arguments(request).join("/");
        let path = if dir.is_empty() {
            self.project.config_path().to_path_buf()
        } else {
            self.project.path(&dir).join(CONFIG_FILE)
        };
        if !path.is_file() {
            return Err(WorkflowError::NotFound(format!(
                "{} does not exist; run `morphine install` first",
                path.display()
            )));
        }

        let document = tokio::fs::read_to_string(&path).await?;
        let mut config = Config::from_json_str(&document).map_err(|e| e.to_string())?;
        let defaults = Config::with_defaults();
        let missing: Vec<String> = defaults
            .keys()
            .filter(|key| !config.contains(key))
            .map(str::to_string)
            .collect();
        if missing.is_empty() {
            return Ok(Response::ok(json!("Config is up to date")));
        }

        for key in &missing {
            if let Some(value) = defaults.get(key) {
                config.set(key.clone(), value.clone());
            }
        }
        let updated = config.to_json_pretty().map_err(|e| e.to_string())?;
        tokio::fs::write(&path, updated).await?;
        info!(path = %path.display(), added = missing.len(), "Updated config");

        let mut lines = vec![format!("Added to {}:", path.display())];
        lines.extend(missing.iter().map(|key| format!("  {key}")));
        Ok(Response::ok(json!(lines)))
    }
}
