use super::arguments;
use crate::project::Project;
use async_trait::async_trait;
use painless::loader::pascal_case;
use painless::{Request, Response, Workflow, WorkflowResult};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const DEFAULT_WORKFLOW: &str = "main";

/// Scaffolds a workflow source file under `src/<module>/`.
pub struct GenerateWorkflow {
    project: Arc<Project>,
}

impl GenerateWorkflow {
    pub fn new(project: Arc<Project>) -> Self {
        Self { project }
    }
}

#[async_trait]
impl Workflow for GenerateWorkflow {
    async fn get(&self, request: &Request) -> WorkflowResult {
        let args = arguments(request);
        let Some(module) = args.first() else {
            return Ok(Response::bad_request(
                "usage: morphine generate <module> [workflow]",
            ));
        };
        let workflow = args.get(1).map_or(DEFAULT_WORKFLOW, String::as_str);
        for name in [module.as_str(), workflow] {
            if !is_identifier(name) {
                return Ok(Response::bad_request(format!(
                    "'{name}' is not a valid module or workflow name"
                )));
            }
        }

        let dir = self.project.root().join("src").join(module);
        let file = dir.join(format!("{}.rs", module_file_name(workflow)));
        if file.exists() {
            return Ok(Response::bad_request(format!(
                "{} already exists",
                file.display()
            )));
        }

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(&file, scaffold(module, workflow)).await?;
        register_module(&dir, workflow).await?;
        info!(module = %module, workflow = %workflow, path = %file.display(), "Generated workflow");

        Ok(Response::created(json!(format!("Wrote {}", file.display()))))
    }
}

fn is_identifier(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn module_file_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Adds `pub mod <workflow>;` to the module's `mod.rs`, creating it when needed.
async fn register_module(dir: &Path, workflow: &str) -> std::io::Result<()> {
    let mod_file = dir.join("mod.rs");
    let line = format!("pub mod {};\n", module_file_name(workflow));
    let mut contents = match tokio::fs::read_to_string(&mod_file).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };
    if !contents.lines().any(|l| format!("{l}\n") == line) {
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push_str(&line);
        tokio::fs::write(&mod_file, contents).await?;
    }
    Ok(())
}

fn scaffold(module: &str, workflow: &str) -> String {
    let type_name = format!("{}Workflow", pascal_case(&[module, workflow]));
    format!(
        r#"use async_trait::async_trait;
use painless::{{Request, Response, Workflow, WorkflowResult}};
use serde_json::json;

/// Serves `{module}/{workflow}`. Register it with
/// `.workflow("{module}", "{workflow}", || {type_name})`.
pub struct {type_name};

#[async_trait]
impl Workflow for {type_name} {{
    async fn get(&self, request: &Request) -> WorkflowResult {{
        Ok(Response::ok(json!({{
            "module": request.module(),
            "workflow": request.workflow(),
            "params": request.params().values(),
        }})))
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_names_the_workflow_type() {
        let source = scaffold("blog", "post-list");
        assert!(source.contains("pub struct BlogPostListWorkflow;"));
        assert!(source.contains("impl Workflow for BlogPostListWorkflow {"));
    }

    #[test]
    fn identifiers_start_with_a_letter() {
        assert!(is_identifier("users"));
        assert!(is_identifier("post-list"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("../etc"));
        assert!(!is_identifier(""));
    }
}
