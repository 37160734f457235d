//! The workflows behind morphine's operations, one module each.

mod config;
mod execute;
mod generate;
mod help;
mod install;
mod update;

pub use config::ConfigWorkflow;
pub use execute::ExecuteWorkflow;
pub use generate::GenerateWorkflow;
pub use help::HelpWorkflow;
pub use install::InstallWorkflow;
pub use test::TestWorkflow;
pub use update::UpdateWorkflow;

use crate::project::Project;
use painless::{AppBuilder, Request, Workflow};
use std::sync::Arc;

/// Declares every operation workflow on `builder`.
pub fn register(builder: AppBuilder, project: Arc<Project>) -> AppBuilder {
    builder
        .workflow("help", "main", || HelpWorkflow)
        .workflow("config", "main", bind(&project, ConfigWorkflow::new))
        .workflow("install", "main", bind(&project, InstallWorkflow::new))
        .workflow("update", "main", bind(&project, UpdateWorkflow::new))
        .workflow("generate", "main", bind(&project, GenerateWorkflow::new))
        .workflow("execute", "main", bind(&project, ExecuteWorkflow::new))
        .workflow("test", "main", bind(&project, TestWorkflow::new))
}

fn bind<W>(
    project: &Arc<Project>,
    new: fn(Arc<Project>) -> W,
) -> impl Fn() -> W + Send + Sync + 'static
where
    W: Workflow,
{
    let project = project.clone();
    move || new(project.clone())
}

/// The operation's arguments as typed on the command line.
///
/// Routing strips a `.suffix` off the last argument and turns it into the content
/// type; when that happened the suffix is put back as written.
pub(crate) fn arguments(request: &Request) -> Vec<String> {
    let mut args = request.params().values().to_vec();
    if let (Some(last), Some(suffix)) = (args.last_mut(), request.suffix()) {
        last.push('.');
        last.push_str(suffix);
    }
    args
}
