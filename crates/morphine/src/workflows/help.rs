use crate::cli::Operation;
use async_trait::async_trait;
use painless::{Request, Response, Workflow, WorkflowResult};
use serde_json::json;

/// Prints usage.
pub struct HelpWorkflow;

impl HelpWorkflow {
    fn summary(operation: Operation) -> &'static str {
        match operation {
            Operation::Help => "help                         show this text (--help, /?)",
            Operation::Config => "config [key]                 show config entries, `*` matches a prefix (con, conf)",
            Operation::Install => "install [dir]                write a default painless.json (in)",
            Operation::Update => "update [dir]                 add missing default keys to painless.json (up)",
            Operation::Generate => "generate <module> [workflow] scaffold src/<module>/<workflow>.rs (gen)",
            Operation::Execute => "execute <uri>                dispatch an internal call and show the response (ex)",
            Operation::Test => "test <uri>                   show how the project routes a URI",
        }
    }
}

#[async_trait]
impl Workflow for HelpWorkflow {
    async fn get(&self, _request: &Request) -> WorkflowResult {
        let mut lines = vec![
            "usage: morphine [-C <project>] <operation> [args...]".to_string(),
            String::new(),
            "operations:".to_string(),
        ];
        lines.extend(
            Operation::ALL
                .iter()
                .map(|op| format!("  {}", Self::summary(*op))),
        );
        Ok(Response::ok(json!(lines)))
    }
}
