use clap::Parser;
use morphine::{build_app, execute, Cli, MorphineError, Project};
use painless::lifecycle::tracing::setup_tracing;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "morphine failed");
            eprintln!("morphine: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, MorphineError> {
    let root = match &cli.project {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let app = build_app(Arc::new(Project::at(root)))?;

    let raw = cli.process_string();
    debug!(%raw, "Running");
    let response = execute(&app, &raw).await;
    print!("{}", app.render(&response)?);

    Ok(if response.status >= 400 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
