//! Command line parsing.
//!
//! Morphine has no subcommands in the clap sense: the first word names an operation,
//! every later word is an argument, and both are folded into one process string
//! (`GET <operation>/main/<args...>`) that the morphine app routes like any other call.

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Painless project tool
#[derive(Parser, Debug)]
#[command(name = "morphine", disable_help_flag = true)]
pub struct Cli {
    /// Project root directory (defaults to the current directory)
    #[arg(short = 'C', long)]
    pub project: Option<PathBuf>,

    /// Operation to run; `help` lists them
    #[arg(allow_hyphen_values = true)]
    pub operation: Option<String>,

    /// Arguments passed to the operation
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn operation(&self) -> Operation {
        self.operation
            .as_deref()
            .map(Operation::from_alias)
            .unwrap_or(Operation::Help)
    }

    pub fn process_string(&self) -> String {
        process_string(self.operation(), &self.args)
    }
}

/// The operations morphine knows. Each is served by the `main` workflow of the module
/// with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Help,
    Config,
    Install,
    Update,
    Generate,
    Execute,
    Test,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Help,
        Operation::Config,
        Operation::Install,
        Operation::Update,
        Operation::Generate,
        Operation::Execute,
        Operation::Test,
    ];

    /// Resolves an operation name or alias. Anything unrecognized is `help`.
    pub fn from_alias(word: &str) -> Operation {
        match word.to_ascii_lowercase().as_str() {
            "config" | "con" | "conf" => Operation::Config,
            "install" | "in" => Operation::Install,
            "update" | "up" => Operation::Update,
            "generate" | "gen" => Operation::Generate,
            "execute" | "ex" => Operation::Execute,
            "test" => Operation::Test,
            "help" | "--help" | "/?" => Operation::Help,
            _ => Operation::Help,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Help => "help",
            Operation::Config => "config",
            Operation::Install => "install",
            Operation::Update => "update",
            Operation::Generate => "generate",
            Operation::Execute => "execute",
            Operation::Test => "test",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET <operation>/main/<args joined by '/'>`.
pub fn process_string<S: AsRef<str>>(operation: Operation, args: &[S]) -> String {
    let mut raw = format!("GET {operation}/main");
    for arg in args {
        let arg = arg.as_ref().trim_matches('/');
        if !arg.is_empty() {
            raw.push('/');
            raw.push_str(arg);
        }
    }
    raw
}
