//! The project morphine operates on.

use painless::config::{Config, ConfigError, CONFIG_FILE};
use std::path::{Path, PathBuf};

/// A project directory and the config file that belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    config_path: PathBuf,
}

impl Project {
    /// A project rooted at `root`. The config file is `PAINLESS_CONFIG` when set,
    /// `<root>/painless.json` otherwise.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_path = Config::env_path().unwrap_or_else(|| root.join(CONFIG_FILE));
        Self { root, config_path }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `relative` under the project root; the root itself when empty.
    pub fn path(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }

    /// The project config layered over the defaults, or the defaults alone when the
    /// project has no config file yet.
    pub fn config(&self) -> Result<Config, ConfigError> {
        if self.config_path.is_file() {
            Config::load(&self.config_path)
        } else {
            Ok(Config::with_defaults())
        }
    }
}
