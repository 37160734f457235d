//! # Configuration
//!
//! Config documents are flat JSON objects keyed by dotted names:
//!
//! ```json
//! {
//!     "routes.uri.config": ["module", "workflow"],
//!     "routes.uri.default.module": "help",
//!     "routes.uri.default.workflow": "main",
//!     "routes.alias": { "help": ["help", "main"] }
//! }
//! ```
//!
//! [`Config::with_defaults`] provides the built-in values; [`Config::load`] layers a
//! file on top of them. The path can be taken from the `PAINLESS_CONFIG` environment
//! variable via [`Config::from_env`].

mod error;

pub use error::ConfigError;

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ROUTE_GRAMMAR_KEY: &str = "routes.uri.config";
pub const ALIAS_KEY: &str = "routes.alias";
pub const DEFAULT_MODULE_KEY: &str = "routes.uri.default.module";
pub const DEFAULT_WORKFLOW_KEY: &str = "routes.uri.default.workflow";
/// Older configs name the default workflow a controller.
pub const LEGACY_DEFAULT_CONTROLLER_KEY: &str = "routes.uri.default.controller";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PAINLESS_CONFIG";

/// Default config file name inside a project.
pub const CONFIG_FILE: &str = "painless.json";

/// A set of dotted config keys and their JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, Value>,
}

impl Config {
    /// An empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in route configuration.
    pub fn with_defaults() -> Self {
        let mut config = Self::new();
        config.set(ROUTE_GRAMMAR_KEY, json!(["module", "workflow"]));
        config.set(DEFAULT_MODULE_KEY, json!("help"));
        config.set(DEFAULT_WORKFLOW_KEY, json!("main"));
        config.set(ALIAS_KEY, json!({}));
        config
    }

    /// Parses a config document.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(document)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::invalid("<root>", "expected a JSON object"));
        };
        Ok(Self {
            entries: map.into_iter().collect(),
        })
    }

    /// Reads the file at `path` over the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::with_defaults();
        config.merge(Self::from_json_str(&document)?);
        debug!(path = %path.display(), keys = config.len(), "Config loaded");
        Ok(config)
    }

    /// Loads the file named by `PAINLESS_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match Self::env_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::with_defaults()),
        }
    }

    pub fn env_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
    }

    /// Copies every entry of `other` over this config.
    pub fn merge(&mut self, other: Config) {
        self.entries.extend(other.entries);
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries selected by `pattern`.
    ///
    /// A trailing `*` selects every key containing the text before it; otherwise the
    /// pattern selects the single exact key, if present.
    pub fn matching(&self, pattern: &str) -> BTreeMap<String, Value> {
        match pattern.strip_suffix('*') {
            Some(prefix) => self
                .entries
                .iter()
                .filter(|(k, _)| k.contains(prefix))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => self
                .entries
                .get_key_value(pattern)
                .map(|(k, v)| (k.clone(), v.clone()))
                .into_iter()
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON document for writing back to disk.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
