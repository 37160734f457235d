//! # Route Grammar
//!
//! The configured grammar is an ordered list of tokens, one per non-empty URI segment.
//! [`RouteMap::map_uri`] walks the segments against it and produces a [`RouteMatch`].
//!
//! | token | effect |
//! |-------|--------|
//! | `module` | segment is the module |
//! | `workflow` / `controller` | segment is the workflow |
//! | `param` | segment is appended to the params |
//! | `param-all` | this and every later segment are params; mapping stops |
//! | `alias` | segment is looked up in `routes.alias`; later segments are params; mapping stops |
//!
//! Segments left over once the grammar runs out become params.

use crate::config::{
    Config, ConfigError, ALIAS_KEY, DEFAULT_MODULE_KEY, DEFAULT_WORKFLOW_KEY,
    LEGACY_DEFAULT_CONTROLLER_KEY, ROUTE_GRAMMAR_KEY,
};
use crate::request::ContentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteToken {
    Module,
    #[serde(alias = "controller")]
    Workflow,
    Param,
    #[serde(alias = "params")]
    ParamAll,
    Alias,
}

/// The result of mapping a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub module: String,
    pub workflow: String,
    pub params: Vec<String>,
    /// Set only when the last param carried a `.suffix`.
    pub content_type: Option<ContentType>,
    /// That suffix as written, without the dot.
    pub suffix: Option<String>,
}

/// Alias target as written in config: `["module", "workflow"]` or `"module/workflow"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AliasTarget {
    Pair(String, String),
    Path(String),
}

/// Route grammar, alias table and defaults read from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMap {
    grammar: Vec<RouteToken>,
    aliases: BTreeMap<String, (String, String)>,
    default_module: Option<String>,
    default_workflow: Option<String>,
}

impl RouteMap {
    /// Reads and validates the routing keys of `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let grammar = match config.get(ROUTE_GRAMMAR_KEY) {
            Some(value) => serde_json::from_value::<Vec<RouteToken>>(value.clone())
                .map_err(|e| ConfigError::invalid(ROUTE_GRAMMAR_KEY, e.to_string()))?,
            None => vec![RouteToken::Module, RouteToken::Workflow],
        };
        let has_alias = grammar.contains(&RouteToken::Alias);
        let has_explicit = grammar
            .iter()
            .any(|t| matches!(t, RouteToken::Module | RouteToken::Workflow));
        if has_alias && has_explicit {
            return Err(ConfigError::invalid(
                ROUTE_GRAMMAR_KEY,
                "alias cannot be combined with module or workflow tokens",
            ));
        }

        let aliases = match config.get(ALIAS_KEY) {
            Some(value) => parse_aliases(value)?,
            None => BTreeMap::new(),
        };

        let default_workflow = config
            .get_str(DEFAULT_WORKFLOW_KEY)
            .or_else(|| config.get_str(LEGACY_DEFAULT_CONTROLLER_KEY))
            .map(str::to_string);

        Ok(Self {
            grammar,
            aliases,
            default_module: config.get_str(DEFAULT_MODULE_KEY).map(str::to_string),
            default_workflow,
        })
    }

    pub fn grammar(&self) -> &[RouteToken] {
        &self.grammar
    }

    /// Maps URI segments to module, workflow, params and content type.
    pub fn map_uri<S: AsRef<str>>(&self, segments: &[S]) -> Result<RouteMatch, ConfigError> {
        let segments: Vec<&str> = segments
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.is_empty())
            .collect();

        let mut module: Option<String> = None;
        let mut workflow: Option<String> = None;
        let mut params: Vec<String> = Vec::new();
        let mut tokens = self.grammar.iter();

        for (i, segment) in segments.iter().enumerate() {
            let rest = || segments[i..].iter().map(|s| s.to_string());
            let Some(token) = tokens.next() else {
                params.extend(rest());
                break;
            };
            match token {
                RouteToken::Module => module = Some(segment.to_string()),
                RouteToken::Workflow => workflow = Some(segment.to_string()),
                RouteToken::Param => params.push(segment.to_string()),
                RouteToken::ParamAll => {
                    params.extend(rest());
                    break;
                }
                RouteToken::Alias => {
                    match self.aliases.get(*segment) {
                        Some((m, w)) => {
                            module = Some(m.clone());
                            workflow = Some(w.clone());
                        }
                        None => {
                            debug!(alias = %segment, "Unknown alias");
                            params.push(segment.to_string());
                        }
                    }
                    params.extend(segments[i + 1..].iter().map(|s| s.to_string()));
                    break;
                }
            }
        }

        let mut content_type = None;
        let mut suffix = None;
        if let Some(last) = params.last_mut() {
            if let Some((value, ext)) = last.rsplit_once('.') {
                content_type = Some(ContentType::from_suffix(ext));
                suffix = Some(ext.to_string());
                *last = value.to_string();
            }
        }

        let module = match module {
            Some(m) => m,
            None => self
                .default_module
                .clone()
                .ok_or_else(|| ConfigError::Missing(DEFAULT_MODULE_KEY.to_string()))?,
        };
        let workflow = match workflow {
            Some(w) => w,
            None => self
                .default_workflow
                .clone()
                .ok_or_else(|| ConfigError::Missing(DEFAULT_WORKFLOW_KEY.to_string()))?,
        };

        Ok(RouteMatch {
            module,
            workflow,
            params,
            content_type,
            suffix,
        })
    }
}

fn parse_aliases(value: &Value) -> Result<BTreeMap<String, (String, String)>, ConfigError> {
    let raw: BTreeMap<String, AliasTarget> = serde_json::from_value(value.clone())
        .map_err(|e| ConfigError::invalid(ALIAS_KEY, e.to_string()))?;
    raw.into_iter()
        .map(|(alias, target)| {
            let pair = match target {
                AliasTarget::Pair(m, w) => (m, w),
                AliasTarget::Path(path) => match path.split_once('/') {
                    Some((m, w)) => (m.to_string(), w.to_string()),
                    None => {
                        return Err(ConfigError::invalid(
                            ALIAS_KEY,
                            format!("alias '{alias}' must name module/workflow"),
                        ))
                    }
                },
            };
            Ok((alias, pair))
        })
        .collect()
}
