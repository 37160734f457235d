//! # Requests
//!
//! The [`Request`] is the normalized form of every inbound call, whatever the entry
//! point. The router builds exactly one per call and hands it to the resolved workflow.
//!
//! Besides the request itself this module holds the small value types a request is made
//! of: the HTTP-style [`Method`], the [`EntryKind`] that produced the call, the output
//! [`ContentType`] and the [`Params`] collected from the URI and the transport.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Config key prefix for per-workflow parameter names used by [`ParamStyle::Config`].
pub const PARAM_NAMES_KEY: &str = "routes.params";

/// The verbs a workflow can answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Options,
    ];

    /// Lowercase handler name (`get`, `post`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Options => "options",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Returned when a token is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported method: {0}")]
pub struct ParseMethodError(pub String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "delete" => Ok(Method::Delete),
            "options" => Ok(Method::Options),
            _ => Err(ParseMethodError(s.to_string())),
        }
    }
}

/// Where a call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Http,
    Cli,
    App,
    Internal,
}

impl EntryKind {
    /// Content type applied when the URI carries no suffix.
    pub fn default_content_type(&self) -> ContentType {
        match self {
            EntryKind::Http => ContentType::Html,
            EntryKind::Cli => ContentType::CliText,
            EntryKind::App => ContentType::Json,
            EntryKind::Internal => ContentType::Raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Http => "http",
            EntryKind::Cli => "cli",
            EntryKind::App => "app",
            EntryKind::Internal => "internal",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format a response is compiled into.
///
/// The well-known formats have their own variants; any other URI suffix is kept
/// verbatim (lowercased) in [`ContentType::Other`] so an app can register a compiler
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Html,
    Json,
    CliText,
    Raw,
    Other(String),
}

impl ContentType {
    /// Interprets a URI suffix such as `json` in `users/42.json`. An empty suffix means html.
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix.trim().to_ascii_lowercase().as_str() {
            "" | "html" | "htm" => ContentType::Html,
            "json" => ContentType::Json,
            "cli-text" | "cli" | "txt" => ContentType::CliText,
            "raw" => ContentType::Raw,
            other => ContentType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Html => "html",
            ContentType::Json => "json",
            ContentType::CliText => "cli-text",
            ContentType::Raw => "raw",
            ContentType::Other(other) => other,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters gathered for a request.
///
/// `values` are the positional URI segments left over after mapping, in order.
/// `named` are key/value pairs merged from the transport (query string or form body).
/// Merging only ever appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<String>,
    named: Vec<(String, String)>,
}

impl Params {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            named: Vec::new(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn named(&self) -> &[(String, String)] {
        &self.named
    }

    /// Positional value at `index`.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// First named value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn extend_named<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.named.extend(pairs);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.named.is_empty()
    }
}

impl From<Vec<String>> for Params {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}

/// How a workflow wants its positional params interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// Positional, addressed by index.
    Index,
    /// Adjacent segments form pairs: `[k0, v0, k1, v1, ...]`.
    Pair,
    /// Each segment is `key=value`.
    Assoc,
    /// Names come from the `routes.params.<module>.<workflow>` config list.
    Config,
    /// Left untouched for the workflow to interpret.
    Defer,
}

/// A params view derived for a [`ParamStyle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamView {
    Index(Vec<String>),
    Map(BTreeMap<String, String>),
    Deferred(Vec<String>),
}

impl ParamView {
    /// Looks up a key in a map view, or an index (as a decimal string) in an index view.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            ParamView::Map(map) => map.get(key).map(String::as_str),
            ParamView::Index(values) | ParamView::Deferred(values) => key
                .parse::<usize>()
                .ok()
                .and_then(|i| values.get(i))
                .map(String::as_str),
        }
    }
}

/// A normalized inbound call.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    module: String,
    workflow: String,
    params: Params,
    content_type: ContentType,
    suffix: Option<String>,
    agent: String,
    entry: EntryKind,
}

impl Request {
    /// Creates an internal request for `module`/`workflow`. Used by the router and by
    /// code that dispatches directly.
    pub fn new(method: Method, module: impl Into<String>, workflow: impl Into<String>) -> Self {
        let entry = EntryKind::Internal;
        Self {
            method,
            module: module.into(),
            workflow: workflow.into(),
            params: Params::default(),
            content_type: entry.default_content_type(),
            suffix: None,
            agent: entry.as_str().to_string(),
            entry,
        }
    }

    pub fn with_params(mut self, params: impl Into<Params>) -> Self {
        self.params = params.into();
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Records the `.suffix` the URI carried, as written.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn with_entry(mut self, entry: EntryKind) -> Self {
        self.entry = entry;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The suffix split off the last URI segment, if there was one.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn entry(&self) -> EntryKind {
        self.entry
    }

    /// Re-derives the positional params under `style`.
    ///
    /// Named params from the transport are folded into every map view; they never
    /// override a key already produced from the URI.
    pub fn params_as(&self, style: ParamStyle, config: &Config) -> ParamView {
        let values = self.params.values();
        let mut map = BTreeMap::new();
        match style {
            ParamStyle::Index => return ParamView::Index(values.to_vec()),
            ParamStyle::Defer => return ParamView::Deferred(values.to_vec()),
            ParamStyle::Pair => {
                for pair in values.chunks(2) {
                    let value = pair.get(1).cloned().unwrap_or_default();
                    map.insert(pair[0].clone(), value);
                }
            }
            ParamStyle::Assoc => {
                for (i, segment) in values.iter().enumerate() {
                    match segment.split_once('=') {
                        Some((key, value)) => map.insert(key.to_string(), value.to_string()),
                        None => map.insert(i.to_string(), segment.clone()),
                    };
                }
            }
            ParamStyle::Config => {
                let key = format!("{}.{}.{}", PARAM_NAMES_KEY, self.module, self.workflow);
                let names: Vec<String> = config
                    .get(&key)
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or_default();
                for (i, value) in values.iter().enumerate() {
                    let name = names.get(i).cloned().unwrap_or_else(|| i.to_string());
                    map.insert(name, value.clone());
                }
            }
        }
        for (key, value) in self.params.named() {
            map.entry(key.clone()).or_insert_with(|| value.clone());
        }
        ParamView::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(values: &[&str]) -> Request {
        Request::new(Method::Get, "shop", "cart")
            .with_params(values.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("POST".parse::<Method>(), Ok(Method::Post));
        assert_eq!("delete".parse::<Method>(), Ok(Method::Delete));
        assert!("PATCH".parse::<Method>().is_err());
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn suffix_maps_to_content_type() {
        assert_eq!(ContentType::from_suffix(""), ContentType::Html);
        assert_eq!(ContentType::from_suffix("JSON"), ContentType::Json);
        assert_eq!(
            ContentType::from_suffix("xml"),
            ContentType::Other("xml".into())
        );
    }

    #[test]
    fn pair_style_pairs_adjacent_segments() {
        let view = request(&["id", "42", "color", "red", "dangling"])
            .params_as(ParamStyle::Pair, &Config::new());
        assert_eq!(view.get("id"), Some("42"));
        assert_eq!(view.get("color"), Some("red"));
        assert_eq!(view.get("dangling"), Some(""));
    }

    #[test]
    fn assoc_style_splits_on_equals() {
        let view = request(&["page=2", "loose"]).params_as(ParamStyle::Assoc, &Config::new());
        assert_eq!(view.get("page"), Some("2"));
        assert_eq!(view.get("1"), Some("loose"));
    }

    #[test]
    fn config_style_names_values_from_config() {
        let mut config = Config::new();
        config.set("routes.params.shop.cart", json!(["item", "qty"]));
        let view = request(&["apple", "3", "extra"]).params_as(ParamStyle::Config, &config);
        assert_eq!(view.get("item"), Some("apple"));
        assert_eq!(view.get("qty"), Some("3"));
        assert_eq!(view.get("2"), Some("extra"));
    }

    #[test]
    fn named_params_do_not_override_uri_keys() {
        let mut params = Params::new(vec!["id".into(), "1".into()]);
        params.extend_named(vec![("id".into(), "9".into()), ("q".into(), "x".into())]);
        let req = Request::new(Method::Get, "a", "b").with_params(params);
        let view = req.params_as(ParamStyle::Pair, &Config::new());
        assert_eq!(view.get("id"), Some("1"));
        assert_eq!(view.get("q"), Some("x"));
    }

    #[test]
    fn index_and_defer_keep_order() {
        let req = request(&["a", "b"]);
        assert_eq!(
            req.params_as(ParamStyle::Index, &Config::new()),
            ParamView::Index(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            req.params_as(ParamStyle::Defer, &Config::new()).get("1"),
            Some("b")
        );
    }
}
