//! # Entry Points
//!
//! The ways a call can reach the router. HTTP calls carry the handful of transport
//! fields the router reads; CLI, app and internal calls carry nothing beyond the raw
//! command string.

use crate::request::{EntryKind, Method};

/// The transport fields read from an HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpEnvironment {
    pub method: Method,
    /// Full request target, e.g. `/index.php/users/42?page=2`.
    pub request_uri: String,
    /// Path of the front script, e.g. `/index.php`. Stripped from the request path.
    pub script_name: String,
    /// Query string without the `?`. Taken from `request_uri` when empty.
    pub query_string: String,
    pub user_agent: String,
    /// `application/x-www-form-urlencoded` body for POST and PUT.
    pub body: String,
}

impl HttpEnvironment {
    pub fn new(method: Method, request_uri: impl Into<String>) -> Self {
        Self {
            method,
            request_uri: request_uri.into(),
            ..Self::default()
        }
    }

    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// The routed path: the request target minus query string and script base.
    pub fn path(&self) -> String {
        let path = self
            .request_uri
            .split_once('?')
            .map_or(self.request_uri.as_str(), |(p, _)| p);

        let script = self.script_name.trim_end_matches('/');
        let base = script.rsplit_once('/').map_or("", |(dir, _)| dir);
        let stripped = strip_segment_prefix(path, script)
            .or_else(|| strip_segment_prefix(path, base))
            .unwrap_or(path);
        stripped.trim_matches('/').to_string()
    }

    /// Decoded query parameters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = if self.query_string.is_empty() {
            self.request_uri
                .split_once('?')
                .map_or("", |(_, q)| q)
        } else {
            self.query_string.as_str()
        };
        decode_pairs(query)
    }

    /// Decoded form body parameters.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(&self.body)
    }
}

/// Strips `prefix` from `path` only on a segment boundary, so `/app` never eats the
/// start of `/apple`.
fn strip_segment_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    path.strip_prefix(prefix)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn decode_pairs(encoded: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect()
}

/// Where a raw command came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    Http(HttpEnvironment),
    Cli,
    App,
    Internal,
}

impl EntryPoint {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryPoint::Http(_) => EntryKind::Http,
            EntryPoint::Cli => EntryKind::Cli,
            EntryPoint::App => EntryKind::App,
            EntryPoint::Internal => EntryKind::Internal,
        }
    }

    /// The calling agent: the user agent header for HTTP, the entry kind otherwise.
    pub fn agent(&self) -> String {
        match self {
            EntryPoint::Http(env) if !env.user_agent.is_empty() => env.user_agent.clone(),
            other => other.kind().as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_strips_script_and_query() {
        let env = HttpEnvironment::new(Method::Get, "/index.php/users/42?page=2")
            .with_script_name("/index.php");
        assert_eq!(env.path(), "users/42");
        assert_eq!(env.query_pairs(), [("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn path_strips_script_directory() {
        let env = HttpEnvironment::new(Method::Get, "/app/blog/post")
            .with_script_name("/app/index.php");
        assert_eq!(env.path(), "blog/post");

        let env = HttpEnvironment::new(Method::Get, "/apple/users")
            .with_script_name("/app/index.php");
        assert_eq!(env.path(), "apple/users");

        let env = HttpEnvironment::new(Method::Get, "/index.phpx/users")
            .with_script_name("/index.php");
        assert_eq!(env.path(), "index.phpx/users");
    }

    #[test]
    fn form_body_is_decoded() {
        let env = HttpEnvironment::new(Method::Post, "/x").with_body("name=Ada+L&tag=%231");
        assert_eq!(
            env.form_pairs(),
            [
                ("name".to_string(), "Ada L".to_string()),
                ("tag".to_string(), "#1".to_string())
            ]
        );
    }

    #[test]
    fn agent_falls_back_to_entry_kind() {
        assert_eq!(EntryPoint::Cli.agent(), "cli");
        let env = HttpEnvironment::new(Method::Get, "/").with_user_agent("Mozilla/5.0");
        assert_eq!(EntryPoint::Http(env).agent(), "Mozilla/5.0");
    }
}
