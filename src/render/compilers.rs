//! Built-in view compilers.

use super::{Compiler, RenderError};
use crate::response::Response;
use serde_json::{json, Value};

/// Minimal HTML page with the status, message and payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlCompiler;

impl Compiler for HtmlCompiler {
    fn compile(&self, response: &Response) -> Result<String, RenderError> {
        let title = format!("{} {}", response.status, escape_html(&response.message));
        let body = match &response.payload {
            Value::Null => String::new(),
            Value::String(text) => format!("<p>{}</p>\n", escape_html(text)),
            other => format!(
                "<pre>{}</pre>\n",
                escape_html(&serde_json::to_string_pretty(other)?)
            ),
        };
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n"
        ))
    }
}

/// `{"status", "message", "payload"}` document.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCompiler;

impl Compiler for JsonCompiler {
    fn compile(&self, response: &Response) -> Result<String, RenderError> {
        let document = json!({
            "status": response.status,
            "message": response.message,
            "payload": response.payload,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

/// Terminal output. Successful string payloads print bare; everything else gets a
/// status line.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliTextCompiler;

impl Compiler for CliTextCompiler {
    fn compile(&self, response: &Response) -> Result<String, RenderError> {
        let mut out = String::new();
        if !response.is_success() || response.payload.is_null() {
            out.push_str(&format!("[{}] {}\n", response.status, response.message));
        }
        match &response.payload {
            Value::Null => {}
            Value::String(text) => push_line(&mut out, text),
            Value::Array(items) if items.iter().all(Value::is_string) => {
                for item in items.iter().filter_map(Value::as_str) {
                    push_line(&mut out, item);
                }
            }
            Value::Object(map) if map.values().all(is_scalar) => {
                let width = map.keys().map(String::len).max().unwrap_or(0);
                for (key, value) in map {
                    push_line(&mut out, &format!("{key:<width$}  {}", scalar_text(value)));
                }
            }
            other => push_line(&mut out, &serde_json::to_string_pretty(other)?),
        }
        Ok(out)
    }
}

/// The payload itself: strings verbatim, anything else as compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCompiler;

impl Compiler for RawCompiler {
    fn compile(&self, response: &Response) -> Result<String, RenderError> {
        Ok(match &response.payload {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => serde_json::to_string(other)?,
        })
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push('\n');
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'` for use in element text and attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_message_and_payload() {
        let response = Response::new(400, "<bad>").with_payload(json!("a & b"));
        let html = HtmlCompiler.compile(&response).unwrap();
        assert!(html.contains("<h1>400 &lt;bad&gt;</h1>"));
        assert!(html.contains("<p>a &amp; b</p>"));
    }

    #[test]
    fn escape_html_covers_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">it's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;it&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn json_wraps_status_message_payload() {
        let response = Response::ok(json!({ "id": 7 }));
        let out: Value = serde_json::from_str(&JsonCompiler.compile(&response).unwrap()).unwrap();
        assert_eq!(out, json!({ "status": 200, "message": "OK", "payload": { "id": 7 } }));
    }

    #[test]
    fn cli_text_prints_failures_with_status() {
        let response = Response::not_found("Controller/workflow not found");
        assert_eq!(
            CliTextCompiler.compile(&response).unwrap(),
            "[404] Controller/workflow not found\n"
        );
    }

    #[test]
    fn cli_text_aligns_flat_objects() {
        let response = Response::ok(json!({ "module": "blog", "id": 3 }));
        assert_eq!(
            CliTextCompiler.compile(&response).unwrap(),
            "id      3\nmodule  blog\n"
        );
    }

    #[test]
    fn raw_passes_strings_through() {
        let response = Response::ok(json!("plain"));
        assert_eq!(RawCompiler.compile(&response).unwrap(), "plain");
        let response = Response::ok(json!([1, 2]));
        assert_eq!(RawCompiler.compile(&response).unwrap(), "[1,2]");
    }
}
