//! # Rendering
//!
//! A [`Response`] is turned into output by the view compiler registered for its
//! content type, loaded like any other component from `view-compiler/<type>`. Apps
//! replace a built-in by declaring their own factory at the same location.

mod compilers;
mod error;

pub use compilers::{CliTextCompiler, HtmlCompiler, JsonCompiler, RawCompiler};
pub use error::RenderError;

use crate::loader::{Component, LoadOptions, Loader};
use crate::request::ContentType;
use crate::response::Response;
use tracing::debug;

/// Turns a response into its output representation.
pub trait Compiler: Send + Sync {
    fn compile(&self, response: &Response) -> Result<String, RenderError>;
}

/// Compiles `response` with the compiler registered for its content type.
pub fn render(loader: &Loader, response: &Response) -> Result<String, RenderError> {
    let content_type = response.output_type();
    let namespace = format!("view-compiler/{content_type}");
    let component = loader
        .load(&namespace, LoadOptions::ALL)?
        .ok_or_else(|| RenderError::NoCompiler(content_type.to_string()))?;
    let compiler = component
        .as_compiler()
        .ok_or_else(|| RenderError::NotACompiler(namespace.clone()))?;
    debug!(%namespace, status = response.status, "Rendering");
    compiler.compile(response)
}

/// The content types with a built-in compiler, paired with a factory for each.
pub(crate) fn builtin_compilers() -> [(ContentType, fn() -> Component); 4] {
    [
        (ContentType::Html, || Component::compiler(HtmlCompiler)),
        (ContentType::Json, || Component::compiler(JsonCompiler)),
        (ContentType::CliText, || Component::compiler(CliTextCompiler)),
        (ContentType::Raw, || Component::compiler(RawCompiler)),
    ]
}
