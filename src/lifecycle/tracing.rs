//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Every layer logs with structured fields, so one call can be followed
//! from entry point to rendered output.
//!
//! ```bash
//! # Dispatch outcomes only
//! RUST_LOG=info morphine execute blog/post
//!
//! # Namespace resolution, cache hits and route mapping
//! RUST_LOG=debug morphine execute blog/post
//!
//! # Loader only
//! RUST_LOG=painless::loader=debug morphine execute blog/post
//! ```
//!
//! ## What Gets Traced
//!
//! | level | events |
//! |-------|--------|
//! | `debug` | processed requests, cache hits, rendering, unknown aliases |
//! | `info` | definitions, dispatch status, app assembly |
//! | `warn` | unroutable namespaces, failed workflows, unreadable sources |
//! | `error` | panicking workflows, failing sources at dispatch |
//!
//! `App::execute` and `Router::dispatch` open spans, so with `RUST_LOG=debug` a call
//! reads like:
//!
//! ```text
//! DEBUG execute{app="acme" entry=internal}: Processed kind=internal method=GET uri="blog/post" module="blog" workflow="post"
//!  INFO execute{app="acme" entry=internal}:dispatch{module="blog" workflow="post" method=GET}: Defined type_id="BlogPostWorkflow" location="acme/workflow/blog/post"
//!  INFO execute{app="acme" entry=internal}:dispatch{module="blog" workflow="post" method=GET}: Dispatched status=200
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // spans already name the module and workflow
        .compact()
        .init();
}
