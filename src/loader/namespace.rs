//! # Namespace Resolution
//!
//! A namespace such as `workflow/hello/world` names a component by kind and path. This
//! module validates namespaces and derives, for each kind, the type ids and source
//! locations of the core and extension candidates.
//!
//! | kind | segments | core | extension |
//! |------|----------|------|-----------|
//! | `system` | 2+ | `Painless<Rest>` | `<App><Rest>` |
//! | `library` | 2+ | `Painless<Rest>Library` | `<App><Rest>Library` |
//! | `module` | 2+ | none | `<Module>Module` |
//! | `workflow` | 3+ | none | `<Module><Flow>Workflow` |
//! | `model` | 3+ | none | `<Module><Model>Model` |
//! | `view` | 3+ | none | `<Module><View>View` |
//! | `view-compiler` | 2+ | none | `<Type>ViewCompiler` |
//! | `dao` | 4+ | none | `<Module><Name><Adapter>Dao` |
//!
//! Core locations live under `core/`, extension locations under the app name.

use super::error::LoadError;
use std::fmt;

/// Prefix of every core type id.
pub const CORE_PREFIX: &str = "Painless";

/// Location root for core sources.
pub const CORE_ROOT: &str = "core";

/// The kinds of component the loader knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    System,
    Library,
    Module,
    Workflow,
    Model,
    View,
    ViewCompiler,
    Dao,
}

impl ComponentKind {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "system" => Some(ComponentKind::System),
            "library" => Some(ComponentKind::Library),
            "module" => Some(ComponentKind::Module),
            "workflow" => Some(ComponentKind::Workflow),
            "model" => Some(ComponentKind::Model),
            "view" => Some(ComponentKind::View),
            "view-compiler" => Some(ComponentKind::ViewCompiler),
            "dao" => Some(ComponentKind::Dao),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::System => "system",
            ComponentKind::Library => "library",
            ComponentKind::Module => "module",
            ComponentKind::Workflow => "workflow",
            ComponentKind::Model => "model",
            ComponentKind::View => "view",
            ComponentKind::ViewCompiler => "view-compiler",
            ComponentKind::Dao => "dao",
        }
    }

    /// Minimum number of segments, the kind segment included.
    pub fn min_segments(&self) -> usize {
        match self {
            ComponentKind::System
            | ComponentKind::Library
            | ComponentKind::Module
            | ComponentKind::ViewCompiler => 2,
            ComponentKind::Workflow | ComponentKind::Model | ComponentKind::View => 3,
            ComponentKind::Dao => 4,
        }
    }

    /// Whether a framework-provided core implementation can exist for this kind.
    pub fn has_core(&self) -> bool {
        matches!(self, ComponentKind::System | ComponentKind::Library)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete type a namespace may resolve to, and where its definition lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub type_id: String,
    pub location: String,
}

/// Everything the loader needs to know to load a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub namespace: String,
    pub kind: ComponentKind,
    pub core: Option<Candidate>,
    pub extension: Option<Candidate>,
    /// Definitions to register (never instantiate) before the candidates.
    pub prerequisites: Vec<Candidate>,
}

/// A validated namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    raw: String,
    kind: ComponentKind,
    path: Vec<String>,
}

impl Namespace {
    /// Validates `raw` and splits it into kind and path.
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(LoadError::malformed(raw, "namespace is empty"));
        }
        let segments: Vec<&str> = trimmed.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(LoadError::malformed(raw, "namespace contains an empty segment"));
        }

        let head = segments[0];
        if head == "data" {
            let adapter_base = segments
                .get(1)
                .is_some_and(|s| *s == "adapter" || s.starts_with("dao"));
            if adapter_base || segments.len() == 1 {
                return Err(LoadError::DirectAdapterInstantiationForbidden(
                    trimmed.to_string(),
                ));
            }
        }

        let kind =
            ComponentKind::from_segment(head).ok_or_else(|| LoadError::UnknownComponentKind {
                namespace: raw.to_string(),
                kind: head.to_string(),
            })?;
        if segments.len() < kind.min_segments() {
            return Err(LoadError::malformed(
                raw,
                format!(
                    "{} requires at least {} segments, got {}",
                    kind,
                    kind.min_segments(),
                    segments.len()
                ),
            ));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            kind,
            path: segments[1..].iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Segments after the kind.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Derives the candidates for this namespace inside app `app`.
    pub fn describe(&self, app: &str) -> ComponentDescriptor {
        let rel = self.path.join("/");
        let name = pascal_case(&self.path);
        let ext_location = format!("{}/{}/{}", app, self.kind, rel);
        let core_location = format!("{}/{}/{}", CORE_ROOT, self.kind, rel);
        let app_prefix = pascal_case(&[app]);

        let (core, extension) = match self.kind {
            ComponentKind::System => (
                Some(candidate(format!("{CORE_PREFIX}{name}"), core_location)),
                Some(candidate(format!("{app_prefix}{name}"), ext_location)),
            ),
            ComponentKind::Library => (
                Some(candidate(format!("{CORE_PREFIX}{name}Library"), core_location)),
                Some(candidate(format!("{app_prefix}{name}Library"), ext_location)),
            ),
            other => {
                let suffix = pascal_case(&[other.as_str()]);
                (None, Some(candidate(format!("{name}{suffix}"), ext_location)))
            }
        };

        let prerequisites = match self.kind {
            ComponentKind::Dao => {
                let adapter = &self.path[2];
                vec![
                    candidate(format!("{CORE_PREFIX}Dao"), format!("{CORE_ROOT}/data/dao")),
                    candidate(
                        format!("{CORE_PREFIX}{}Adapter", pascal_case(&[adapter.as_str()])),
                        format!("{CORE_ROOT}/data/adapter/{adapter}"),
                    ),
                ]
            }
            _ => Vec::new(),
        };

        ComponentDescriptor {
            namespace: self.raw.clone(),
            kind: self.kind,
            core,
            extension,
            prerequisites,
        }
    }
}

fn candidate(type_id: String, location: String) -> Candidate {
    Candidate { type_id, location }
}

/// Joins segments into a PascalCase type name. `-`, `_` and `.` also split words.
pub fn pascal_case<S: AsRef<str>>(parts: &[S]) -> String {
    let mut out = String::new();
    for word in parts
        .iter()
        .flat_map(|p| p.as_ref().split(['-', '_', '.']))
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
