//! # Component Sources
//!
//! A source maps locations (`core/system/config`, `acme/workflow/hello/world`) to the
//! factory that defines the component stored there. Sources are the registration step:
//! an app declares its factories at startup, and the loader defines them on first use.

use super::component::{Component, ComponentFactory};
use super::error::SourceError;
use std::collections::HashMap;
use std::sync::Arc;

/// Where the loader looks up definitions.
pub trait ComponentSource: Send + Sync {
    /// Returns the factory declared at `location`, `Ok(None)` when nothing is declared
    /// there, or an error when the location is declared but cannot be read.
    fn fetch(&self, location: &str) -> Result<Option<ComponentFactory>, SourceError>;
}

/// An in-memory source populated at startup.
#[derive(Clone, Default)]
pub struct StaticSource {
    entries: HashMap<String, ComponentFactory>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `factory` at `location`, replacing any previous declaration.
    pub fn register<F>(&mut self, location: impl Into<String>, factory: F)
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.entries.insert(location.into(), Arc::new(factory));
    }

    /// Declares `factory` at `location` unless something is already there.
    pub fn register_default<F>(&mut self, location: impl Into<String>, factory: F)
    where
        F: Fn() -> Component + Send + Sync + 'static,
    {
        self.entries
            .entry(location.into())
            .or_insert_with(|| Arc::new(factory));
    }

    pub fn contains(&self, location: &str) -> bool {
        self.entries.contains_key(location)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ComponentSource for StaticSource {
    fn fetch(&self, location: &str) -> Result<Option<ComponentFactory>, SourceError> {
        Ok(self.entries.get(location).cloned())
    }
}
