//! # Component Loader
//!
//! Resolves namespaces to concrete component types and instantiates them, layering an
//! app-specific *extension* over the framework's *core* implementation.
//!
//! ## Defining vs. Instantiating
//!
//! A type is *defined* once its factory has been fetched from a [`ComponentSource`] and
//! recorded in the loader's definition table. Definitions are per loader (and so per
//! app), which keeps two apps in one process from seeing each other's types. A type
//! that no source declares is simply absent; that is a valid outcome, not an error.
//!
//! ## Load Sequence
//!
//! 1. Unless [`LoadOptions::skip_cache_lookup`] is set, a cached instance is returned
//!    immediately and no resolution happens.
//! 2. The namespace is resolved into a [`ComponentDescriptor`].
//! 3. Prerequisite definitions (DAO adapter bases) are registered.
//! 4. The core candidate is defined, instantiated and cached as the options ask.
//! 5. The extension candidate likewise; caching it overwrites the core entry.
//! 6. The extension instance is returned if there is one, else the core instance.

mod component;
mod error;
mod namespace;
mod options;
mod registry;
mod source;

pub use component::{Component, ComponentFactory};
pub use error::{LoadError, SourceError};
pub use namespace::{
    pascal_case, Candidate, ComponentDescriptor, ComponentKind, Namespace, CORE_PREFIX,
    CORE_ROOT,
};
pub use options::LoadOptions;
pub use registry::ComponentRegistry;
pub use source::{ComponentSource, StaticSource};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Resolves, defines, instantiates and caches components for one app.
pub struct Loader {
    app: String,
    sources: Vec<Arc<dyn ComponentSource>>,
    definitions: RwLock<HashMap<String, ComponentFactory>>,
    registry: ComponentRegistry,
}

impl Loader {
    /// Creates a loader for app `app` with no sources.
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            sources: Vec::new(),
            definitions: RwLock::new(HashMap::new()),
            registry: ComponentRegistry::new(),
        }
    }

    /// Adds a source. Sources are searched in the order they were added.
    pub fn with_source(mut self, source: Arc<dyn ComponentSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Maps `namespace` to its candidates without touching any source.
    pub fn resolve(&self, namespace: &str) -> Result<ComponentDescriptor, LoadError> {
        Ok(Namespace::parse(namespace)?.describe(&self.app))
    }

    /// Whether a factory for `type_id` has been defined.
    pub fn is_defined(&self, type_id: &str) -> bool {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_id)
    }

    /// Loads `namespace` according to `options`.
    ///
    /// Returns `Ok(None)` when the options ask for no value or when neither candidate is
    /// defined.
    pub fn load(
        &self,
        namespace: &str,
        options: LoadOptions,
    ) -> Result<Option<Component>, LoadError> {
        if !options.skip_cache_lookup {
            if let Some(cached) = self.registry.get(namespace) {
                debug!(namespace, "Cache hit");
                return Ok(Some(cached));
            }
        }

        let descriptor = self.resolve(namespace)?;

        let key_lock = self.registry.key_lock(namespace);
        let loaded = {
            let _guard = key_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.load_locked(namespace, &descriptor, options)
        };
        self.registry.release_key_lock(namespace, key_lock);
        loaded
    }

    /// Steps 3 to 6 of the load sequence, run while holding the key lock.
    fn load_locked(
        &self,
        namespace: &str,
        descriptor: &ComponentDescriptor,
        options: LoadOptions,
    ) -> Result<Option<Component>, LoadError> {
        if !options.skip_cache_lookup {
            // Another caller may have finished this namespace while we waited.
            if let Some(cached) = self.registry.get(namespace) {
                debug!(namespace, "Cache hit after wait");
                return Ok(Some(cached));
            }
        }

        if options.define_extension {
            for prerequisite in &descriptor.prerequisites {
                self.define(prerequisite)?;
            }
        }

        let core = match &descriptor.core {
            Some(candidate) => self.load_candidate(
                namespace,
                candidate,
                options.define_core,
                options.wants_core_instance(),
                options.cache_core,
            )?,
            None => None,
        };
        let extension = match &descriptor.extension {
            Some(candidate) => self.load_candidate(
                namespace,
                candidate,
                options.define_extension,
                options.wants_extension_instance(),
                options.cache_extension,
            )?,
            None => None,
        };

        if !options.returns_anything() {
            return Ok(None);
        }
        let chosen = extension
            .filter(|_| options.return_extension)
            .or(core.filter(|_| options.return_core));
        if chosen.is_none() {
            debug!(namespace, "Nothing resolved");
        }
        Ok(chosen)
    }

    fn load_candidate(
        &self,
        namespace: &str,
        candidate: &Candidate,
        define: bool,
        instantiate: bool,
        cache: bool,
    ) -> Result<Option<Component>, LoadError> {
        if define {
            self.define(candidate)?;
        }
        if !instantiate {
            return Ok(None);
        }
        let Some(factory) = self.factory(&candidate.type_id) else {
            return Ok(None);
        };
        let instance = factory();
        if cache {
            self.registry.insert(namespace, instance.clone());
            debug!(namespace, type_id = %candidate.type_id, "Cached");
        }
        Ok(Some(instance))
    }

    /// Fetches and records the definition of `candidate` if it is not defined yet.
    /// Returns whether the type is defined afterwards.
    fn define(&self, candidate: &Candidate) -> Result<bool, LoadError> {
        if self.is_defined(&candidate.type_id) {
            return Ok(true);
        }
        for source in &self.sources {
            match source.fetch(&candidate.location) {
                Ok(Some(factory)) => {
                    self.definitions
                        .write()
                        .unwrap_or_else(PoisonError::into_inner)
                        .insert(candidate.type_id.clone(), factory);
                    info!(type_id = %candidate.type_id, location = %candidate.location, "Defined");
                    return Ok(true);
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(location = %candidate.location, error = %e, "Source unreadable");
                    return Err(e.into());
                }
            }
        }
        Ok(false)
    }

    fn factory(&self, type_id: &str) -> Option<ComponentFactory> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_id)
            .cloned()
    }
}
