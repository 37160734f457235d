//! Named apps sharing one process.

use super::app::App;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// The apps a process hosts, by name. Each app keeps its own loader and registry.
#[derive(Default)]
pub struct AppRegistry {
    apps: RwLock<HashMap<String, Arc<App>>>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `app` under its name, returning the app it replaced.
    pub fn register(&self, app: App) -> Option<Arc<App>> {
        let name = app.name().to_string();
        info!(app = %name, "App registered");
        self.apps
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, Arc::new(app))
    }

    pub fn get(&self, name: &str) -> Option<Arc<App>> {
        self.apps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn remove(&self, name: &str) -> Option<Arc<App>> {
        self.apps
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .apps
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
