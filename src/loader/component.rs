//! # Components
//!
//! What the loader hands out. Workflows and compilers get their own variants because the
//! router and the renderer call into them; everything else (config services, libraries,
//! models, DAOs) is an opaque [`Component::Service`] the caller downcasts.

use crate::render::Compiler;
use crate::workflow::Workflow;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Builds a fresh instance of a defined component type.
pub type ComponentFactory = Arc<dyn Fn() -> Component + Send + Sync>;

/// A live component instance. Cloning shares the instance.
#[derive(Clone)]
pub enum Component {
    Workflow(Arc<dyn Workflow>),
    Compiler(Arc<dyn Compiler>),
    Service(Arc<dyn Any + Send + Sync>),
}

impl Component {
    pub fn workflow<W: Workflow>(workflow: W) -> Self {
        Component::Workflow(Arc::new(workflow))
    }

    pub fn compiler<C: Compiler + 'static>(compiler: C) -> Self {
        Component::Compiler(Arc::new(compiler))
    }

    pub fn service<T: Any + Send + Sync>(service: T) -> Self {
        Component::Service(Arc::new(service))
    }

    pub fn as_workflow(&self) -> Option<Arc<dyn Workflow>> {
        match self {
            Component::Workflow(w) => Some(w.clone()),
            _ => None,
        }
    }

    pub fn as_compiler(&self) -> Option<Arc<dyn Compiler>> {
        match self {
            Component::Compiler(c) => Some(c.clone()),
            _ => None,
        }
    }

    /// Downcasts a service component to its concrete type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Component::Service(s) => s.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        match (self, other) {
            (Component::Workflow(a), Component::Workflow(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Component::Compiler(a), Component::Compiler(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Component::Service(a), Component::Service(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    pub fn variant(&self) -> &'static str {
        match self {
            Component::Workflow(_) => "workflow",
            Component::Compiler(_) => "compiler",
            Component::Service(_) => "service",
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.variant()).finish()
    }
}
