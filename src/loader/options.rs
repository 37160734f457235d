//! # Load Options
//!
//! Controls what [`Loader::load`](super::Loader::load) does with the core and extension
//! candidates of a namespace: define them, instantiate and cache them, return them, and
//! whether to consult the registry first.

/// Named switches for one `load` call. Use the presets unless a call needs something
/// unusual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub define_core: bool,
    pub define_extension: bool,
    pub cache_core: bool,
    pub cache_extension: bool,
    pub return_core: bool,
    pub return_extension: bool,
    /// Ignore any cached instance and resolve again.
    pub skip_cache_lookup: bool,
}

impl LoadOptions {
    /// Define, cache and return both candidates.
    pub const ALL: LoadOptions = LoadOptions {
        define_core: true,
        define_extension: true,
        cache_core: true,
        cache_extension: true,
        return_core: true,
        return_extension: true,
        skip_cache_lookup: false,
    };

    /// A fresh instance: skip the cache and store nothing.
    pub const LOAD_NEW: LoadOptions = LoadOptions {
        define_core: true,
        define_extension: true,
        cache_core: false,
        cache_extension: false,
        return_core: true,
        return_extension: true,
        skip_cache_lookup: true,
    };

    /// Register definitions only. Nothing is instantiated and nothing is returned.
    pub const DEF_ONLY: LoadOptions = LoadOptions {
        define_core: true,
        define_extension: true,
        cache_core: false,
        cache_extension: false,
        return_core: false,
        return_extension: false,
        skip_cache_lookup: false,
    };

    pub const EXT_ONLY: LoadOptions = LoadOptions {
        define_core: false,
        define_extension: true,
        cache_core: false,
        cache_extension: true,
        return_core: false,
        return_extension: true,
        skip_cache_lookup: false,
    };

    pub const CORE_ONLY: LoadOptions = LoadOptions {
        define_core: true,
        define_extension: false,
        cache_core: true,
        cache_extension: false,
        return_core: true,
        return_extension: false,
        skip_cache_lookup: false,
    };

    /// True when the call yields a value at all.
    pub fn returns_anything(&self) -> bool {
        self.return_core || self.return_extension
    }

    pub fn wants_core_instance(&self) -> bool {
        self.return_core || self.cache_core
    }

    pub fn wants_extension_instance(&self) -> bool {
        self.return_extension || self.cache_extension
    }
}
