//! Named dialect table with lookup-with-fallback.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::builtin::register_builtin_dialects;
use super::options::DialectOptions;
use super::SqlDialect;

/// Name of the entry installed by [`DialectRegistry::new`].
pub const DEFAULT_DIALECT: &str = "default";
/// Tag bound to the fallback dialect of [`DialectRegistry::get`].
pub const DEFAULT_TAG: &str = "db";

/// A table of dialects keyed by lower-cased name.
///
/// Resolutions share a read lock; registration and deregistration take the
/// write lock. Construct one at startup and pass it by reference, or use the
/// process-wide instance behind [`register_dialect`] / [`get_dialect`].
#[derive(Debug)]
pub struct DialectRegistry {
    dialects: RwLock<HashMap<String, Arc<SqlDialect>>>,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    /// A registry holding only the `default` entry (tag `db`).
    pub fn new() -> Self {
        let registry = Self {
            dialects: RwLock::new(HashMap::new()),
        };
        registry.register(DEFAULT_DIALECT, DEFAULT_TAG, DialectOptions::default());
        registry
    }

    /// A registry holding `default` plus the built-in presets.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        register_builtin_dialects(&registry);
        registry
    }

    /// Register `options` under `name`, replacing any existing entry.
    pub fn register(&self, name: &str, tag: &str, options: DialectOptions) -> Arc<SqlDialect> {
        let key = name.to_lowercase();
        let dialect = Arc::new(SqlDialect::new(&key, tag, options));
        let replaced = self
            .dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), Arc::clone(&dialect))
            .is_some();
        tracing::debug!(target: "sqlweave.dialect", dialect = %key, tag, replaced, "registered dialect");
        dialect
    }

    /// Remove `name`. Returns whether an entry existed.
    pub fn deregister(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        let removed = self
            .dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key)
            .is_some();
        tracing::debug!(target: "sqlweave.dialect", dialect = %key, removed, "deregistered dialect");
        removed
    }

    /// The registered dialect, without fallback.
    pub fn lookup(&self, name: &str) -> Option<Arc<SqlDialect>> {
        self.dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_lowercase())
            .cloned()
    }

    /// Resolve `name`; a miss yields a fresh default dialect bound to tag `db`.
    pub fn get(&self, name: &str) -> Arc<SqlDialect> {
        self.get_with_tag(name, DEFAULT_TAG)
    }

    /// Resolve `name`; a miss yields a fresh default dialect bound to `tag`.
    pub fn get_with_tag(&self, name: &str, tag: &str) -> Arc<SqlDialect> {
        self.lookup(name).unwrap_or_else(|| {
            tracing::trace!(target: "sqlweave.dialect", dialect = name, tag, "dialect not registered, using default");
            Arc::new(SqlDialect::new(DEFAULT_DIALECT, tag, DialectOptions::default()))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&name.to_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

static GLOBAL: LazyLock<DialectRegistry> = LazyLock::new(DialectRegistry::with_builtins);

/// The process-wide registry: `default` plus the built-in presets.
pub fn global() -> &'static DialectRegistry {
    &GLOBAL
}

/// Register a dialect in the process-wide registry.
pub fn register_dialect(name: &str, tag: &str, options: DialectOptions) -> Arc<SqlDialect> {
    GLOBAL.register(name, tag, options)
}

/// Remove a dialect from the process-wide registry.
pub fn deregister_dialect(name: &str) -> bool {
    GLOBAL.deregister(name)
}

/// Resolve a dialect from the process-wide registry, falling back to the default.
pub fn get_dialect(name: &str) -> Arc<SqlDialect> {
    GLOBAL.get(name)
}

/// Like [`get_dialect`] with the fallback bound to `tag`.
pub fn get_dialect_with_tag(name: &str, tag: &str) -> Arc<SqlDialect> {
    GLOBAL.get_with_tag(name, tag)
}
