//! Registry for well-known document globals.
//!
//! External provider scripts expect to find certain objects under fixed
//! names (`FB`, `twttr`). The registry stands in for that lookup surface:
//! components install values for the external script's benefit while
//! keeping their own references authoritative.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// Typed, name-keyed registry of shared globals.
pub struct GlobalRegistry {
    entries: RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl GlobalRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Installs a value under the given name, replacing any previous one.
    pub fn install<T: Any + Send + Sync>(&self, name: impl Into<String>, value: Arc<T>) {
        let name = name.into();
        debug!(global = %name, "installing document global");
        self.entries.write().insert(name, value);
    }

    /// Looks up a value by name, downcasting to the expected type.
    ///
    /// Returns `None` when the name is absent or holds a different type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        let entry = self.entries.read().get(name).cloned()?;
        entry.downcast::<T>().ok()
    }

    /// Returns whether a value is installed under the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }
}

impl Default for GlobalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadyShim;

    #[test]
    fn installed_globals_come_back_typed() {
        let registry = GlobalRegistry::new();
        registry.install("twttr", Arc::new(ReadyShim));

        assert!(registry.contains("twttr"));
        assert!(registry.get::<ReadyShim>("twttr").is_some());
    }

    #[test]
    fn wrong_type_or_missing_name_is_none() {
        let registry = GlobalRegistry::new();
        registry.install("twttr", Arc::new(ReadyShim));

        assert!(registry.get::<String>("twttr").is_none());
        assert!(registry.get::<ReadyShim>("FB").is_none());
    }
}
