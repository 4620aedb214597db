//! Dependency registry
//!
//! Services looked up by name. Registration happens once at start-up; the
//! registry then lives as long as the process.

use crate::error::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type Instance = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct DependencyRegistry {
    instances: RwLock<HashMap<String, Instance>>,
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance; a later registration under the same key replaces it
    pub fn register<T: Any + Send + Sync>(&self, key: &str, instance: Arc<T>) {
        let mut instances = self
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if instances.insert(key.to_string(), instance).is_some() {
            tracing::debug!("Replaced dependency {}", key);
        }
    }

    /// Look up an instance; fails when the key is unknown or holds another type
    pub fn resolve<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        let instances = self
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        instances
            .get(key)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
            .ok_or_else(|| Error::NotRegistered(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.instances
            .read()
            .map(|instances| instances.contains_key(key))
            .unwrap_or(false)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .instances
            .read()
            .map(|instances| instances.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

/// Registry key of a resource's service, e.g. `warehouse-load-in` -> `warehouseLoadInService`
pub fn service_key(resource: &str) -> String {
    let mut key = String::with_capacity(resource.len() + 7);
    let mut upper = false;
    for c in resource.chars() {
        if c == '-' || c == '_' {
            upper = true;
        } else if upper {
            key.extend(c.to_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key.push_str("Service");
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Greeter(&'static str);

    #[test]
    fn test_resolve_before_register_fails() {
        let registry = DependencyRegistry::new();
        let err = registry.resolve::<Greeter>("greeter").unwrap_err();
        assert!(matches!(err, Error::NotRegistered(ref key) if key == "greeter"));
    }

    #[test]
    fn test_resolve_returns_same_instance() {
        let registry = DependencyRegistry::new();
        let greeter = Arc::new(Greeter("hello"));
        registry.register("greeter", greeter.clone());
        let resolved = registry.resolve::<Greeter>("greeter").unwrap();
        assert!(Arc::ptr_eq(&greeter, &resolved));
    }

    #[test]
    fn test_last_write_wins() {
        let registry = DependencyRegistry::new();
        registry.register("greeter", Arc::new(Greeter("first")));
        registry.register("greeter", Arc::new(Greeter("second")));
        assert_eq!(registry.resolve::<Greeter>("greeter").unwrap().0, "second");
        assert_eq!(registry.keys(), vec!["greeter".to_string()]);
    }

    #[test]
    fn test_wrong_type_is_not_registered() {
        let registry = DependencyRegistry::new();
        registry.register("greeter", Arc::new(Greeter("hello")));
        assert!(registry.resolve::<String>("greeter").is_err());
        assert!(registry.contains("greeter"));
    }

    #[test]
    fn test_service_keys() {
        assert_eq!(service_key("product"), "productService");
        assert_eq!(service_key("warehouse-load-in"), "warehouseLoadInService");
        assert_eq!(service_key("office-worker"), "officeWorkerService");
    }
}
