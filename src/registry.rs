//! Component registry and discovery manifest.
//!
//! The registry is populated once at startup and read-only afterwards, so
//! concurrent dispatches share it without synchronization.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::component::ComponentDescriptor;
use crate::error::{DispatchError, RegistrationError};
use crate::schema::Schema;

#[derive(Debug, Default)]
pub struct Registry {
    // BTreeMap so listing (and the manifest built from it) is ordered by
    // path, independent of registration order.
    entries: BTreeMap<String, ComponentDescriptor>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<(), RegistrationError> {
        if self.entries.contains_key(&descriptor.path) {
            return Err(RegistrationError::DuplicatePath(descriptor.path));
        }
        self.entries.insert(descriptor.path.clone(), descriptor);
        Ok(())
    }

    pub fn lookup(&self, path: &str) -> Result<&ComponentDescriptor, DispatchError> {
        self.entries
            .get(path)
            .ok_or_else(|| DispatchError::NotFound(path.to_string()))
    }

    /// Registered descriptors sorted by path.
    pub fn list(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Discovery manifest: every registered component with its schemas,
    /// sorted by path. Pure over registry state.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            components: self
                .list()
                .map(|descriptor| ManifestEntry {
                    path: descriptor.path.clone(),
                    name: descriptor.name.clone(),
                    nickname: descriptor.nickname.clone(),
                    description: descriptor.description.clone(),
                    inputs: descriptor.inputs.clone(),
                    outputs: descriptor.outputs.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    pub components: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    pub name: String,
    pub nickname: String,
    pub description: String,
    pub inputs: Vec<Schema>,
    pub outputs: Vec<Schema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentBuilder;
    use crate::schema::{ParamKind, Schema};
    use crate::value::{SlotValue, Value};

    fn dummy(path: &str) -> ComponentDescriptor {
        ComponentBuilder::new(path)
            .name(path.trim_start_matches('/'))
            .output(Schema::item(ParamKind::Boolean, "Ok", "Ok", "Ok"))
            .build(|_| Ok(vec![SlotValue::Item(Value::Boolean(true))]))
            .unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = Registry::new();
        registry.register(dummy("/pointat")).unwrap();

        assert_eq!(registry.lookup("/pointat").unwrap().path, "/pointat");
        assert!(matches!(
            registry.lookup("/doesNotExist"),
            Err(DispatchError::NotFound(_))
        ));
    }

    #[test]
    fn rejects_duplicate_paths() {
        let mut registry = Registry::new();
        registry.register(dummy("/pointat")).unwrap();

        let result = registry.register(dummy("/pointat"));
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicatePath(path)) if path == "/pointat"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn manifest_is_sorted_by_path_not_registration_order() {
        let mut registry = Registry::new();
        registry.register(dummy("/srf4pt")).unwrap();
        registry.register(dummy("/createpoint")).unwrap();
        registry.register(dummy("/pointat")).unwrap();

        let paths: Vec<_> = registry
            .manifest()
            .components
            .iter()
            .map(|entry| entry.path.clone())
            .collect();
        assert_eq!(paths, vec!["/createpoint", "/pointat", "/srf4pt"]);
    }

    #[test]
    fn manifest_is_stable_across_calls() {
        let mut registry = Registry::new();
        registry.register(dummy("/b")).unwrap();
        registry.register(dummy("/a")).unwrap();

        assert_eq!(registry.manifest(), registry.manifest());
    }
}
