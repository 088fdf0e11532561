//! Name/alias → definition lookup.
//!
//! Commands may be registered while dispatches are running, so the map is a
//! `DashMap`. Concurrent registrations of the same name are last-write-wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use super::definition::CommandDefinition;

#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: DashMap<String, Arc<CommandDefinition>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `definition` under its name and aliases.
    ///
    /// Re-registering a name replaces the previous definition and drops any
    /// alias that still pointed at it. Returns the replaced definition.
    pub fn insert(&self, definition: Arc<CommandDefinition>) -> Option<Arc<CommandDefinition>> {
        let previous = self
            .entries
            .get(&definition.name)
            .map(|entry| Arc::clone(entry.value()));

        if let Some(previous) = &previous {
            for key in previous.keys() {
                self.entries.remove_if(key, |_, current| Arc::ptr_eq(current, previous));
            }
        }

        for key in definition.keys() {
            self.entries.insert(key.to_string(), Arc::clone(&definition));
        }
        previous
    }

    /// Exact, case-sensitive lookup by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<CommandDefinition>> {
        self.entries.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every name and alias, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Distinct definitions, sorted by name.
    pub fn definitions(&self) -> Vec<Arc<CommandDefinition>> {
        let unique: BTreeMap<String, Arc<CommandDefinition>> = self
            .entries
            .iter()
            .map(|e| (e.value().name.clone(), Arc::clone(e.value())))
            .collect();
        unique.into_values().collect()
    }

    /// Number of distinct definitions.
    pub fn len(&self) -> usize {
        self.definitions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
