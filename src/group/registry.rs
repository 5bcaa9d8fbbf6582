//! Group Registry
//!
//! Maps group names to live group instances. The inbound peer handler receives the
//! registry at setup time and consults it for every request.

use super::types::{GroupHandle, GroupLookup};

use dashmap::DashMap;
use std::sync::Arc;

pub struct GroupRegistry {
    groups: DashMap<String, Arc<dyn GroupHandle>>,
}

impl GroupRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a group under its own name, replacing any group of the same name.
    pub fn register(&self, group: Arc<dyn GroupHandle>) {
        let name = group.name().to_string();

        if self.groups.insert(name.clone(), group).is_some() {
            tracing::warn!("Replaced existing group: {}", name);
        } else {
            tracing::info!("Registered group: {}", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn GroupHandle>> {
        self.groups.get(name).map(|entry| entry.value().clone())
    }

    /// Returns the names of all registered groups.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .groups
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }
}

impl GroupLookup for GroupRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn GroupHandle>> {
        self.get(name)
    }
}
