//! In-memory registry of discovered selector sets, keyed by site identifier
//!
//! The registry is an explicit value owned by the caller; nothing is global.
//! It is safe to share between concurrent discovery runs.

use crate::selectors::SelectorSet;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Site identifier -> selector set
#[derive(Debug, Default)]
pub struct SelectorRegistry {
    entries: RwLock<HashMap<String, SelectorSet>>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the selector set registered for a site
    pub fn get(&self, site_id: &str) -> Option<SelectorSet> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(site_id)
            .cloned()
    }

    /// Registers a selector set, returning the one it replaced
    pub fn insert(&self, site_id: impl Into<String>, selectors: SelectorSet) -> Option<SelectorSet> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(site_id.into(), selectors)
    }

    /// Drops the entry for one site
    pub fn remove(&self, site_id: &str) -> Option<SelectorSet> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(site_id)
    }

    pub fn contains(&self, site_id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(site_id)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
