//! Store Registry Module
//!
//! Enforces at most one adapter per store handle without global state: the
//! registry is an ordinary value created at startup and passed to whoever
//! constructs adapters.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::adapter::NamespacedCache;
use crate::config::AdapterConfig;
use crate::error::{CacheError, Result};
use crate::store::BackingStore;

// == Store Registry ==
/// Tracks which store handles currently have an adapter bound to them.
///
/// Handles are identified by `Arc` address, so two clones of the same `Arc`
/// are the same handle while two separately allocated stores are not.
#[derive(Debug, Clone, Default)]
pub struct StoreRegistry {
    bound: Arc<Mutex<HashSet<usize>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == Bind ==
    /// Creates the adapter for `store`, registering the handle.
    ///
    /// The binding is released when the returned adapter is dropped.
    ///
    /// # Errors
    /// `CacheError::DuplicateInstance` if an adapter is already bound to this
    /// handle.
    pub fn bind<S: BackingStore>(
        &self,
        store: Arc<S>,
        config: AdapterConfig,
    ) -> Result<NamespacedCache<S>> {
        let id = Arc::as_ptr(&store) as *const () as usize;
        if !self.bound.lock().insert(id) {
            warn!("Rejected second adapter for store handle {:#x}", id);
            return Err(CacheError::DuplicateInstance(format!(
                "an adapter is already bound to store handle {:#x}",
                id
            )));
        }
        debug!("Bound adapter to store handle {:#x}", id);

        let binding = Binding {
            id,
            bound: Arc::clone(&self.bound),
        };
        Ok(NamespacedCache::new(store, config).with_binding(binding))
    }

    /// Returns whether an adapter is currently bound to `store`.
    pub fn is_bound<S>(&self, store: &Arc<S>) -> bool {
        let id = Arc::as_ptr(store) as *const () as usize;
        self.bound.lock().contains(&id)
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bound.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.lock().is_empty()
    }
}

// == Binding ==
/// Registration held by a bound adapter; unregisters on drop.
#[derive(Debug)]
pub struct Binding {
    id: usize,
    bound: Arc<Mutex<HashSet<usize>>>,
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.bound.lock().remove(&self.id);
        debug!("Released store handle {:#x}", self.id);
    }
}
