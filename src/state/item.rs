use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A named record holding a price.
///
/// `name` is always equal to the key the item is stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

/// Internal HashMap type.
pub type ItemMap = HashMap<String, Item>;

/// Shared item store handed to every handler.
pub type ItemStore = Arc<RwLock<ItemMap>>;

/// Create a new, empty store.
pub fn new_store() -> ItemStore {
    Arc::new(RwLock::new(HashMap::new()))
}

// Every mutation is a single map call, so a panic elsewhere cannot leave the
// map half-written. A poisoned lock is safe to keep using.

pub(crate) fn read_lock(store: &ItemStore) -> RwLockReadGuard<'_, ItemMap> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock(store: &ItemStore) -> RwLockWriteGuard<'_, ItemMap> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}
