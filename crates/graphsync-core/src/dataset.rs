use std::collections::{BTreeMap, BTreeSet};

use crate::collection::{CollectionError, LiveCollection};
use crate::model::{Entity, EntityKey};

/// In-memory live collection
///
/// Semantics follow the data-set container the engine traditionally binds
/// to: `add` rejects keys that already exist, `update` upserts, and
/// `remove` ignores unknown keys. Each call validates its whole batch
/// before touching storage, so a rejected `add` leaves the set unchanged.
/// Not thread-safe; the owning controller is the single writer.
#[derive(Debug, Clone)]
pub struct DataSet<T: Entity> {
    items: BTreeMap<EntityKey, T>,
}

impl<T: Entity> DataSet<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Build a data set from items, rejecting duplicate keys
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` for the first repeated key.
    pub fn from_items(items: &[T]) -> Result<Self, CollectionError> {
        let mut set = Self::new();
        set.add(items)?;
        Ok(set)
    }

    pub fn contains(&self, key: &EntityKey) -> bool {
        self.items.contains_key(key)
    }
}

impl<T: Entity> Default for DataSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> PartialEq for DataSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Entity> LiveCollection<T> for DataSet<T> {
    fn add(&mut self, items: &[T]) -> Result<(), CollectionError> {
        let mut batch = BTreeSet::new();
        for item in items {
            let key = item.key();
            if self.items.contains_key(&key) || !batch.insert(key.clone()) {
                return Err(CollectionError::DuplicateKey(key));
            }
        }
        for item in items {
            self.items.insert(item.key(), item.clone());
        }
        Ok(())
    }

    fn remove(&mut self, keys: &[EntityKey]) -> Result<(), CollectionError> {
        for key in keys {
            self.items.remove(key);
        }
        Ok(())
    }

    fn update(&mut self, items: &[T]) -> Result<(), CollectionError> {
        for item in items {
            self.items.insert(item.key(), item.clone());
        }
        Ok(())
    }

    fn get(&self, key: &EntityKey) -> Option<&T> {
        self.items.get(key)
    }

    fn items(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
