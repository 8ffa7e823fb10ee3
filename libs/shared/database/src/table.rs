use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use shared_models::pagination::PageRequest;

/// Keyed rows that remember insertion order, so listings are stable across
/// calls while lookups stay O(1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table<K: Eq + Hash + Clone, V> {
    next_position: u64,
    order: BTreeMap<u64, K>,
    rows: HashMap<K, Slot<V>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<V> {
    position: u64,
    value: V,
}

impl<K: Eq + Hash + Clone, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            next_position: 0,
            order: BTreeMap::new(),
            rows: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Table<K, V> {
    /// Returns false and leaves the table untouched when the key is taken.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.rows.contains_key(&key) {
            return false;
        }
        let position = self.next_position;
        self.next_position += 1;
        self.order.insert(position, key.clone());
        self.rows.insert(key, Slot { position, value });
        true
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key).map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key).map(|slot| &mut slot.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.rows.remove(key)?;
        self.order.remove(&slot.position);
        Some(slot.value)
    }

    /// Drops every row the predicate rejects and returns how many went.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let doomed: Vec<K> = self
            .rows
            .iter()
            .filter(|(_, slot)| !keep(&slot.value))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order
            .values()
            .filter_map(move |key| self.rows.get(key).map(|slot| &slot.value))
    }

    pub fn page(&self, request: PageRequest) -> impl Iterator<Item = &V> + '_ {
        self.values().skip(request.offset()).take(request.limit)
    }
}
