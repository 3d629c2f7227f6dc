//! Ordered collection addressable by key, with duplicate tracking
//!
//! Elements keep their original order. Each element may have a key; the
//! first element with a given key is reachable through [`LookupList::get`],
//! later ones only by position. Keys seen more than once are reported as
//! ambiguous.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Ordered, key-indexed list that remembers which keys were duplicated
#[derive(Debug, Clone)]
pub struct LookupList<K, V> {
    items: Vec<(Option<K>, V)>,
    first: HashMap<K, usize>,
    ambiguous: HashSet<K>,
}

impl<K, V> LookupList<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Build a list from `values`, keying each with `extract`.
    ///
    /// Values for which `extract` returns `None` are kept but not indexed.
    pub fn new<F>(values: Vec<V>, extract: F) -> Self
    where
        F: Fn(&V) -> Option<K>,
    {
        let mut first = HashMap::new();
        let mut ambiguous = HashSet::new();
        let items: Vec<(Option<K>, V)> = values.into_iter().map(|v| (extract(&v), v)).collect();

        for (index, (key, _)) in items.iter().enumerate() {
            if let Some(key) = key {
                if first.contains_key(key) {
                    ambiguous.insert(key.clone());
                } else {
                    first.insert(key.clone(), index);
                }
            }
        }

        Self {
            items,
            first,
            ambiguous,
        }
    }

    /// Number of elements, including unkeyed ones
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`
    pub fn at(&self, index: usize) -> Option<&V> {
        self.items.get(index).map(|(_, v)| v)
    }

    /// First element with `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.first.get(key).map(|&i| &self.items[i].1)
    }

    /// Position of the first element with `key`
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.first.get(key).copied()
    }

    /// Keys that occur more than once
    pub fn ambiguous(&self) -> &HashSet<K> {
        &self.ambiguous
    }

    /// Whether `key` occurs more than once
    pub fn is_ambiguous<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.ambiguous.contains(key)
    }

    /// Keys in element order; duplicates are repeated
    pub fn keys(&self) -> Vec<&K> {
        self.items.iter().filter_map(|(k, _)| k.as_ref()).collect()
    }

    /// Key of the element at `index`
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.items.get(index).and_then(|(k, _)| k.as_ref())
    }

    /// Whether some element has no key
    pub fn has_anonymous_values(&self) -> bool {
        self.items.iter().any(|(k, _)| k.is_none())
    }

    /// Iterate over elements in order
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.items.iter().map(|(_, v)| v)
    }

    /// Iterate over `(key, element)` pairs in order
    pub fn entries(&self) -> impl Iterator<Item = (Option<&K>, &V)> {
        self.items.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for LookupList<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<K, V> Default for LookupList<K, V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            first: HashMap::new(),
            ambiguous: HashSet::new(),
        }
    }
}
