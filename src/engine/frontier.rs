//! Stable cost-ordered multi-map.
//!
//! Both Dijkstra's frontier and Yen's candidate pool need "pop the
//! cheapest, earliest-inserted entry". A binary heap gives no ordering
//! among equal keys, so entries are keyed by `(cost, insertion sequence)`
//! in a `BTreeMap` instead. Repeated runs over an unchanged graph pop in
//! exactly the same order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// `f64` with a total order, for use as a map key.
#[derive(Debug, Clone, Copy)]
pub struct OrderedCost(f64);

impl OrderedCost {
    /// Wrap a cost.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The wrapped cost.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for OrderedCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderedCost {}

impl PartialOrd for OrderedCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Min-ordered multi-map from cost to entries, ties broken by insertion order.
#[derive(Debug, Clone)]
pub struct Frontier<T> {
    entries: BTreeMap<(OrderedCost, u64), T>,
    next_seq: u64,
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Frontier<T> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry at `cost`.
    pub fn push(&mut self, cost: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((OrderedCost::new(cost), seq), item);
    }

    /// Remove the cheapest entry; among equal costs, the earliest inserted.
    pub fn pop_min(&mut self) -> Option<(f64, T)> {
        self.entries
            .pop_first()
            .map(|((cost, _), item)| (cost.value(), item))
    }

    /// Keep only entries for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.entries.retain(|_, item| keep(item));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
