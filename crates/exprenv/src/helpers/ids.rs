use std::sync::Arc;

use dashmap::DashMap;

/// Per-invocation counters behind `#ids`.
///
/// Every id starts at 1.
#[derive(Debug, Default)]
pub struct IdCounts {
    counts: DashMap<String, u32>,
}

impl IdCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `id`.
    pub fn get(&self, id: &str) -> u32 {
        self.counts.get(id).map_or(1, |count| *count)
    }

    /// Advance the count for `id`, returning the count before the increment.
    pub fn increment(&self, id: &str) -> u32 {
        let mut count = self.counts.entry(id.to_string()).or_insert(1);
        let current = *count;
        *count += 1;
        current
    }
}

/// Sequential element ids for `#ids`, scoped to one template invocation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use exprenv::helpers::{IdCounts, Ids};
///
/// let ids = Ids::new(Arc::new(IdCounts::new()));
/// assert_eq!(ids.next("item"), "item1");
/// assert_eq!(ids.seq("item"), "item1");
/// assert_eq!(ids.seq("item"), "item2");
/// assert_eq!(ids.prev("item"), "item2");
/// ```
#[derive(Debug, Clone)]
pub struct Ids {
    counts: Arc<IdCounts>,
}

impl Ids {
    pub fn new(counts: Arc<IdCounts>) -> Self {
        Self { counts }
    }

    /// Return the next id in the sequence and advance it.
    pub fn seq(&self, id: &str) -> String {
        format!("{id}{}", self.counts.increment(id))
    }

    /// Return the id `seq` would produce next, without advancing.
    pub fn next(&self, id: &str) -> String {
        format!("{id}{}", self.counts.get(id))
    }

    /// Return the id most recently produced by `seq`.
    pub fn prev(&self, id: &str) -> String {
        format!("{id}{}", i64::from(self.counts.get(id)) - 1)
    }
}

impl PartialEq for Ids {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.counts, &other.counts)
    }
}
