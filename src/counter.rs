//! Multiplicity counters for neighbouring nodes.
use indexmap::map::Keys;
use indexmap::IndexMap;

/// Number of parallel edges to each neighbour of a node.
///
/// Entries whose count drops to zero are removed, so the keys are exactly the
/// set of distinct neighbours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    counts: IndexMap<String, usize>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_owned(), 1);
            }
        }
    }

    /// Decrements the count of `key` and drops the entry once it reaches zero.
    ///
    /// Unknown keys are left alone.
    pub fn decrement(&mut self, key: &str) {
        let Some(count) = self.counts.get_mut(key) else {
            return;
        };

        *count -= 1;

        if *count == 0 {
            self.counts.swap_remove(key);
        }
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Iterates over the keys with a non-zero count.
    #[inline]
    pub fn keys(&self) -> Keys<'_, String, usize> {
        self.counts.keys()
    }
}
