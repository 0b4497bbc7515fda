//! A single cached list query

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Entry<T> {
    data: Option<Vec<T>>,
    stale: bool,
}

/// Cached result of a list query
///
/// Writes never patch the cached rows; they mark the entry stale and the
/// owner refetches.
#[derive(Debug)]
pub struct QueryCache<T> {
    entry: Mutex<Entry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entry: Mutex::new(Entry {
                data: None,
                stale: true,
            }),
        }
    }
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self) -> MutexGuard<'_, Entry<T>> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached rows; empty before the first fetch completes
    pub fn data(&self) -> Vec<T> {
        self.entry().data.clone().unwrap_or_default()
    }

    /// Whether the rows need refetching
    pub fn is_stale(&self) -> bool {
        self.entry().stale
    }

    /// Mark the rows as out of date; they stay readable until replaced
    pub fn invalidate(&self) {
        self.entry().stale = true;
    }

    /// Replace the rows with a fresh fetch result
    pub fn set(&self, data: Vec<T>) {
        let mut entry = self.entry();
        entry.data = Some(data);
        entry.stale = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_keeps_data_readable() {
        let cache = QueryCache::new();
        assert!(cache.is_stale());
        assert!(cache.data().is_empty());

        cache.set(vec![1, 2]);
        assert!(!cache.is_stale());

        cache.invalidate();
        assert!(cache.is_stale());
        assert_eq!(cache.data(), [1, 2]);

        cache.set(vec![3]);
        assert_eq!(cache.data(), [3]);
        assert!(!cache.is_stale());
    }
}
