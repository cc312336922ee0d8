//! # Word Cache

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::WCHashMap;

/// Interior-mutable memo of per-word merge results.
///
/// Shared across threads; readers take the read lock, and a miss takes
/// the write lock once to insert. When two writers race on the same word,
/// the first insertion wins; results are deterministic either way.
#[derive(Debug, Default)]
pub struct WordCache {
    entries: RwLock<WCHashMap<String, Arc<[String]>>>,
}

impl WordCache {
    /// Look up a cached result.
    pub fn get(
        &self,
        word: &str,
    ) -> Option<Arc<[String]>> {
        self.entries.read().get(word).cloned()
    }

    /// Insert a result, returning the cached value.
    pub fn insert(
        &self,
        word: &str,
        pieces: Vec<String>,
    ) -> Arc<[String]> {
        let mut writer = self.entries.write();
        writer
            .entry(word.to_string())
            .or_insert_with(|| pieces.into())
            .clone()
    }

    /// Look up a result, computing and caching it on a miss.
    pub fn get_or_try_insert_with<E, F>(
        &self,
        word: &str,
        compute: F,
    ) -> Result<Arc<[String]>, E>
    where
        F: FnOnce() -> Result<Vec<String>, E>,
    {
        if let Some(pieces) = self.get(word) {
            return Ok(pieces);
        }
        Ok(self.insert(word, compute()?))
    }

    /// The number of cached words.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Clear the cache.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{check_is_send, check_is_sync};

    #[test]
    fn test_first_insert_wins() {
        let cache = WordCache::default();
        check_is_send(&cache);
        check_is_sync(&cache);
        assert!(cache.is_empty());

        let first = cache.insert("ab", vec!["ab".to_string()]);
        let second = cache.insert("ab", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        let computed: Result<_, ()> =
            cache.get_or_try_insert_with("cd", || Ok(vec!["c".to_string(), "d".to_string()]));
        assert_eq!(&*computed.unwrap(), &["c".to_string(), "d".to_string()]);

        let hit: Result<_, ()> = cache.get_or_try_insert_with("cd", || Err(()));
        assert!(hit.is_ok());

        cache.clear();
        assert!(cache.is_empty());
    }
}
