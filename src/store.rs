//! Shared, lock-guarded access to a quad index
//!
//! The index itself assumes a single writer at a time. [`TripleStore`] wraps
//! it in a reader-writer lock so mutations are serialized and readers never
//! observe a half-updated index; clones of the handle share the same
//! underlying storage.

use crate::index::QuadIndex;
use crate::model::{Quad, Term, Triple, TriplePattern};
use crate::{Result, StoreError};
use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe handle over a [`QuadIndex`]
#[derive(Debug)]
pub struct TripleStore<T> {
    index: Arc<RwLock<QuadIndex<T>>>,
}

impl<T: Term> TripleStore<T> {
    /// Create a new empty store
    pub fn new() -> Self {
        TripleStore {
            index: Arc::new(RwLock::new(QuadIndex::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, QuadIndex<T>>> {
        self.index
            .read()
            .map_err(|e| StoreError::Store(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, QuadIndex<T>>> {
        self.index
            .write()
            .map_err(|e| StoreError::Store(format!("Failed to acquire write lock: {}", e)))
    }

    /// Insert a quad into the store
    pub fn insert(&self, triple: Triple<T>, context: T) -> Result<bool> {
        Ok(self.write()?.insert(triple, context))
    }

    /// Remove every quad matching the pattern, optionally scoped to a context
    pub fn remove(&self, pattern: &TriplePattern<T>, context: Option<&T>) -> Result<usize> {
        Ok(self.write()?.remove(pattern, context))
    }

    /// Remove every quad in the given context
    pub fn remove_context(&self, context: &T) -> Result<usize> {
        Ok(self.write()?.remove_context(context))
    }

    /// Find all triples matching the pattern
    pub fn triples(
        &self,
        pattern: &TriplePattern<T>,
        context: Option<&T>,
    ) -> Result<HashSet<Triple<T>>> {
        Ok(self.read()?.triples(pattern, context))
    }

    /// Check whether a triple is present
    pub fn contains(&self, triple: &Triple<T>, context: Option<&T>) -> Result<bool> {
        Ok(self.read()?.contains(triple, context))
    }

    /// Enumerate known contexts, optionally restricted to those holding a triple
    pub fn contexts(&self, triple: Option<&Triple<T>>) -> Result<HashSet<T>> {
        Ok(self.read()?.contexts(triple))
    }

    /// Count quads in a context, or distinct triples across the whole store
    pub fn len(&self, context: Option<&T>) -> Result<usize> {
        Ok(self.read()?.len(context))
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Remove every quad from every context
    pub fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    /// Get all quads currently stored
    pub fn quads(&self) -> Result<Vec<Quad<T>>> {
        Ok(self.read()?.quads())
    }

    /// Subjects of all triples with the given predicate and object
    pub fn subjects(&self, predicate: &T, object: &T, context: Option<&T>) -> Result<HashSet<T>> {
        Ok(self.read()?.subjects(predicate, object, context))
    }

    /// Objects of all triples with the given subject and predicate
    pub fn objects(&self, subject: &T, predicate: &T, context: Option<&T>) -> Result<HashSet<T>> {
        Ok(self.read()?.objects(subject, predicate, context))
    }

    /// Predicates of all triples with the given subject and object
    pub fn predicates(&self, subject: &T, object: &T, context: Option<&T>) -> Result<HashSet<T>> {
        Ok(self.read()?.predicates(subject, object, context))
    }

    /// `(subject, object)` pairs of all triples with the given predicate
    pub fn subject_objects(&self, predicate: &T, context: Option<&T>) -> Result<HashSet<(T, T)>> {
        Ok(self.read()?.subject_objects(predicate, context))
    }

    /// `(predicate, object)` pairs of all triples with the given subject
    pub fn predicate_objects(&self, subject: &T, context: Option<&T>) -> Result<HashSet<(T, T)>> {
        Ok(self.read()?.predicate_objects(subject, context))
    }

    /// `(subject, predicate)` pairs of all triples with the given object
    pub fn subject_predicates(&self, object: &T, context: Option<&T>) -> Result<HashSet<(T, T)>> {
        Ok(self.read()?.subject_predicates(object, context))
    }
}

impl<T> Clone for TripleStore<T> {
    fn clone(&self) -> Self {
        TripleStore {
            index: Arc::clone(&self.index),
        }
    }
}

impl<T: Term> Default for TripleStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let store = TripleStore::new();
        let handle = store.clone();

        store
            .insert(Triple::new("tarek", "likes", "pizza"), "c1")
            .unwrap();

        assert_eq!(handle.len(None).unwrap(), 1);
        assert!(handle
            .contains(&Triple::new("tarek", "likes", "pizza"), Some(&"c1"))
            .unwrap());
    }

    #[test]
    fn test_concurrent_writers_are_serialized() {
        let store: TripleStore<String> = TripleStore::new();

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store
                            .insert(
                                Triple::new(
                                    format!("s{}-{}", worker, i),
                                    "p".to_string(),
                                    "o".to_string(),
                                ),
                                format!("ctx{}", worker),
                            )
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(None).unwrap(), 200);
        for worker in 0..4 {
            assert_eq!(store.len(Some(&format!("ctx{}", worker))).unwrap(), 50);
        }
    }
}
