//! Graph-style views over a shared triple store
//!
//! [`Graph`] binds a store handle to one context; [`Dataset`] is the union
//! view across all contexts with a distinguished default context for callers
//! that never name one. Neither holds any matching logic of its own - every
//! call delegates to the [`QuadIndex`](crate::QuadIndex) behind the store.

use crate::model::{Term, Triple, TriplePattern};
use crate::store::TripleStore;
use crate::Result;
use std::collections::HashSet;

/// A view of one context of a [`TripleStore`]
///
/// Insertions target the bound context; removals and queries are scoped to it.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    store: TripleStore<T>,
    context: T,
}

impl<T: Term> Graph<T> {
    /// Create a view of the given context
    pub fn new(store: TripleStore<T>, context: T) -> Self {
        Graph { store, context }
    }

    /// The context this graph is bound to
    pub fn context(&self) -> &T {
        &self.context
    }

    /// The underlying store handle
    pub fn store(&self) -> &TripleStore<T> {
        &self.store
    }

    /// Insert a triple into this graph's context
    ///
    /// Accepts anything convertible to a pattern so callers can pass plain
    /// `(s, p, o)` tuples; a pattern with a wildcard position is rejected as a
    /// usage error before any mutation.
    pub fn insert(&self, triple: impl Into<TriplePattern<T>>) -> Result<bool> {
        let triple = triple.into().into_triple()?;
        self.store.insert(triple, self.context.clone())
    }

    /// Remove every triple in this context matching the pattern
    pub fn remove(&self, pattern: &TriplePattern<T>) -> Result<usize> {
        self.store.remove(pattern, Some(&self.context))
    }

    /// Find all triples in this context matching the pattern
    pub fn triples(&self, pattern: &TriplePattern<T>) -> Result<HashSet<Triple<T>>> {
        self.store.triples(pattern, Some(&self.context))
    }

    /// Check whether this context holds the triple
    pub fn contains(&self, triple: &Triple<T>) -> Result<bool> {
        self.store.contains(triple, Some(&self.context))
    }

    /// Number of triples in this context
    pub fn len(&self) -> Result<usize> {
        self.store.len(Some(&self.context))
    }

    /// Check if this context holds no triples
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Subjects of triples in this context with the given predicate and object
    pub fn subjects(&self, predicate: &T, object: &T) -> Result<HashSet<T>> {
        self.store.subjects(predicate, object, Some(&self.context))
    }

    /// Objects of triples in this context with the given subject and predicate
    pub fn objects(&self, subject: &T, predicate: &T) -> Result<HashSet<T>> {
        self.store.objects(subject, predicate, Some(&self.context))
    }

    /// Predicates of triples in this context with the given subject and object
    pub fn predicates(&self, subject: &T, object: &T) -> Result<HashSet<T>> {
        self.store.predicates(subject, object, Some(&self.context))
    }

    /// `(subject, object)` pairs for the given predicate in this context
    pub fn subject_objects(&self, predicate: &T) -> Result<HashSet<(T, T)>> {
        self.store.subject_objects(predicate, Some(&self.context))
    }

    /// `(predicate, object)` pairs for the given subject in this context
    pub fn predicate_objects(&self, subject: &T) -> Result<HashSet<(T, T)>> {
        self.store.predicate_objects(subject, Some(&self.context))
    }

    /// `(subject, predicate)` pairs for the given object in this context
    pub fn subject_predicates(&self, object: &T) -> Result<HashSet<(T, T)>> {
        self.store.subject_predicates(object, Some(&self.context))
    }

    /// Owned snapshot of every triple in this context
    pub fn snapshot(&self) -> Result<HashSet<Triple<T>>> {
        self.triples(&TriplePattern::any())
    }
}

impl<T: Term> IntoIterator for &Graph<T> {
    type Item = Triple<T>;
    type IntoIter = std::collections::hash_set::IntoIter<Triple<T>>;

    /// Iterate over an owned snapshot of this context's triples
    fn into_iter(self) -> Self::IntoIter {
        self.snapshot().expect("poisoned store lock").into_iter()
    }
}

impl<T: Term> IntoIterator for Graph<T> {
    type Item = Triple<T>;
    type IntoIter = std::collections::hash_set::IntoIter<Triple<T>>;

    fn into_iter(self) -> Self::IntoIter {
        (&self).into_iter()
    }
}

/// The union view over every context of a [`TripleStore`]
///
/// Queries and counts deduplicate across contexts; removal without a context
/// wipes matching triples from every context holding them. Insertions without
/// an explicit context target the distinguished default context, which is a
/// normal context in every other respect.
#[derive(Debug, Clone)]
pub struct Dataset<T> {
    store: TripleStore<T>,
    default_context: T,
}

impl<T: Term> Dataset<T> {
    /// Create a dataset over a fresh store with the given default context term
    pub fn new(default_context: T) -> Self {
        Dataset {
            store: TripleStore::new(),
            default_context,
        }
    }

    /// Create a dataset over an existing store handle
    pub fn with_store(store: TripleStore<T>, default_context: T) -> Self {
        Dataset {
            store,
            default_context,
        }
    }

    /// The underlying store handle
    pub fn store(&self) -> &TripleStore<T> {
        &self.store
    }

    /// The default context term
    pub fn default_context(&self) -> &T {
        &self.default_context
    }

    /// A graph view bound to the given context
    pub fn graph(&self, context: T) -> Graph<T> {
        Graph::new(self.store.clone(), context)
    }

    /// A graph view bound to the default context
    pub fn default_graph(&self) -> Graph<T> {
        self.graph(self.default_context.clone())
    }

    /// Insert a triple into the default context
    ///
    /// A pattern with a wildcard position is rejected as a usage error before
    /// any mutation.
    pub fn insert(&self, triple: impl Into<TriplePattern<T>>) -> Result<bool> {
        let triple = triple.into().into_triple()?;
        self.store.insert(triple, self.default_context.clone())
    }

    /// Remove every matching triple from every context holding it
    pub fn remove(&self, pattern: &TriplePattern<T>) -> Result<usize> {
        self.store.remove(pattern, None)
    }

    /// Remove every quad in the given context
    pub fn remove_context(&self, context: &T) -> Result<usize> {
        self.store.remove_context(context)
    }

    /// Find all distinct triples matching the pattern, across all contexts
    pub fn triples(&self, pattern: &TriplePattern<T>) -> Result<HashSet<Triple<T>>> {
        self.store.triples(pattern, None)
    }

    /// Check whether any context holds the triple
    pub fn contains(&self, triple: &Triple<T>) -> Result<bool> {
        self.store.contains(triple, None)
    }

    /// Enumerate known contexts, optionally restricted to those holding a triple
    pub fn contexts(&self, triple: Option<&Triple<T>>) -> Result<HashSet<T>> {
        self.store.contexts(triple)
    }

    /// Number of distinct triples across all contexts
    pub fn len(&self) -> Result<usize> {
        self.store.len(None)
    }

    /// Check if the store holds no quads at all
    pub fn is_empty(&self) -> Result<bool> {
        self.store.is_empty()
    }

    /// Subjects of triples in any context with the given predicate and object
    pub fn subjects(&self, predicate: &T, object: &T) -> Result<HashSet<T>> {
        self.store.subjects(predicate, object, None)
    }

    /// Objects of triples in any context with the given subject and predicate
    pub fn objects(&self, subject: &T, predicate: &T) -> Result<HashSet<T>> {
        self.store.objects(subject, predicate, None)
    }

    /// Predicates of triples in any context with the given subject and object
    pub fn predicates(&self, subject: &T, object: &T) -> Result<HashSet<T>> {
        self.store.predicates(subject, object, None)
    }

    /// `(subject, object)` pairs for the given predicate, across all contexts
    pub fn subject_objects(&self, predicate: &T) -> Result<HashSet<(T, T)>> {
        self.store.subject_objects(predicate, None)
    }

    /// `(predicate, object)` pairs for the given subject, across all contexts
    pub fn predicate_objects(&self, subject: &T) -> Result<HashSet<(T, T)>> {
        self.store.predicate_objects(subject, None)
    }

    /// `(subject, predicate)` pairs for the given object, across all contexts
    pub fn subject_predicates(&self, object: &T) -> Result<HashSet<(T, T)>> {
        self.store.subject_predicates(object, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TermPattern;
    use crate::StoreError;

    const DEFAULT: &str = "urn:x-default";

    #[test]
    fn test_insert_with_wildcard_is_rejected_without_mutation() {
        let dataset = Dataset::new(DEFAULT);

        let result = dataset.insert(TriplePattern::new(
            "tarek",
            TermPattern::Any,
            "pizza",
        ));
        assert!(matches!(result, Err(StoreError::Usage(_))));
        assert!(dataset.is_empty().unwrap());

        let graph = dataset.graph("c1");
        let result = graph.insert(TriplePattern::new(
            TermPattern::Any,
            "likes",
            TermPattern::Any,
        ));
        assert!(matches!(result, Err(StoreError::Usage(_))));
        assert!(dataset.is_empty().unwrap());
    }

    #[test]
    fn test_default_graph_is_a_normal_context() {
        let dataset = Dataset::new(DEFAULT);
        dataset.insert(("tarek", "likes", "pizza")).unwrap();

        assert!(dataset.contexts(None).unwrap().contains(&DEFAULT));
        assert_eq!(dataset.default_graph().len().unwrap(), 1);

        dataset.remove_context(&DEFAULT).unwrap();
        assert!(dataset.is_empty().unwrap());
        assert!(!dataset.contexts(None).unwrap().contains(&DEFAULT));
    }

    #[test]
    fn test_graph_remove_is_scoped_dataset_remove_is_global() {
        let dataset = Dataset::new(DEFAULT);
        let triple = Triple::new("pizza", "hates", "tarek");

        dataset.insert(triple.clone()).unwrap();
        dataset.graph("c1").insert(triple.clone()).unwrap();
        dataset.graph("c2").insert(triple.clone()).unwrap();
        assert_eq!(dataset.len().unwrap(), 1);

        dataset
            .graph("c1")
            .remove(&TriplePattern::from(triple.clone()))
            .unwrap();
        assert!(dataset.contains(&triple).unwrap());

        dataset.remove(&TriplePattern::from(triple.clone())).unwrap();
        assert!(!dataset.contains(&triple).unwrap());
        assert!(dataset.is_empty().unwrap());
    }

    #[test]
    fn test_graph_iterates_as_a_snapshot() {
        let dataset = Dataset::new(DEFAULT);
        let graph = dataset.graph("c1");
        graph.insert(("tarek", "likes", "pizza")).unwrap();
        graph.insert(("bob", "hates", "pizza")).unwrap();

        let collected: HashSet<Triple<&str>> = (&graph).into_iter().collect();
        assert_eq!(collected, graph.snapshot().unwrap());
        assert_eq!(collected.len(), 2);

        // iteration yields owned triples detached from the store
        dataset.remove(&TriplePattern::any()).unwrap();
        assert_eq!(collected.len(), 2);
        assert_eq!((&graph).into_iter().count(), 0);
    }

    #[test]
    fn test_graph_views_share_one_store() {
        let dataset = Dataset::new(DEFAULT);
        let g1 = dataset.graph("c1");
        let g1_again = dataset.graph("c1");

        g1.insert(("bob", "hates", "pizza")).unwrap();
        assert_eq!(g1_again.len().unwrap(), 1);
        assert!(g1_again
            .contains(&Triple::new("bob", "hates", "pizza"))
            .unwrap());
    }
}
