//! The quad index: storage, auxiliary indexes, and pattern evaluation
//!
//! A single structure owns every quad. The primary map keys distinct triples
//! to the set of contexts holding them, which makes the union view (membership,
//! count, context attribution) a single lookup. Auxiliary indexes cover every
//! bound-position combination so that no query with at least one bound position
//! ever scans the whole store.

use crate::model::{Quad, Term, TermPattern, Triple, TriplePattern};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Context-partitioned triple index
///
/// Stores `(triple, context)` quads with idempotent insertion. The same triple
/// may be held by any number of contexts; the union view deduplicates across
/// them. All mutating calls update the primary map and every auxiliary index
/// within the one `&mut self` call, so readers behind a lock never observe a
/// partially updated index.
#[derive(Debug, Clone)]
pub struct QuadIndex<T> {
    /// Distinct triples, each mapped to every context holding it
    triple_contexts: HashMap<Triple<T>, HashSet<T>>,
    /// Triples per context; a context key exists iff it holds at least one quad
    context_index: HashMap<T, HashSet<Triple<T>>>,
    /// Index by subject over distinct triples
    subject_index: HashMap<T, HashSet<Triple<T>>>,
    /// Index by predicate over distinct triples
    predicate_index: HashMap<T, HashSet<Triple<T>>>,
    /// Index by object over distinct triples
    object_index: HashMap<T, HashSet<Triple<T>>>,
    /// Index by (subject, predicate)
    subject_predicate_index: HashMap<(T, T), HashSet<Triple<T>>>,
    /// Index by (subject, object)
    subject_object_index: HashMap<(T, T), HashSet<Triple<T>>>,
    /// Index by (predicate, object)
    predicate_object_index: HashMap<(T, T), HashSet<Triple<T>>>,
}

impl<T: Term> QuadIndex<T> {
    /// Create a new empty index
    pub fn new() -> Self {
        QuadIndex {
            triple_contexts: HashMap::new(),
            context_index: HashMap::new(),
            subject_index: HashMap::new(),
            predicate_index: HashMap::new(),
            object_index: HashMap::new(),
            subject_predicate_index: HashMap::new(),
            subject_object_index: HashMap::new(),
            predicate_object_index: HashMap::new(),
        }
    }

    /// Insert a quad, returning `true` iff it was not already present
    ///
    /// Insertion is idempotent: the same triple in the same context is never
    /// stored twice.
    pub fn insert(&mut self, triple: Triple<T>, context: T) -> bool {
        let (is_new_quad, is_new_triple) = {
            let contexts = self.triple_contexts.entry(triple.clone()).or_default();
            let is_new_quad = contexts.insert(context.clone());
            (is_new_quad, contexts.len() == 1)
        };

        if is_new_quad {
            self.context_index
                .entry(context)
                .or_default()
                .insert(triple.clone());
            if is_new_triple {
                self.index_triple(&triple);
            }
        }

        is_new_quad
    }

    /// Remove every quad matching the pattern
    ///
    /// With a context, only quads in that context are deleted. Without one,
    /// matching triples are wiped from every context that holds them; the
    /// fully-wildcard pattern with no context empties the entire store.
    /// Removing a pattern with no matches is a silent no-op.
    ///
    /// Returns the number of quads deleted.
    pub fn remove(&mut self, pattern: &TriplePattern<T>, context: Option<&T>) -> usize {
        let matches: Vec<Triple<T>> = self.matching_triples(pattern, context).into_iter().collect();

        let mut removed = 0;
        for triple in matches {
            match context {
                Some(c) => {
                    if self.remove_quad(&triple, c) {
                        removed += 1;
                    }
                }
                None => {
                    let contexts: Vec<T> = self
                        .triple_contexts
                        .get(&triple)
                        .map(|set| set.iter().cloned().collect())
                        .unwrap_or_default();
                    for c in contexts {
                        if self.remove_quad(&triple, &c) {
                            removed += 1;
                        }
                    }
                }
            }
        }

        if removed > 0 {
            debug!(removed, "removed quads matching pattern");
        }
        removed
    }

    /// Remove every quad in the given context
    ///
    /// Triples that also exist in other contexts remain visible in the union
    /// view. Removing an unknown context is a silent no-op. Returns the number
    /// of quads deleted.
    pub fn remove_context(&mut self, context: &T) -> usize {
        let triples = match self.context_index.remove(context) {
            Some(triples) => triples,
            None => return 0,
        };

        let count = triples.len();
        for triple in triples {
            let orphaned = match self.triple_contexts.get_mut(&triple) {
                Some(contexts) => {
                    contexts.remove(context);
                    contexts.is_empty()
                }
                None => false,
            };
            if orphaned {
                self.triple_contexts.remove(&triple);
                self.unindex_triple(&triple);
            }
        }

        debug!(count, "removed context");
        count
    }

    /// Find all triples matching the pattern
    ///
    /// With a context, only quads in that context are matched. Without one,
    /// the pattern is evaluated against the union of all contexts and each
    /// distinct matching triple appears once. The result is an owned set,
    /// safe to retain across later mutations.
    pub fn triples(&self, pattern: &TriplePattern<T>, context: Option<&T>) -> HashSet<Triple<T>> {
        self.matching_triples(pattern, context)
    }

    /// Check whether a triple is present
    ///
    /// Without a context this is union membership: the triple exists in at
    /// least one context.
    pub fn contains(&self, triple: &Triple<T>, context: Option<&T>) -> bool {
        match context {
            Some(c) => self
                .context_index
                .get(c)
                .map_or(false, |set| set.contains(triple)),
            None => self.triple_contexts.contains_key(triple),
        }
    }

    /// Enumerate known contexts
    ///
    /// A context is known iff it currently holds at least one quad. With a
    /// triple, restricts to the contexts holding exactly that triple.
    pub fn contexts(&self, triple: Option<&Triple<T>>) -> HashSet<T> {
        match triple {
            Some(t) => self.triple_contexts.get(t).cloned().unwrap_or_default(),
            None => self.context_index.keys().cloned().collect(),
        }
    }

    /// Count quads
    ///
    /// With a context, the exact quad count of that context. Without one, the
    /// number of *distinct* triples across all contexts: duplicates held by
    /// several contexts count once.
    pub fn len(&self, context: Option<&T>) -> usize {
        match context {
            Some(c) => self.context_index.get(c).map_or(0, HashSet::len),
            None => self.triple_contexts.len(),
        }
    }

    /// Check if the store holds no quads at all
    pub fn is_empty(&self) -> bool {
        self.triple_contexts.is_empty()
    }

    /// Remove every quad from every context
    pub fn clear(&mut self) {
        self.triple_contexts.clear();
        self.context_index.clear();
        self.subject_index.clear();
        self.predicate_index.clear();
        self.object_index.clear();
        self.subject_predicate_index.clear();
        self.subject_object_index.clear();
        self.predicate_object_index.clear();
    }

    /// Get all quads currently stored
    pub fn quads(&self) -> Vec<Quad<T>> {
        self.context_index
            .iter()
            .flat_map(|(context, triples)| {
                triples
                    .iter()
                    .map(move |t| Quad::from_triple(t.clone(), context.clone()))
            })
            .collect()
    }

    /// Subjects of all triples with the given predicate and object
    pub fn subjects(&self, predicate: &T, object: &T, context: Option<&T>) -> HashSet<T> {
        let pattern = TriplePattern::new(TermPattern::Any, predicate.clone(), object.clone());
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| t.into_parts().0)
            .collect()
    }

    /// Objects of all triples with the given subject and predicate
    pub fn objects(&self, subject: &T, predicate: &T, context: Option<&T>) -> HashSet<T> {
        let pattern = TriplePattern::new(subject.clone(), predicate.clone(), TermPattern::Any);
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| t.into_parts().2)
            .collect()
    }

    /// Predicates of all triples with the given subject and object
    pub fn predicates(&self, subject: &T, object: &T, context: Option<&T>) -> HashSet<T> {
        let pattern = TriplePattern::new(subject.clone(), TermPattern::Any, object.clone());
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| t.into_parts().1)
            .collect()
    }

    /// `(subject, object)` pairs of all triples with the given predicate
    pub fn subject_objects(&self, predicate: &T, context: Option<&T>) -> HashSet<(T, T)> {
        let pattern = TriplePattern::new(TermPattern::Any, predicate.clone(), TermPattern::Any);
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| {
                let (s, _, o) = t.into_parts();
                (s, o)
            })
            .collect()
    }

    /// `(predicate, object)` pairs of all triples with the given subject
    pub fn predicate_objects(&self, subject: &T, context: Option<&T>) -> HashSet<(T, T)> {
        let pattern = TriplePattern::new(subject.clone(), TermPattern::Any, TermPattern::Any);
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| {
                let (_, p, o) = t.into_parts();
                (p, o)
            })
            .collect()
    }

    /// `(subject, predicate)` pairs of all triples with the given object
    pub fn subject_predicates(&self, object: &T, context: Option<&T>) -> HashSet<(T, T)> {
        let pattern = TriplePattern::new(TermPattern::Any, TermPattern::Any, object.clone());
        self.matching_triples(&pattern, context)
            .into_iter()
            .map(|t| {
                let (s, p, _) = t.into_parts();
                (s, p)
            })
            .collect()
    }

    /// Resolve a pattern to candidate triples via the most selective index,
    /// then restrict to the context scope
    fn matching_triples(
        &self,
        pattern: &TriplePattern<T>,
        context: Option<&T>,
    ) -> HashSet<Triple<T>> {
        use TermPattern::{Any, Bound};

        let scope = match context {
            Some(c) => match self.context_index.get(c) {
                Some(set) => Some(set),
                // Unknown context: empty result, not an error
                None => return HashSet::new(),
            },
            None => None,
        };

        let candidates = match (pattern.subject(), pattern.predicate(), pattern.object()) {
            (Bound(s), Bound(p), Bound(o)) => {
                let triple = Triple::new(s.clone(), p.clone(), o.clone());
                let present = self.triple_contexts.contains_key(&triple)
                    && scope.map_or(true, |set| set.contains(&triple));
                return if present {
                    HashSet::from([triple])
                } else {
                    HashSet::new()
                };
            }
            (Bound(s), Bound(p), Any) => {
                self.subject_predicate_index.get(&(s.clone(), p.clone()))
            }
            (Bound(s), Any, Bound(o)) => self.subject_object_index.get(&(s.clone(), o.clone())),
            (Any, Bound(p), Bound(o)) => {
                self.predicate_object_index.get(&(p.clone(), o.clone()))
            }
            (Bound(s), Any, Any) => self.subject_index.get(s),
            (Any, Bound(p), Any) => self.predicate_index.get(p),
            (Any, Any, Bound(o)) => self.object_index.get(o),
            (Any, Any, Any) => {
                return match scope {
                    Some(set) => set.iter().cloned().collect(),
                    None => self.triple_contexts.keys().cloned().collect(),
                };
            }
        };

        match (candidates, scope) {
            (None, _) => HashSet::new(),
            (Some(candidates), None) => candidates.iter().cloned().collect(),
            (Some(candidates), Some(scope)) => {
                // Iterate the smaller side, membership-test the other
                if scope.len() < candidates.len() {
                    scope
                        .iter()
                        .filter(|t| candidates.contains(*t))
                        .cloned()
                        .collect()
                } else {
                    candidates
                        .iter()
                        .filter(|t| scope.contains(*t))
                        .cloned()
                        .collect()
                }
            }
        }
    }

    /// Remove one quad, updating the primary map, the context index, and, if
    /// the triple no longer exists in any context, every auxiliary index
    fn remove_quad(&mut self, triple: &Triple<T>, context: &T) -> bool {
        let orphaned = match self.triple_contexts.get_mut(triple) {
            Some(contexts) => {
                if !contexts.remove(context) {
                    return false;
                }
                contexts.is_empty()
            }
            None => return false,
        };

        if let Some(triples) = self.context_index.get_mut(context) {
            triples.remove(triple);
            if triples.is_empty() {
                self.context_index.remove(context);
            }
        }

        if orphaned {
            self.triple_contexts.remove(triple);
            self.unindex_triple(triple);
        }

        true
    }

    /// Add a newly distinct triple to every auxiliary index
    fn index_triple(&mut self, triple: &Triple<T>) {
        let s = triple.subject().clone();
        let p = triple.predicate().clone();
        let o = triple.object().clone();

        self.subject_index
            .entry(s.clone())
            .or_default()
            .insert(triple.clone());
        self.predicate_index
            .entry(p.clone())
            .or_default()
            .insert(triple.clone());
        self.object_index
            .entry(o.clone())
            .or_default()
            .insert(triple.clone());
        self.subject_predicate_index
            .entry((s.clone(), p.clone()))
            .or_default()
            .insert(triple.clone());
        self.subject_object_index
            .entry((s, o.clone()))
            .or_default()
            .insert(triple.clone());
        self.predicate_object_index
            .entry((p, o))
            .or_default()
            .insert(triple.clone());
    }

    /// Strip a triple that no longer exists in any context from every
    /// auxiliary index, dropping emptied buckets
    fn unindex_triple(&mut self, triple: &Triple<T>) {
        fn drop_entry<K: Eq + std::hash::Hash, V: Eq + std::hash::Hash>(
            index: &mut HashMap<K, HashSet<V>>,
            key: &K,
            value: &V,
        ) {
            if let Some(bucket) = index.get_mut(key) {
                bucket.remove(value);
                if bucket.is_empty() {
                    index.remove(key);
                }
            }
        }

        let sp = (triple.subject().clone(), triple.predicate().clone());
        let so = (triple.subject().clone(), triple.object().clone());
        let po = (triple.predicate().clone(), triple.object().clone());

        drop_entry(&mut self.subject_index, triple.subject(), triple);
        drop_entry(&mut self.predicate_index, triple.predicate(), triple);
        drop_entry(&mut self.object_index, triple.object(), triple);
        drop_entry(&mut self.subject_predicate_index, &sp, triple);
        drop_entry(&mut self.subject_object_index, &so, triple);
        drop_entry(&mut self.predicate_object_index, &po, triple);
    }
}

impl<T: Term> Default for QuadIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
