//! Value types shared across the store: triples, quads, and query patterns
//!
//! The store is generic over the identifier type. Terms are opaque: the core
//! only ever clones, compares, and hashes them.

use crate::{Result, StoreError};
use std::fmt;
use std::hash::Hash;

/// Bound for the opaque identifiers the store is generic over.
///
/// Blanket-implemented for every type that is cloneable, hashable, and
/// equality-comparable. The host guarantees that logically equal terms
/// compare and hash identically.
pub trait Term: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Term for T {}

/// An ordered `(subject, predicate, object)` fact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triple<T> {
    subject: T,
    predicate: T,
    object: T,
}

impl<T: Term> Triple<T> {
    /// Create a new triple
    pub fn new(subject: T, predicate: T, object: T) -> Self {
        Triple {
            subject,
            predicate,
            object,
        }
    }

    /// Get the subject of the triple
    pub fn subject(&self) -> &T {
        &self.subject
    }

    /// Get the predicate of the triple
    pub fn predicate(&self) -> &T {
        &self.predicate
    }

    /// Get the object of the triple
    pub fn object(&self) -> &T {
        &self.object
    }

    /// Decompose the triple into its components
    pub fn into_parts(self) -> (T, T, T) {
        (self.subject, self.predicate, self.object)
    }
}

impl<T: Term> From<(T, T, T)> for Triple<T> {
    fn from((subject, predicate, object): (T, T, T)) -> Self {
        Triple::new(subject, predicate, object)
    }
}

/// The stored unit: a [`Triple`] scoped to a context term
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad<T> {
    triple: Triple<T>,
    context: T,
}

impl<T: Term> Quad<T> {
    /// Create a new quad from its four components
    pub fn new(subject: T, predicate: T, object: T, context: T) -> Self {
        Quad {
            triple: Triple::new(subject, predicate, object),
            context,
        }
    }

    /// Create a quad from an existing triple and a context
    pub fn from_triple(triple: Triple<T>, context: T) -> Self {
        Quad { triple, context }
    }

    /// Get the subject of the quad
    pub fn subject(&self) -> &T {
        self.triple.subject()
    }

    /// Get the predicate of the quad
    pub fn predicate(&self) -> &T {
        self.triple.predicate()
    }

    /// Get the object of the quad
    pub fn object(&self) -> &T {
        self.triple.object()
    }

    /// Get the context of the quad
    pub fn context(&self) -> &T {
        &self.context
    }

    /// Get the triple of the quad
    pub fn triple(&self) -> &Triple<T> {
        &self.triple
    }

    /// Decompose the quad into its triple and context
    pub fn into_parts(self) -> (Triple<T>, T) {
        (self.triple, self.context)
    }
}

/// A single pattern position: a bound term or the wildcard
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermPattern<T> {
    /// Matches exactly one term
    Bound(T),
    /// Matches any term
    Any,
}

impl<T: Term> TermPattern<T> {
    /// Check whether this position matches the given term
    pub fn matches(&self, term: &T) -> bool {
        match self {
            TermPattern::Bound(t) => t == term,
            TermPattern::Any => true,
        }
    }

    /// Check whether this position is bound
    pub fn is_bound(&self) -> bool {
        matches!(self, TermPattern::Bound(_))
    }

    /// Get the bound term, if any
    pub fn as_bound(&self) -> Option<&T> {
        match self {
            TermPattern::Bound(t) => Some(t),
            TermPattern::Any => None,
        }
    }
}

impl<T: Term> From<T> for TermPattern<T> {
    fn from(term: T) -> Self {
        TermPattern::Bound(term)
    }
}

/// A 3-position query pattern over triples
///
/// Each position is either bound or the wildcard. A fully-bound pattern is
/// convertible into a [`Triple`]; the conversion is the checkpoint that keeps
/// wildcards out of every insertion path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriplePattern<T> {
    subject: TermPattern<T>,
    predicate: TermPattern<T>,
    object: TermPattern<T>,
}

impl<T: Term> TriplePattern<T> {
    /// Create a new pattern from three positions
    pub fn new(
        subject: impl Into<TermPattern<T>>,
        predicate: impl Into<TermPattern<T>>,
        object: impl Into<TermPattern<T>>,
    ) -> Self {
        TriplePattern {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The fully-wildcard pattern, matching every triple
    pub fn any() -> Self {
        TriplePattern {
            subject: TermPattern::Any,
            predicate: TermPattern::Any,
            object: TermPattern::Any,
        }
    }

    /// Get the subject position
    pub fn subject(&self) -> &TermPattern<T> {
        &self.subject
    }

    /// Get the predicate position
    pub fn predicate(&self) -> &TermPattern<T> {
        &self.predicate
    }

    /// Get the object position
    pub fn object(&self) -> &TermPattern<T> {
        &self.object
    }

    /// Check whether this pattern matches the given triple
    pub fn matches(&self, triple: &Triple<T>) -> bool {
        self.subject.matches(triple.subject())
            && self.predicate.matches(triple.predicate())
            && self.object.matches(triple.object())
    }

    /// Convert a fully-bound pattern into a concrete triple
    ///
    /// Rejects any pattern containing a wildcard position, before any store
    /// mutation can take place.
    pub fn into_triple(self) -> Result<Triple<T>> {
        match (self.subject, self.predicate, self.object) {
            (TermPattern::Bound(s), TermPattern::Bound(p), TermPattern::Bound(o)) => {
                Ok(Triple::new(s, p, o))
            }
            _ => Err(StoreError::Usage(
                "wildcard position where a concrete term is required".to_string(),
            )),
        }
    }
}

impl<T: Term> From<Triple<T>> for TriplePattern<T> {
    fn from(triple: Triple<T>) -> Self {
        let (s, p, o) = triple.into_parts();
        TriplePattern::new(s, p, o)
    }
}

impl<T: Term> From<(T, T, T)> for TriplePattern<T> {
    fn from((s, p, o): (T, T, T)) -> Self {
        TriplePattern::new(s, p, o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let triple = Triple::new("tarek", "likes", "pizza");

        assert!(TriplePattern::any().matches(&triple));
        assert!(TriplePattern::new(TermPattern::Any, "likes", TermPattern::Any).matches(&triple));
        assert!(TriplePattern::new("tarek", "likes", "pizza").matches(&triple));
        assert!(!TriplePattern::new("michel", TermPattern::Any, TermPattern::Any).matches(&triple));
        assert!(!TriplePattern::new(TermPattern::Any, TermPattern::Any, "cheese").matches(&triple));
    }

    #[test]
    fn test_bound_pattern_converts_to_triple() {
        let pattern = TriplePattern::new("tarek", "likes", "pizza");
        let triple = pattern.into_triple().unwrap();
        assert_eq!(triple, Triple::new("tarek", "likes", "pizza"));
    }

    #[test]
    fn test_wildcard_pattern_is_rejected_as_triple() {
        let pattern = TriplePattern::new("tarek", TermPattern::Any, "pizza");
        assert!(matches!(
            pattern.into_triple(),
            Err(crate::StoreError::Usage(_))
        ));
    }

    #[test]
    fn test_quad_accessors() {
        let quad = Quad::new("tarek", "likes", "pizza", "context-1");
        assert_eq!(*quad.subject(), "tarek");
        assert_eq!(*quad.predicate(), "likes");
        assert_eq!(*quad.object(), "pizza");
        assert_eq!(*quad.context(), "context-1");
        assert_eq!(*quad.triple(), Triple::new("tarek", "likes", "pizza"));
    }
}
