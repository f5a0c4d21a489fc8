//! In-memory triple store backed by a hash set.
//!
//! Pattern lookups scan every triple. Good enough for a single open model and
//! for tests that need to plant hand-made (including broken) structures.

use std::collections::HashSet;

use oxigraph::model::{NamedNode, NamedOrBlankNode, Term, Triple};

use super::{StoreResult, TripleStore};

/// Hash-set triple store. All data is lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemTripleStore {
    triples: HashSet<Triple>,
}

impl MemTripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over every stored triple in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for MemTripleStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl TripleStore for MemTripleStore {
    fn insert(&mut self, triple: &Triple) -> StoreResult<bool> {
        Ok(self.triples.insert(triple.clone()))
    }

    fn remove(&mut self, triple: &Triple) -> StoreResult<bool> {
        Ok(self.triples.remove(triple))
    }

    fn matching(
        &self,
        subject: Option<&NamedOrBlankNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> StoreResult<Vec<Triple>> {
        Ok(self
            .triples
            .iter()
            .filter(|t| subject.is_none_or(|s| &t.subject == s))
            .filter(|t| predicate.is_none_or(|p| &t.predicate == p))
            .filter(|t| object.is_none_or(|o| &t.object == o))
            .cloned()
            .collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.triples.len())
    }
}
