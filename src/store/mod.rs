//! Triple store abstraction the list engine reads from and writes to.
//!
//! Two backends implement [`TripleStore`]:
//!
//! - [`OxigraphStore`]: the default graph of an `oxigraph` store, written transactionally
//! - [`MemTripleStore`]: a plain hash set of triples
//!
//! Mutation takes `&mut self`, so a store handle is also the single-writer
//! token for every list it holds.

pub mod mem;
pub mod oxigraph_store;

use std::collections::HashSet;

use oxigraph::model::{NamedNode, NamedOrBlankNode, Term, Triple};

use crate::error::StoreError;

pub use mem::MemTripleStore;
pub use oxigraph_store::OxigraphStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A mutable set of RDF triples with pattern lookup.
pub trait TripleStore {
    /// Add a triple. Returns `false` if it was already present.
    fn insert(&mut self, triple: &Triple) -> StoreResult<bool>;

    /// Remove a triple. Returns `false` if it was absent.
    fn remove(&mut self, triple: &Triple) -> StoreResult<bool>;

    /// All triples matching the pattern; `None` is a wildcard.
    fn matching(
        &self,
        subject: Option<&NamedOrBlankNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> StoreResult<Vec<Triple>>;

    /// Number of triples.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        self.len().map(|n| n == 0)
    }

    /// Objects of every `(subject, predicate, ?)` triple.
    fn objects(&self, subject: &NamedOrBlankNode, predicate: &NamedNode) -> StoreResult<Vec<Term>> {
        Ok(self
            .matching(Some(subject), Some(predicate), None)?
            .into_iter()
            .map(|t| t.object)
            .collect())
    }

    /// Apply removals, then insertions. Backends with transactions override
    /// this to commit the set as one unit.
    fn apply(&mut self, changes: &ChangeSet) -> StoreResult<()> {
        for triple in &changes.removals {
            self.remove(triple)?;
        }
        for triple in &changes.insertions {
            self.insert(triple)?;
        }
        Ok(())
    }
}

/// A batch of removals and insertions computed before touching the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub removals: Vec<Triple>,
    pub insertions: Vec<Triple>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&mut self, triple: Triple) {
        self.removals.push(triple);
    }

    pub fn insert(&mut self, triple: Triple) {
        self.insertions.push(triple);
    }

    pub fn remove_all(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.removals.extend(triples);
    }

    pub fn insert_all(&mut self, triples: impl IntoIterator<Item = Triple>) {
        self.insertions.extend(triples);
    }

    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.insertions.is_empty()
    }

    /// Drop duplicates and cancel triples that are both removed and inserted.
    ///
    /// Order of first occurrence is kept on both sides.
    pub fn normalize(self) -> Self {
        let removed: HashSet<&Triple> = self.removals.iter().collect();
        let inserted: HashSet<&Triple> = self.insertions.iter().collect();

        let mut seen = HashSet::new();
        let removals = self
            .removals
            .iter()
            .filter(|t| !inserted.contains(t) && seen.insert(*t))
            .cloned()
            .collect();
        let mut seen = HashSet::new();
        let insertions = self
            .insertions
            .iter()
            .filter(|t| !removed.contains(t) && seen.insert(*t))
            .cloned()
            .collect();

        Self {
            removals,
            insertions,
        }
    }
}
