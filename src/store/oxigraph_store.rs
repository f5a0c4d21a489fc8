//! Triple store backed by oxigraph.
//!
//! Every triple lives in the default graph of an `oxigraph::store::Store`.
//! A [`ChangeSet`] is written in a single oxigraph transaction, so other
//! handles on the same store never observe a half-rewritten list.

use oxigraph::model::{GraphNameRef, NamedNode, NamedOrBlankNode, QuadRef, Term, Triple};
use oxigraph::store::{StorageError, Store};

use crate::error::StoreError;

use super::{ChangeSet, StoreResult, TripleStore};

fn backend(action: &str) -> impl FnOnce(StorageError) -> StoreError + '_ {
    move |e| StoreError::Backend {
        message: format!("{action} failed: {e}"),
    }
}

fn quad(triple: &Triple) -> QuadRef<'_> {
    triple.as_ref().in_graph(GraphNameRef::DefaultGraph)
}

/// Oxigraph-backed triple store.
pub struct OxigraphStore {
    store: Store,
}

impl OxigraphStore {
    /// Create a new in-memory store.
    pub fn in_memory() -> StoreResult<Self> {
        let store = Store::new().map_err(backend("store creation"))?;
        Ok(Self { store })
    }

    /// Wrap an existing oxigraph store, e.g. one an external serializer loaded.
    pub fn from_store(store: Store) -> Self {
        Self { store }
    }

    /// Get internal store reference (for serialization by the caller).
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl TripleStore for OxigraphStore {
    fn insert(&mut self, triple: &Triple) -> StoreResult<bool> {
        let quad = quad(triple);
        if self.store.contains(quad).map_err(backend("lookup"))? {
            return Ok(false);
        }
        self.store.insert(quad).map_err(backend("insert"))?;
        Ok(true)
    }

    fn remove(&mut self, triple: &Triple) -> StoreResult<bool> {
        let quad = quad(triple);
        if !self.store.contains(quad).map_err(backend("lookup"))? {
            return Ok(false);
        }
        self.store.remove(quad).map_err(backend("remove"))?;
        Ok(true)
    }

    fn matching(
        &self,
        subject: Option<&NamedOrBlankNode>,
        predicate: Option<&NamedNode>,
        object: Option<&Term>,
    ) -> StoreResult<Vec<Triple>> {
        self.store
            .quads_for_pattern(
                subject.map(NamedOrBlankNode::as_ref),
                predicate.map(NamedNode::as_ref),
                object.map(Term::as_ref),
                Some(GraphNameRef::DefaultGraph),
            )
            .map(|quad| {
                let quad = quad.map_err(backend("pattern lookup"))?;
                Ok(Triple::new(quad.subject, quad.predicate, quad.object))
            })
            .collect()
    }

    fn len(&self) -> StoreResult<usize> {
        self.store.len().map_err(backend("count"))
    }

    /// All removals and insertions commit together or not at all.
    fn apply(&mut self, changes: &ChangeSet) -> StoreResult<()> {
        let mut transaction = self.store.start_transaction().map_err(backend("transaction start"))?;
        for triple in &changes.removals {
            transaction.remove(quad(triple));
        }
        transaction.extend(changes.insertions.iter().map(quad));
        transaction.commit().map_err(backend("transaction commit"))
    }
}

impl std::fmt::Debug for OxigraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OxigraphStore").finish()
    }
}
