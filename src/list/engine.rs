//! List engine: push / remove / empty / create / read over a store.
//!
//! Each operation reads and validates everything first, then builds one
//! [`ChangeSet`] and applies it. A malformed chain therefore aborts the call
//! with the store untouched.

use std::collections::HashSet;
use std::sync::Arc;

use oxigraph::model::{NamedNode, NamedOrBlankNode, Term, Triple};

use crate::catalog::{ListProperty, RelationCatalog};
use crate::config::EngineConfig;
use crate::element::{Candidate, IdentityKey, ModelElement, named_node};
use crate::error::{ListError, ListResult, MalformedListError};
use crate::store::{ChangeSet, TripleStore};
use crate::vocab::SammVocab;

use super::codec::{self, DecodedChain};
use super::resolver::{ElementResolver, Resolution};
use super::{ListItem, ListOutcome, ListUpdate, NoOp};

/// Orchestrates list mutations. Holds no per-list state: every list lives in
/// the store passed to each call.
#[derive(Debug, Clone)]
pub struct ListEngine {
    config: EngineConfig,
    vocab: SammVocab,
    catalog: Arc<RelationCatalog>,
}

impl ListEngine {
    /// Create an engine with the standard SAMM relation catalog.
    pub fn new(config: EngineConfig) -> ListResult<Self> {
        Self::with_catalog(config, Arc::new(RelationCatalog::standard()))
    }

    /// Create an engine with a caller-supplied catalog.
    pub fn with_catalog(config: EngineConfig, catalog: Arc<RelationCatalog>) -> ListResult<Self> {
        config.validate()?;
        let vocab = SammVocab::new(&config.samm_version)?;
        tracing::info!(
            samm_version = %config.samm_version,
            max_list_length = config.max_list_length,
            "initializing list engine"
        );
        Ok(Self {
            config,
            vocab,
            catalog,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vocab(&self) -> &SammVocab {
        &self.vocab
    }

    pub fn catalog(&self) -> &RelationCatalog {
        &self.catalog
    }

    /// Append candidates to the list of `source` they belong to.
    ///
    /// The list is chosen by the first candidate the catalog can place.
    /// Candidates of other kinds are dropped, and, except for scalar-valued
    /// lists, so are candidates already present.
    pub fn push<S: TripleStore + ?Sized>(
        &self,
        store: &mut S,
        source: &ModelElement,
        candidates: &[Candidate],
    ) -> ListResult<ListOutcome> {
        let subject = source.named_node()?;
        let Some(property) = self.resolve_property(source, candidates) else {
            return Ok(ListOutcome::Unchanged(NoOp::UnresolvableRelation));
        };
        let predicate = self.vocab.predicate(property).clone();
        let filter = self.catalog.type_filter(source.kind, property);
        let resolver = ElementResolver::new(&self.vocab);

        let head = self.head_of(store, &subject, &predicate)?;
        let chain = match &head {
            Some(h) => codec::decode(store, &self.vocab, h, self.config.max_list_length)?,
            None => DecodedChain::empty(),
        };

        let multiset = filter.is_scalar_valued();
        let mut seen: HashSet<IdentityKey> = if multiset {
            HashSet::new()
        } else {
            chain.identities()
        };
        let mut fresh = Vec::new();
        for candidate in candidates {
            let resolution = resolver.classify(source, &filter, candidate);
            if let Resolution::Reject(reason) = resolution {
                tracing::trace!(subject = %subject, ?reason, ?candidate, "candidate rejected");
                continue;
            }
            if !multiset && !seen.insert(candidate.identity()) {
                tracing::trace!(subject = %subject, ?candidate, "duplicate suppressed");
                continue;
            }
            fresh.push(resolver.materialize(source, candidate, resolution)?);
        }

        // The candidate that resolved the property always passes its own filter,
        // so an empty batch here means every candidate was already listed.
        if fresh.is_empty() {
            tracing::debug!(subject = %subject, %property, "push added nothing");
            return Ok(ListOutcome::Unchanged(NoOp::NothingNew));
        }

        let added = fresh.len();
        let len = chain.len() + added;
        if len > self.config.max_list_length {
            tracing::warn!(
                subject = %subject,
                %property,
                len,
                max_len = self.config.max_list_length,
                "push rejected, list would exceed its length limit"
            );
            return Err(ListError::ListFull {
                len,
                max_len: self.config.max_list_length,
            });
        }
        let mut payloads: Vec<Term> = chain.cells.iter().map(|c| c.payload.clone()).collect();
        payloads.extend(fresh.iter().map(|f| f.payload.clone()));

        let mut changes = ChangeSet::new();
        if let Some(h) = &head {
            changes.remove(Triple::new(subject.clone(), predicate.clone(), h.clone()));
        }
        changes.remove_all(chain.chain_triples());
        self.write_chain(&mut changes, &subject, &predicate, &payloads);
        changes.insert_all(chain.cells.iter().flat_map(|c| c.occurrence.iter().cloned()));
        changes.insert_all(fresh.into_iter().flat_map(|f| f.occurrence));
        self.commit(store, changes)?;

        Ok(ListOutcome::Updated(ListUpdate {
            property,
            len: payloads.len(),
            added,
            removed: 0,
            head_created: head.is_none(),
        }))
    }

    /// Remove candidates from the list of `source` they belong to.
    ///
    /// Matching is by identity: URN for elements, value for scalars. Every
    /// matching cell is dropped, together with its wrapped occurrence.
    pub fn remove<S: TripleStore + ?Sized>(
        &self,
        store: &mut S,
        source: &ModelElement,
        candidates: &[Candidate],
    ) -> ListResult<ListOutcome> {
        let subject = source.named_node()?;
        let Some(property) = self.resolve_property(source, candidates) else {
            return Ok(ListOutcome::Unchanged(NoOp::UnresolvableRelation));
        };
        let predicate = self.vocab.predicate(property).clone();
        let filter = self.catalog.type_filter(source.kind, property);

        let Some(head) = self.head_of(store, &subject, &predicate)? else {
            tracing::debug!(subject = %subject, %property, "remove on absent list");
            return Ok(ListOutcome::Unchanged(NoOp::ListAbsent));
        };
        let chain = codec::decode(store, &self.vocab, &head, self.config.max_list_length)?;

        let doomed: HashSet<IdentityKey> = candidates
            .iter()
            .filter(|c| filter.accepts(c))
            .map(Candidate::identity)
            .collect();
        let (dropped, kept): (Vec<_>, Vec<_>) = chain
            .cells
            .iter()
            .partition(|cell| doomed.contains(&cell.item.identity()));
        if dropped.is_empty() {
            return Ok(ListOutcome::Unchanged(NoOp::NothingRemoved));
        }

        let payloads: Vec<Term> = kept.iter().map(|c| c.payload.clone()).collect();
        let mut changes = ChangeSet::new();
        changes.remove(Triple::new(subject.clone(), predicate.clone(), head));
        changes.remove_all(chain.chain_triples());
        self.write_chain(&mut changes, &subject, &predicate, &payloads);
        changes.insert_all(kept.iter().flat_map(|c| c.occurrence.iter().cloned()));
        self.commit(store, changes)?;

        Ok(ListOutcome::Updated(ListUpdate {
            property,
            len: payloads.len(),
            added: 0,
            removed: dropped.len(),
            head_created: false,
        }))
    }

    /// Drop every cell of a list, leaving an explicit `rdf:nil` head.
    pub fn empty_list<S: TripleStore + ?Sized>(
        &self,
        store: &mut S,
        subject: &str,
        key: ListProperty,
    ) -> ListResult<ListOutcome> {
        let subject = named_node(subject)?;
        let predicate = self.vocab.predicate(key).clone();

        let Some(head) = self.head_of(store, &subject, &predicate)? else {
            return Ok(ListOutcome::Unchanged(NoOp::ListAbsent));
        };
        if codec::is_nil(&head) {
            return Ok(ListOutcome::Unchanged(NoOp::AlreadyEmpty));
        }
        // A chain cannot have more cells than the store has triples, so this
        // bound still terminates while letting over-long lists be cleared.
        let bound = store.len()?.max(self.config.max_list_length);
        let chain = codec::decode(store, &self.vocab, &head, bound)?;

        let mut changes = ChangeSet::new();
        changes.remove(Triple::new(subject.clone(), predicate.clone(), head));
        changes.remove_all(chain.chain_triples());
        changes.insert(Triple::new(subject, predicate, codec::nil()));
        self.commit(store, changes)?;

        Ok(ListOutcome::Updated(ListUpdate {
            property: key,
            len: 0,
            added: 0,
            removed: chain.len(),
            head_created: false,
        }))
    }

    /// [`empty_list`](Self::empty_list), then make sure the nil head exists.
    pub fn create_empty<S: TripleStore + ?Sized>(
        &self,
        store: &mut S,
        subject: &str,
        key: ListProperty,
    ) -> ListResult<ListOutcome> {
        let outcome = self.empty_list(store, subject, key)?;
        let head = Triple::new(
            named_node(subject)?,
            self.vocab.predicate(key).clone(),
            codec::nil(),
        );
        let created = store.insert(&head)?;

        match outcome {
            ListOutcome::Unchanged(NoOp::ListAbsent) if created => {
                tracing::debug!(subject, property = %key, "materialized empty list head");
                Ok(ListOutcome::Updated(ListUpdate {
                    property: key,
                    len: 0,
                    added: 0,
                    removed: 0,
                    head_created: true,
                }))
            }
            other => Ok(other),
        }
    }

    /// Decoded elements of a list; empty when the list is absent.
    pub fn get_elements<S: TripleStore + ?Sized>(
        &self,
        store: &S,
        subject: &str,
        key: ListProperty,
    ) -> ListResult<Vec<ListItem>> {
        Ok(self
            .read_list(store, subject, key)?
            .map(|chain| chain.items())
            .unwrap_or_default())
    }

    /// The full decoded chain, `None` when the head triple is absent.
    pub fn read_list<S: TripleStore + ?Sized>(
        &self,
        store: &S,
        subject: &str,
        key: ListProperty,
    ) -> ListResult<Option<DecodedChain>> {
        let subject = named_node(subject)?;
        let predicate = self.vocab.predicate(key);
        self.head_of(store, &subject, predicate)?
            .map(|head| codec::decode(store, &self.vocab, &head, self.config.max_list_length))
            .transpose()
    }

    fn resolve_property(
        &self,
        source: &ModelElement,
        candidates: &[Candidate],
    ) -> Option<ListProperty> {
        let property = candidates
            .iter()
            .find_map(|c| self.catalog.resolve_predicate(source.kind, c));
        if property.is_none() {
            tracing::debug!(
                subject = %source.urn,
                kind = %source.kind,
                candidates = candidates.len(),
                "no list relation for candidates"
            );
        }
        property
    }

    fn head_of<S: TripleStore + ?Sized>(
        &self,
        store: &S,
        subject: &NamedNode,
        predicate: &NamedNode,
    ) -> ListResult<Option<Term>> {
        let mut heads = store.objects(&NamedOrBlankNode::from(subject.clone()), predicate)?;
        match heads.len() {
            0 => Ok(None),
            1 => Ok(heads.pop()),
            count => {
                tracing::warn!(
                    subject = %subject,
                    predicate = %predicate,
                    count,
                    "ambiguous list head"
                );
                Err(MalformedListError::AmbiguousHead {
                    subject: subject.to_string(),
                    predicate: predicate.to_string(),
                    count,
                }
                .into())
            }
        }
    }

    fn write_chain(
        &self,
        changes: &mut ChangeSet,
        subject: &NamedNode,
        predicate: &NamedNode,
        payloads: &[Term],
    ) {
        let encoded = codec::encode(payloads);
        changes.insert(Triple::new(subject.clone(), predicate.clone(), encoded.head));
        changes.insert_all(encoded.triples);
    }

    fn commit<S: TripleStore + ?Sized>(&self, store: &mut S, changes: ChangeSet) -> ListResult<()> {
        let changes = changes.normalize();
        tracing::debug!(
            removed = changes.removals.len(),
            inserted = changes.insertions.len(),
            "applying list change set"
        );
        store.apply(&changes)?;
        Ok(())
    }
}
