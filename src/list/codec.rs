//! RDF list codec: cons chains to ordered items and back.
//!
//! Decoding walks `rdf:rest` links iteratively with a visited set and a length
//! cap, so a corrupted store yields a [`MalformedListError`] instead of an
//! endless walk. Encoding always mints fresh cells.

use std::collections::HashSet;

use oxigraph::model::vocab::rdf;
use oxigraph::model::{BlankNode, NamedNode, NamedOrBlankNode, Term, Triple};

use crate::element::IdentityKey;
use crate::error::{ListResult, MalformedListError};
use crate::store::TripleStore;
use crate::vocab::SammVocab;

use super::ListItem;

/// Whether a term is `rdf:nil`.
pub fn is_nil(term: &Term) -> bool {
    matches!(term, Term::NamedNode(n) if n.as_ref() == rdf::NIL)
}

/// `rdf:nil` as an owned term.
pub fn nil() -> Term {
    rdf::NIL.into_owned().into()
}

/// One cell of a decoded chain, with everything needed to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCell {
    pub cell: BlankNode,
    /// The `rdf:first` object.
    pub payload: Term,
    /// The `rdf:rest` object.
    pub rest: Term,
    pub item: ListItem,
    /// Outgoing triples of a wrapped occurrence; empty for direct payloads.
    pub occurrence: Vec<Triple>,
}

impl DecodedCell {
    /// The cell's own `rdf:first` and `rdf:rest` triples.
    pub fn cell_triples(&self) -> [Triple; 2] {
        [
            Triple::new(self.cell.clone(), rdf::FIRST, self.payload.clone()),
            Triple::new(self.cell.clone(), rdf::REST, self.rest.clone()),
        ]
    }
}

/// A list read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedChain {
    pub head: Term,
    pub cells: Vec<DecodedCell>,
}

impl DecodedChain {
    /// The chain of an explicit `rdf:nil` head.
    pub fn empty() -> Self {
        Self {
            head: nil(),
            cells: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn items(&self) -> Vec<ListItem> {
        self.cells.iter().map(|c| c.item.clone()).collect()
    }

    pub fn identities(&self) -> HashSet<IdentityKey> {
        self.cells.iter().map(|c| c.item.identity()).collect()
    }

    /// Every triple belonging to the chain: cell links plus wrapped
    /// occurrence subgraphs. The head triple itself is not included.
    pub fn chain_triples(&self) -> Vec<Triple> {
        let mut triples = Vec::with_capacity(self.cells.len() * 2);
        for cell in &self.cells {
            triples.extend(cell.cell_triples());
            triples.extend(cell.occurrence.iter().cloned());
        }
        triples
    }
}

/// A freshly encoded chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedList {
    /// First cell, or `rdf:nil` for an empty list.
    pub head: Term,
    pub triples: Vec<Triple>,
}

/// Encode payloads as a new cons chain.
pub fn encode(payloads: &[Term]) -> EncodedList {
    let cells: Vec<BlankNode> = payloads.iter().map(|_| BlankNode::default()).collect();
    let mut triples = Vec::with_capacity(payloads.len() * 2);

    for (i, (cell, payload)) in cells.iter().zip(payloads).enumerate() {
        let rest = cells.get(i + 1).map_or_else(nil, |next| Term::from(next.clone()));
        triples.push(Triple::new(cell.clone(), rdf::FIRST, payload.clone()));
        triples.push(Triple::new(cell.clone(), rdf::REST, rest));
    }

    let head = cells.first().map_or_else(nil, |c| Term::from(c.clone()));
    EncodedList { head, triples }
}

/// Decode the chain starting at `head`.
///
/// Fails on a missing or duplicated `rdf:first`/`rdf:rest`, on a link that is
/// neither a blank node nor `rdf:nil`, on a revisited cell, on more than
/// `max_len` cells, and on a blank-node payload that references nothing.
pub fn decode<S: TripleStore + ?Sized>(
    store: &S,
    vocab: &SammVocab,
    head: &Term,
    max_len: usize,
) -> ListResult<DecodedChain> {
    let first = rdf::FIRST.into_owned();
    let rest = rdf::REST.into_owned();

    let mut cells = Vec::new();
    let mut visited: HashSet<BlankNode> = HashSet::new();
    let mut cursor = head.clone();

    while !is_nil(&cursor) {
        let cell = match &cursor {
            Term::BlankNode(b) => b.clone(),
            other => {
                return Err(MalformedListError::InvalidLink {
                    found: other.to_string(),
                }
                .into());
            }
        };
        if !visited.insert(cell.clone()) {
            return Err(MalformedListError::Cycle {
                cell: cell.to_string(),
            }
            .into());
        }
        if cells.len() >= max_len {
            return Err(MalformedListError::TooLong { max_len }.into());
        }

        let subject = NamedOrBlankNode::from(cell.clone());
        let payload = single_object(store, &subject, &first, &cell, Link::First)?;
        let next = single_object(store, &subject, &rest, &cell, Link::Rest)?;

        let (item, occurrence) = match &payload {
            Term::BlankNode(wrapper) => resolve_occurrence(store, vocab, wrapper)?,
            direct => (
                ListItem {
                    node: direct.clone(),
                    name: None,
                },
                Vec::new(),
            ),
        };

        cells.push(DecodedCell {
            cell,
            payload,
            rest: next.clone(),
            item,
            occurrence,
        });
        cursor = next;
    }

    tracing::trace!(head = %head, cells = cells.len(), "decoded list chain");
    Ok(DecodedChain {
        head: head.clone(),
        cells,
    })
}

#[derive(Clone, Copy)]
enum Link {
    First,
    Rest,
}

fn single_object<S: TripleStore + ?Sized>(
    store: &S,
    subject: &NamedOrBlankNode,
    predicate: &NamedNode,
    cell: &BlankNode,
    link: Link,
) -> ListResult<Term> {
    let mut objects = store.objects(subject, predicate)?;
    let cell = cell.to_string();
    match (objects.len(), link) {
        (1, _) => Ok(objects.remove(0)),
        (0, Link::First) => Err(MalformedListError::MissingFirst { cell }.into()),
        (0, Link::Rest) => Err(MalformedListError::MissingRest { cell }.into()),
        (count, Link::First) => Err(MalformedListError::AmbiguousFirst { cell, count }.into()),
        (count, Link::Rest) => Err(MalformedListError::AmbiguousRest { cell, count }.into()),
    }
}

/// Follow a wrapped occurrence to the element it references.
fn resolve_occurrence<S: TripleStore + ?Sized>(
    store: &S,
    vocab: &SammVocab,
    wrapper: &BlankNode,
) -> ListResult<(ListItem, Vec<Triple>)> {
    let subject = NamedOrBlankNode::from(wrapper.clone());
    let outgoing = store.matching(Some(&subject), None, None)?;
    let target = |predicate: &NamedNode| {
        outgoing.iter().find_map(|t| match &t.object {
            Term::NamedNode(n) if &t.predicate == predicate => Some(n.as_str().to_string()),
            _ => None,
        })
    };

    let name = target(&vocab.property)
        .or_else(|| target(&vocab.extends))
        .ok_or_else(|| MalformedListError::UnresolvedOccurrence {
            node: wrapper.to_string(),
        })?;

    Ok((
        ListItem {
            node: wrapper.clone().into(),
            name: Some(name),
        },
        outgoing,
    ))
}
