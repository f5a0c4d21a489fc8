//! Ordered lists over an unordered triple store.
//!
//! A list hangs off a `(subject, predicate)` head triple and is encoded as a
//! chain of blank-node cons cells (`rdf:first` / `rdf:rest`) ending in
//! `rdf:nil`:
//!
//! - [`codec`] decodes and encodes chains
//! - [`resolver`] decides how each candidate becomes a payload
//! - [`engine`] orchestrates push / remove / empty / create / read
//!
//! Every mutation rebuilds the whole chain; nothing is patched in place.

pub mod codec;
pub mod engine;
pub mod resolver;

use oxigraph::model::Term;

use crate::catalog::ListProperty;
use crate::element::IdentityKey;

pub use codec::{DecodedCell, DecodedChain, EncodedList};
pub use engine::ListEngine;
pub use resolver::{ElementResolver, Partition, Rejection, Resolution, ResolvedPayload};

/// One decoded list element.
///
/// `node` is the cell's `rdf:first` object as stored. For wrapped occurrences
/// that is a blank node and `name` carries the URN of the referenced element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListItem {
    pub node: Term,
    pub name: Option<String>,
}

impl ListItem {
    /// Whether the payload is a wrapped occurrence.
    pub fn is_wrapped(&self) -> bool {
        matches!(self.node, Term::BlankNode(_))
    }

    /// Key used for duplicate suppression and removal matching.
    pub fn identity(&self) -> IdentityKey {
        if let Some(name) = &self.name {
            return IdentityKey::Resource(name.clone());
        }
        match &self.node {
            Term::NamedNode(n) => IdentityKey::Resource(n.as_str().to_string()),
            Term::Literal(l) => IdentityKey::Value(l.clone()),
            other => IdentityKey::Resource(other.to_string()),
        }
    }

    /// URN of the element this item refers to, if it refers to one.
    pub fn urn(&self) -> Option<&str> {
        match (&self.name, &self.node) {
            (Some(name), _) => Some(name),
            (None, Term::NamedNode(n)) => Some(n.as_str()),
            _ => None,
        }
    }
}

/// What a mutating call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Updated(ListUpdate),
    Unchanged(NoOp),
}

impl ListOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, ListOutcome::Updated(_))
    }

    pub fn no_op(&self) -> Option<NoOp> {
        match self {
            ListOutcome::Unchanged(reason) => Some(*reason),
            ListOutcome::Updated(_) => None,
        }
    }

    pub fn update(&self) -> Option<&ListUpdate> {
        match self {
            ListOutcome::Updated(update) => Some(update),
            ListOutcome::Unchanged(_) => None,
        }
    }
}

/// Summary of a rewritten list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUpdate {
    pub property: ListProperty,
    /// Length after the update.
    pub len: usize,
    pub added: usize,
    pub removed: usize,
    /// The head triple did not exist before this call.
    pub head_created: bool,
}

/// Why a call left the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoOp {
    /// No catalog relation accepts any of the candidates.
    UnresolvableRelation,
    /// Every accepted candidate is already in the list.
    NothingNew,
    /// None of the candidates is in the list.
    NothingRemoved,
    /// The subject has no head for this list.
    ListAbsent,
    /// The head already points at `rdf:nil`.
    AlreadyEmpty,
}

impl std::fmt::Display for NoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoOp::UnresolvableRelation => "no relation for candidates",
            NoOp::NothingNew => "nothing new to add",
            NoOp::NothingRemoved => "nothing to remove",
            NoOp::ListAbsent => "list absent",
            NoOp::AlreadyEmpty => "list already empty",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{BlankNode, Literal, NamedNode};

    #[test]
    fn wrapped_items_use_name_as_identity() {
        let item = ListItem {
            node: BlankNode::default().into(),
            name: Some("urn:ex#p".into()),
        };
        assert!(item.is_wrapped());
        assert_eq!(item.identity(), IdentityKey::Resource("urn:ex#p".into()));
        assert_eq!(item.urn(), Some("urn:ex#p"));
    }

    #[test]
    fn direct_items_use_node_as_identity() {
        let named = ListItem {
            node: NamedNode::new_unchecked("urn:ex#q").into(),
            name: None,
        };
        assert_eq!(named.identity(), IdentityKey::Resource("urn:ex#q".into()));

        let literal = Literal::new_simple_literal("red");
        let value = ListItem {
            node: literal.clone().into(),
            name: None,
        };
        assert_eq!(value.identity(), IdentityKey::Value(literal));
        assert_eq!(value.urn(), None);
    }

    #[test]
    fn outcome_accessors() {
        let unchanged = ListOutcome::Unchanged(NoOp::ListAbsent);
        assert!(!unchanged.is_updated());
        assert_eq!(unchanged.no_op(), Some(NoOp::ListAbsent));
        assert!(unchanged.update().is_none());
    }
}
