//! Element resolver: how a candidate becomes a list payload.
//!
//! A candidate is either rejected (wrong kind for the list), referenced
//! directly (named node or typed literal), or wrapped in a fresh blank node
//! that points at the element and carries occurrence metadata:
//!
//! ```text
//! [ samm:property :speed ; samm:optional true ; samm:payloadName "v" ]
//! ```

use oxigraph::model::{BlankNode, Literal, Term, Triple};

use crate::catalog::TypeFilter;
use crate::element::{Candidate, ElementKind, ModelElement, named_node};
use crate::error::ListResult;
use crate::vocab::SammVocab;

/// Classification of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Wrap,
    Reference,
    Reject(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Element kind not declared for this list.
    IncompatibleKind(ElementKind),
    /// Raw value offered to a list of elements.
    ScalarNotAllowed,
}

/// Candidates split by resolution, each bucket in input order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub to_wrap: Vec<&'a ModelElement>,
    pub to_reference: Vec<&'a Candidate>,
    pub rejected: Vec<(&'a Candidate, Rejection)>,
}

/// A payload ready to be placed in a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPayload {
    pub payload: Term,
    /// Triples of the wrapper blank node; empty for direct references.
    pub occurrence: Vec<Triple>,
}

/// Classifies and materializes candidates for one source element.
#[derive(Debug, Clone, Copy)]
pub struct ElementResolver<'v> {
    vocab: &'v SammVocab,
}

impl<'v> ElementResolver<'v> {
    pub fn new(vocab: &'v SammVocab) -> Self {
        Self { vocab }
    }

    pub fn classify(
        &self,
        source: &ModelElement,
        filter: &TypeFilter,
        candidate: &Candidate,
    ) -> Resolution {
        if !filter.accepts(candidate) {
            return Resolution::Reject(match candidate {
                Candidate::Element(e) => Rejection::IncompatibleKind(e.kind),
                Candidate::Scalar(_) => Rejection::ScalarNotAllowed,
            });
        }
        match candidate {
            Candidate::Element(e) if needs_wrapper(source, e) => Resolution::Wrap,
            _ => Resolution::Reference,
        }
    }

    pub fn partition<'a>(
        &self,
        source: &ModelElement,
        filter: &TypeFilter,
        candidates: &'a [Candidate],
    ) -> Partition<'a> {
        let mut partition = Partition::default();
        for candidate in candidates {
            match (self.classify(source, filter, candidate), candidate) {
                (Resolution::Wrap, Candidate::Element(e)) => partition.to_wrap.push(e),
                (Resolution::Reject(reason), _) => partition.rejected.push((candidate, reason)),
                _ => partition.to_reference.push(candidate),
            }
        }
        partition
    }

    /// Build the payload term (and wrapper triples) for an accepted candidate.
    pub fn materialize(
        &self,
        source: &ModelElement,
        candidate: &Candidate,
        resolution: Resolution,
    ) -> ListResult<ResolvedPayload> {
        match (candidate, resolution) {
            (Candidate::Element(e), Resolution::Wrap) => self.wrap(source, e),
            (Candidate::Element(e), _) => Ok(ResolvedPayload {
                payload: e.named_node()?.into(),
                occurrence: Vec::new(),
            }),
            (Candidate::Scalar(s), _) => Ok(ResolvedPayload {
                payload: s.to_literal().into(),
                occurrence: Vec::new(),
            }),
        }
    }

    fn wrap(&self, source: &ModelElement, element: &ModelElement) -> ListResult<ResolvedPayload> {
        let vocab = self.vocab;
        let wrapper = BlankNode::default();
        let mut occurrence = vec![Triple::new(
            wrapper.clone(),
            vocab.property.clone(),
            element.named_node()?,
        )];

        if let Some(config) = source.occurrence_of(&element.urn) {
            if config.optional {
                occurrence.push(Triple::new(
                    wrapper.clone(),
                    vocab.optional.clone(),
                    Literal::from(true),
                ));
            }
            if config.not_in_payload {
                occurrence.push(Triple::new(
                    wrapper.clone(),
                    vocab.not_in_payload.clone(),
                    Literal::from(true),
                ));
            }
            if let Some(name) = &config.payload_name {
                occurrence.push(Triple::new(
                    wrapper.clone(),
                    vocab.payload_name.clone(),
                    Literal::new_simple_literal(name.as_str()),
                ));
            }
        }
        if let Some(base) = &element.extends {
            occurrence.push(Triple::new(
                wrapper.clone(),
                vocab.extends.clone(),
                named_node(base)?,
            ));
        }
        if let Some(characteristic) = &element.characteristic {
            occurrence.push(Triple::new(
                wrapper.clone(),
                vocab.characteristic.clone(),
                named_node(characteristic)?,
            ));
        }

        Ok(ResolvedPayload {
            payload: wrapper.into(),
            occurrence,
        })
    }
}

fn needs_wrapper(source: &ModelElement, element: &ModelElement) -> bool {
    element.kind.is_property()
        && (source.occurrence_of(&element.urn).is_some() || element.extends.is_some())
}
