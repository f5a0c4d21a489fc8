//! Typed Aspect Model elements as handed to the list engine.
//!
//! The editing layer supplies already-typed elements: every element carries
//! a URN and an [`ElementKind`]; sources additionally carry a per-property
//! occurrence configuration map. Raw scalars (enumeration values, structured
//! value parts) travel as [`Scalar`].

use std::collections::BTreeMap;

use oxigraph::model::{Literal, NamedNode};
use serde::{Deserialize, Serialize};

use crate::error::{ListError, ListResult};

/// Closed set of SAMM element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementKind {
    Aspect,
    Entity,
    AbstractEntity,
    Property,
    AbstractProperty,
    Operation,
    Event,
    Characteristic,
    Enumeration,
    State,
    StructuredValue,
    Constraint,
    Trait,
    EntityInstance,
    Unit,
    QuantityKind,
}

impl ElementKind {
    /// Property-like kinds may appear as wrapped occurrences.
    pub fn is_property(self) -> bool {
        matches!(self, ElementKind::Property | ElementKind::AbstractProperty)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Per-occurrence settings for a property used inside a source element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceConfig {
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub not_in_payload: bool,
    #[serde(default)]
    pub payload_name: Option<String>,
}

impl OccurrenceConfig {
    /// Whether any setting deviates from a bare reference.
    pub fn is_set(&self) -> bool {
        self.optional || self.not_in_payload || self.payload_name.is_some()
    }
}

/// A typed model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelElement {
    pub urn: String,
    pub kind: ElementKind,
    /// Element this one inherits from / overrides.
    #[serde(default)]
    pub extends: Option<String>,
    /// Characteristic override carried alongside `extends`.
    #[serde(default)]
    pub characteristic: Option<String>,
    /// Occurrence settings of child properties, keyed by property URN.
    #[serde(default)]
    pub occurrences: BTreeMap<String, OccurrenceConfig>,
}

impl ModelElement {
    pub fn new(urn: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            urn: urn.into(),
            kind,
            extends: None,
            characteristic: None,
            occurrences: BTreeMap::new(),
        }
    }

    /// Declare an inheritance/override relation.
    pub fn extending(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    /// Set the characteristic carried by an override.
    pub fn with_characteristic(mut self, characteristic: impl Into<String>) -> Self {
        self.characteristic = Some(characteristic.into());
        self
    }

    /// Configure how a child property occurs inside this element.
    pub fn with_occurrence(
        mut self,
        property: impl Into<String>,
        config: OccurrenceConfig,
    ) -> Self {
        self.occurrences.insert(property.into(), config);
        self
    }

    /// Occurrence settings for a child, if any are set.
    pub fn occurrence_of(&self, child: &str) -> Option<&OccurrenceConfig> {
        self.occurrences.get(child).filter(|c| c.is_set())
    }

    /// The element's URN as a named node.
    pub fn named_node(&self) -> ListResult<NamedNode> {
        named_node(&self.urn)
    }
}

/// Parse a URN into a named node.
pub fn named_node(iri: &str) -> ListResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| ListError::InvalidIri {
        iri: iri.to_string(),
        message: e.to_string(),
    })
}

/// A raw scalar list member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    /// JSON numbers with a fraction; stored as `xsd:double`.
    Double(f64),
    Text(String),
}

impl Scalar {
    /// Typed literal for this scalar.
    pub fn to_literal(&self) -> Literal {
        match self {
            Scalar::Boolean(b) => Literal::from(*b),
            Scalar::Integer(i) => Literal::from(*i),
            Scalar::Double(d) => Literal::from(*d),
            Scalar::Text(s) => Literal::new_simple_literal(s.as_str()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(d: f64) -> Self {
        Scalar::Double(d)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// One entry of a push/remove batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Element(ModelElement),
    Scalar(Scalar),
}

impl Candidate {
    /// Kind of the element, `None` for scalars.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Candidate::Element(e) => Some(e.kind),
            Candidate::Scalar(_) => None,
        }
    }

    /// Stable key used for duplicate detection and removal matching.
    pub fn identity(&self) -> IdentityKey {
        match self {
            Candidate::Element(e) => IdentityKey::Resource(e.urn.clone()),
            Candidate::Scalar(s) => IdentityKey::Value(s.to_literal()),
        }
    }
}

impl From<ModelElement> for Candidate {
    fn from(e: ModelElement) -> Self {
        Candidate::Element(e)
    }
}

impl From<Scalar> for Candidate {
    fn from(s: Scalar) -> Self {
        Candidate::Scalar(s)
    }
}

/// Identity of a list member: URN for resources, the literal for scalars.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Resource(String),
    Value(Literal),
}

/// Parse a JSON batch of candidates as produced by the editing layer.
pub fn candidates_from_json(json: &str) -> Result<Vec<Candidate>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrence_config_is_set() {
        assert!(!OccurrenceConfig::default().is_set());
        let optional = OccurrenceConfig {
            optional: true,
            ..Default::default()
        };
        assert!(optional.is_set());
    }

    #[test]
    fn unset_occurrences_are_ignored() {
        let entity = ModelElement::new("urn:ex#E", ElementKind::Entity)
            .with_occurrence("urn:ex#p", OccurrenceConfig::default());
        assert!(entity.occurrence_of("urn:ex#p").is_none());
    }

    #[test]
    fn scalar_literals_are_typed() {
        assert_eq!(Scalar::Integer(7).to_literal().value(), "7");
        assert_eq!(
            Scalar::Boolean(true).to_literal().datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#boolean"
        );
        assert_eq!(
            Scalar::from("red").to_literal().datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
    }

    #[test]
    fn fractional_numbers_are_doubles() {
        let batch = candidates_from_json("[2.5]").unwrap();
        assert_eq!(batch[0], Candidate::Scalar(Scalar::Double(2.5)));
        assert_eq!(
            Scalar::from(2.5).to_literal().datatype().as_str(),
            "http://www.w3.org/2001/XMLSchema#double"
        );
    }

    #[test]
    fn identity_distinguishes_datatypes() {
        let text = Candidate::from(Scalar::from("1"));
        let number = Candidate::from(Scalar::Integer(1));
        assert_ne!(text.identity(), number.identity());
    }

    #[test]
    fn parses_mixed_json_batch() {
        let batch = candidates_from_json(
            r#"[
                {"urn": "urn:ex#p1", "kind": "Property"},
                {"urn": "urn:ex#p2", "kind": "Property", "extends": "urn:ex#base"},
                "green",
                42,
                true
            ]"#,
        )
        .unwrap();
        assert_eq!(batch.len(), 5);
        assert_eq!(batch[0].kind(), Some(ElementKind::Property));
        match &batch[1] {
            Candidate::Element(e) => assert_eq!(e.extends.as_deref(), Some("urn:ex#base")),
            other => panic!("expected element, got {other:?}"),
        }
        assert_eq!(batch[2], Candidate::Scalar(Scalar::Text("green".into())));
        assert_eq!(batch[3], Candidate::Scalar(Scalar::Integer(42)));
        assert_eq!(batch[4], Candidate::Scalar(Scalar::Boolean(true)));
    }

    #[test]
    fn rejects_non_iri_urn() {
        let e = ModelElement::new("not an iri", ElementKind::Property);
        assert!(matches!(e.named_node(), Err(ListError::InvalidIri { .. })));
    }
}
