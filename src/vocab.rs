//! SAMM vocabulary: the namespace IRIs the engine reads and writes.
//!
//! RDF list terms (`rdf:first`, `rdf:rest`, `rdf:nil`) come from
//! `oxigraph::model::vocab::rdf`; everything SAMM-specific is built here for
//! the configured meta-model version.

use oxigraph::model::NamedNode;

use crate::catalog::ListProperty;
use crate::error::ConfigError;

const SAMM_PREFIX: &str = "urn:samm:org.eclipse.esmf.samm:meta-model:";
const SAMM_C_PREFIX: &str = "urn:samm:org.eclipse.esmf.samm:characteristic:";

/// Named nodes for one SAMM meta-model version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SammVocab {
    version: String,
    samm: String,
    samm_c: String,

    pub properties: NamedNode,
    pub operations: NamedNode,
    pub events: NamedNode,
    pub input: NamedNode,
    pub parameters: NamedNode,
    pub quantity_kinds: NamedNode,
    pub values: NamedNode,
    pub elements: NamedNode,

    /// Points-to predicate of a wrapped occurrence.
    pub property: NamedNode,
    pub optional: NamedNode,
    pub not_in_payload: NamedNode,
    pub payload_name: NamedNode,
    pub extends: NamedNode,
    pub characteristic: NamedNode,
}

impl SammVocab {
    /// Build the vocabulary for a version such as `"2.1.0"`.
    pub fn new(version: &str) -> Result<Self, ConfigError> {
        let samm = format!("{SAMM_PREFIX}{version}#");
        let samm_c = format!("{SAMM_C_PREFIX}{version}#");
        let term = |ns: &str, local: &str| {
            NamedNode::new(format!("{ns}{local}")).map_err(|e| ConfigError::Invalid {
                message: format!("SAMM version \"{version}\" yields an invalid IRI: {e}"),
            })
        };

        Ok(Self {
            properties: term(&samm, "properties")?,
            operations: term(&samm, "operations")?,
            events: term(&samm, "events")?,
            input: term(&samm, "input")?,
            parameters: term(&samm, "parameters")?,
            quantity_kinds: term(&samm, "quantityKinds")?,
            values: term(&samm_c, "values")?,
            elements: term(&samm_c, "elements")?,
            property: term(&samm, "property")?,
            optional: term(&samm, "optional")?,
            not_in_payload: term(&samm, "notInPayload")?,
            payload_name: term(&samm, "payloadName")?,
            extends: term(&samm, "extends")?,
            characteristic: term(&samm, "characteristic")?,
            version: version.to_string(),
            samm,
            samm_c,
        })
    }

    /// Predicate carrying the head of the given list.
    pub fn predicate(&self, key: ListProperty) -> &NamedNode {
        match key {
            ListProperty::Properties => &self.properties,
            ListProperty::Operations => &self.operations,
            ListProperty::Events => &self.events,
            ListProperty::Input => &self.input,
            ListProperty::Parameters => &self.parameters,
            ListProperty::QuantityKinds => &self.quantity_kinds,
            ListProperty::Values => &self.values,
            ListProperty::Elements => &self.elements,
        }
    }

    /// Reverse lookup of [`predicate`](Self::predicate).
    pub fn list_property(&self, predicate: &NamedNode) -> Option<ListProperty> {
        ListProperty::ALL
            .into_iter()
            .find(|key| self.predicate(*key) == predicate)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `samm:` namespace IRI, ending in `#`.
    pub fn samm_namespace(&self) -> &str {
        &self.samm
    }

    /// `samm-c:` namespace IRI, ending in `#`.
    pub fn characteristic_namespace(&self) -> &str {
        &self.samm_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_versioned_iris() {
        let vocab = SammVocab::new("2.1.0").unwrap();
        assert_eq!(
            vocab.properties.as_str(),
            "urn:samm:org.eclipse.esmf.samm:meta-model:2.1.0#properties"
        );
        assert_eq!(
            vocab.values.as_str(),
            "urn:samm:org.eclipse.esmf.samm:characteristic:2.1.0#values"
        );
        assert_eq!(vocab.version(), "2.1.0");
    }

    #[test]
    fn predicate_lookup_roundtrips() {
        let vocab = SammVocab::new("2.0.0").unwrap();
        for key in ListProperty::ALL {
            assert_eq!(vocab.list_property(vocab.predicate(key)), Some(key));
        }
        assert_eq!(vocab.list_property(&vocab.optional), None);
    }
}
