//! Relation catalog: which child kinds a source kind orders under which list.
//!
//! The catalog is a static table keyed by source [`ElementKind`]. Each entry
//! is an ordered list of `(child kind, list property)` pairs; a `None` child
//! kind is a wildcard and turns the list into a scalar-valued multiset
//! (enumeration values, structured value elements).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::element::{Candidate, ElementKind};

/// The ordered-list properties known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ListProperty {
    Properties,
    Operations,
    Events,
    Values,
    Elements,
    QuantityKinds,
    Input,
    Parameters,
}

impl ListProperty {
    pub const ALL: [ListProperty; 8] = [
        ListProperty::Properties,
        ListProperty::Operations,
        ListProperty::Events,
        ListProperty::Values,
        ListProperty::Elements,
        ListProperty::QuantityKinds,
        ListProperty::Input,
        ListProperty::Parameters,
    ];
}

impl std::fmt::Display for ListProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ListProperty::Properties => "properties",
            ListProperty::Operations => "operations",
            ListProperty::Events => "events",
            ListProperty::Values => "values",
            ListProperty::Elements => "elements",
            ListProperty::QuantityKinds => "quantityKinds",
            ListProperty::Input => "input",
            ListProperty::Parameters => "parameters",
        };
        f.write_str(name)
    }
}

/// One permitted child relation of a source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEntry {
    /// `None` accepts any element and any scalar.
    pub child: Option<ElementKind>,
    pub property: ListProperty,
}

impl RelationEntry {
    const fn of(child: ElementKind, property: ListProperty) -> Self {
        Self {
            child: Some(child),
            property,
        }
    }

    const fn any(property: ListProperty) -> Self {
        Self {
            child: None,
            property,
        }
    }

    /// Whether a candidate fits this entry.
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        match (self.child, candidate.kind()) {
            (None, _) => true,
            (Some(expected), Some(kind)) => expected == kind,
            (Some(_), None) => false,
        }
    }
}

/// Child kinds accepted by one (source kind, list property) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFilter {
    kinds: Vec<ElementKind>,
    wildcard: bool,
}

impl TypeFilter {
    pub fn accepts(&self, candidate: &Candidate) -> bool {
        if self.wildcard {
            return true;
        }
        candidate.kind().is_some_and(|k| self.kinds.contains(&k))
    }

    /// Scalar-valued lists keep duplicates and accept raw values.
    pub fn is_scalar_valued(&self) -> bool {
        self.wildcard
    }

    pub fn kinds(&self) -> &[ElementKind] {
        &self.kinds
    }
}

/// Static table of list relations, keyed by source kind.
#[derive(Debug, Clone, Default)]
pub struct RelationCatalog {
    relations: HashMap<ElementKind, Vec<RelationEntry>>,
}

impl RelationCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The SAMM meta-model relations.
    pub fn standard() -> Self {
        use ElementKind as K;
        use ListProperty as L;

        let member_properties = vec![
            RelationEntry::of(K::Property, L::Properties),
            RelationEntry::of(K::AbstractProperty, L::Properties),
        ];

        Self::new()
            .with(
                K::Aspect,
                vec![
                    RelationEntry::of(K::Property, L::Properties),
                    RelationEntry::of(K::Operation, L::Operations),
                    RelationEntry::of(K::Event, L::Events),
                ],
            )
            .with(K::Entity, member_properties.clone())
            .with(K::AbstractEntity, member_properties)
            .with(K::Operation, vec![RelationEntry::of(K::Property, L::Input)])
            .with(K::Event, vec![RelationEntry::of(K::Property, L::Parameters)])
            .with(K::Enumeration, vec![RelationEntry::any(L::Values)])
            .with(K::State, vec![RelationEntry::any(L::Values)])
            .with(K::StructuredValue, vec![RelationEntry::any(L::Elements)])
            .with(
                K::Unit,
                vec![RelationEntry::of(K::QuantityKind, L::QuantityKinds)],
            )
    }

    /// Register (or replace) the relations of a source kind.
    pub fn with(mut self, source: ElementKind, entries: Vec<RelationEntry>) -> Self {
        self.relations.insert(source, entries);
        self
    }

    /// Ordered relations of a source kind; empty when none are defined.
    pub fn children(&self, source: ElementKind) -> &[RelationEntry] {
        self.relations.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First list property under which `candidate` may be ordered.
    pub fn resolve_predicate(
        &self,
        source: ElementKind,
        candidate: &Candidate,
    ) -> Option<ListProperty> {
        self.children(source)
            .iter()
            .find(|entry| entry.accepts(candidate))
            .map(|entry| entry.property)
    }

    /// Child kinds declared for `source` under `property`.
    pub fn type_filter(&self, source: ElementKind, property: ListProperty) -> TypeFilter {
        let mut kinds = Vec::new();
        let mut wildcard = false;
        for entry in self.children(source).iter().filter(|e| e.property == property) {
            match entry.child {
                Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
                Some(_) => {}
                None => wildcard = true,
            }
        }
        TypeFilter { kinds, wildcard }
    }

    /// Whether `source` orders anything under `property`.
    pub fn supports(&self, source: ElementKind, property: ListProperty) -> bool {
        self.children(source).iter().any(|e| e.property == property)
    }
}
