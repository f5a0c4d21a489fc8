//! Configuration persistence and store hand-off tests.
//!
//! These tests verify that an engine built from a saved TOML config writes
//! the configured SAMM namespace, and that lists written through
//! [`OxigraphStore`] are visible to whoever owns the underlying oxigraph
//! store (e.g. an external serializer).

use oxigraph::model::vocab::rdf;
use oxigraph::model::{BlankNode, GraphNameRef, Literal, NamedNode, NamedNodeRef, QuadRef};
use oxigraph::store::Store;

use aspect_rdf_list::catalog::ListProperty;
use aspect_rdf_list::config::EngineConfig;
use aspect_rdf_list::element::{Candidate, ElementKind, ModelElement, Scalar};
use aspect_rdf_list::error::{ConfigError, ListError};
use aspect_rdf_list::list::ListEngine;
use aspect_rdf_list::store::{OxigraphStore, TripleStore};

fn engine_from(dir: &std::path::Path) -> ListEngine {
    let path = dir.join("engine.toml");
    ListEngine::new(EngineConfig::load(&path).unwrap()).unwrap()
}

#[test]
fn engine_uses_configured_namespace() {
    let dir = tempfile::TempDir::new().unwrap();
    EngineConfig {
        samm_version: "2.0.0".into(),
        max_list_length: 32,
    }
    .save(&dir.path().join("engine.toml"))
    .unwrap();

    let engine = engine_from(dir.path());
    assert_eq!(engine.config().max_list_length, 32);

    let mut store = OxigraphStore::in_memory().unwrap();
    let aspect = ModelElement::new("urn:samm:org.example:1.0.0#A", ElementKind::Aspect);
    let p = ModelElement::new("urn:samm:org.example:1.0.0#p", ElementKind::Property);
    engine
        .push(&mut store, &aspect, &[Candidate::from(p)])
        .unwrap();

    let predicate =
        NamedNode::new("urn:samm:org.eclipse.esmf.samm:meta-model:2.0.0#properties").unwrap();
    let heads = store.matching(None, Some(&predicate), None).unwrap();
    assert_eq!(heads.len(), 1);
}

#[test]
fn invalid_config_is_rejected_by_engine() {
    let config = EngineConfig {
        max_list_length: 0,
        ..Default::default()
    };
    assert!(matches!(
        ListEngine::new(config),
        Err(ListError::Config(ConfigError::Invalid { .. }))
    ));
}

#[test]
fn lists_in_a_handed_over_store_are_readable() {
    let engine = ListEngine::new(EngineConfig::default()).unwrap();
    let raw = Store::new().unwrap();

    // (:Colors samm-c:values ( "red" )) written by someone else.
    let colors = NamedNodeRef::new("urn:samm:org.example:1.0.0#Colors").unwrap();
    let values = engine.vocab().values.clone();
    let cell = BlankNode::default();
    let red = Literal::new_simple_literal("red");
    for quad in [
        QuadRef::new(colors, values.as_ref(), cell.as_ref(), GraphNameRef::DefaultGraph),
        QuadRef::new(cell.as_ref(), rdf::FIRST, red.as_ref(), GraphNameRef::DefaultGraph),
        QuadRef::new(cell.as_ref(), rdf::REST, rdf::NIL, GraphNameRef::DefaultGraph),
    ] {
        raw.insert(quad).unwrap();
    }

    let mut store = OxigraphStore::from_store(raw);
    let enumeration = ModelElement::new(colors.as_str(), ElementKind::Enumeration);
    engine
        .push(&mut store, &enumeration, &[Candidate::from(Scalar::from("green"))])
        .unwrap();

    let items = engine
        .get_elements(&store, colors.as_str(), ListProperty::Values)
        .unwrap();
    let values: Vec<String> = items.iter().map(|i| i.node.to_string()).collect();
    assert_eq!(values, vec!["\"red\"", "\"green\""]);
    // head + 2 cells
    assert_eq!(store.store().len().unwrap(), 5);
}
