// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # aspect-rdf-list
//!
//! Ordered, de-duplicated sequences for SAMM Aspect Models, stored as classic
//! RDF lists (`rdf:first` / `rdf:rest` / `rdf:nil`) in a triple store.
//!
//! ## Architecture
//!
//! - **Relation catalog** (`catalog`): which child kinds a source orders under which list
//! - **List codec** (`list::codec`): cons chains to ordered items and back, with cycle guards
//! - **Element resolver** (`list::resolver`): direct references vs. wrapped occurrences
//! - **List engine** (`list::engine`): push / remove / empty / create / read
//! - **Stores** (`store`): oxigraph-backed and in-memory [`store::TripleStore`]s
//! - **Sessions** (`session`): one store per open document, single writer each
//!
//! ## Library usage
//!
//! ```no_run
//! use aspect_rdf_list::config::EngineConfig;
//! use aspect_rdf_list::element::{Candidate, ElementKind, ModelElement};
//! use aspect_rdf_list::list::ListEngine;
//! use aspect_rdf_list::store::OxigraphStore;
//! use aspect_rdf_list::catalog::ListProperty;
//!
//! let engine = ListEngine::new(EngineConfig::default()).unwrap();
//! let mut store = OxigraphStore::in_memory().unwrap();
//! let aspect = ModelElement::new("urn:samm:com.example:1.0.0#Movement", ElementKind::Aspect);
//! let speed = ModelElement::new("urn:samm:com.example:1.0.0#speed", ElementKind::Property);
//! engine.push(&mut store, &aspect, &[Candidate::from(speed)]).unwrap();
//! let items = engine
//!     .get_elements(&store, &aspect.urn, ListProperty::Properties)
//!     .unwrap();
//! assert_eq!(items.len(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod element;
pub mod error;
pub mod list;
pub mod session;
pub mod store;
pub mod vocab;
