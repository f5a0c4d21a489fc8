//! Document session: named open models, each with its own triple store.
//!
//! The session is the single owner through which all list mutations of a
//! document pass. Operations target the current document and fail with
//! [`ListError::NoCurrentDocument`] when none is selected; the session never
//! falls back to another document.

use std::collections::BTreeMap;

use crate::catalog::ListProperty;
use crate::element::{Candidate, ModelElement};
use crate::error::{ListError, ListResult};
use crate::list::{ListEngine, ListItem, ListOutcome};
use crate::store::TripleStore;

/// Open documents plus the engine that edits them.
#[derive(Debug)]
pub struct DocumentSession<S: TripleStore> {
    engine: ListEngine,
    documents: BTreeMap<String, S>,
    current: Option<String>,
}

impl<S: TripleStore> DocumentSession<S> {
    pub fn new(engine: ListEngine) -> Self {
        Self {
            engine,
            documents: BTreeMap::new(),
            current: None,
        }
    }

    pub fn engine(&self) -> &ListEngine {
        &self.engine
    }

    /// Open (or replace) a document and make it current.
    ///
    /// Returns the store previously registered under the same name.
    pub fn open(&mut self, name: impl Into<String>, store: S) -> Option<S> {
        let name = name.into();
        tracing::debug!(document = %name, "opening document");
        let previous = self.documents.insert(name.clone(), store);
        self.current = Some(name);
        previous
    }

    /// Close a document, handing its store back. Clears the current
    /// selection if it pointed at this document.
    pub fn close(&mut self, name: &str) -> ListResult<S> {
        let store = self
            .documents
            .remove(name)
            .ok_or_else(|| ListError::UnknownDocument {
                name: name.to_string(),
            })?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        tracing::debug!(document = %name, "closed document");
        Ok(store)
    }

    pub fn switch_to(&mut self, name: &str) -> ListResult<()> {
        if !self.documents.contains_key(name) {
            return Err(ListError::UnknownDocument {
                name: name.to_string(),
            });
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn document_names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn current(&self) -> ListResult<&S> {
        self.current
            .as_ref()
            .and_then(|name| self.documents.get(name))
            .ok_or(ListError::NoCurrentDocument)
    }

    pub fn current_mut(&mut self) -> ListResult<&mut S> {
        self.current
            .as_ref()
            .and_then(|name| self.documents.get_mut(name))
            .ok_or(ListError::NoCurrentDocument)
    }

    pub fn push(
        &mut self,
        source: &ModelElement,
        candidates: &[Candidate],
    ) -> ListResult<ListOutcome> {
        let (engine, store) = self.split()?;
        engine.push(store, source, candidates)
    }

    pub fn remove(
        &mut self,
        source: &ModelElement,
        candidates: &[Candidate],
    ) -> ListResult<ListOutcome> {
        let (engine, store) = self.split()?;
        engine.remove(store, source, candidates)
    }

    pub fn empty_list(&mut self, subject: &str, key: ListProperty) -> ListResult<ListOutcome> {
        let (engine, store) = self.split()?;
        engine.empty_list(store, subject, key)
    }

    pub fn create_empty(&mut self, subject: &str, key: ListProperty) -> ListResult<ListOutcome> {
        let (engine, store) = self.split()?;
        engine.create_empty(store, subject, key)
    }

    pub fn get_elements(&self, subject: &str, key: ListProperty) -> ListResult<Vec<ListItem>> {
        self.engine.get_elements(self.current()?, subject, key)
    }

    fn split(&mut self) -> ListResult<(&ListEngine, &mut S)> {
        let store = self
            .current
            .as_ref()
            .and_then(|name| self.documents.get_mut(name))
            .ok_or(ListError::NoCurrentDocument)?;
        Ok((&self.engine, store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::element::ElementKind;
    use crate::store::MemTripleStore;

    fn session() -> DocumentSession<MemTripleStore> {
        DocumentSession::new(ListEngine::new(EngineConfig::default()).unwrap())
    }

    fn property(local: &str) -> Candidate {
        Candidate::from(ModelElement::new(format!("urn:ex#{local}"), ElementKind::Property))
    }

    #[test]
    fn operations_require_a_current_document() {
        let mut session = session();
        let aspect = ModelElement::new("urn:ex#A", ElementKind::Aspect);
        assert!(matches!(
            session.push(&aspect, &[property("p")]),
            Err(ListError::NoCurrentDocument)
        ));
        assert!(matches!(
            session.get_elements("urn:ex#A", ListProperty::Properties),
            Err(ListError::NoCurrentDocument)
        ));
    }

    #[test]
    fn edits_go_to_the_current_document_only() {
        let mut session = session();
        let aspect = ModelElement::new("urn:ex#A", ElementKind::Aspect);
        session.open("first", MemTripleStore::new());
        session.push(&aspect, &[property("p")]).unwrap();

        session.open("second", MemTripleStore::new());
        assert!(session
            .get_elements("urn:ex#A", ListProperty::Properties)
            .unwrap()
            .is_empty());

        session.switch_to("first").unwrap();
        assert_eq!(
            session
                .get_elements("urn:ex#A", ListProperty::Properties)
                .unwrap()
                .len(),
            1
        );
        let names: Vec<&str> = session.document_names().collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn closing_the_current_document_clears_selection() {
        let mut session = session();
        session.open("doc", MemTripleStore::new());
        assert_eq!(session.current_name(), Some("doc"));
        let store = session.close("doc").unwrap();
        assert!(store.is_empty().unwrap());
        assert_eq!(session.current_name(), None);
        assert!(matches!(session.current(), Err(ListError::NoCurrentDocument)));
        assert!(matches!(
            session.close("doc"),
            Err(ListError::UnknownDocument { .. })
        ));
    }

    #[test]
    fn switching_to_unknown_document_fails() {
        let mut session = session();
        assert!(matches!(
            session.switch_to("ghost"),
            Err(ListError::UnknownDocument { .. })
        ));
    }
}
