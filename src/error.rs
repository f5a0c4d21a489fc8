//! Rich diagnostic error types for the list engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Resolution failures (no matching
//! predicate, incompatible candidate) are *not* errors: they surface as
//! [`NoOp`](crate::list::NoOp) outcomes. Only structural corruption, backend
//! failures, and missing preconditions end up here.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for list operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ListError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Malformed(#[from] MalformedListError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid IRI \"{iri}\": {message}")]
    #[diagnostic(
        code(aspect::list::invalid_iri),
        help(
            "Element identifiers must be absolute IRIs, e.g. \
             `urn:samm:com.example:1.0.0#myProperty`."
        )
    )]
    InvalidIri { iri: String, message: String },

    #[error("no current document")]
    #[diagnostic(
        code(aspect::list::no_document),
        help("Open a document with `DocumentSession::open` before editing lists.")
    )]
    NoCurrentDocument,

    #[error("document \"{name}\" is not open")]
    #[diagnostic(
        code(aspect::list::unknown_document),
        help("List open documents with `DocumentSession::document_names`.")
    )]
    UnknownDocument { name: String },

    #[error("push would grow the list to {len} cells, above the limit of {max_len}")]
    #[diagnostic(
        code(aspect::list::list_full),
        help(
            "Remove entries first, or raise `max_list_length` in the engine config. \
             The list was left unchanged."
        )
    )]
    ListFull { len: usize, max_len: usize },
}

// ---------------------------------------------------------------------------
// Malformed chains
// ---------------------------------------------------------------------------

/// Structural corruption found while walking an RDF list.
///
/// Raised before any write happens, so the store is unchanged when a caller
/// sees one of these.
#[derive(Debug, Error, Diagnostic)]
pub enum MalformedListError {
    #[error("list cell {cell} has no rdf:first")]
    #[diagnostic(
        code(aspect::list::missing_first),
        help("Every list cell needs exactly one rdf:first triple pointing to its element.")
    )]
    MissingFirst { cell: String },

    #[error("list cell {cell} has no rdf:rest")]
    #[diagnostic(
        code(aspect::list::missing_rest),
        help("Every list cell needs exactly one rdf:rest triple, pointing to the next cell or rdf:nil.")
    )]
    MissingRest { cell: String },

    #[error("list cell {cell} has {count} rdf:first triples")]
    #[diagnostic(
        code(aspect::list::ambiguous_first),
        help("A list cell must carry a single element. Remove the extra rdf:first triples.")
    )]
    AmbiguousFirst { cell: String, count: usize },

    #[error("list cell {cell} has {count} rdf:rest triples")]
    #[diagnostic(
        code(aspect::list::ambiguous_rest),
        help("A list cell must link to a single successor. Remove the extra rdf:rest triples.")
    )]
    AmbiguousRest { cell: String, count: usize },

    #[error("{subject} has {count} heads for {predicate}")]
    #[diagnostic(
        code(aspect::list::ambiguous_head),
        help("An ordered list property may only be asserted once per subject.")
    )]
    AmbiguousHead {
        subject: String,
        predicate: String,
        count: usize,
    },

    #[error("list cell {cell} is reachable twice: the chain is cyclic")]
    #[diagnostic(
        code(aspect::list::cycle),
        help("The rdf:rest chain loops back on itself and never reaches rdf:nil.")
    )]
    Cycle { cell: String },

    #[error("list exceeds the maximum length of {max_len} cells")]
    #[diagnostic(
        code(aspect::list::too_long),
        help("Raise `max_list_length` in the engine config if the model really is that large.")
    )]
    TooLong { max_len: usize },

    #[error("{found} cannot be a list cell")]
    #[diagnostic(
        code(aspect::list::invalid_link),
        help("List heads and rdf:rest objects must be blank nodes or rdf:nil.")
    )]
    InvalidLink { found: String },

    #[error("wrapped occurrence {node} does not reference an element")]
    #[diagnostic(
        code(aspect::list::unresolved_occurrence),
        help("A blank-node list element needs a samm:property (or samm:extends) triple.")
    )]
    UnresolvedOccurrence { node: String },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("triple store backend error: {message}")]
    #[diagnostic(
        code(aspect::store::backend),
        help(
            "The underlying triple store rejected the operation. \
             An oxigraph change set that fails is not committed at all."
        )
    )]
    Backend { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read engine config: {path}")]
    #[diagnostic(
        code(aspect::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config: {path}")]
    #[diagnostic(
        code(aspect::config::parse),
        help("Check the TOML syntax in the engine config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write engine config: {path}")]
    #[diagnostic(
        code(aspect::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {message}")]
    #[diagnostic(code(aspect::config::invalid), help("Check the EngineConfig fields. {message}"))]
    Invalid { message: String },
}

/// Convenience alias for functions returning list results.
pub type ListResult<T> = std::result::Result<T, ListError>;
