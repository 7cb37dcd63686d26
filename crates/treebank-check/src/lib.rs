//! Referential-integrity checking for annotated treebanks.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The document graph: sources, divs, sentences and tokens.
///
/// This is the read-only input to every check. References between tokens are
/// carried as identifiers, resolved later against an index.
pub mod treebank;

/// The referential-integrity checker.
///
/// Builds a global identifier index, then validates reference locality and
/// token field consistency, accumulating every problem into one report.
pub mod integrity;

/// Whole-document validation composing format checks with the integrity check.
pub mod validator;

pub use integrity::{
    check_integrity, has_referential_integrity, ErrorKind, IntegrityError, IntegrityReport,
    ReferenceField, Scope,
};
pub use treebank::{parse_treebank, Div, Sentence, Slash, Source, Token, Treebank, TreebankError};
pub use validator::{
    InvalidSchemaVersion, JsonTreebankLoader, LoadError, SchemaChecks, SchemaDiagnostic,
    TreebankLoader, Validator,
};
