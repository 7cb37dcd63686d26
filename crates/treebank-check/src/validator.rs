//! Whole-document validation.
//!
//! A [`Validator`] runs well-formedness, schema-version, schema and
//! referential-integrity checks on one treebank file, stopping at the first
//! stage that fails. Only the integrity stage is implemented in this crate;
//! the raw-format stages and the loader are supplied by the caller through
//! [`SchemaChecks`] and [`TreebankLoader`].

use crate::integrity::check_integrity;
use crate::treebank::{parse_treebank, Treebank, TreebankError};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A diagnostic reported by a schema validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Line of the document the problem was found on.
    pub line: usize,
    /// Description of the problem.
    pub message: String,
}

/// The document declares a schema version that is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSchemaVersion(pub String);

impl std::fmt::Display for InvalidSchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for InvalidSchemaVersion {}

/// Format-level checks on the raw document, run before it is loaded.
pub trait SchemaChecks {
    /// Returns `true` if the document text is well-formed.
    fn is_well_formed(&self, path: &Path) -> bool;

    /// Detects the schema version the document declares.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSchemaVersion`] if a version is declared but unsupported.
    fn schema_version(&self, path: &Path) -> Result<Option<String>, InvalidSchemaVersion>;

    /// Validates the document against the schema for `version`.
    fn schema_errors(&self, path: &Path, version: &str) -> Vec<SchemaDiagnostic>;
}

/// Loads a document into a [`Treebank`].
pub trait TreebankLoader {
    /// Loads the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the document cannot be read or its
    /// structure cannot be turned into a document graph.
    fn load(&self, path: &Path) -> Result<Treebank, LoadError>;
}

/// Errors raised while loading a document graph.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(std::io::Error),

    /// The file contents could not be decoded.
    Parse(TreebankError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<TreebankError> for LoadError {
    fn from(e: TreebankError) -> Self {
        LoadError::Parse(e)
    }
}

/// Loads a JSON-serialized document graph from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTreebankLoader;

impl TreebankLoader for JsonTreebankLoader {
    fn load(&self, path: &Path) -> Result<Treebank, LoadError> {
        let json = std::fs::read_to_string(path)?;
        parse_treebank(&json).map_err(LoadError::from)
    }
}

/// Validates one treebank document.
///
/// Error messages from every stage that ran are collected in
/// [`errors`](Validator::errors).
pub struct Validator<S, L> {
    path: PathBuf,
    schema: S,
    loader: L,
    errors: Vec<String>,
}

impl<S: SchemaChecks, L: TreebankLoader> Validator<S, L> {
    /// Creates a validator for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, schema: S, loader: L) -> Self {
        Self {
            path: path.into(),
            schema,
            loader,
            errors: Vec::new(),
        }
    }

    /// Error messages generated so far.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Checks well-formedness, schema version, schema validity and
    /// referential integrity, in that order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the document passes the schema stages but
    /// cannot be loaded for the integrity check.
    pub fn is_valid(&mut self) -> Result<bool, LoadError> {
        Ok(self.is_well_formed()
            && self.has_valid_schema_version()
            && self.validates()
            && self.has_referential_integrity()?)
    }

    /// Checks that the document is well-formed.
    pub fn is_well_formed(&mut self) -> bool {
        if self.schema.is_well_formed(&self.path) {
            true
        } else {
            self.errors.push("document is not well-formed".to_string());
            false
        }
    }

    /// Checks that the document declares a supported schema version.
    pub fn has_valid_schema_version(&mut self) -> bool {
        match self.schema.schema_version(&self.path) {
            Ok(Some(version)) => {
                debug!("{}: schema version {version}", self.path.display());
                true
            }
            Ok(None) => {
                self.errors.push("invalid schema version".to_string());
                false
            }
            Err(e) => {
                self.errors.push(e.to_string());
                false
            }
        }
    }

    /// Checks that the document validates against its schema.
    ///
    /// A document without a usable schema version fails this stage too.
    pub fn validates(&mut self) -> bool {
        let version = match self.schema.schema_version(&self.path) {
            Ok(Some(version)) => version,
            Ok(None) | Err(_) => {
                warn!("{}: no schema to validate against", self.path.display());
                return false;
            }
        };

        let diagnostics = self.schema.schema_errors(&self.path, &version);
        if diagnostics.is_empty() {
            true
        } else {
            self.errors.extend(
                diagnostics
                    .iter()
                    .map(|d| format!("Line {}: {}", d.line, d.message)),
            );
            false
        }
    }

    /// Loads the document and checks its referential integrity.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the document cannot be loaded.
    pub fn has_referential_integrity(&mut self) -> Result<bool, LoadError> {
        let treebank = self.loader.load(&self.path)?;
        let report = check_integrity(&treebank);

        if report.is_valid() {
            Ok(true)
        } else {
            self.errors.extend(report.messages());
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeSchema {
        malformed: bool,
        version: Option<String>,
        unsupported: bool,
        diagnostics: Vec<SchemaDiagnostic>,
        calls: Cell<usize>,
    }

    impl SchemaChecks for FakeSchema {
        fn is_well_formed(&self, _path: &Path) -> bool {
            self.calls.set(self.calls.get() + 1);
            !self.malformed
        }

        fn schema_version(&self, _path: &Path) -> Result<Option<String>, InvalidSchemaVersion> {
            self.calls.set(self.calls.get() + 1);
            if self.unsupported {
                Err(InvalidSchemaVersion("unsupported schema version 1.0".into()))
            } else {
                Ok(self.version.clone())
            }
        }

        fn schema_errors(&self, _path: &Path, _version: &str) -> Vec<SchemaDiagnostic> {
            self.calls.set(self.calls.get() + 1);
            self.diagnostics.clone()
        }
    }

    struct FixedLoader(Treebank);

    impl TreebankLoader for FixedLoader {
        fn load(&self, _path: &Path) -> Result<Treebank, LoadError> {
            Ok(self.0.clone())
        }
    }

    fn schema_ok() -> FakeSchema {
        FakeSchema {
            version: Some("2.1".into()),
            ..FakeSchema::default()
        }
    }

    fn empty_treebank() -> FixedLoader {
        FixedLoader(Treebank { sources: vec![] })
    }

    #[test]
    fn test_all_stages_pass() {
        let mut validator = Validator::new("doc.xml", schema_ok(), empty_treebank());
        assert!(validator.is_valid().unwrap());
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_stops_at_malformed_document() {
        let schema = FakeSchema {
            malformed: true,
            ..schema_ok()
        };
        let mut validator = Validator::new("doc.xml", schema, empty_treebank());

        assert!(!validator.is_valid().unwrap());
        assert_eq!(validator.errors(), ["document is not well-formed"]);
        assert_eq!(validator.schema.calls.get(), 1);
    }

    #[test]
    fn test_missing_and_unsupported_versions() {
        let mut validator = Validator::new("doc.xml", FakeSchema::default(), empty_treebank());
        assert!(!validator.is_valid().unwrap());
        assert_eq!(validator.errors(), ["invalid schema version"]);

        let schema = FakeSchema {
            unsupported: true,
            ..FakeSchema::default()
        };
        let mut validator = Validator::new("doc.xml", schema, empty_treebank());
        assert!(!validator.is_valid().unwrap());
        assert_eq!(validator.errors(), ["unsupported schema version 1.0"]);
    }

    #[test]
    fn test_schema_diagnostics_are_line_prefixed() {
        let schema = FakeSchema {
            diagnostics: vec![
                SchemaDiagnostic {
                    line: 12,
                    message: "element 'token' missing attribute 'id'".into(),
                },
                SchemaDiagnostic {
                    line: 40,
                    message: "unexpected element 'foo'".into(),
                },
            ],
            ..schema_ok()
        };
        let mut validator = Validator::new("doc.xml", schema, empty_treebank());

        assert!(!validator.is_valid().unwrap());
        assert_eq!(
            validator.errors(),
            [
                "Line 12: element 'token' missing attribute 'id'",
                "Line 40: unexpected element 'foo'",
            ]
        );
    }

    #[test]
    fn test_load_failure_is_an_error() {
        let mut validator = Validator::new(
            "/nonexistent/treebank.json",
            schema_ok(),
            JsonTreebankLoader,
        );
        let err = validator.is_valid().unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(validator.errors().is_empty());
    }
}
