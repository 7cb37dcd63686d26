//! Referential-integrity checking for treebank documents.
//!
//! The checker runs a fixed sequence of passes over a loaded
//! [`Treebank`](crate::treebank::Treebank):
//!
//! 1. Build a global identifier index, reporting repeated sentence and token IDs.
//! 2. Resolve every token reference against that index and check its locality.
//! 3. Check annotation tags against the tag vocabulary (not implemented).
//! 4. Check token fields for consistency with each other.
//!
//! Passes never abort. Every problem becomes an [`IntegrityError`] in a single
//! [`IntegrityReport`], ordered by pass and then by document order.

use crate::treebank::Treebank;
use log::{debug, info};
use std::fmt;

mod fields;
mod index;
mod locality;

pub use fields::check_fields;
pub use index::{IdIndex, TokenScope};
pub use locality::{check_references, scoped_tokens};

/// The scope a reference target is required to share with the referencing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Same sentence.
    Sentence,
    /// Same source.
    Source,
}

impl Scope {
    /// Returns the name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scope::Sentence => "sentence",
            Scope::Source => "source",
        }
    }

    /// Selects the identifier of this scope from a token's position.
    #[must_use]
    pub fn select<'a>(self, scope: &TokenScope<'a>) -> &'a str {
        match self {
            Scope::Sentence => scope.sentence,
            Scope::Source => scope.source,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token field holding a reference to another token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    /// The syntactic head.
    HeadId,
    /// The target of a slash edge.
    SlashId,
    /// The coreference antecedent.
    AntecedentId,
}

impl ReferenceField {
    /// Returns the field name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ReferenceField::HeadId => "head_id",
            ReferenceField::SlashId => "slash_id",
            ReferenceField::AntecedentId => "antecedent_id",
        }
    }

    /// The scope a target of this field must share with the referencing token.
    #[must_use]
    pub fn required_scope(self) -> Scope {
        match self {
            ReferenceField::HeadId | ReferenceField::SlashId => Scope::Sentence,
            ReferenceField::AntecedentId => Scope::Source,
        }
    }

    /// Whether the field may be absent.
    #[must_use]
    pub fn is_nullable(self) -> bool {
        !matches!(self, ReferenceField::SlashId)
    }
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Broad classes of integrity problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A sentence or token identifier is reused.
    DuplicateIdentifier,
    /// A reference names an identifier that does not exist.
    DanglingReference,
    /// A reference resolves, but outside its required scope.
    ScopeViolation,
    /// A non-nullable reference is absent.
    MissingRequiredReference,
    /// The form field contradicts the empty-token flag.
    FormEmptinessMismatch,
    /// The form is blank or has boundary whitespace.
    FormWellFormedness,
}

/// A single integrity problem found in a document.
///
/// The [`Display`](fmt::Display) rendering is the human-readable report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// A sentence ID seen earlier in the document.
    RepeatedSentenceId {
        /// The repeated identifier.
        id: String,
    },
    /// A token ID seen earlier in the document.
    RepeatedTokenId {
        /// The repeated identifier.
        id: String,
    },
    /// A required reference is absent.
    NullReference {
        /// The referencing token.
        token: String,
        /// The field holding the reference.
        field: ReferenceField,
    },
    /// A reference to an identifier that no token carries.
    UnknownReference {
        /// The referencing token.
        token: String,
        /// The field holding the reference.
        field: ReferenceField,
    },
    /// A reference to a token outside the required scope.
    ScopeViolation {
        /// The referencing token.
        token: String,
        /// The field holding the reference.
        field: ReferenceField,
        /// The scope the target should have shared.
        scope: Scope,
    },
    /// No form, but the token is not an empty token.
    FormNullButNotEmpty {
        /// The offending token.
        token: String,
    },
    /// A form on an empty token.
    FormNotNullButEmpty {
        /// The offending token.
        token: String,
    },
    /// The form starts with whitespace.
    InitialWhitespace {
        /// The offending token.
        token: String,
    },
    /// The form ends with whitespace.
    FinalWhitespace {
        /// The offending token.
        token: String,
    },
    /// The form is the empty string.
    BlankForm {
        /// The offending token.
        token: String,
    },
}

impl IntegrityError {
    /// Returns the class this problem belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntegrityError::RepeatedSentenceId { .. } | IntegrityError::RepeatedTokenId { .. } => {
                ErrorKind::DuplicateIdentifier
            }
            IntegrityError::NullReference { .. } => ErrorKind::MissingRequiredReference,
            IntegrityError::UnknownReference { .. } => ErrorKind::DanglingReference,
            IntegrityError::ScopeViolation { .. } => ErrorKind::ScopeViolation,
            IntegrityError::FormNullButNotEmpty { .. }
            | IntegrityError::FormNotNullButEmpty { .. } => ErrorKind::FormEmptinessMismatch,
            IntegrityError::InitialWhitespace { .. }
            | IntegrityError::FinalWhitespace { .. }
            | IntegrityError::BlankForm { .. } => ErrorKind::FormWellFormedness,
        }
    }
}

impl fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegrityError::RepeatedSentenceId { id } => write!(f, "Repeated sentence ID {id}"),
            IntegrityError::RepeatedTokenId { id } => write!(f, "Repeated token ID {id}"),
            IntegrityError::NullReference { token, field } => {
                write!(f, "Token {token}: {field} is null")
            }
            IntegrityError::UnknownReference { token, field } => {
                write!(f, "Token {token}: {field} references an unknown token")
            }
            IntegrityError::ScopeViolation {
                token,
                field,
                scope,
            } => write!(
                f,
                "Token {token}: {field} references a token in a different {scope}"
            ),
            IntegrityError::FormNullButNotEmpty { token } => write!(
                f,
                "Token {token}: 'form' field is null but not an empty token"
            ),
            IntegrityError::FormNotNullButEmpty { token } => write!(
                f,
                "Token {token}: 'form' field is not null but an empty token"
            ),
            IntegrityError::InitialWhitespace { token } => {
                write!(f, "Token {token}: initial whitespace in 'form' field")
            }
            IntegrityError::FinalWhitespace { token } => {
                write!(f, "Token {token}: final whitespace in 'form' field")
            }
            IntegrityError::BlankForm { token } => {
                write!(f, "Token {token}: 'form' field is blank")
            }
        }
    }
}

/// The accumulated outcome of one integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    errors: Vec<IntegrityError>,
}

impl IntegrityReport {
    /// Returns `true` if no problems were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The problems found, in pass order and then document order.
    #[must_use]
    pub fn errors(&self) -> &[IntegrityError] {
        &self.errors
    }

    /// Renders every problem as a report line.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Number of problems found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if the report holds no problems.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consumes the report, returning the problems.
    #[must_use]
    pub fn into_errors(self) -> Vec<IntegrityError> {
        self.errors
    }
}

/// Checks the referential integrity of a treebank.
///
/// This covers identifier uniqueness, resolution and locality of token
/// references, and consistency of token form fields. The check is pure: the
/// index it builds is discarded on return, so repeated calls on the same
/// document give identical reports.
#[must_use]
pub fn check_integrity(treebank: &Treebank) -> IntegrityReport {
    let mut errors = Vec::new();

    // Pass 1: index every sentence and token ID, flagging repeats
    let index = IdIndex::build(treebank, &mut errors);
    debug!(
        "indexed {} sentences and {} tokens ({} problems)",
        index.sentence_count(),
        index.token_count(),
        errors.len()
    );

    // Pass 2: resolve references against the index
    let before = errors.len();
    check_references(treebank, &index, &mut errors);
    debug!("reference check found {} problems", errors.len() - before);

    // Pass 3: annotation tags
    check_annotation_tags(treebank, &mut errors);

    // Pass 4: non-tag fields
    let before = errors.len();
    check_fields(treebank, &mut errors);
    debug!("field check found {} problems", errors.len() - before);

    info!(
        "integrity check of {} tokens: {}",
        treebank.token_count(),
        if errors.is_empty() {
            "valid".to_string()
        } else {
            format!("{} problems", errors.len())
        }
    );

    IntegrityReport { errors }
}

/// Returns `true` if the treebank passes every integrity check.
#[must_use]
pub fn has_referential_integrity(treebank: &Treebank) -> bool {
    check_integrity(treebank).is_valid()
}

/// Checks that annotation tags are defined in the annotation schema.
///
/// Not implemented: no tag vocabulary is consulted and nothing is reported.
/// Kept as a separate pass so that a vocabulary check has a fixed place in
/// the pass order.
pub fn check_annotation_tags(_treebank: &Treebank, _errors: &mut Vec<IntegrityError>) {}
