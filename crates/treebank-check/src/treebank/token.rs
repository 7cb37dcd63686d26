//! Tokens and their cross-reference fields.

use facet::Facet;

/// The atomic annotated unit of a treebank: a word or an empty node.
///
/// References to other tokens (`head_id`, `slashes`, `antecedent_id`) are held
/// as identifiers and resolved by the integrity checker against a global
/// identifier index.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Token {
    /// Identifier, intended to be unique across the whole document.
    pub id: String,

    /// Surface form. Absent exactly when the token is an empty token.
    #[facet(default)]
    pub form: Option<String>,

    /// Whether this token is inferred by annotation convention rather than
    /// present in the surface text.
    #[facet(default)]
    pub is_empty: bool,

    /// Syntactic head; must lie in the same sentence.
    #[facet(default)]
    pub head_id: Option<String>,

    /// Secondary dependency edges; every target must lie in the same sentence.
    #[facet(default)]
    pub slashes: Vec<Slash>,

    /// Coreference antecedent; must lie in the same source.
    #[facet(default)]
    pub antecedent_id: Option<String>,
}

/// A labelled secondary edge from one token to another.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Slash {
    /// The relation label on the edge.
    pub relation: String,

    /// The target token. Required, but kept optional so that a missing target
    /// can be reported instead of rejected at load time.
    #[facet(default)]
    pub target: Option<String>,
}

impl Token {
    /// Returns `true` if this is an empty token.
    #[must_use]
    pub fn is_empty_token(&self) -> bool {
        self.is_empty
    }

    /// Creates a token with a surface form and no references.
    #[must_use]
    pub fn with_form(id: impl Into<String>, form: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form: Some(form.into()),
            is_empty: false,
            head_id: None,
            slashes: Vec::new(),
            antecedent_id: None,
        }
    }

    /// Creates an empty token with no form and no references.
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            form: None,
            is_empty: true,
            head_id: None,
            slashes: Vec::new(),
            antecedent_id: None,
        }
    }
}

impl Slash {
    /// Creates a slash edge with the given label and target.
    #[must_use]
    pub fn new(relation: impl Into<String>, target: Option<&str>) -> Self {
        Self {
            relation: relation.into(),
            target: target.map(str::to_string),
        }
    }
}
