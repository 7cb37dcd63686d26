//! The in-memory document graph of a treebank.
//!
//! A [`Treebank`] is an ordered tree of [`Source`]s, each split into
//! [`Div`]s, which in turn hold [`Sentence`]s of [`Token`]s. Cross-references
//! between tokens are stored as identifiers rather than pointers, so the graph
//! is plain owned data and can be decoded from JSON with [`facet_json`].

use facet::Facet;

mod token;

pub use token::{Slash, Token};

/// A complete treebank document.
///
/// This is the root of the document graph handed to the integrity checker.
/// It is built once by a loader and is never mutated by any check.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Treebank {
    /// The top-level text units, in document order.
    #[facet(default)]
    pub sources: Vec<Source>,
}

/// A top-level text unit in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Source {
    /// Identifier, unique within the document.
    pub id: String,

    /// Subdivisions of this source, in document order.
    #[facet(default)]
    pub divs: Vec<Div>,
}

/// A subdivision of a [`Source`], such as a chapter or section.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Div {
    /// Identifier of the subdivision.
    pub id: String,

    /// Sentences of this subdivision, in document order.
    #[facet(default)]
    pub sentences: Vec<Sentence>,
}

/// An ordered sequence of tokens; the unit of syntactic locality.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Sentence {
    /// Identifier, intended to be unique across the whole document.
    pub id: String,

    /// Tokens of this sentence, in document order.
    #[facet(default)]
    pub tokens: Vec<Token>,
}

impl Treebank {
    /// Iterates over every sentence in the document, in document order.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.sources.iter().flat_map(Source::sentences)
    }

    /// Iterates over every token in the document, in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sources.iter().flat_map(Source::tokens)
    }

    /// Returns the number of tokens in the document.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }
}

impl Source {
    /// Iterates over the sentences of every div in this source.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.divs.iter().flat_map(|div| div.sentences.iter())
    }

    /// Iterates over the tokens of every sentence in this source.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences().flat_map(|sentence| sentence.tokens.iter())
    }
}

/// Decode a JSON-serialized document graph into a [`Treebank`].
///
/// Optional token fields may be omitted and default to absent; omitted lists
/// default to empty.
///
/// # Errors
///
/// Returns [`TreebankError::JsonParse`] if the input is not valid JSON or does
/// not match the shape of the document graph.
pub fn parse_treebank(json: &str) -> Result<Treebank, TreebankError> {
    facet_json::from_str(json).map_err(|e| TreebankError::JsonParse(e.to_string()))
}

/// Errors raised while decoding a serialized document graph.
#[derive(Debug)]
pub enum TreebankError {
    /// The input JSON was syntactically invalid or structurally mismatched.
    JsonParse(String),
}

impl std::fmt::Display for TreebankError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TreebankError::JsonParse(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for TreebankError {}
