//! Global identifier index over a treebank.

use super::IntegrityError;
use crate::treebank::Treebank;
use std::collections::{HashMap, HashSet};

/// The position of a token in the document: the IDs of the sentence, div and
/// source that own it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenScope<'a> {
    /// Owning sentence.
    pub sentence: &'a str,
    /// Owning div.
    pub div: &'a str,
    /// Owning source.
    pub source: &'a str,
}

/// Lookup tables from sentence and token IDs to their owners.
///
/// Built in one pass over the whole document before any reference is
/// resolved, since references may point forwards as well as backwards.
#[derive(Debug, Default)]
pub struct IdIndex<'a> {
    sentence_ids: HashSet<&'a str>,
    token_ids: HashMap<&'a str, TokenScope<'a>>,
}

impl<'a> IdIndex<'a> {
    /// Indexes every sentence and token of `treebank` in document order.
    ///
    /// A sentence or token ID already in the index is reported to `errors`.
    /// A repeated token ID still overwrites the earlier entry, so references to
    /// it resolve to the last token carrying that ID.
    pub fn build(treebank: &'a Treebank, errors: &mut Vec<IntegrityError>) -> Self {
        let mut index = Self::default();

        for source in &treebank.sources {
            for div in &source.divs {
                for sentence in &div.sentences {
                    if !index.sentence_ids.insert(&sentence.id) {
                        errors.push(IntegrityError::RepeatedSentenceId {
                            id: sentence.id.clone(),
                        });
                    }

                    for token in &sentence.tokens {
                        let scope = TokenScope {
                            sentence: &sentence.id,
                            div: &div.id,
                            source: &source.id,
                        };
                        if index.token_ids.insert(&token.id, scope).is_some() {
                            errors.push(IntegrityError::RepeatedTokenId {
                                id: token.id.clone(),
                            });
                        }
                    }
                }
            }
        }

        index
    }

    /// Looks up the position of the token with the given ID.
    #[must_use]
    pub fn scope_of(&self, token_id: &str) -> Option<TokenScope<'a>> {
        self.token_ids.get(token_id).copied()
    }

    /// Returns `true` if a sentence with the given ID was indexed.
    #[must_use]
    pub fn contains_sentence(&self, sentence_id: &str) -> bool {
        self.sentence_ids.contains(sentence_id)
    }

    /// Number of distinct sentence IDs.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.sentence_ids.len()
    }

    /// Number of distinct token IDs.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treebank::parse_treebank;

    const TWO_SOURCES: &str = r#"{
        "sources": [
            {"id": "a", "divs": [{"id": "d1", "sentences": [
                {"id": "1", "tokens": [{"id": "t1", "form": "x"}, {"id": "t2", "form": "y"}]},
                {"id": "1", "tokens": [{"id": "t3", "form": "z"}]}
            ]}]},
            {"id": "b", "divs": [{"id": "d2", "sentences": [
                {"id": "2", "tokens": [{"id": "t1", "form": "w"}]},
                {"id": "1", "tokens": []}
            ]}]}
        ]
    }"#;

    #[test]
    fn test_repeats_reported_per_extra_occurrence() {
        let treebank = parse_treebank(TWO_SOURCES).unwrap();
        let mut errors = Vec::new();
        let index = IdIndex::build(&treebank, &mut errors);

        let messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            [
                "Repeated sentence ID 1",
                "Repeated token ID t1",
                "Repeated sentence ID 1",
            ]
        );
        assert_eq!(index.sentence_count(), 2);
        assert_eq!(index.token_count(), 3);
        assert!(index.contains_sentence("2"));
        assert!(!index.contains_sentence("3"));
    }

    #[test]
    fn test_repeated_token_keeps_last_scope() {
        let treebank = parse_treebank(TWO_SOURCES).unwrap();
        let mut errors = Vec::new();
        let index = IdIndex::build(&treebank, &mut errors);

        assert_eq!(
            index.scope_of("t1"),
            Some(TokenScope {
                sentence: "2",
                div: "d2",
                source: "b",
            })
        );
        assert_eq!(index.scope_of("t3").map(|s| s.source), Some("a"));
        assert_eq!(index.scope_of("t4"), None);
    }
}
