//! Resolution and locality of token references.

use super::{IdIndex, IntegrityError, ReferenceField, TokenScope};
use crate::treebank::{Token, Treebank};

/// Iterates over every token together with its actual position in the document.
pub fn scoped_tokens(treebank: &Treebank) -> impl Iterator<Item = (TokenScope<'_>, &Token)> {
    treebank.sources.iter().flat_map(|source| {
        source.divs.iter().flat_map(move |div| {
            div.sentences.iter().flat_map(move |sentence| {
                sentence.tokens.iter().map(move |token| {
                    let scope = TokenScope {
                        sentence: &sentence.id,
                        div: &div.id,
                        source: &source.id,
                    };
                    (scope, token)
                })
            })
        })
    })
}

/// Checks every `head_id`, slash target and `antecedent_id` in the document.
///
/// Head and slash targets must be in the referencing token's sentence;
/// antecedents must be in its source. Problems are appended to `errors` in
/// document order.
pub fn check_references(treebank: &Treebank, index: &IdIndex, errors: &mut Vec<IntegrityError>) {
    for (scope, token) in scoped_tokens(treebank) {
        check_reference_locality(
            errors,
            token,
            &scope,
            index,
            ReferenceField::HeadId,
            token.head_id.as_deref(),
        );

        for slash in &token.slashes {
            check_reference_locality(
                errors,
                token,
                &scope,
                index,
                ReferenceField::SlashId,
                slash.target.as_deref(),
            );
        }

        check_reference_locality(
            errors,
            token,
            &scope,
            index,
            ReferenceField::AntecedentId,
            token.antecedent_id.as_deref(),
        );
    }
}

fn check_reference_locality(
    errors: &mut Vec<IntegrityError>,
    token: &Token,
    scope: &TokenScope,
    index: &IdIndex,
    field: ReferenceField,
    value: Option<&str>,
) {
    let Some(target_id) = value else {
        if !field.is_nullable() {
            errors.push(IntegrityError::NullReference {
                token: token.id.clone(),
                field,
            });
        }
        return;
    };

    let domain = field.required_scope();
    match index.scope_of(target_id) {
        None => errors.push(IntegrityError::UnknownReference {
            token: token.id.clone(),
            field,
        }),
        Some(target) if domain.select(&target) != domain.select(scope) => {
            errors.push(IntegrityError::ScopeViolation {
                token: token.id.clone(),
                field,
                scope: domain,
            });
        }
        Some(_) => {}
    }
}
