//! Consistency checks on non-reference token fields.

use super::IntegrityError;
use crate::treebank::{Token, Treebank};

/// Checks the `form` field of every token against its empty-token flag and
/// for surface well-formedness.
pub fn check_fields(treebank: &Treebank, errors: &mut Vec<IntegrityError>) {
    for token in treebank.tokens() {
        check_presentation_and_form(errors, token);
    }
}

fn check_presentation_and_form(errors: &mut Vec<IntegrityError>, token: &Token) {
    let id = || token.id.clone();

    let Some(form) = token.form.as_deref() else {
        if !token.is_empty_token() {
            errors.push(IntegrityError::FormNullButNotEmpty { token: id() });
        }
        return;
    };

    if token.is_empty_token() {
        errors.push(IntegrityError::FormNotNullButEmpty { token: id() });
    }

    // Unicode White_Space, not just ASCII
    if form.starts_with(char::is_whitespace) {
        errors.push(IntegrityError::InitialWhitespace { token: id() });
    } else if form.ends_with(char::is_whitespace) {
        errors.push(IntegrityError::FinalWhitespace { token: id() });
    } else if form.is_empty() {
        errors.push(IntegrityError::BlankForm { token: id() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_errors(token: &Token) -> Vec<String> {
        let mut errors = Vec::new();
        check_presentation_and_form(&mut errors, token);
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_form_and_emptiness() {
        assert!(field_errors(&Token::with_form("t1", "dog")).is_empty());
        assert!(field_errors(&Token::empty("t1")).is_empty());

        let mut missing = Token::with_form("t1", "dog");
        missing.form = None;
        assert_eq!(
            field_errors(&missing),
            ["Token t1: 'form' field is null but not an empty token"]
        );

        let mut spurious = Token::empty("t1");
        spurious.form = Some("dog".into());
        assert_eq!(
            field_errors(&spurious),
            ["Token t1: 'form' field is not null but an empty token"]
        );
    }

    #[test]
    fn test_boundary_whitespace() {
        assert_eq!(
            field_errors(&Token::with_form("t1", " dog")),
            ["Token t1: initial whitespace in 'form' field"]
        );
        assert_eq!(
            field_errors(&Token::with_form("t1", "dog\t")),
            ["Token t1: final whitespace in 'form' field"]
        );
        // whitespace on both ends reports only the leading side
        assert_eq!(
            field_errors(&Token::with_form("t1", " dog ")),
            ["Token t1: initial whitespace in 'form' field"]
        );
        assert!(field_errors(&Token::with_form("t1", "hot dog")).is_empty());
    }

    #[test]
    fn test_unicode_whitespace() {
        // no-break space, ideographic space, en quad
        assert_eq!(
            field_errors(&Token::with_form("t1", "\u{a0}dog")),
            ["Token t1: initial whitespace in 'form' field"]
        );
        assert_eq!(
            field_errors(&Token::with_form("t1", "dog\u{3000}")),
            ["Token t1: final whitespace in 'form' field"]
        );
        assert_eq!(
            field_errors(&Token::with_form("t1", "\u{2000}")),
            ["Token t1: initial whitespace in 'form' field"]
        );
    }

    #[test]
    fn test_blank_form() {
        assert_eq!(
            field_errors(&Token::with_form("t1", "")),
            ["Token t1: 'form' field is blank"]
        );

        let mut blank_empty = Token::empty("t1");
        blank_empty.form = Some(String::new());
        assert_eq!(
            field_errors(&blank_empty),
            [
                "Token t1: 'form' field is not null but an empty token",
                "Token t1: 'form' field is blank",
            ]
        );
    }
}
