use super::value::{Numeric, lexical_form};
use super::{BuiltInKind, compile_pattern};
use oxrdf::TermRef;
use oxsdatatypes::Integer;
use regex::Regex;

pub(super) fn holds(
    kind: BuiltInKind,
    left: TermRef<'_>,
    right: TermRef<'_>,
    regex: Option<&Regex>,
) -> bool {
    let Some(right_str) = lexical_form(right) else {
        return false;
    };
    if kind == BuiltInKind::StringLength {
        let (Some(length), Ok(expected)) =
            (Numeric::from_term(left), i64::try_from(right_str.chars().count()))
        else {
            return false;
        };
        return length.equals(Integer::from(expected).into());
    }
    let Some(left) = lexical_form(left) else {
        return false;
    };
    match kind {
        BuiltInKind::StartsWith => left.starts_with(right_str),
        BuiltInKind::EndsWith => left.ends_with(right_str),
        BuiltInKind::Contains => left.contains(right_str),
        BuiltInKind::ContainsIgnoreCase => left.to_lowercase().contains(&right_str.to_lowercase()),
        BuiltInKind::StringEqualIgnoreCase => left.to_lowercase() == right_str.to_lowercase(),
        BuiltInKind::Matches => match regex {
            Some(regex) => regex.is_match(left),
            // The pattern is bound at evaluation time
            None => compile_pattern(right_str).is_ok_and(|regex| regex.is_match(left)),
        },
        BuiltInKind::LowerCase => left == right_str.to_lowercase(),
        BuiltInKind::UpperCase => left == right_str.to_uppercase(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::vocab::xsd;
    use oxrdf::{Literal, NamedNode};

    fn check(kind: BuiltInKind, left: &Literal, right: &Literal) -> bool {
        holds(kind, left.as_ref().into(), right.as_ref().into(), None)
    }

    #[test]
    fn case_sensitivity() {
        let hello = Literal::from("Hello World");
        assert!(check(BuiltInKind::StartsWith, &hello, &Literal::from("Hello")));
        assert!(!check(BuiltInKind::StartsWith, &hello, &Literal::from("hello")));
        assert!(check(BuiltInKind::ContainsIgnoreCase, &hello, &Literal::from("WORLD")));
        assert!(check(BuiltInKind::StringEqualIgnoreCase, &hello, &Literal::from("hello world")));
        assert!(check(BuiltInKind::EndsWith, &hello, &Literal::from("World")));
    }

    #[test]
    fn case_mappings() {
        assert!(check(BuiltInKind::LowerCase, &Literal::from("abc"), &Literal::from("AbC")));
        assert!(check(BuiltInKind::UpperCase, &Literal::from("ABC"), &Literal::from("AbC")));
        assert!(!check(BuiltInKind::UpperCase, &Literal::from("AbC"), &Literal::from("AbC")));
    }

    #[test]
    fn string_length() {
        let length = Literal::new_typed_literal("5", xsd::INTEGER);
        assert!(check(BuiltInKind::StringLength, &length, &Literal::from("héllo")));
        assert!(!check(BuiltInKind::StringLength, &length, &Literal::from("hi")));
        assert!(!check(BuiltInKind::StringLength, &Literal::from("5"), &Literal::from("hello")));
    }

    #[test]
    fn iris_are_strings() {
        let iri = NamedNode::new_unchecked("http://example.com/a");
        assert!(holds(
            BuiltInKind::StartsWith,
            iri.as_ref().into(),
            Literal::from("http://example.com/").as_ref().into(),
            None
        ));
    }

    #[test]
    fn dynamic_pattern() {
        assert!(check(BuiltInKind::Matches, &Literal::from("abc123"), &Literal::from("^[a-z]+[0-9]+$")));
        assert!(!check(BuiltInKind::Matches, &Literal::from("abc"), &Literal::from("(")));
    }
}
