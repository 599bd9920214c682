use super::BuiltInKind;
use super::value::Value;
use oxrdf::TermRef;
use std::cmp::Ordering;

pub(super) fn holds(kind: BuiltInKind, left: TermRef<'_>, right: TermRef<'_>) -> bool {
    let (Some(left), Some(right)) = (Value::from_term(left), Value::from_term(right)) else {
        return false;
    };
    match kind {
        BuiltInKind::Equal => left.equals(right) == Some(true),
        BuiltInKind::NotEqual => left.equals(right) == Some(false),
        BuiltInKind::LessThan => left.partial_cmp(right) == Some(Ordering::Less),
        BuiltInKind::LessThanOrEqual => matches!(
            left.partial_cmp(right),
            Some(Ordering::Less | Ordering::Equal)
        ),
        BuiltInKind::GreaterThan => left.partial_cmp(right) == Some(Ordering::Greater),
        BuiltInKind::GreaterThanOrEqual => matches!(
            left.partial_cmp(right),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        _ => false,
    }
}
