use super::BuiltInKind;
use super::value::Numeric;
use oxrdf::TermRef;
use oxsdatatypes::{Decimal, Double};

/// Checks `left = right ∘ parameter` for binary arithmetic and `left = f(right)` for unary arithmetic.
pub(super) fn holds(
    kind: BuiltInKind,
    left: TermRef<'_>,
    right: TermRef<'_>,
    parameter: Option<Double>,
) -> bool {
    let (Some(left), Some(right)) = (Numeric::from_term(left), Numeric::from_term(right)) else {
        return false;
    };
    let expected = match parameter {
        Some(parameter) => binary(kind, right.to_double(), parameter),
        None => unary(kind, right),
    };
    expected.is_some_and(|expected| left.equals(expected))
}

fn binary(kind: BuiltInKind, right: Double, parameter: Double) -> Option<Numeric> {
    Some(
        match kind {
            BuiltInKind::Add => right + parameter,
            BuiltInKind::Subtract => right - parameter,
            BuiltInKind::Multiply => right * parameter,
            BuiltInKind::Divide => right / parameter,
            BuiltInKind::Pow => f64::from(right).powf(parameter.into()).into(),
            _ => return None,
        }
        .into(),
    )
}

fn unary(kind: BuiltInKind, value: Numeric) -> Option<Numeric> {
    Some(match (kind, value) {
        (BuiltInKind::Abs, Numeric::Integer(v)) => Numeric::Integer(v.checked_abs()?),
        (BuiltInKind::Abs, Numeric::Decimal(v)) => {
            if v < Decimal::from(0) {
                Numeric::Decimal(Decimal::from(0).checked_sub(v)?)
            } else {
                Numeric::Decimal(v)
            }
        }
        (BuiltInKind::Abs, Numeric::Float(v)) => Numeric::Float(v.abs()),
        (BuiltInKind::Abs, Numeric::Double(v)) => Numeric::Double(v.abs()),
        (BuiltInKind::Ceiling | BuiltInKind::Floor | BuiltInKind::Round, Numeric::Integer(v)) => {
            Numeric::Integer(v)
        }
        (BuiltInKind::Ceiling, Numeric::Float(v)) => Numeric::Float(v.ceil()),
        (BuiltInKind::Floor, Numeric::Float(v)) => Numeric::Float(v.floor()),
        (BuiltInKind::Round, Numeric::Float(v)) => Numeric::Float(v.round()),
        // Decimals are rounded through their double value
        (BuiltInKind::Ceiling, v) => Numeric::Double(v.to_double().ceil()),
        (BuiltInKind::Floor, v) => Numeric::Double(v.to_double().floor()),
        (BuiltInKind::Round, v) => Numeric::Double(v.to_double().round()),
        _ => return None,
    })
}
