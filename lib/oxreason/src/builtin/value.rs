//! Coercion of RDF terms into typed values for the built-ins.

use oxrdf::vocab::xsd;
use oxrdf::{LiteralRef, NamedNodeRef, TermRef};
use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer};
use std::cmp::Ordering;

/// A numeric value following the XPath numeric type hierarchy.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Numeric {
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
}

impl Numeric {
    pub(crate) fn from_term(term: TermRef<'_>) -> Option<Self> {
        match Value::from_term(term)? {
            Value::Numeric(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn to_double(self) -> Double {
        match self {
            Self::Integer(v) => v.into(),
            Self::Decimal(v) => v.into(),
            Self::Float(v) => v.into(),
            Self::Double(v) => v,
        }
    }

    /// Compares two numbers after promoting them to their common type.
    pub(crate) fn partial_cmp(self, other: Self) -> Option<Ordering> {
        match NumericPair::new(self, other) {
            NumericPair::Integer(a, b) => a.partial_cmp(&b),
            NumericPair::Decimal(a, b) => a.partial_cmp(&b),
            NumericPair::Float(a, b) => a.partial_cmp(&b),
            NumericPair::Double(a, b) => a.partial_cmp(&b),
        }
    }

    pub(crate) fn equals(self, other: Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl From<Double> for Numeric {
    #[inline]
    fn from(value: Double) -> Self {
        Self::Double(value)
    }
}

impl From<Integer> for Numeric {
    #[inline]
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

/// Two numbers promoted to the same type.
enum NumericPair {
    Integer(Integer, Integer),
    Decimal(Decimal, Decimal),
    Float(Float, Float),
    Double(Double, Double),
}

impl NumericPair {
    fn new(a: Numeric, b: Numeric) -> Self {
        match (a, b) {
            (Numeric::Integer(a), Numeric::Integer(b)) => Self::Integer(a, b),
            (Numeric::Integer(a), Numeric::Decimal(b)) => Self::Decimal(a.into(), b),
            (Numeric::Decimal(a), Numeric::Integer(b)) => Self::Decimal(a, b.into()),
            (Numeric::Decimal(a), Numeric::Decimal(b)) => Self::Decimal(a, b),
            (Numeric::Integer(a), Numeric::Float(b)) => Self::Float(a.into(), b),
            (Numeric::Decimal(a), Numeric::Float(b)) => Self::Float(a.into(), b),
            (Numeric::Float(a), Numeric::Integer(b)) => Self::Float(a, b.into()),
            (Numeric::Float(a), Numeric::Decimal(b)) => Self::Float(a, b.into()),
            (Numeric::Float(a), Numeric::Float(b)) => Self::Float(a, b),
            (a, b) => Self::Double(a.to_double(), b.to_double()),
        }
    }
}

/// A term coerced according to its datatype.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Value<'a> {
    Numeric(Numeric),
    Boolean(Boolean),
    Date(Date),
    DateTime(DateTime),
    String(&'a str),
    LanguageString(&'a str, &'a str),
    NamedNode(NamedNodeRef<'a>),
    /// A literal with a datatype the built-ins do not interpret
    Other(LiteralRef<'a>),
}

impl<'a> Value<'a> {
    /// Returns `None` for blank nodes and for literals with an invalid lexical form.
    pub(crate) fn from_term(term: TermRef<'a>) -> Option<Self> {
        match term {
            TermRef::NamedNode(node) => Some(Self::NamedNode(node)),
            TermRef::Literal(literal) => Self::from_literal(literal),
            _ => None,
        }
    }

    fn from_literal(literal: LiteralRef<'a>) -> Option<Self> {
        let value = literal.value();
        if let Some(language) = literal.language() {
            return Some(Self::LanguageString(value, language));
        }
        let datatype = literal.datatype();
        Some(if datatype == xsd::STRING {
            Self::String(value)
        } else if is_integer_datatype(datatype) {
            Self::Numeric(Numeric::Integer(value.parse().ok()?))
        } else if datatype == xsd::DECIMAL {
            Self::Numeric(Numeric::Decimal(value.parse().ok()?))
        } else if datatype == xsd::FLOAT {
            Self::Numeric(Numeric::Float(value.parse().ok()?))
        } else if datatype == xsd::DOUBLE {
            Self::Numeric(Numeric::Double(value.parse().ok()?))
        } else if datatype == xsd::BOOLEAN {
            Self::Boolean(value.parse().ok()?)
        } else if datatype == xsd::DATE {
            Self::Date(value.parse().ok()?)
        } else if datatype == xsd::DATE_TIME || datatype == xsd::DATE_TIME_STAMP {
            Self::DateTime(value.parse().ok()?)
        } else {
            Self::Other(literal)
        })
    }

    /// Value equality, `None` if the two values are not comparable.
    pub(crate) fn equals(self, other: Self) -> Option<bool> {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => Some(a.equals(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a == b),
            (Self::Date(a), Self::Date(b)) => Some(a.partial_cmp(&b)? == Ordering::Equal),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.partial_cmp(&b)? == Ordering::Equal),
            (Self::String(a), Self::String(b)) => Some(a == b),
            (Self::LanguageString(a, la), Self::LanguageString(b, lb)) => {
                Some(a == b && la.eq_ignore_ascii_case(lb))
            }
            (Self::NamedNode(a), Self::NamedNode(b)) => Some(a == b),
            (Self::Other(a), Self::Other(b)) => (a == b).then_some(true),
            _ => None,
        }
    }

    /// Value ordering, `None` if the two values are not ordered.
    pub(crate) fn partial_cmp(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.partial_cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(&b),
            (Self::Date(a), Self::Date(b)) => a.partial_cmp(&b),
            (Self::DateTime(a), Self::DateTime(b)) => a.partial_cmp(&b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::LanguageString(a, la), Self::LanguageString(b, lb))
                if la.eq_ignore_ascii_case(lb) =>
            {
                a.partial_cmp(b)
            }
            _ => None,
        }
    }
}

/// The string a string built-in works on: the lexical form of a literal or the IRI of a named node.
pub(crate) fn lexical_form(term: TermRef<'_>) -> Option<&str> {
    match term {
        TermRef::NamedNode(node) => Some(node.as_str()),
        TermRef::Literal(literal) => Some(literal.value()),
        _ => None,
    }
}

fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    [
        xsd::INTEGER,
        xsd::LONG,
        xsd::INT,
        xsd::SHORT,
        xsd::BYTE,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .contains(&datatype)
}
