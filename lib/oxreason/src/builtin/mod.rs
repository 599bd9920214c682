//! [SWRL built-ins](https://www.w3.org/submissions/SWRL/#8) evaluated as filters on [`BindingTable`]s.

mod comparison;
mod math;
mod string;
pub(crate) mod value;

use crate::binding::{BindingRow, BindingTable};
use crate::error::BuiltInError;
use crate::vocab::{XSD_NAMESPACE, XSD_PREFIX, swrlb};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode, TermRef, Variable};
use oxsdatatypes::Double;
use regex::{Regex, RegexBuilder};
use std::fmt;

const REGEX_SIZE_LIMIT: usize = 1_000_000;

/// The family of a built-in, deciding how its arguments are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInFamily {
    /// Typed comparison of the two arguments
    Comparison,
    /// Operation on the lexical forms of the arguments
    String,
    /// Arithmetic: the left argument must be equal to the result of the operation
    Math,
}

/// The supported built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BuiltInKind {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    StartsWith,
    EndsWith,
    Contains,
    ContainsIgnoreCase,
    StringEqualIgnoreCase,
    Matches,
    StringLength,
    LowerCase,
    UpperCase,
    Add,
    Subtract,
    Multiply,
    Divide,
    Pow,
    Abs,
    Ceiling,
    Floor,
    Round,
}

impl BuiltInKind {
    /// Every supported built-in, grouped by family.
    pub const ALL: [Self; 24] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::StartsWith,
        Self::EndsWith,
        Self::Contains,
        Self::ContainsIgnoreCase,
        Self::StringEqualIgnoreCase,
        Self::Matches,
        Self::StringLength,
        Self::LowerCase,
        Self::UpperCase,
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Pow,
        Self::Abs,
        Self::Ceiling,
        Self::Floor,
        Self::Round,
    ];

    /// The local name of the built-in in the `swrlb:` namespace.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Contains => "contains",
            Self::ContainsIgnoreCase => "containsIgnoreCase",
            Self::StringEqualIgnoreCase => "stringEqualIgnoreCase",
            Self::Matches => "matches",
            Self::StringLength => "stringLength",
            Self::LowerCase => "lowerCase",
            Self::UpperCase => "upperCase",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Pow => "pow",
            Self::Abs => "abs",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
            Self::Round => "round",
        }
    }

    pub const fn family(self) -> BuiltInFamily {
        match self {
            Self::Equal
            | Self::NotEqual
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual => BuiltInFamily::Comparison,
            Self::StartsWith
            | Self::EndsWith
            | Self::Contains
            | Self::ContainsIgnoreCase
            | Self::StringEqualIgnoreCase
            | Self::Matches
            | Self::StringLength
            | Self::LowerCase
            | Self::UpperCase => BuiltInFamily::String,
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Pow
            | Self::Abs
            | Self::Ceiling
            | Self::Floor
            | Self::Round => BuiltInFamily::Math,
        }
    }

    /// Returns `true` for the binary arithmetic built-ins that require a numeric parameter.
    pub const fn takes_parameter(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Pow
        )
    }

    /// The full IRI of the built-in.
    pub fn iri(self) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", swrlb::NAMESPACE, self.name()))
    }

    /// Looks up a built-in from its full IRI.
    ///
    /// ```
    /// use oxreason::BuiltInKind;
    ///
    /// assert_eq!(
    ///     BuiltInKind::from_iri("http://www.w3.org/2003/11/swrlb#startsWith"),
    ///     Some(BuiltInKind::StartsWith)
    /// );
    /// assert_eq!(BuiltInKind::from_iri("http://example.com/startsWith"), None);
    /// ```
    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::from_name(iri.strip_prefix(swrlb::NAMESPACE)?)
    }

    /// Looks up a built-in from its local name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BuiltInKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The right argument of a built-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuiltInArgument {
    Variable(Variable),
    Literal(Literal),
    NamedNode(NamedNode),
}

impl From<Variable> for BuiltInArgument {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Literal> for BuiltInArgument {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<NamedNode> for BuiltInArgument {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<&str> for BuiltInArgument {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Literal(Literal::new_simple_literal(value))
    }
}

impl fmt::Display for BuiltInArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::NamedNode(node) => f.write_str(node.as_str()),
            Self::Literal(literal) => {
                write!(f, "\"{}\"", literal.value())?;
                if let Some(language) = literal.language() {
                    write!(f, "@{language}")
                } else if literal.datatype() == xsd::STRING {
                    Ok(())
                } else if let Some(local) = literal.datatype().as_str().strip_prefix(XSD_NAMESPACE)
                {
                    write!(f, "^^{XSD_PREFIX}:{local}")
                } else {
                    write!(f, "^^{}", literal.datatype())
                }
            }
        }
    }
}

/// A built-in invocation: a predicate on a left variable, a right argument and, for binary arithmetic, a numeric parameter.
///
/// Invocations are validated at construction and immutable afterwards.
///
/// ```
/// use oxrdf::Variable;
/// use oxreason::{BindingTable, BuiltIn, BuiltInKind};
///
/// let l = Variable::new("L")?;
/// let starts_with = BuiltIn::new(BuiltInKind::StartsWith, Some(l.clone()), Some("val".into()))?;
/// assert_eq!(starts_with.to_string(), "swrlb:startsWith(?L,\"val\")");
///
/// let table = BindingTable::from_rows(
///     [l],
///     [
///         vec![Some(oxrdf::Literal::from("value").into())],
///         vec![Some(oxrdf::Literal::from("other").into())],
///     ],
/// );
/// assert_eq!(starts_with.evaluate(&table).len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct BuiltIn {
    kind: BuiltInKind,
    left: Variable,
    right: BuiltInArgument,
    parameter: Option<Double>,
    regex: Option<Regex>,
}

impl BuiltIn {
    /// Builds a built-in without numeric parameter.
    ///
    /// Fails if an argument is missing, if `kind` is a binary arithmetic built-in,
    /// if the right argument of an arithmetic built-in is not a variable
    /// or if the pattern of `swrlb:matches` is not a valid regular expression.
    pub fn new(
        kind: BuiltInKind,
        left: Option<Variable>,
        right: Option<BuiltInArgument>,
    ) -> Result<Self, BuiltInError> {
        let left = left.ok_or(BuiltInError::MissingLeftArgument { kind })?;
        let right = right.ok_or(BuiltInError::MissingRightArgument { kind })?;
        if kind.takes_parameter() {
            return Err(BuiltInError::MissingParameter { kind });
        }
        if kind.family() == BuiltInFamily::Math && !matches!(right, BuiltInArgument::Variable(_)) {
            return Err(BuiltInError::InvalidRightArgument {
                kind,
                expected: "a variable",
            });
        }
        let regex = if kind == BuiltInKind::Matches {
            match &right {
                BuiltInArgument::Literal(pattern) => Some(compile_pattern(pattern.value())?),
                BuiltInArgument::Variable(_) => None,
                BuiltInArgument::NamedNode(_) => {
                    return Err(BuiltInError::InvalidRightArgument {
                        kind,
                        expected: "a literal or a variable",
                    });
                }
            }
        } else {
            None
        };
        Ok(Self {
            kind,
            left,
            right,
            parameter: None,
            regex,
        })
    }

    /// Builds a binary arithmetic built-in: `left = right ∘ parameter`.
    ///
    /// Fails if an argument is missing or if `kind` does not take a parameter.
    pub fn with_parameter(
        kind: BuiltInKind,
        left: Option<Variable>,
        right: Option<Variable>,
        parameter: impl Into<Double>,
    ) -> Result<Self, BuiltInError> {
        let left = left.ok_or(BuiltInError::MissingLeftArgument { kind })?;
        let right = right.ok_or(BuiltInError::MissingRightArgument { kind })?;
        if !kind.takes_parameter() {
            return Err(BuiltInError::UnexpectedParameter { kind });
        }
        Ok(Self {
            kind,
            left,
            right: right.into(),
            parameter: Some(parameter.into()),
            regex: None,
        })
    }

    /// Builds a comparison built-in (`swrlb:equal`, `swrlb:lessThan`...).
    pub fn comparison(
        kind: BuiltInKind,
        left: Variable,
        right: impl Into<BuiltInArgument>,
    ) -> Result<Self, BuiltInError> {
        if kind.family() != BuiltInFamily::Comparison {
            return Err(BuiltInError::UnexpectedKind {
                kind,
                expected: "a comparison",
            });
        }
        Self::new(kind, Some(left), Some(right.into()))
    }

    /// Builds `swrlb:startsWith(left, prefix)`.
    pub fn starts_with(left: Variable, prefix: impl Into<BuiltInArgument>) -> Self {
        Self::unchecked(BuiltInKind::StartsWith, left, prefix.into())
    }

    /// Builds `swrlb:endsWith(left, suffix)`.
    pub fn ends_with(left: Variable, suffix: impl Into<BuiltInArgument>) -> Self {
        Self::unchecked(BuiltInKind::EndsWith, left, suffix.into())
    }

    /// Builds `swrlb:contains(left, needle)`.
    pub fn contains(left: Variable, needle: impl Into<BuiltInArgument>) -> Self {
        Self::unchecked(BuiltInKind::Contains, left, needle.into())
    }

    /// Builds `swrlb:matches(left, pattern)`.
    pub fn matches(left: Variable, pattern: &str) -> Result<Self, BuiltInError> {
        Self::new(BuiltInKind::Matches, Some(left), Some(pattern.into()))
    }

    /// Builds `swrlb:multiply(left, right, parameter)`.
    pub fn multiply(left: Variable, right: Variable, parameter: impl Into<Double>) -> Self {
        Self {
            kind: BuiltInKind::Multiply,
            left,
            right: right.into(),
            parameter: Some(parameter.into()),
            regex: None,
        }
    }

    fn unchecked(kind: BuiltInKind, left: Variable, right: BuiltInArgument) -> Self {
        Self {
            kind,
            left,
            right,
            parameter: None,
            regex: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> BuiltInKind {
        self.kind
    }

    #[inline]
    pub fn left(&self) -> &Variable {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &BuiltInArgument {
        &self.right
    }

    #[inline]
    pub fn parameter(&self) -> Option<Double> {
        self.parameter
    }

    /// The variables the built-in reads.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        let right = match &self.right {
            BuiltInArgument::Variable(variable) => Some(variable),
            BuiltInArgument::Literal(_) | BuiltInArgument::NamedNode(_) => None,
        };
        Some(&self.left).into_iter().chain(right)
    }

    /// Returns the rows of `table` for which the built-in holds, in order and with the same columns.
    ///
    /// Rows with an unbound operand or an operand that can't be coerced to the expected type are dropped.
    #[must_use]
    pub fn evaluate(&self, table: &BindingTable) -> BindingTable {
        table.filter(|row| self.holds(row))
    }

    fn holds(&self, row: BindingRow<'_>) -> bool {
        let Some(left) = row.get(&self.left) else {
            return false;
        };
        let right = match &self.right {
            BuiltInArgument::Variable(variable) => match row.get(variable) {
                Some(term) => term.as_ref(),
                None => return false,
            },
            BuiltInArgument::Literal(literal) => TermRef::from(literal),
            BuiltInArgument::NamedNode(node) => TermRef::from(node),
        };
        match self.kind.family() {
            BuiltInFamily::Comparison => comparison::holds(self.kind, left.as_ref(), right),
            BuiltInFamily::String => {
                string::holds(self.kind, left.as_ref(), right, self.regex.as_ref())
            }
            BuiltInFamily::Math => math::holds(self.kind, left.as_ref(), right, self.parameter),
        }
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}({},{}",
            swrlb::PREFIX,
            self.kind,
            self.left,
            self.right
        )?;
        if let Some(parameter) = self.parameter {
            write!(f, ",\"{parameter}\"^^{XSD_PREFIX}:double")?;
        }
        f.write_str(")")
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex, BuiltInError> {
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| BuiltInError::InvalidRegex {
            pattern: pattern.into(),
            source,
        })
}
