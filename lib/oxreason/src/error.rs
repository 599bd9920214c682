use crate::builtin::BuiltInKind;
use oxrdf::Variable;
use std::time::Duration;

/// An error raised while constructing a [`BuiltIn`](crate::BuiltIn).
///
/// These errors are configuration errors: the invocation is never created.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuiltInError {
    /// The left argument of the built-in is missing
    #[error("The built-in swrlb:{kind} requires a left argument")]
    MissingLeftArgument { kind: BuiltInKind },
    /// The right argument of the built-in is missing
    #[error("The built-in swrlb:{kind} requires a right argument")]
    MissingRightArgument { kind: BuiltInKind },
    /// The numeric parameter of an arithmetic built-in is missing
    #[error("The built-in swrlb:{kind} requires a numeric parameter")]
    MissingParameter { kind: BuiltInKind },
    /// A numeric parameter has been given to a built-in that does not take one
    #[error("The built-in swrlb:{kind} does not take a numeric parameter")]
    UnexpectedParameter { kind: BuiltInKind },
    /// The right argument does not have the expected shape
    #[error("The built-in swrlb:{kind} expects {expected} as right argument")]
    InvalidRightArgument {
        kind: BuiltInKind,
        expected: &'static str,
    },
    /// The built-in does not belong to the family expected by the constructor
    #[error("swrlb:{kind} is not {expected}")]
    UnexpectedKind {
        kind: BuiltInKind,
        expected: &'static str,
    },
    /// The regular expression given to `swrlb:matches` is invalid
    #[error("The regular expression '{pattern}' of swrlb:matches is invalid: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// An error raised while constructing a [`Rule`](crate::Rule).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// The antecedent does not contain any triple pattern
    #[error("The antecedent of rule {rule} does not contain any triple pattern")]
    EmptyAntecedent { rule: String },
    /// The consequent does not contain any triple pattern
    #[error("The consequent of rule {rule} does not contain any triple pattern")]
    EmptyConsequent { rule: String },
    /// A variable of the consequent is not bound by the antecedent patterns
    #[error("The variable {variable} of the consequent of rule {rule} is not bound by its antecedent")]
    UnboundConsequentVariable { rule: String, variable: Variable },
    /// A variable used by a built-in is not bound by the antecedent patterns
    #[error("The variable {variable} used by a built-in of rule {rule} is not bound by its antecedent")]
    UnboundBuiltInVariable { rule: String, variable: Variable },
    /// A consequent pattern has a predicate that can't be an IRI
    #[error("The consequent of rule {rule} has a predicate that is not an IRI or a variable")]
    InvalidConsequentPredicate { rule: String },
}

/// An internal fault of the forward chaining.
///
/// Reaching one of these means that the rules never stabilize on the knowledge base,
/// usually because a consequent is broader than what its antecedent restricts.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReasonerError {
    /// The fixpoint has not been reached after the maximal number of passes
    #[error("The reasoner did not reach a fixpoint after {iterations} passes")]
    FixpointNotReached { iterations: usize },
    /// The reasoning time budget is exhausted
    #[error("The reasoner did not reach a fixpoint in {timeout:?}")]
    Timeout { timeout: Duration },
    /// The number of inferred triples exceeds the configured limit
    #[error("The reasoner inferred more than {limit} triples")]
    MaterializationLimit { limit: usize },
}
