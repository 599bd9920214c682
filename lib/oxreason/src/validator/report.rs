use crate::validator::ValidatorRule;
use std::fmt;

/// Category of an [`Evidence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceCategory {
    /// A violation of the OWL-DL/OWL 2 constraints.
    Error,
    /// A bad practice that does not make the knowledge base inconsistent.
    Warning,
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("Error"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

/// A finding of a validator rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    category: EvidenceCategory,
    rule: ValidatorRule,
    message: String,
    suggestion: String,
}

impl Evidence {
    pub fn new(
        category: EvidenceCategory,
        rule: ValidatorRule,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            category,
            rule,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    #[inline]
    pub fn category(&self) -> EvidenceCategory {
        self.category
    }

    /// The rule that produced the evidence.
    #[inline]
    pub fn rule(&self) -> ValidatorRule {
        self.rule
    }

    #[inline]
    pub fn rule_name(&self) -> &'static str {
        self.rule.name()
    }

    /// What is wrong.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// How to fix it.
    #[inline]
    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

impl fmt::Display for Evidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.category,
            self.rule_name(),
            self.message,
            self.suggestion
        )
    }
}

/// An ordered list of [`Evidence`].
///
/// Evidence are kept in the order the rules found them and are never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    evidences: Vec<Evidence>,
}

impl ValidationReport {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an evidence.
    #[inline]
    pub fn add_evidence(&mut self, evidence: Evidence) {
        self.evidences.push(evidence);
    }

    /// Appends all the evidence of another report, keeping their order.
    pub fn merge(&mut self, other: Self) {
        self.evidences.extend(other.evidences);
    }

    #[inline]
    pub fn evidences(&self) -> &[Evidence] {
        &self.evidences
    }

    pub fn errors(&self) -> impl Iterator<Item = &Evidence> {
        self.evidences
            .iter()
            .filter(|e| e.category == EvidenceCategory::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Evidence> {
        self.evidences
            .iter()
            .filter(|e| e.category == EvidenceCategory::Warning)
    }

    /// Returns the number of errors.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Returns `true` if there is no error. Warnings are allowed.
    pub fn is_consistent(&self) -> bool {
        self.errors().next().is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.evidences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.evidences.is_empty()
    }
}

impl IntoIterator for ValidationReport {
    type Item = Evidence;
    type IntoIter = std::vec::IntoIter<Evidence>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.evidences.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Evidence;
    type IntoIter = std::slice::Iter<'a, Evidence>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.evidences.iter()
    }
}
