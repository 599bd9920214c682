//! Consistency checks of a knowledge base against a fixed battery of OWL-DL/OWL 2 rules.
//!
//! Findings are reported as [`Evidence`] in a [`ValidationReport`], the knowledge base is never modified.

mod report;
mod rules;

pub use report::{Evidence, EvidenceCategory, ValidationReport};

use crate::model::KnowledgeBase;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A validator rule.
///
/// The rules are run in the order of [`ValidatorRule::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidatorRule {
    /// A name refers to more than one of a class, a property and an individual
    VocabularyDisjointness,
    /// A class or a property is used without being declared
    VocabularyDeclaration,
    /// An individual belongs to two disjoint classes
    DisjointClasses,
    /// A class is both a sub-class of and disjoint with another class
    SubClassDisjointness,
    /// The same pair of resources is linked by two disjoint properties
    DisjointProperties,
    /// An asymmetric property links two resources in both directions
    AsymmetricProperty,
    /// An irreflexive property links a resource to itself
    IrreflexiveProperty,
    /// `owl:inverseOf` is used on a datatype property
    InverseOf,
    /// Two resources are both `owl:sameAs` and `owl:differentFrom`
    SameAsDifferentFrom,
    /// A deprecated class or property is used
    Deprecated,
}

impl ValidatorRule {
    pub const ALL: [Self; 10] = [
        Self::VocabularyDisjointness,
        Self::VocabularyDeclaration,
        Self::DisjointClasses,
        Self::SubClassDisjointness,
        Self::DisjointProperties,
        Self::AsymmetricProperty,
        Self::IrreflexiveProperty,
        Self::InverseOf,
        Self::SameAsDifferentFrom,
        Self::Deprecated,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::VocabularyDisjointness => "VocabularyDisjointness",
            Self::VocabularyDeclaration => "VocabularyDeclaration",
            Self::DisjointClasses => "DisjointClasses",
            Self::SubClassDisjointness => "SubClassDisjointness",
            Self::DisjointProperties => "DisjointProperties",
            Self::AsymmetricProperty => "AsymmetricProperty",
            Self::IrreflexiveProperty => "IrreflexiveProperty",
            Self::InverseOf => "InverseOf",
            Self::SameAsDifferentFrom => "SameAsDifferentFrom",
            Self::Deprecated => "Deprecated",
        }
    }

    /// Looks up a rule from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Runs the rule alone.
    pub fn validate(self, kb: &KnowledgeBase) -> ValidationReport {
        let report = match self {
            Self::VocabularyDisjointness => rules::vocabulary_disjointness(kb),
            Self::VocabularyDeclaration => rules::vocabulary_declaration(kb),
            Self::DisjointClasses => rules::disjoint_classes(kb),
            Self::SubClassDisjointness => rules::sub_class_disjointness(kb),
            Self::DisjointProperties => rules::disjoint_properties(kb),
            Self::AsymmetricProperty => rules::asymmetric_property(kb),
            Self::IrreflexiveProperty => rules::irreflexive_property(kb),
            Self::InverseOf => rules::inverse_of(kb),
            Self::SameAsDifferentFrom => rules::same_as_different_from(kb),
            Self::Deprecated => rules::deprecated(kb),
        };
        tracing::debug!("Validator rule {} found {} evidences", self.name(), report.len());
        report
    }
}

/// Runs validator rules on a knowledge base.
///
/// ```
/// use oxrdf::vocab::rdf;
/// use oxrdf::{NamedNode, TripleRef};
/// use oxreason::vocab::owl;
/// use oxreason::{KnowledgeBase, Validator};
///
/// let knows = NamedNode::new("http://example.com/knows")?;
/// let alice = NamedNode::new("http://example.com/alice")?;
/// let mut kb = KnowledgeBase::new();
/// kb.insert(TripleRef::new(&knows, rdf::TYPE, owl::IRREFLEXIVE_PROPERTY));
/// kb.insert(TripleRef::new(&alice, &knows, &alice));
///
/// let report = Validator::new().validate(&kb);
/// assert_eq!(report.error_count(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    rules: Vec<ValidatorRule>,
}

impl Validator {
    /// A validator running the full battery of rules.
    pub fn new() -> Self {
        Self {
            rules: ValidatorRule::ALL.to_vec(),
        }
    }

    /// A validator running only the given rules. They are still run in the battery order.
    pub fn with_rules(rules: impl IntoIterator<Item = ValidatorRule>) -> Self {
        let mut rules = rules.into_iter().collect::<Vec<_>>();
        rules.sort_unstable();
        rules.dedup();
        Self { rules }
    }

    #[inline]
    pub fn rules(&self) -> &[ValidatorRule] {
        &self.rules
    }

    /// Runs every rule and concatenates their reports in rule order.
    ///
    /// All rules are always run, even if a previous one found an error.
    pub fn validate(&self, kb: &KnowledgeBase) -> ValidationReport {
        let mut report = ValidationReport::new();
        for rule_report in self.run_rules(kb) {
            report.merge(rule_report);
        }
        tracing::info!(
            "Validation found {} errors and {} warnings",
            report.error_count(),
            report.warning_count()
        );
        report
    }

    #[cfg(feature = "rayon")]
    fn run_rules(&self, kb: &KnowledgeBase) -> Vec<ValidationReport> {
        self.rules.par_iter().map(|rule| rule.validate(kb)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn run_rules(&self, kb: &KnowledgeBase) -> Vec<ValidationReport> {
        self.rules.iter().map(|rule| rule.validate(kb)).collect()
    }
}

impl Default for Validator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
