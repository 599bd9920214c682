//! Forward chaining rule engine.
//!
//! Rules are applied in passes until a pass does not entail any new triple.

mod rules;

pub use rules::StandardRule;

use crate::error::ReasonerError;
use crate::model::KnowledgeBase;
use crate::rule::Rule;
use oxrdf::{Term, Triple, Variable};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Configuration for the reasoner.
///
/// ```
/// use oxreason::ReasonerConfig;
/// use std::time::Duration;
///
/// let config = ReasonerConfig {
///     timeout: Some(Duration::from_secs(10)),
///     ..ReasonerConfig::default()
/// };
/// assert_eq!(config.max_iterations, 1_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonerConfig {
    /// Maximum number of passes for the fixpoint computation.
    pub max_iterations: usize,
    /// Maximum time allowed for reasoning (None = unlimited).
    pub timeout: Option<Duration>,
    /// Maximum number of triples inferred by one run (None = unlimited).
    pub max_inferred_triples: Option<usize>,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1_000,
            timeout: None,
            max_inferred_triples: None,
        }
    }
}

/// A triple added to the inference set, with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// The entailed triple
    pub triple: Triple,
    /// Name of the rule that entailed it
    pub rule: String,
    /// The antecedent bindings that produced it
    pub bindings: Vec<(Variable, Term)>,
}

/// The outcome of [`Reasoner::reason`].
#[derive(Debug, Clone, Default)]
pub struct ReasoningReport {
    inferences: Vec<Inference>,
    iterations: usize,
}

impl ReasoningReport {
    /// The new triples, in the order they have been added to the inference set.
    #[inline]
    pub fn inferences(&self) -> &[Inference] {
        &self.inferences
    }

    /// Number of passes, including the last one that did not infer anything.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of new triples.
    #[inline]
    pub fn len(&self) -> usize {
        self.inferences.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inferences.is_empty()
    }
}

impl IntoIterator for ReasoningReport {
    type Item = Inference;
    type IntoIter = std::vec::IntoIter<Inference>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inferences.into_iter()
    }
}

/// A forward chaining reasoner.
///
/// Each pass matches every rule against the knowledge base, in registration order,
/// then adds the instantiated consequents to the inference set.
/// Passes are repeated until nothing new is entailed.
///
/// ```
/// use oxrdf::vocab::{rdf, rdfs};
/// use oxrdf::{NamedNode, TripleRef};
/// use oxreason::{KnowledgeBase, Reasoner};
///
/// let alice = NamedNode::new("http://example.com/alice")?;
/// let person = NamedNode::new("http://example.com/Person")?;
/// let agent = NamedNode::new("http://example.com/Agent")?;
/// let mut kb = KnowledgeBase::new();
/// kb.insert(TripleRef::new(&person, rdfs::SUB_CLASS_OF, &agent));
/// kb.insert(TripleRef::new(&alice, rdf::TYPE, &person));
///
/// let report = Reasoner::with_standard_rules().reason(&mut kb)?;
/// assert_eq!(report.len(), 1);
/// assert!(kb.contains(TripleRef::new(&alice, rdf::TYPE, &agent)));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reasoner {
    rules: Vec<Rule>,
    property_chains: bool,
    config: ReasonerConfig,
}

impl Reasoner {
    /// A reasoner without any rule.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A reasoner with the [`StandardRule`]s and the rules generated from the property chain axioms.
    pub fn with_standard_rules() -> Self {
        Self {
            rules: StandardRule::ALL.into_iter().map(StandardRule::rule).collect(),
            property_chains: true,
            config: ReasonerConfig::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: ReasonerConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers a rule. Rules are applied in registration order.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn config(&self) -> &ReasonerConfig {
        &self.config
    }

    /// Expands the inference set of `kb` to the fixpoint of the rules.
    ///
    /// The asserted triples are never modified.
    /// Running the reasoner again on its own output does not infer anything.
    pub fn reason(&self, kb: &mut KnowledgeBase) -> Result<ReasoningReport, ReasonerError> {
        let start = Instant::now();
        let chain_rules = if self.property_chains {
            rules::property_chain_rules(kb)
        } else {
            Vec::new()
        };
        let rules = self.rules.iter().chain(&chain_rules).collect::<Vec<_>>();
        tracing::debug!(
            "Starting reasoning with {} rules on {} triples",
            rules.len(),
            kb.len()
        );

        let mut report = ReasoningReport::default();
        loop {
            if report.iterations >= self.config.max_iterations {
                return Err(ReasonerError::FixpointNotReached {
                    iterations: report.iterations,
                });
            }
            report.iterations += 1;
            self.check_timeout(start)?;

            // Matching and built-in evaluation against the state at the start of the pass
            let candidates = match_rules(&rules, kb);
            self.check_timeout(start)?;

            let mut added = 0;
            for (rule, candidates) in rules.iter().zip(candidates) {
                let mut added_by_rule = 0;
                for (triple, bindings) in candidates {
                    if kb.insert_inferred(&triple) {
                        report.inferences.push(Inference {
                            triple,
                            rule: rule.name().into(),
                            bindings,
                        });
                        added_by_rule += 1;
                        self.check_materialization_limit(&report)?;
                    }
                }
                if added_by_rule > 0 {
                    tracing::debug!(
                        "Rule {} inferred {added_by_rule} triples during pass {}",
                        rule.name(),
                        report.iterations
                    );
                }
                added += added_by_rule;
            }
            tracing::debug!("Pass {} inferred {added} triples", report.iterations);
            if added == 0 {
                break;
            }
        }
        tracing::info!(
            "Fixpoint reached after {} passes with {} inferred triples in {:?}",
            report.iterations,
            report.inferences.len(),
            start.elapsed()
        );
        Ok(report)
    }

    fn check_timeout(&self, start: Instant) -> Result<(), ReasonerError> {
        if let Some(timeout) = self.config.timeout {
            if start.elapsed() >= timeout {
                return Err(ReasonerError::Timeout { timeout });
            }
        }
        Ok(())
    }

    fn check_materialization_limit(&self, report: &ReasoningReport) -> Result<(), ReasonerError> {
        if let Some(limit) = self.config.max_inferred_triples {
            if report.inferences.len() > limit {
                return Err(ReasonerError::MaterializationLimit { limit });
            }
        }
        Ok(())
    }
}

type Candidates = Vec<(Triple, Vec<(Variable, Term)>)>;

#[cfg(feature = "rayon")]
fn match_rules(rules: &[&Rule], kb: &KnowledgeBase) -> Vec<Candidates> {
    rules.par_iter().map(|rule| rule.apply(kb)).collect()
}

#[cfg(not(feature = "rayon"))]
fn match_rules(rules: &[&Rule], kb: &KnowledgeBase) -> Vec<Candidates> {
    rules.iter().map(|rule| rule.apply(kb)).collect()
}
