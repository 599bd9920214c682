//! RDFS and OWL entailment rules shipped with the reasoner.

use crate::analyzer::RelationAnalyzer;
use crate::model::KnowledgeBase;
use crate::rule::{Antecedent, Rule, TriplePattern};
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{NamedNode, NamedOrBlankNode, Variable};

/// Entailment rule identifier.
///
/// The names follow the [OWL 2 RL/RDF rules](https://www.w3.org/TR/owl2-profiles/#Reasoning_in_OWL_2_RL_and_RDF_Graphs_using_Rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardRule {
    /// `rdfs:subClassOf` transitivity
    ScmSco,
    /// `rdfs:subPropertyOf` transitivity
    ScmSpo,
    /// `owl:equivalentClass` symmetry
    EqcSym,
    /// `owl:equivalentClass` to mutual `rdfs:subClassOf`
    ScmEqc1,
    /// `owl:equivalentProperty` symmetry
    EqpSym,
    /// `owl:equivalentProperty` to mutual `rdfs:subPropertyOf`
    ScmEqp1,
    /// Type propagation along `rdfs:subClassOf`
    CaxSco,
    /// `rdfs:domain`
    PrpDom,
    /// `rdfs:range`
    PrpRng,
    /// Assertion propagation along `rdfs:subPropertyOf`
    PrpSpo1,
    /// `owl:inverseOf` symmetry
    InvSym,
    /// Inverse assertions of `owl:inverseOf`
    PrpInv,
    /// `owl:SymmetricProperty`
    PrpSymp,
    /// `owl:TransitiveProperty`
    PrpTrp,
    /// `owl:sameAs` symmetry
    EqSym,
    /// `owl:sameAs` transitivity
    EqTrans,
}

impl StandardRule {
    pub const ALL: [Self; 16] = [
        Self::ScmSco,
        Self::ScmSpo,
        Self::EqcSym,
        Self::ScmEqc1,
        Self::EqpSym,
        Self::ScmEqp1,
        Self::CaxSco,
        Self::PrpDom,
        Self::PrpRng,
        Self::PrpSpo1,
        Self::InvSym,
        Self::PrpInv,
        Self::PrpSymp,
        Self::PrpTrp,
        Self::EqSym,
        Self::EqTrans,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ScmSco => "scm-sco",
            Self::ScmSpo => "scm-spo",
            Self::EqcSym => "eqc-sym",
            Self::ScmEqc1 => "scm-eqc1",
            Self::EqpSym => "eqp-sym",
            Self::ScmEqp1 => "scm-eqp1",
            Self::CaxSco => "cax-sco",
            Self::PrpDom => "prp-dom",
            Self::PrpRng => "prp-rng",
            Self::PrpSpo1 => "prp-spo1",
            Self::InvSym => "inv-sym",
            Self::PrpInv => "prp-inv",
            Self::PrpSymp => "prp-symp",
            Self::PrpTrp => "prp-trp",
            Self::EqSym => "eq-sym",
            Self::EqTrans => "eq-trans",
        }
    }

    /// Looks up a rule from its name, like `cax-sco`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Builds the pattern rule.
    pub fn rule(self) -> Rule {
        let [x, y, z] = ["x", "y", "z"].map(Variable::new_unchecked);
        let [p, q, c, d] = ["p", "q", "c", "d"].map(Variable::new_unchecked);
        let (antecedent, consequent) = match self {
            Self::ScmSco => transitivity(rdfs::SUB_CLASS_OF.into()),
            Self::ScmSpo => transitivity(rdfs::SUB_PROPERTY_OF.into()),
            Self::EqcSym => symmetry(owl::EQUIVALENT_CLASS.into()),
            Self::ScmEqc1 => (
                vec![TriplePattern::new(c.clone(), owl::EQUIVALENT_CLASS, d.clone())],
                vec![
                    TriplePattern::new(c.clone(), rdfs::SUB_CLASS_OF, d.clone()),
                    TriplePattern::new(d, rdfs::SUB_CLASS_OF, c),
                ],
            ),
            Self::EqpSym => symmetry(owl::EQUIVALENT_PROPERTY.into()),
            Self::ScmEqp1 => (
                vec![TriplePattern::new(p.clone(), owl::EQUIVALENT_PROPERTY, q.clone())],
                vec![
                    TriplePattern::new(p.clone(), rdfs::SUB_PROPERTY_OF, q.clone()),
                    TriplePattern::new(q, rdfs::SUB_PROPERTY_OF, p),
                ],
            ),
            Self::CaxSco => (
                vec![
                    TriplePattern::new(c.clone(), rdfs::SUB_CLASS_OF, d.clone()),
                    TriplePattern::new(x.clone(), rdf::TYPE, c),
                ],
                vec![TriplePattern::new(x, rdf::TYPE, d)],
            ),
            Self::PrpDom => (
                vec![
                    TriplePattern::new(p.clone(), rdfs::DOMAIN, c.clone()),
                    TriplePattern::new(x.clone(), p, y),
                ],
                vec![TriplePattern::new(x, rdf::TYPE, c)],
            ),
            Self::PrpRng => (
                vec![
                    TriplePattern::new(p.clone(), rdfs::RANGE, c.clone()),
                    TriplePattern::new(x, p, y.clone()),
                ],
                vec![TriplePattern::new(y, rdf::TYPE, c)],
            ),
            Self::PrpSpo1 => (
                vec![
                    TriplePattern::new(p.clone(), rdfs::SUB_PROPERTY_OF, q.clone()),
                    TriplePattern::new(x.clone(), p, y.clone()),
                ],
                vec![TriplePattern::new(x, q, y)],
            ),
            Self::InvSym => symmetry(owl::INVERSE_OF.into()),
            Self::PrpInv => (
                vec![
                    TriplePattern::new(p.clone(), owl::INVERSE_OF, q.clone()),
                    TriplePattern::new(x.clone(), p, y.clone()),
                ],
                vec![TriplePattern::new(y, q, x)],
            ),
            Self::PrpSymp => (
                vec![
                    TriplePattern::new(p.clone(), rdf::TYPE, owl::SYMMETRIC_PROPERTY),
                    TriplePattern::new(x.clone(), p.clone(), y.clone()),
                ],
                vec![TriplePattern::new(y, p, x)],
            ),
            Self::PrpTrp => (
                vec![
                    TriplePattern::new(p.clone(), rdf::TYPE, owl::TRANSITIVE_PROPERTY),
                    TriplePattern::new(x.clone(), p.clone(), y.clone()),
                    TriplePattern::new(y, p.clone(), z.clone()),
                ],
                vec![TriplePattern::new(x, p, z)],
            ),
            Self::EqSym => symmetry(owl::SAME_AS.into()),
            Self::EqTrans => transitivity(owl::SAME_AS.into()),
        };
        standard_rule(self.name(), antecedent, consequent)
    }
}

type Patterns = (Vec<TriplePattern>, Vec<TriplePattern>);

fn symmetry(predicate: NamedNode) -> Patterns {
    let [x, y] = ["x", "y"].map(Variable::new_unchecked);
    (
        vec![TriplePattern::new(x.clone(), predicate.clone(), y.clone())],
        vec![TriplePattern::new(y, predicate, x)],
    )
}

fn transitivity(predicate: NamedNode) -> Patterns {
    let [x, y, z] = ["x", "y", "z"].map(Variable::new_unchecked);
    (
        vec![
            TriplePattern::new(x.clone(), predicate.clone(), y.clone()),
            TriplePattern::new(y, predicate.clone(), z.clone()),
        ],
        vec![TriplePattern::new(x, predicate, z)],
    )
}

/// Builds a rule from patterns that are known to be safe.
fn standard_rule(
    name: &str,
    antecedent: Vec<TriplePattern>,
    consequent: Vec<TriplePattern>,
) -> Rule {
    let antecedent = antecedent
        .into_iter()
        .fold(Antecedent::new(), Antecedent::with_pattern);
    Rule::from_safe_parts(name.into(), antecedent, consequent)
}

/// Builds one rule per `owl:propertyChainAxiom` of the knowledge base.
///
/// `P owl:propertyChainAxiom (p1 ... pn)` gives `?x0 p1 ?x1 ^ ... ^ ?xn-1 pn ?xn -> ?x0 P ?xn`.
/// Chains with a member that is not an IRI are ignored.
pub(crate) fn property_chain_rules(kb: &KnowledgeBase) -> Vec<Rule> {
    let analyzer = RelationAnalyzer::new(kb);
    let mut rules = Vec::new();
    for property in analyzer.chain_axiom_properties() {
        let NamedOrBlankNode::NamedNode(property) = property else {
            continue;
        };
        let Some(members) = analyzer
            .answer_chain_axiom(&property)
            .into_iter()
            .map(|member| match member {
                NamedOrBlankNode::NamedNode(member) => Some(member),
                NamedOrBlankNode::BlankNode(_) => None,
            })
            .collect::<Option<Vec<_>>>()
        else {
            tracing::debug!("Ignoring the property chain of {property}: it contains a blank node");
            continue;
        };
        if members.is_empty() {
            continue;
        }
        let variables = (0..=members.len())
            .map(|i| Variable::new_unchecked(format!("x{i}")))
            .collect::<Vec<_>>();
        let antecedent = members
            .into_iter()
            .zip(variables.windows(2))
            .map(|(member, pair)| TriplePattern::new(pair[0].clone(), member, pair[1].clone()))
            .collect();
        let Some(last) = variables.last() else {
            continue;
        };
        let consequent = vec![TriplePattern::new(
            variables[0].clone(),
            property.clone(),
            last.clone(),
        )];
        rules.push(standard_rule(
            &format!("prp-spo2({property})"),
            antecedent,
            consequent,
        ));
    }
    rules
}
