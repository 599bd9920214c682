//! Forward chaining to a fixpoint with the standard and user defined rules.

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Literal, NamedNode, TripleRef, Variable};
use oxreason::vocab::owl;
use oxreason::{
    Antecedent, BuiltIn, BuiltInKind, KnowledgeBase, Reasoner, Rule, RuleError, StandardRule,
    TriplePattern,
};

fn ex(name: &str) -> NamedNode {
    NamedNode::new(format!("http://example.com/{name}")).unwrap()
}

fn family() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("Man"), rdfs::SUB_CLASS_OF, &ex("Person")));
    kb.insert(TripleRef::new(&ex("Person"), rdfs::SUB_CLASS_OF, &ex("Agent")));
    kb.insert(TripleRef::new(&ex("hasParent"), owl::INVERSE_OF, &ex("hasChild")));
    kb.insert(TripleRef::new(&ex("hasParent"), rdfs::DOMAIN, &ex("Person")));
    kb.insert(TripleRef::new(&ex("hasAncestor"), rdf::TYPE, owl::TRANSITIVE_PROPERTY));
    kb.insert(TripleRef::new(&ex("hasParent"), rdfs::SUB_PROPERTY_OF, &ex("hasAncestor")));
    kb.insert(TripleRef::new(&ex("marriedTo"), rdf::TYPE, owl::SYMMETRIC_PROPERTY));
    kb.insert(TripleRef::new(&ex("tom"), rdf::TYPE, &ex("Man")));
    kb.insert(TripleRef::new(&ex("tom"), &ex("hasParent"), &ex("bob")));
    kb.insert(TripleRef::new(&ex("bob"), &ex("hasParent"), &ex("jim")));
    kb.insert(TripleRef::new(&ex("bob"), &ex("marriedTo"), &ex("ann")));
    kb.insert(TripleRef::new(&ex("ann"), owl::SAME_AS, &ex("anne")));
    kb
}

#[test]
fn test_standard_entailments() {
    let mut kb = family();
    Reasoner::with_standard_rules().reason(&mut kb).unwrap();
    for (s, p, o) in [
        ("Man", rdfs::SUB_CLASS_OF.as_str(), "Agent"),
        ("tom", rdf::TYPE.as_str(), "Agent"),
        ("bob", rdf::TYPE.as_str(), "Person"),
        ("bob", "http://example.com/hasChild", "tom"),
        ("tom", "http://example.com/hasAncestor", "jim"),
        ("ann", "http://example.com/marriedTo", "bob"),
        ("anne", owl::SAME_AS.as_str(), "ann"),
    ] {
        let predicate = NamedNode::new(p).unwrap();
        assert!(
            kb.inferred()
                .contains(TripleRef::new(&ex(s), &predicate, &ex(o))),
            "{s} {p} {o} should be inferred"
        );
    }
}

#[test]
fn test_fixpoint_is_idempotent() {
    let mut kb = family();
    let reasoner = Reasoner::with_standard_rules();
    let asserted = kb.asserted().clone();
    let first = reasoner.reason(&mut kb).unwrap();
    assert!(!first.is_empty());
    assert_eq!(kb.inferred().len(), first.len());
    let len = kb.len();

    let second = reasoner.reason(&mut kb).unwrap();
    assert!(second.is_empty());
    assert_eq!(second.iterations(), 1);
    assert_eq!(kb.len(), len);
    assert_eq!(kb.asserted(), &asserted);
}

#[test]
fn test_provenance() {
    let mut kb = family();
    let report = Reasoner::with_standard_rules().reason(&mut kb).unwrap();
    let inference = report
        .inferences()
        .iter()
        .find(|i| i.triple.as_ref() == TripleRef::new(&ex("bob"), &ex("hasChild"), &ex("tom")))
        .unwrap();
    assert_eq!(inference.rule, StandardRule::PrpInv.name());
    assert!(
        inference
            .bindings
            .contains(&(Variable::new("x").unwrap(), ex("tom").into()))
    );
    for inference in report.inferences() {
        assert!(kb.inferred().contains(&inference.triple));
        assert!(!kb.asserted().contains(&inference.triple));
    }
}

#[test]
fn test_rule_with_built_in() {
    let x = Variable::new("x").unwrap();
    let age = Variable::new("age").unwrap();
    let rule = Rule::new(
        "adult",
        Antecedent::new()
            .with_pattern(TriplePattern::new(x.clone(), ex("age"), age.clone()))
            .with_built_in(
                BuiltIn::comparison(BuiltInKind::GreaterThanOrEqual, age, Literal::from(18))
                    .unwrap(),
            ),
        [TriplePattern::new(x, rdf::TYPE, ex("Adult"))],
    )
    .unwrap();
    assert_eq!(
        rule.to_string(),
        "adult: ?x <http://example.com/age> ?age ^ swrlb:greaterThanOrEqual(?age,\"18\"^^xsd:integer) -> ?x <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.com/Adult>"
    );

    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("alice"), &ex("age"), &Literal::from(20)));
    kb.insert(TripleRef::new(&ex("bob"), &ex("age"), &Literal::from(12)));
    kb.insert(TripleRef::new(&ex("carl"), &ex("age"), &Literal::from("unknown")));
    let mut reasoner = Reasoner::new();
    reasoner.add_rule(rule);
    let report = reasoner.reason(&mut kb).unwrap();
    assert_eq!(report.len(), 1);
    assert!(kb.contains(TripleRef::new(&ex("alice"), rdf::TYPE, &ex("Adult"))));
    assert_eq!(report.inferences()[0].rule, "adult");
}

#[test]
fn test_unsafe_rules_are_rejected() {
    let x = Variable::new("x").unwrap();
    let y = Variable::new("y").unwrap();
    assert!(matches!(
        Rule::new(
            "unbound",
            Antecedent::new().with_pattern(TriplePattern::new(x.clone(), ex("p"), ex("o"))),
            [TriplePattern::new(x.clone(), ex("q"), y.clone())],
        ),
        Err(RuleError::UnboundConsequentVariable { .. })
    ));
    assert!(matches!(
        Rule::new(
            "empty",
            Antecedent::new(),
            [TriplePattern::new(ex("s"), ex("q"), ex("o"))],
        ),
        Err(RuleError::EmptyAntecedent { .. })
    ));
    assert!(matches!(
        Rule::new(
            "no-consequent",
            Antecedent::new().with_pattern(TriplePattern::new(x.clone(), ex("p"), ex("o"))),
            [],
        ),
        Err(RuleError::EmptyConsequent { .. })
    ));
    assert!(matches!(
        Rule::new(
            "built-in",
            Antecedent::new()
                .with_pattern(TriplePattern::new(x.clone(), ex("p"), ex("o")))
                .with_built_in(BuiltIn::starts_with(y, "a")),
            [TriplePattern::new(x, ex("q"), ex("o"))],
        ),
        Err(RuleError::UnboundBuiltInVariable { .. })
    ));
}

#[test]
fn test_asserting_an_inferred_triple() {
    let mut kb = family();
    Reasoner::with_standard_rules().reason(&mut kb).unwrap();
    let (tom, agent) = (ex("tom"), ex("Agent"));
    let triple = TripleRef::new(&tom, rdf::TYPE, &agent);
    assert!(kb.inferred().contains(triple));
    kb.insert(triple);
    assert!(!kb.inferred().contains(triple));
    assert!(kb.asserted().contains(triple));
}
