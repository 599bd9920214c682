//! Consistency checks reported as evidence.

use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNode, NamedNode, TripleRef};
use oxreason::vocab::owl;
use oxreason::{
    EvidenceCategory, KnowledgeBase, Reasoner, Validator, ValidatorRule,
};

fn ex(name: &str) -> NamedNode {
    NamedNode::new(format!("http://example.com/{name}")).unwrap()
}

#[test]
fn test_vocabulary_disjointness() {
    let mut kb = KnowledgeBase::new();
    // A class that is also a property
    kb.insert(TripleRef::new(&ex("Agent"), rdf::TYPE, owl::CLASS));
    kb.insert(TripleRef::new(&ex("Agent"), rdf::TYPE, owl::OBJECT_PROPERTY));
    // A property that is also an individual
    kb.insert(TripleRef::new(&ex("knows"), rdf::TYPE, owl::DATATYPE_PROPERTY));
    kb.insert(TripleRef::new(&ex("knows"), rdf::TYPE, owl::NAMED_INDIVIDUAL));
    // A well behaved class
    kb.insert(TripleRef::new(&ex("Person"), rdf::TYPE, owl::CLASS));

    let report = Validator::new().validate(&kb);
    let evidences = report
        .evidences()
        .iter()
        .filter(|e| e.rule() == ValidatorRule::VocabularyDisjointness)
        .collect::<Vec<_>>();
    assert_eq!(evidences.len(), 2);
    assert!(
        evidences
            .iter()
            .all(|e| e.category() == EvidenceCategory::Error
                && e.rule_name() == "VocabularyDisjointness")
    );
    assert_eq!(
        evidences[0].message(),
        "Disjointess of class model and property model is violated because the name 'http://example.com/Agent' refers both to a class and a property"
    );
    assert_eq!(
        evidences[1].message(),
        "Disjointess of property model and data is violated because the name 'http://example.com/knows' refers both to a property and an individual"
    );
    assert_eq!(
        evidences[1].suggestion(),
        "Remove or rename one of the two entities: at the moment the ontology is OWL Full!"
    );
    assert_eq!(report.error_count(), 2);
}

#[test]
fn test_all_rules_run_in_order() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("Person"), rdf::TYPE, owl::CLASS));
    kb.insert(TripleRef::new(&ex("Person"), rdf::TYPE, owl::OBJECT_PROPERTY));
    kb.insert(TripleRef::new(&ex("knows"), rdf::TYPE, owl::IRREFLEXIVE_PROPERTY));
    kb.insert(TripleRef::new(&ex("alice"), &ex("knows"), &ex("alice")));
    kb.insert(TripleRef::new(&ex("alice"), &ex("likes"), &ex("bob")));

    let report = Validator::new().validate(&kb);
    let rules = report.evidences().iter().map(|e| e.rule()).collect::<Vec<_>>();
    assert_eq!(
        rules,
        [
            ValidatorRule::VocabularyDisjointness,
            ValidatorRule::VocabularyDeclaration,
            ValidatorRule::IrreflexiveProperty,
        ]
    );
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.warning_count(), 1);
    assert!(!report.is_consistent());
}

#[test]
fn test_rule_subset() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("knows"), rdf::TYPE, owl::IRREFLEXIVE_PROPERTY));
    kb.insert(TripleRef::new(&ex("alice"), &ex("knows"), &ex("alice")));
    let validator = Validator::with_rules([
        ValidatorRule::IrreflexiveProperty,
        ValidatorRule::VocabularyDisjointness,
    ]);
    assert_eq!(
        validator.rules(),
        [
            ValidatorRule::VocabularyDisjointness,
            ValidatorRule::IrreflexiveProperty
        ]
    );
    assert_eq!(validator.validate(&kb).len(), 1);
    assert!(Validator::with_rules([]).validate(&kb).is_empty());
}

#[test]
fn test_disjoint_classes_after_reasoning() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("Cat"), rdf::TYPE, owl::CLASS));
    kb.insert(TripleRef::new(&ex("Dog"), rdf::TYPE, owl::CLASS));
    kb.insert(TripleRef::new(&ex("Puppy"), rdf::TYPE, owl::CLASS));
    kb.insert(TripleRef::new(&ex("Cat"), owl::DISJOINT_WITH, &ex("Dog")));
    kb.insert(TripleRef::new(&ex("Puppy"), rdfs::SUB_CLASS_OF, &ex("Dog")));
    kb.insert(TripleRef::new(&ex("rex"), rdf::TYPE, &ex("Cat")));
    kb.insert(TripleRef::new(&ex("rex"), rdf::TYPE, &ex("Puppy")));

    let validator = Validator::with_rules([ValidatorRule::DisjointClasses]);
    assert!(validator.validate(&kb).is_empty());
    Reasoner::with_standard_rules().reason(&mut kb).unwrap();
    let report = validator.validate(&kb);
    assert_eq!(report.error_count(), 1);
    assert!(report.evidences()[0].message().contains("http://example.com/rex"));
}

#[test]
fn test_disjoint_classes_through_an_equivalent_class() {
    for equivalent_typed_first in [true, false] {
        let mut kb = KnowledgeBase::new();
        for class in ["A", "A2", "B"] {
            kb.insert(TripleRef::new(&ex(class), rdf::TYPE, owl::CLASS));
        }
        kb.insert(TripleRef::new(&ex("A"), owl::EQUIVALENT_CLASS, &ex("A2")));
        kb.insert(TripleRef::new(&ex("A"), owl::DISJOINT_WITH, &ex("B")));
        let (first, second) = if equivalent_typed_first {
            (ex("A2"), ex("B"))
        } else {
            (ex("B"), ex("A2"))
        };
        kb.insert(TripleRef::new(&ex("x"), rdf::TYPE, &first));
        kb.insert(TripleRef::new(&ex("x"), rdf::TYPE, &second));

        let report = Validator::with_rules([ValidatorRule::DisjointClasses]).validate(&kb);
        assert_eq!(report.error_count(), 1, "A2 typed first: {equivalent_typed_first}");
    }
}

#[test]
fn test_sub_class_disjointness_through_an_equivalent_class() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("A2"), owl::EQUIVALENT_CLASS, &ex("A")));
    kb.insert(TripleRef::new(&ex("A"), owl::DISJOINT_WITH, &ex("B")));
    kb.insert(TripleRef::new(&ex("A2"), rdfs::SUB_CLASS_OF, &ex("B")));
    let report = Validator::with_rules([ValidatorRule::SubClassDisjointness]).validate(&kb);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.evidences()[0].message(),
        "The class 'http://example.com/A2' is both a sub-class of and disjoint with the class 'http://example.com/B'"
    );
}

#[test]
fn test_sub_class_disjointness() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("A"), rdfs::SUB_CLASS_OF, &ex("B")));
    kb.insert(TripleRef::new(&ex("B"), rdfs::SUB_CLASS_OF, &ex("C")));
    kb.insert(TripleRef::new(&ex("A"), owl::DISJOINT_WITH, &ex("C")));
    let report = Validator::with_rules([ValidatorRule::SubClassDisjointness]).validate(&kb);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.evidences()[0].message(),
        "The class 'http://example.com/A' is both a sub-class of and disjoint with the class 'http://example.com/C'"
    );
}

#[test]
fn test_disjoint_properties() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("hasParent"), owl::PROPERTY_DISJOINT_WITH, &ex("hasSpouse")));
    kb.insert(TripleRef::new(&ex("a"), &ex("hasParent"), &ex("b")));
    kb.insert(TripleRef::new(&ex("a"), &ex("hasSpouse"), &ex("b")));
    kb.insert(TripleRef::new(&ex("a"), &ex("hasSpouse"), &ex("c")));
    let report = Validator::with_rules([ValidatorRule::DisjointProperties]).validate(&kb);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_all_disjoint_properties() {
    let mut kb = KnowledgeBase::new();
    let (axiom, l1, l2) = (BlankNode::default(), BlankNode::default(), BlankNode::default());
    kb.insert(TripleRef::new(&axiom, rdf::TYPE, owl::ALL_DISJOINT_PROPERTIES));
    kb.insert(TripleRef::new(&axiom, owl::MEMBERS, &l1));
    kb.insert(TripleRef::new(&l1, rdf::FIRST, &ex("p")));
    kb.insert(TripleRef::new(&l1, rdf::REST, &l2));
    kb.insert(TripleRef::new(&l2, rdf::FIRST, &ex("q")));
    kb.insert(TripleRef::new(&l2, rdf::REST, rdf::NIL));
    kb.insert(TripleRef::new(&ex("a"), &ex("p"), &ex("b")));
    kb.insert(TripleRef::new(&ex("a"), &ex("q"), &ex("b")));
    let report = Validator::with_rules([ValidatorRule::DisjointProperties]).validate(&kb);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_same_as_different_from() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("a"), owl::SAME_AS, &ex("b")));
    kb.insert(TripleRef::new(&ex("b"), owl::DIFFERENT_FROM, &ex("a")));
    let report = Validator::with_rules([ValidatorRule::SameAsDifferentFrom]).validate(&kb);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_deprecated_usage_is_a_warning() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("oldName"), rdf::TYPE, owl::DEPRECATED_PROPERTY));
    kb.insert(TripleRef::new(&ex("a"), &ex("oldName"), &ex("b")));
    let report = Validator::new().validate(&kb);
    assert!(report.is_consistent());
    assert!(
        report
            .warnings()
            .any(|e| e.rule() == ValidatorRule::Deprecated)
    );
}

#[test]
fn test_validation_does_not_modify_the_knowledge_base() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("a"), owl::SAME_AS, &ex("b")));
    let before = kb.clone();
    Validator::new().validate(&kb);
    assert_eq!(kb.asserted(), before.asserted());
    assert_eq!(kb.inferred(), before.inferred());
}
