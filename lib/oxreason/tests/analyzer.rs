//! Relation closures over asserted and inferred triples.

use oxrdf::vocab::rdfs;
use oxrdf::{NamedNode, NamedOrBlankNode, TripleRef};
use oxreason::vocab::owl;
use oxreason::{KnowledgeBase, Relation, RelationAnalyzer};

fn ex(name: &str) -> NamedNode {
    NamedNode::new(format!("http://example.com/{name}")).unwrap()
}

fn nodes(names: &[&str]) -> Vec<NamedOrBlankNode> {
    names.iter().map(|n| ex(n).into()).collect()
}

#[test]
fn test_cyclic_sub_class_of_terminates() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("A"), rdfs::SUB_CLASS_OF, &ex("B")));
    kb.insert(TripleRef::new(&ex("B"), rdfs::SUB_CLASS_OF, &ex("C")));
    kb.insert(TripleRef::new(&ex("C"), rdfs::SUB_CLASS_OF, &ex("A")));
    let analyzer = RelationAnalyzer::new(&kb);
    for relation in Relation::ALL {
        for class in ["A", "B", "C"] {
            let answer = analyzer.answer(relation, &ex(class));
            assert!(!answer.contains(&ex(class).into()));
        }
    }
    assert_eq!(
        analyzer.answer(Relation::SuperClasses, &ex("A")),
        nodes(&["B", "C"])
    );
}

#[test]
fn test_sub_class_closure() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("A"), rdfs::SUB_CLASS_OF, &ex("B")));
    kb.insert(TripleRef::new(&ex("B"), rdfs::SUB_CLASS_OF, &ex("C")));
    let analyzer = RelationAnalyzer::new(&kb);
    assert!(analyzer.check(Relation::SuperClasses, &ex("A"), &ex("C")));
    assert!(analyzer.check(Relation::SubClasses, &ex("C"), &ex("A")));
    assert_eq!(
        analyzer.answer(Relation::SubClasses, &ex("C")),
        nodes(&["B", "A"])
    );
    assert!(analyzer.answer(Relation::SuperClasses, &ex("C")).is_empty());
}

#[test]
fn test_unknown_resource() {
    let kb = KnowledgeBase::new();
    let analyzer = RelationAnalyzer::new(&kb);
    for relation in Relation::ALL {
        assert!(analyzer.answer(relation, &ex("nothing")).is_empty());
    }
    assert!(analyzer.answer_chain_axiom(&ex("nothing")).is_empty());
}

#[test]
fn test_equivalent_properties_are_symmetric_and_transitive() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("p"), owl::EQUIVALENT_PROPERTY, &ex("q")));
    kb.insert(TripleRef::new(&ex("r"), owl::EQUIVALENT_PROPERTY, &ex("q")));
    let analyzer = RelationAnalyzer::new(&kb);
    assert_eq!(
        analyzer.answer(Relation::EquivalentProperties, &ex("p")),
        nodes(&["q", "r"])
    );
    assert_eq!(
        analyzer.answer(Relation::EquivalentProperties, &ex("r")),
        nodes(&["q", "p"])
    );
}

#[test]
fn test_inverse_is_symmetric_but_not_transitive() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("hasChild"), owl::INVERSE_OF, &ex("hasParent")));
    kb.insert(TripleRef::new(&ex("hasParent"), owl::INVERSE_OF, &ex("isParentOf")));
    let analyzer = RelationAnalyzer::new(&kb);
    assert_eq!(
        analyzer.answer(Relation::InverseProperties, &ex("hasChild")),
        nodes(&["hasParent"])
    );
    assert!(analyzer.check(Relation::InverseProperties, &ex("hasParent"), &ex("hasChild")));
    assert!(!analyzer.check(Relation::InverseProperties, &ex("hasChild"), &ex("isParentOf")));
}

#[test]
fn test_disjointness_extends_to_equivalent_classes() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("A"), owl::DISJOINT_WITH, &ex("B")));
    kb.insert(TripleRef::new(&ex("B"), owl::EQUIVALENT_CLASS, &ex("C")));
    kb.insert(TripleRef::new(&ex("B"), owl::DISJOINT_WITH, &ex("D")));
    let analyzer = RelationAnalyzer::new(&kb);
    assert_eq!(
        analyzer.answer(Relation::DisjointClasses, &ex("A")),
        nodes(&["B", "C"])
    );
    // Disjointness is not transitive
    assert!(!analyzer.check(Relation::DisjointClasses, &ex("A"), &ex("D")));
    assert!(analyzer.check(Relation::DisjointClasses, &ex("B"), &ex("A")));
    // Nor does it make disjoint-with-a-disjoint equivalent
    assert!(analyzer.answer(Relation::EquivalentClasses, &ex("A")).is_empty());
    assert!(analyzer.answer(Relation::EquivalentClasses, &ex("D")).is_empty());
}

#[test]
fn test_disjoint_properties_extend_to_equivalent_properties() {
    let mut kb = KnowledgeBase::new();
    kb.insert(TripleRef::new(&ex("p"), owl::PROPERTY_DISJOINT_WITH, &ex("q")));
    kb.insert_inferred(TripleRef::new(&ex("q"), owl::EQUIVALENT_PROPERTY, &ex("r")));
    let analyzer = RelationAnalyzer::new(&kb);
    assert_eq!(
        analyzer.answer(Relation::DisjointProperties, &ex("p")),
        nodes(&["q", "r"])
    );
}
