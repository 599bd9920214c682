use crate::analyzer::{Relation, RelationAnalyzer};
use crate::model::{KnowledgeBase, resource_from_subject, resource_from_term, unique};
use crate::validator::{Evidence, EvidenceCategory, ValidationReport, ValidatorRule};
use crate::vocab::{is_reserved, owl};
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{NamedNode, NamedNodeRef, NamedOrBlankNode, TermRef, TripleRef};
use oxsdatatypes::Boolean;
use rustc_hash::FxHashSet;
use std::fmt;
use std::iter::once;

const OWL_FULL_SUGGESTION: &str =
    "Remove or rename one of the two entities: at the moment the ontology is OWL Full!";

pub(super) fn vocabulary_disjointness(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::VocabularyDisjointness;
    let classes = kb.classes();
    let properties = kb.properties();
    let individuals = kb.individuals();
    let property_set = properties.iter().collect::<FxHashSet<_>>();
    let individual_set = individuals.iter().collect::<FxHashSet<_>>();
    let mut report = ValidationReport::new();
    for class in &classes {
        if property_set.contains(class) {
            report.add_evidence(Evidence::new(
                EvidenceCategory::Error,
                rule,
                format!(
                    "Disjointess of class model and property model is violated because the name '{}' refers both to a class and a property",
                    name(class)
                ),
                OWL_FULL_SUGGESTION,
            ));
        }
        if individual_set.contains(class) {
            report.add_evidence(Evidence::new(
                EvidenceCategory::Error,
                rule,
                format!(
                    "Disjointess of class model and data is violated because the name '{}' refers both to a class and an individual",
                    name(class)
                ),
                OWL_FULL_SUGGESTION,
            ));
        }
    }
    for property in &properties {
        if individual_set.contains(property) {
            report.add_evidence(Evidence::new(
                EvidenceCategory::Error,
                rule,
                format!(
                    "Disjointess of property model and data is violated because the name '{}' refers both to a property and an individual",
                    name(property)
                ),
                OWL_FULL_SUGGESTION,
            ));
        }
    }
    report
}

pub(super) fn vocabulary_declaration(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::VocabularyDeclaration;
    let mut classes = Vec::new();
    let mut properties = Vec::new();
    for triple in kb.iter() {
        if triple.predicate == rdf::TYPE {
            if let TermRef::NamedNode(class) = triple.object {
                if !is_reserved(class.as_str()) && !kb.is_class(class) {
                    classes.push(class);
                }
            }
        }
        if !is_reserved(triple.predicate.as_str()) && !kb.is_property(triple.predicate) {
            properties.push(triple.predicate);
        }
    }
    let mut report = ValidationReport::new();
    for class in unique(classes) {
        report.add_evidence(Evidence::new(
            EvidenceCategory::Warning,
            rule,
            format!(
                "The class '{}' is used in a type assertion but it is not declared",
                name(class)
            ),
            format!("Declare '{}' as an owl:Class", name(class)),
        ));
    }
    for property in unique(properties) {
        report.add_evidence(Evidence::new(
            EvidenceCategory::Warning,
            rule,
            format!(
                "The property '{}' is used in an assertion but it is not declared",
                name(property)
            ),
            format!(
                "Declare '{}' as an owl:ObjectProperty, an owl:DatatypeProperty or an owl:AnnotationProperty",
                name(property)
            ),
        ));
    }
    report
}

pub(super) fn disjoint_classes(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::DisjointClasses;
    let analyzer = RelationAnalyzer::new(kb);
    let mut report = ValidationReport::new();
    for individual in kb.individuals() {
        let types = unique(
            kb.objects(&individual, rdf::TYPE)
                .filter_map(resource_from_term),
        );
        for (i, class) in types.iter().enumerate() {
            let disjoint = disjoint_partners(
                &analyzer,
                class,
                Relation::DisjointClasses,
                Relation::EquivalentClasses,
            );
            for other in &types[i + 1..] {
                if disjoint.contains(other) {
                    report.add_evidence(Evidence::new(
                        EvidenceCategory::Error,
                        rule,
                        format!(
                            "The individual '{}' is typed by the disjoint classes '{}' and '{}'",
                            name(&individual),
                            name(class),
                            name(other)
                        ),
                        format!(
                            "Remove one of the rdf:type assertions of '{}' or the disjointness of its classes",
                            name(&individual)
                        ),
                    ));
                }
            }
        }
    }
    report
}

pub(super) fn sub_class_disjointness(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::SubClassDisjointness;
    let analyzer = RelationAnalyzer::new(kb);
    let classes = unique(
        kb.classes().into_iter().chain(
            kb.select(None, Some(rdfs::SUB_CLASS_OF), None)
                .filter_map(|t| resource_from_subject(t.subject)),
        ),
    );
    let mut report = ValidationReport::new();
    for class in &classes {
        let disjoint = disjoint_partners(
            &analyzer,
            class,
            Relation::DisjointClasses,
            Relation::EquivalentClasses,
        );
        if disjoint.is_empty() {
            continue;
        }
        for super_class in analyzer.answer(Relation::SuperClasses, class) {
            if disjoint.contains(&super_class) {
                report.add_evidence(Evidence::new(
                    EvidenceCategory::Error,
                    rule,
                    format!(
                        "The class '{}' is both a sub-class of and disjoint with the class '{}'",
                        name(class),
                        name(&super_class)
                    ),
                    "Remove the rdfs:subClassOf or the owl:disjointWith axiom between the two classes",
                ));
            }
        }
    }
    report
}

pub(super) fn disjoint_properties(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::DisjointProperties;
    let analyzer = RelationAnalyzer::new(kb);
    let mut candidates = kb.properties();
    for triple in kb.select(None, Some(owl::PROPERTY_DISJOINT_WITH), None) {
        candidates.extend(resource_from_subject(triple.subject));
        candidates.extend(resource_from_term(triple.object));
    }
    for members in all_members(kb, owl::ALL_DISJOINT_PROPERTIES, &[owl::MEMBERS]) {
        candidates.extend(members);
    }
    let mut seen = FxHashSet::<(NamedNode, NamedNode)>::default();
    let mut report = ValidationReport::new();
    for property in unique(candidates) {
        let NamedOrBlankNode::NamedNode(property) = property else {
            continue;
        };
        for partner in disjoint_partners(
            &analyzer,
            &NamedOrBlankNode::from(property.clone()),
            Relation::DisjointProperties,
            Relation::EquivalentProperties,
        ) {
            let NamedOrBlankNode::NamedNode(partner) = partner else {
                continue;
            };
            if seen.contains(&(partner.clone(), property.clone())) {
                continue;
            }
            seen.insert((property.clone(), partner.clone()));
            for triple in kb.select(None, Some(property.as_ref()), None) {
                if kb.contains(TripleRef::new(triple.subject, &partner, triple.object)) {
                    report.add_evidence(Evidence::new(
                        EvidenceCategory::Error,
                        rule,
                        format!(
                            "The disjoint properties '{}' and '{}' both link '{}' to '{}'",
                            name(&property),
                            name(&partner),
                            name(triple.subject),
                            name(triple.object)
                        ),
                        "Remove one of the two assertions or the disjointness of the properties",
                    ));
                }
            }
        }
    }
    report
}

pub(super) fn asymmetric_property(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::AsymmetricProperty;
    let mut report = ValidationReport::new();
    for property in named_instances(kb, owl::ASYMMETRIC_PROPERTY) {
        let mut reported = FxHashSet::<(NamedOrBlankNode, NamedOrBlankNode)>::default();
        for triple in kb.select(None, Some(property.as_ref()), None) {
            let (Some(subject), Some(object)) = (
                resource_from_subject(triple.subject),
                resource_from_term(triple.object),
            ) else {
                continue;
            };
            if !kb.contains(TripleRef::new(&object, &property, &subject))
                || reported.contains(&(object.clone(), subject.clone()))
            {
                continue;
            }
            report.add_evidence(Evidence::new(
                EvidenceCategory::Error,
                rule,
                format!(
                    "The asymmetric property '{}' links '{}' to '{}' and the other way around",
                    name(&property),
                    name(&subject),
                    name(&object)
                ),
                format!(
                    "Remove one of the two assertions or the owl:AsymmetricProperty type of '{}'",
                    name(&property)
                ),
            ));
            reported.insert((subject, object));
        }
    }
    report
}

pub(super) fn irreflexive_property(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::IrreflexiveProperty;
    let mut report = ValidationReport::new();
    for property in named_instances(kb, owl::IRREFLEXIVE_PROPERTY) {
        for triple in kb.select(None, Some(property.as_ref()), None) {
            if TermRef::from(triple.subject) == triple.object {
                report.add_evidence(Evidence::new(
                    EvidenceCategory::Error,
                    rule,
                    format!(
                        "The irreflexive property '{}' links '{}' to itself",
                        name(&property),
                        name(triple.subject)
                    ),
                    format!(
                        "Remove the assertion or the owl:IrreflexiveProperty type of '{}'",
                        name(&property)
                    ),
                ));
            }
        }
    }
    report
}

pub(super) fn inverse_of(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::InverseOf;
    let mut report = ValidationReport::new();
    for triple in kb.select(None, Some(owl::INVERSE_OF), None) {
        let sides = unique(
            resource_from_subject(triple.subject)
                .into_iter()
                .chain(resource_from_term(triple.object)),
        );
        for side in sides {
            if kb.has_type(&side, owl::DATATYPE_PROPERTY) {
                report.add_evidence(Evidence::new(
                    EvidenceCategory::Error,
                    rule,
                    format!(
                        "The datatype property '{}' is used in the owl:inverseOf axiom between '{}' and '{}'",
                        name(&side),
                        name(triple.subject),
                        name(triple.object)
                    ),
                    "owl:inverseOf can only relate object properties",
                ));
            }
        }
    }
    report
}

pub(super) fn same_as_different_from(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::SameAsDifferentFrom;
    let mut different = FxHashSet::<(NamedOrBlankNode, NamedOrBlankNode)>::default();
    for triple in kb.select(None, Some(owl::DIFFERENT_FROM), None) {
        if let (Some(a), Some(b)) = (
            resource_from_subject(triple.subject),
            resource_from_term(triple.object),
        ) {
            different.insert((b.clone(), a.clone()));
            different.insert((a, b));
        }
    }
    for members in all_members(kb, owl::ALL_DIFFERENT, &[owl::MEMBERS, owl::DISTINCT_MEMBERS]) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                different.insert((a.clone(), b.clone()));
                different.insert((b.clone(), a.clone()));
            }
        }
    }
    let mut reported = FxHashSet::<(NamedOrBlankNode, NamedOrBlankNode)>::default();
    let mut report = ValidationReport::new();
    for triple in kb.select(None, Some(owl::SAME_AS), None) {
        let (Some(a), Some(b)) = (
            resource_from_subject(triple.subject),
            resource_from_term(triple.object),
        ) else {
            continue;
        };
        let pair = (a, b);
        if !different.contains(&pair) || reported.contains(&(pair.1.clone(), pair.0.clone())) {
            continue;
        }
        report.add_evidence(Evidence::new(
            EvidenceCategory::Error,
            rule,
            format!(
                "The individuals '{}' and '{}' are both owl:sameAs and owl:differentFrom",
                name(&pair.0),
                name(&pair.1)
            ),
            "Remove the owl:sameAs or the owl:differentFrom assertion between the two individuals",
        ));
        reported.insert(pair);
    }
    report
}

pub(super) fn deprecated(kb: &KnowledgeBase) -> ValidationReport {
    let rule = ValidatorRule::Deprecated;
    let flagged = kb
        .select(None, Some(owl::DEPRECATED), None)
        .filter(|t| match t.object {
            TermRef::Literal(literal) => {
                literal.datatype() == xsd::BOOLEAN
                    && literal.value().parse::<Boolean>().is_ok_and(bool::from)
            }
            _ => false,
        })
        .filter_map(|t| named(resource_from_subject(t.subject)?));
    let deprecated = unique(
        named_instances(kb, owl::DEPRECATED_CLASS)
            .into_iter()
            .chain(named_instances(kb, owl::DEPRECATED_PROPERTY))
            .chain(flagged),
    );
    let mut report = ValidationReport::new();
    for resource in deprecated {
        let usages = kb.subjects(rdf::TYPE, &resource).count()
            + kb.select(None, Some(resource.as_ref()), None).count();
        if usages > 0 {
            report.add_evidence(Evidence::new(
                EvidenceCategory::Warning,
                rule,
                format!(
                    "'{}' is deprecated but it is still used in {usages} assertions",
                    name(&resource)
                ),
                format!(
                    "Replace the usages of '{}' with its recommended alternative",
                    name(&resource)
                ),
            ));
        }
    }
    report
}

/// IRIs typed with `class`, in enumeration order.
/// Disjoint partners of `resource` and of all its equivalents.
fn disjoint_partners(
    analyzer: &RelationAnalyzer<'_>,
    resource: &NamedOrBlankNode,
    disjointness: Relation,
    equivalence: Relation,
) -> Vec<NamedOrBlankNode> {
    unique(
        once(resource.clone())
            .chain(analyzer.answer(equivalence, resource))
            .flat_map(|origin| analyzer.answer(disjointness, &origin))
            .filter(|partner| partner != resource),
    )
}

fn named_instances(kb: &KnowledgeBase, class: NamedNodeRef<'_>) -> Vec<NamedNode> {
    unique(
        kb.subjects(rdf::TYPE, class)
            .filter_map(|s| named(resource_from_subject(s)?)),
    )
}

fn named(resource: NamedOrBlankNode) -> Option<NamedNode> {
    match resource {
        NamedOrBlankNode::NamedNode(node) => Some(node),
        NamedOrBlankNode::BlankNode(_) => None,
    }
}

/// Members of the lists attached to the instances of `axiom_type` by one of `list_predicates`.
fn all_members(
    kb: &KnowledgeBase,
    axiom_type: NamedNodeRef<'_>,
    list_predicates: &[NamedNodeRef<'_>],
) -> Vec<Vec<NamedOrBlankNode>> {
    let mut lists = Vec::new();
    for axiom in unique(
        kb.subjects(rdf::TYPE, axiom_type)
            .filter_map(resource_from_subject),
    ) {
        for predicate in list_predicates {
            for head in kb.objects(&axiom, *predicate).filter_map(resource_from_term) {
                lists.push(
                    kb.deserialize_ordered_collection(&head)
                        .iter()
                        .filter_map(|m| resource_from_term(m.as_ref()))
                        .collect(),
                );
            }
        }
    }
    lists
}

/// Prints IRIs without angle brackets.
struct Name<'a>(TermRef<'a>);

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            TermRef::NamedNode(node) => f.write_str(node.as_str()),
            term => write!(f, "{term}"),
        }
    }
}

fn name<'a>(term: impl Into<TermRef<'a>>) -> Name<'a> {
    Name(term.into())
}
