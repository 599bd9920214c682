use crate::model::{KnowledgeBase, resource_from_subject, resource_from_term, unique};
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, SubjectRef, TermRef};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// A relation between two classes or two properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Transitive `rdfs:subClassOf`, from the super-class to its sub-classes
    SubClasses,
    /// Transitive `rdfs:subClassOf`, from the sub-class to its super-classes
    SuperClasses,
    /// Symmetric and transitive `owl:equivalentClass`
    EquivalentClasses,
    /// `owl:disjointWith` and `owl:AllDisjointClasses`, extended with the equivalent classes of the partners
    DisjointClasses,
    /// Transitive `rdfs:subPropertyOf`, from the super-property to its sub-properties
    SubProperties,
    /// Transitive `rdfs:subPropertyOf`, from the sub-property to its super-properties
    SuperProperties,
    /// Symmetric and transitive `owl:equivalentProperty`
    EquivalentProperties,
    /// `owl:propertyDisjointWith` and `owl:AllDisjointProperties`, extended with the equivalent properties of the partners
    DisjointProperties,
    /// Symmetric `owl:inverseOf`
    InverseProperties,
}

impl Relation {
    pub const ALL: [Self; 9] = [
        Self::SubClasses,
        Self::SuperClasses,
        Self::EquivalentClasses,
        Self::DisjointClasses,
        Self::SubProperties,
        Self::SuperProperties,
        Self::EquivalentProperties,
        Self::DisjointProperties,
        Self::InverseProperties,
    ];
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
    Both,
}

/// Computes closures of the class and property relations of a [`KnowledgeBase`].
///
/// The asserted and the inferred triples are both considered.
/// Traversals keep their own visited set so cyclic axioms always terminate.
///
/// ```
/// use oxrdf::vocab::rdfs;
/// use oxrdf::{NamedNode, NamedOrBlankNode, TripleRef};
/// use oxreason::{KnowledgeBase, Relation, RelationAnalyzer};
///
/// let a = NamedNode::new("http://example.com/A")?;
/// let b = NamedNode::new("http://example.com/B")?;
/// let c = NamedNode::new("http://example.com/C")?;
/// let mut kb = KnowledgeBase::new();
/// kb.insert(TripleRef::new(&a, rdfs::SUB_CLASS_OF, &b));
/// kb.insert(TripleRef::new(&b, rdfs::SUB_CLASS_OF, &c));
///
/// let analyzer = RelationAnalyzer::new(&kb);
/// assert_eq!(
///     analyzer.answer(Relation::SuperClasses, &a),
///     [NamedOrBlankNode::from(b), NamedOrBlankNode::from(c.clone())]
/// );
/// assert!(analyzer.check(Relation::SubClasses, &c, &a));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelationAnalyzer<'a> {
    kb: &'a KnowledgeBase,
    max_depth: Option<usize>,
}

impl<'a> RelationAnalyzer<'a> {
    #[inline]
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            max_depth: None,
        }
    }

    /// Stops the transitive traversals after `max_depth` steps.
    ///
    /// The partial closure is returned when the budget is exhausted.
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Returns the resources related to `resource`, in discovery order.
    ///
    /// `resource` itself is never part of the result, even if the relation is cyclic.
    pub fn answer<'b>(
        &self,
        relation: Relation,
        resource: impl Into<NamedOrBlankNodeRef<'b>>,
    ) -> Vec<NamedOrBlankNode> {
        let resource = resource.into();
        match relation {
            Relation::SubClasses => {
                self.closure(resource, rdfs::SUB_CLASS_OF, Direction::Backward)
            }
            Relation::SuperClasses => {
                self.closure(resource, rdfs::SUB_CLASS_OF, Direction::Forward)
            }
            Relation::EquivalentClasses => {
                self.closure(resource, owl::EQUIVALENT_CLASS, Direction::Both)
            }
            Relation::DisjointClasses => self.disjoint(
                resource,
                owl::DISJOINT_WITH,
                owl::ALL_DISJOINT_CLASSES,
                owl::EQUIVALENT_CLASS,
            ),
            Relation::SubProperties => {
                self.closure(resource, rdfs::SUB_PROPERTY_OF, Direction::Backward)
            }
            Relation::SuperProperties => {
                self.closure(resource, rdfs::SUB_PROPERTY_OF, Direction::Forward)
            }
            Relation::EquivalentProperties => {
                self.closure(resource, owl::EQUIVALENT_PROPERTY, Direction::Both)
            }
            Relation::DisjointProperties => self.disjoint(
                resource,
                owl::PROPERTY_DISJOINT_WITH,
                owl::ALL_DISJOINT_PROPERTIES,
                owl::EQUIVALENT_PROPERTY,
            ),
            Relation::InverseProperties => unique(
                self.neighbours(resource, owl::INVERSE_OF, Direction::Both)
                    .filter(|n| n.as_ref() != resource),
            ),
        }
    }

    /// Checks if `other` is related to `resource`.
    pub fn check<'b>(
        &self,
        relation: Relation,
        resource: impl Into<NamedOrBlankNodeRef<'b>>,
        other: impl Into<NamedOrBlankNodeRef<'b>>,
    ) -> bool {
        let other = other.into();
        self.answer(relation, resource)
            .iter()
            .any(|r| r.as_ref() == other)
    }

    /// Returns the ordered members of the `owl:propertyChainAxiom` list of `property`.
    ///
    /// Only the first chain is considered.
    pub fn answer_chain_axiom<'b>(
        &self,
        property: impl Into<NamedOrBlankNodeRef<'b>>,
    ) -> Vec<NamedOrBlankNode> {
        let property = property.into();
        let Some(head) = self
            .kb
            .objects(property, owl::PROPERTY_CHAIN_AXIOM)
            .find_map(resource_from_term)
        else {
            return Vec::new();
        };
        self.kb
            .deserialize_ordered_collection(&head)
            .iter()
            .filter_map(|member| resource_from_term(member.as_ref()))
            .collect()
    }

    /// Every property with a chain axiom, in enumeration order.
    pub fn chain_axiom_properties(&self) -> Vec<NamedOrBlankNode> {
        unique(
            self.kb
                .select(None, Some(owl::PROPERTY_CHAIN_AXIOM), None)
                .filter_map(|t| resource_from_subject(t.subject)),
        )
    }

    /// Breadth-first transitive closure of `predicate` starting from `origin`.
    fn closure(
        &self,
        origin: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        direction: Direction,
    ) -> Vec<NamedOrBlankNode> {
        let origin = origin.into_owned();
        let mut visited = FxHashSet::default();
        visited.insert(origin.clone());
        let mut queue = VecDeque::from([(origin, 0)]);
        let mut results = Vec::new();
        while let Some((current, depth)) = queue.pop_front() {
            if self.max_depth.is_some_and(|max| depth >= max) {
                tracing::warn!(
                    "Relation traversal of {predicate} stopped at depth {depth} on {current}"
                );
                continue;
            }
            for next in self.neighbours(current.as_ref(), predicate, direction) {
                if visited.insert(next.clone()) {
                    results.push(next.clone());
                    queue.push_back((next, depth + 1));
                }
            }
        }
        results
    }

    /// Direct partners (stored predicate in both directions and co-members of the `all_disjoint` lists)
    /// extended with their equivalents.
    fn disjoint(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
        all_disjoint: NamedNodeRef<'_>,
        equivalence: NamedNodeRef<'_>,
    ) -> Vec<NamedOrBlankNode> {
        let mut partners = self
            .neighbours(resource, predicate, Direction::Both)
            .collect::<Vec<_>>();
        for axiom in self
            .kb
            .subjects(rdf::TYPE, all_disjoint)
            .filter_map(resource_from_subject)
        {
            let Some(list) = self
                .kb
                .objects(&axiom, owl::MEMBERS)
                .find_map(resource_from_term)
            else {
                continue;
            };
            let members = self
                .kb
                .deserialize_ordered_collection(&list)
                .iter()
                .filter_map(|m| resource_from_term(m.as_ref()))
                .collect::<Vec<_>>();
            if members.iter().any(|m| m.as_ref() == resource) {
                partners.extend(members);
            }
        }
        let partners = unique(partners.into_iter().filter(|p| p.as_ref() != resource));
        let mut results = Vec::new();
        for partner in partners {
            let equivalents = self.closure(partner.as_ref(), equivalence, Direction::Both);
            results.push(partner);
            results.extend(equivalents);
        }
        unique(results.into_iter().filter(|r| r.as_ref() != resource))
    }

    fn neighbours<'b>(
        &'b self,
        resource: NamedOrBlankNodeRef<'b>,
        predicate: NamedNodeRef<'b>,
        direction: Direction,
    ) -> impl Iterator<Item = NamedOrBlankNode> + 'b {
        let subject = SubjectRef::from(resource);
        let object = TermRef::from(resource);
        let forward = matches!(direction, Direction::Forward | Direction::Both).then(|| {
            self.kb
                .objects(subject, predicate)
                .filter_map(resource_from_term)
        });
        let backward = matches!(direction, Direction::Backward | Direction::Both).then(|| {
            self.kb
                .subjects(predicate, object)
                .filter_map(resource_from_subject)
        });
        forward.into_iter().flatten().chain(backward.into_iter().flatten())
    }
}
