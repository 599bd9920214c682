use crate::vocab::{CLASS_TYPES, PROPERTY_TYPES, is_reserved, owl};
use oxrdf::vocab::rdf;
use oxrdf::{
    Graph, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, SubjectRef, Term, TermRef,
    TripleRef,
};
use rustc_hash::FxHashSet;
use std::iter::once;

/// An in-memory knowledge base: the asserted triples (T-Box and A-Box) and the set of triples inferred from them.
///
/// The inference set is kept separate from the asserted triples but all lookups are done on their union.
/// A triple is never both asserted and inferred.
///
/// ```
/// use oxrdf::vocab::rdfs;
/// use oxrdf::{NamedNodeRef, TripleRef};
/// use oxreason::KnowledgeBase;
///
/// let dog = NamedNodeRef::new("http://example.com/Dog")?;
/// let animal = NamedNodeRef::new("http://example.com/Animal")?;
/// let mut kb = KnowledgeBase::new();
/// kb.insert(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal));
///
/// // Inferring an asserted triple is a no-op
/// assert!(!kb.insert_inferred(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal)));
/// assert_eq!(kb.len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    asserted: Graph,
    inferred: Graph,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The asserted triples.
    #[inline]
    pub fn asserted(&self) -> &Graph {
        &self.asserted
    }

    /// The inference set.
    #[inline]
    pub fn inferred(&self) -> &Graph {
        &self.inferred
    }

    /// Asserts a triple.
    ///
    /// If the triple was previously inferred it moves from the inference set to the asserted triples.
    /// Returns `true` if the triple was not already asserted.
    pub fn insert<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        let triple = triple.into();
        self.inferred.remove(triple);
        self.asserted.insert(triple)
    }

    /// Adds a triple to the inference set if it is neither asserted nor already inferred.
    ///
    /// Returns `true` if the triple is new.
    pub fn insert_inferred<'a>(&mut self, triple: impl Into<TripleRef<'a>>) -> bool {
        let triple = triple.into();
        if self.asserted.contains(triple) {
            return false;
        }
        self.inferred.insert(triple)
    }

    /// Checks if the triple is asserted or inferred.
    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        let triple = triple.into();
        self.asserted.contains(triple) || self.inferred.contains(triple)
    }

    /// Drops the inference set.
    pub fn clear_inferences(&mut self) {
        self.inferred.clear();
    }

    /// Number of asserted and inferred triples.
    #[inline]
    pub fn len(&self) -> usize {
        self.asserted.len() + self.inferred.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.asserted.is_empty() && self.inferred.is_empty()
    }

    /// Iterates on the asserted triples then on the inferred ones.
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.asserted.iter().chain(self.inferred.iter())
    }

    /// Returns the triples of the union of the asserted and inferred triples matching the given pattern.
    ///
    /// `None` is a wildcard.
    pub fn select<'a>(
        &'a self,
        subject: Option<SubjectRef<'a>>,
        predicate: Option<NamedNodeRef<'a>>,
        object: Option<TermRef<'a>>,
    ) -> impl Iterator<Item = TripleRef<'a>> + 'a {
        select_in(&self.asserted, subject, predicate, object).chain(select_in(
            &self.inferred,
            subject,
            predicate,
            object,
        ))
    }

    /// Returns the objects of the triples with the given subject and predicate.
    pub fn objects<'a>(
        &'a self,
        subject: impl Into<SubjectRef<'a>>,
        predicate: impl Into<NamedNodeRef<'a>>,
    ) -> impl Iterator<Item = TermRef<'a>> + 'a {
        self.select(Some(subject.into()), Some(predicate.into()), None)
            .map(|t| t.object)
    }

    /// Returns the subjects of the triples with the given predicate and object.
    pub fn subjects<'a>(
        &'a self,
        predicate: impl Into<NamedNodeRef<'a>>,
        object: impl Into<TermRef<'a>>,
    ) -> impl Iterator<Item = SubjectRef<'a>> + 'a {
        self.select(None, Some(predicate.into()), Some(object.into()))
            .map(|t| t.subject)
    }

    /// Checks if `resource rdf:type class` is asserted or inferred.
    pub fn has_type<'a>(
        &self,
        resource: impl Into<SubjectRef<'a>>,
        class: impl Into<TermRef<'a>>,
    ) -> bool {
        self.contains(TripleRef::new(resource, rdf::TYPE, class))
    }

    /// Materializes the union of the asserted and inferred triples in a new graph.
    pub fn union(&self) -> Graph {
        union(&self.asserted, &self.inferred)
    }

    /// Reads the members of the RDF list starting at `head`, in order.
    ///
    /// A missing or malformed list gives the members read so far.
    /// Cyclic lists are read only once.
    pub fn deserialize_ordered_collection<'a>(
        &self,
        head: impl Into<NamedOrBlankNodeRef<'a>>,
    ) -> Vec<Term> {
        let mut members = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = head.into().into_owned();
        loop {
            if let NamedOrBlankNode::NamedNode(node) = &current {
                if node.as_ref() == rdf::NIL {
                    break;
                }
            }
            if !visited.insert(current.clone()) {
                tracing::debug!("The RDF list containing {current} is cyclic");
                break;
            }
            let Some(first) = self.objects(&current, rdf::FIRST).next() else {
                break;
            };
            members.push(first.into_owned());
            let Some(rest) = self
                .objects(&current, rdf::REST)
                .next()
                .and_then(resource_from_term)
            else {
                break;
            };
            current = rest;
        }
        members
    }

    /// The resources declared as classes, in enumeration order.
    ///
    /// The terms of the RDF, RDFS, OWL and XSD vocabularies are never part of the declarations.
    pub fn classes(&self) -> Vec<NamedOrBlankNode> {
        self.typed_with(&CLASS_TYPES)
    }

    /// The resources declared as properties, in enumeration order.
    pub fn properties(&self) -> Vec<NamedOrBlankNode> {
        self.typed_with(&PROPERTY_TYPES)
    }

    /// The individuals: resources declared as `owl:NamedIndividual` or typed by a declared class.
    pub fn individuals(&self) -> Vec<NamedOrBlankNode> {
        let classes = self.classes();
        let types = once(owl::NAMED_INDIVIDUAL).chain(classes.iter().filter_map(|c| match c {
            NamedOrBlankNode::NamedNode(c) => Some(c.as_ref()),
            NamedOrBlankNode::BlankNode(_) => None,
        }));
        unique(
            types
                .flat_map(|t| self.subjects(rdf::TYPE, t).filter_map(resource_from_subject))
                .filter(is_user_defined),
        )
    }

    /// Checks if the resource is declared as a class.
    pub fn is_class<'a>(&self, resource: impl Into<SubjectRef<'a>>) -> bool {
        let resource = resource.into();
        CLASS_TYPES.iter().any(|t| self.has_type(resource, *t))
    }

    /// Checks if the resource is declared as a property.
    pub fn is_property<'a>(&self, resource: impl Into<SubjectRef<'a>>) -> bool {
        let resource = resource.into();
        PROPERTY_TYPES.iter().any(|t| self.has_type(resource, *t))
    }

    fn typed_with(&self, types: &[NamedNodeRef<'_>]) -> Vec<NamedOrBlankNode> {
        unique(
            types
                .iter()
                .flat_map(|t| self.subjects(rdf::TYPE, *t).filter_map(resource_from_subject))
                .filter(is_user_defined),
        )
    }
}

impl<'a, T: Into<TripleRef<'a>>> Extend<T> for KnowledgeBase {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl<'a, T: Into<TripleRef<'a>>> FromIterator<T> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut kb = Self::new();
        kb.extend(iter);
        kb
    }
}

impl From<Graph> for KnowledgeBase {
    #[inline]
    fn from(asserted: Graph) -> Self {
        Self {
            asserted,
            inferred: Graph::new(),
        }
    }
}

/// Set union of two graphs.
pub fn union(a: &Graph, b: &Graph) -> Graph {
    a.iter().chain(b.iter()).collect()
}

fn select_in<'a>(
    graph: &'a Graph,
    subject: Option<SubjectRef<'a>>,
    predicate: Option<NamedNodeRef<'a>>,
    object: Option<TermRef<'a>>,
) -> Box<dyn Iterator<Item = TripleRef<'a>> + 'a> {
    match (subject, predicate, object) {
        (Some(s), Some(p), Some(o)) => {
            let triple = TripleRef::new(s, p, o);
            Box::new(graph.contains(triple).then_some(triple).into_iter())
        }
        (Some(s), Some(p), None) => Box::new(
            graph
                .objects_for_subject_predicate(s, p)
                .map(move |o| TripleRef::new(s, p, o)),
        ),
        (Some(s), None, o) => Box::new(
            graph
                .triples_for_subject(s)
                .filter(move |t| o.is_none_or(|o| t.object == o)),
        ),
        (None, Some(p), Some(o)) => Box::new(
            graph
                .subjects_for_predicate_object(p, o)
                .map(move |s| TripleRef::new(s, p, o)),
        ),
        (None, Some(p), None) => Box::new(graph.triples_for_predicate(p)),
        (None, None, Some(o)) => Box::new(graph.triples_for_object(o)),
        (None, None, None) => Box::new(graph.iter()),
    }
}

/// Converts an object into a resource if it is an IRI or a blank node.
pub(crate) fn resource_from_term(term: TermRef<'_>) -> Option<NamedOrBlankNode> {
    match term {
        TermRef::NamedNode(node) => Some(node.into_owned().into()),
        TermRef::BlankNode(node) => Some(node.into_owned().into()),
        _ => None,
    }
}

/// Converts a subject into a resource if it is an IRI or a blank node.
pub(crate) fn resource_from_subject(subject: SubjectRef<'_>) -> Option<NamedOrBlankNode> {
    resource_from_term(subject.into())
}

fn is_user_defined(resource: &NamedOrBlankNode) -> bool {
    match resource {
        NamedOrBlankNode::NamedNode(node) => !is_reserved(node.as_str()),
        NamedOrBlankNode::BlankNode(_) => true,
    }
}

/// Deduplicates keeping the first occurrence.
pub(crate) fn unique<T: Clone + Eq + std::hash::Hash>(
    items: impl IntoIterator<Item = T>,
) -> Vec<T> {
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
