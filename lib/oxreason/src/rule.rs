use crate::binding::BindingTable;
use crate::builtin::BuiltIn;
use crate::error::RuleError;
use crate::model::KnowledgeBase;
use oxrdf::{
    BlankNode, Literal, NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple,
    Variable,
};
use std::fmt;

/// A term or a variable in a [`TriplePattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermPattern {
    Variable(Variable),
    Term(Term),
}

impl TermPattern {
    fn variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Term(_) => None,
        }
    }
}

impl From<Variable> for TermPattern {
    #[inline]
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Term> for TermPattern {
    #[inline]
    fn from(term: Term) -> Self {
        Self::Term(term)
    }
}

impl From<NamedNode> for TermPattern {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Term(node.into())
    }
}

impl From<NamedNodeRef<'_>> for TermPattern {
    #[inline]
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::Term(node.into())
    }
}

impl From<BlankNode> for TermPattern {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Term(node.into())
    }
}

impl From<Literal> for TermPattern {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Term(literal.into())
    }
}

impl fmt::Display for TermPattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::Term(term) => write!(f, "{term}"),
        }
    }
}

/// A triple pattern: a triple with variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

impl TriplePattern {
    #[inline]
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// The variables of the pattern in subject, predicate, object order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        [&self.subject, &self.predicate, &self.object]
            .into_iter()
            .filter_map(TermPattern::variable)
    }

    /// Substitutes the variables of the pattern with the row values.
    ///
    /// Returns `None` if a variable is unbound or if the result is not a valid RDF triple.
    fn instantiate(&self, variables: &[Variable], row: &[Option<Term>]) -> Option<Triple> {
        let resolve = |pattern: &TermPattern| -> Option<Term> {
            match pattern {
                TermPattern::Term(term) => Some(term.clone()),
                TermPattern::Variable(variable) => {
                    let column = variables.iter().position(|v| v == variable)?;
                    row.get(column)?.clone()
                }
            }
        };
        let subject = match resolve(&self.subject)? {
            Term::NamedNode(node) => Subject::NamedNode(node),
            Term::BlankNode(node) => Subject::BlankNode(node),
            _ => return None,
        };
        let Term::NamedNode(predicate) = resolve(&self.predicate)? else {
            return None;
        };
        Some(Triple::new(subject, predicate, resolve(&self.object)?))
    }
}

impl fmt::Display for TriplePattern {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// The body of a [`Rule`]: triple patterns joined in order then filtered by built-ins.
#[derive(Debug, Clone, Default)]
pub struct Antecedent {
    patterns: Vec<TriplePattern>,
    built_ins: Vec<BuiltIn>,
}

impl Antecedent {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_pattern(mut self, pattern: TriplePattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_built_in(mut self, built_in: BuiltIn) -> Self {
        self.built_ins.push(built_in);
        self
    }

    #[inline]
    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    #[inline]
    pub fn built_ins(&self) -> &[BuiltIn] {
        &self.built_ins
    }

    /// The variables bound by the patterns, in first appearance order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut variables = Vec::<Variable>::new();
        for variable in self.patterns.iter().flat_map(TriplePattern::variables) {
            if !variables.contains(variable) {
                variables.push(variable.clone());
            }
        }
        variables
    }

    /// Matches the antecedent against the asserted and inferred triples of the knowledge base.
    ///
    /// The patterns are evaluated with a nested loop join in declaration order,
    /// then the built-ins filter the resulting table in declaration order.
    pub fn evaluate(&self, kb: &KnowledgeBase) -> BindingTable {
        let variables = self.variables();
        let mut rows = vec![vec![None; variables.len()]];
        for pattern in &self.patterns {
            let subject = PatternSlot::new(&pattern.subject, &variables);
            let predicate = PatternSlot::new(&pattern.predicate, &variables);
            let object = PatternSlot::new(&pattern.object, &variables);
            let mut new_rows = Vec::new();
            for row in &rows {
                let s = match subject.resolve(row) {
                    Resolved::Bound(term) => match as_subject(term) {
                        Some(s) => Some(s),
                        None => continue,
                    },
                    Resolved::Free => None,
                };
                let p = match predicate.resolve(row) {
                    Resolved::Bound(TermRef::NamedNode(p)) => Some(p),
                    Resolved::Bound(_) => continue,
                    Resolved::Free => None,
                };
                let o = match object.resolve(row) {
                    Resolved::Bound(o) => Some(o),
                    Resolved::Free => None,
                };
                for triple in kb.select(s, p, o) {
                    let mut new_row = row.clone();
                    if subject.bind(&mut new_row, triple.subject.into())
                        && predicate.bind(&mut new_row, triple.predicate.into())
                        && object.bind(&mut new_row, triple.object)
                    {
                        new_rows.push(new_row);
                    }
                }
            }
            rows = new_rows;
            if rows.is_empty() {
                break;
            }
        }
        let mut table = BindingTable::from_rows(variables, rows);
        for built_in in &self.built_ins {
            table = built_in.evaluate(&table);
        }
        table
    }
}

/// A position of a triple pattern resolved against the column list.
enum PatternSlot<'a> {
    Constant(TermRef<'a>),
    Column(usize),
}

enum Resolved<'a> {
    Bound(TermRef<'a>),
    Free,
}

impl<'a> PatternSlot<'a> {
    fn new(pattern: &'a TermPattern, variables: &[Variable]) -> Self {
        match pattern {
            TermPattern::Term(term) => Self::Constant(term.as_ref()),
            TermPattern::Variable(variable) => Self::Column(
                variables
                    .iter()
                    .position(|v| v == variable)
                    .unwrap_or_default(),
            ),
        }
    }

    fn resolve<'b>(&self, row: &'b [Option<Term>]) -> Resolved<'b>
    where
        'a: 'b,
    {
        match self {
            Self::Constant(term) => Resolved::Bound(*term),
            Self::Column(column) => match &row[*column] {
                Some(term) => Resolved::Bound(term.as_ref()),
                None => Resolved::Free,
            },
        }
    }

    /// Binds the column to the value or checks that the existing binding is the same.
    fn bind(&self, row: &mut [Option<Term>], value: TermRef<'_>) -> bool {
        match self {
            Self::Constant(_) => true,
            Self::Column(column) => match &row[*column] {
                Some(bound) => bound.as_ref() == value,
                None => {
                    row[*column] = Some(value.into_owned());
                    true
                }
            },
        }
    }
}

fn as_subject(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(node.into()),
        TermRef::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

/// A forward chaining rule: when the antecedent matches, the instantiated consequent triples are entailed.
///
/// ```
/// use oxrdf::vocab::rdf;
/// use oxrdf::{NamedNode, Variable};
/// use oxreason::{Antecedent, Rule, TriplePattern};
///
/// let x = Variable::new("x")?;
/// let person = NamedNode::new("http://example.com/Person")?;
/// let agent = NamedNode::new("http://example.com/Agent")?;
/// let rule = Rule::new(
///     "person-is-agent",
///     Antecedent::new().with_pattern(TriplePattern::new(x.clone(), rdf::TYPE, person)),
///     [TriplePattern::new(x, rdf::TYPE, agent)],
/// )?;
/// assert_eq!(rule.name(), "person-is-agent");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    antecedent: Antecedent,
    consequent: Vec<TriplePattern>,
}

impl Rule {
    /// Builds a rule after checking that it is safe:
    /// both sides are non-empty, every variable of the consequent and of the built-ins is bound by an antecedent pattern
    /// and the consequent predicates can be IRIs.
    pub fn new(
        name: impl Into<String>,
        antecedent: Antecedent,
        consequent: impl IntoIterator<Item = TriplePattern>,
    ) -> Result<Self, RuleError> {
        let name = name.into();
        let consequent = consequent.into_iter().collect::<Vec<_>>();
        if antecedent.patterns.is_empty() {
            return Err(RuleError::EmptyAntecedent { rule: name });
        }
        if consequent.is_empty() {
            return Err(RuleError::EmptyConsequent { rule: name });
        }
        let bound = antecedent.variables();
        for built_in in &antecedent.built_ins {
            if let Some(variable) = built_in.variables().find(|v| !bound.contains(v)) {
                return Err(RuleError::UnboundBuiltInVariable {
                    variable: variable.clone(),
                    rule: name,
                });
            }
        }
        for pattern in &consequent {
            if let TermPattern::Term(predicate) = &pattern.predicate {
                if !matches!(predicate, Term::NamedNode(_)) {
                    return Err(RuleError::InvalidConsequentPredicate { rule: name });
                }
            }
            if let Some(variable) = pattern.variables().find(|v| !bound.contains(v)) {
                return Err(RuleError::UnboundConsequentVariable {
                    variable: variable.clone(),
                    rule: name,
                });
            }
        }
        Ok(Self {
            name,
            antecedent,
            consequent,
        })
    }

    /// Builds a rule without checking it.
    pub(crate) fn from_safe_parts(
        name: String,
        antecedent: Antecedent,
        consequent: Vec<TriplePattern>,
    ) -> Self {
        Self {
            name,
            antecedent,
            consequent,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    #[inline]
    pub fn consequent(&self) -> &[TriplePattern] {
        &self.consequent
    }

    /// Evaluates the antecedent and instantiates the consequent on each resulting row.
    ///
    /// Each triple comes with the bindings that produced it.
    /// Ill-formed instantiations, like a literal in subject position, are skipped.
    pub fn apply(&self, kb: &KnowledgeBase) -> Vec<(Triple, Vec<(Variable, Term)>)> {
        let table = self.antecedent.evaluate(kb);
        let variables = table.variables().to_vec();
        let mut results = Vec::new();
        for row in table.into_rows() {
            for pattern in &self.consequent {
                if let Some(triple) = pattern.instantiate(&variables, &row) {
                    let bindings = variables
                        .iter()
                        .zip(&row)
                        .filter_map(|(v, t)| Some((v.clone(), t.clone()?)))
                        .collect();
                    results.push((triple, bindings));
                }
            }
        }
        results
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        let mut first = true;
        for pattern in &self.antecedent.patterns {
            if !first {
                f.write_str(" ^ ")?;
            }
            first = false;
            write!(f, "{pattern}")?;
        }
        for built_in in &self.antecedent.built_ins {
            write!(f, " ^ {built_in}")?;
        }
        f.write_str(" -> ")?;
        for (i, pattern) in self.consequent.iter().enumerate() {
            if i > 0 {
                f.write_str(" ^ ")?;
            }
            write!(f, "{pattern}")?;
        }
        Ok(())
    }
}
