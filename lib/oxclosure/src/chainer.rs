//! Forward chaining of the schema axioms until a fixpoint is reached.

use crate::axioms::AxiomIndex;
use crate::vocab::rdf;
use oxrdf::{Graph, NamedOrBlankNode, Term, Triple, TripleRef};
use std::fmt;
use tracing::{debug, info};

/// A derivation rule applied by the [`ForwardChainer`].
///
/// Named after the matching [OWL 2 RL rules](https://www.w3.org/TR/owl2-profiles/#Reasoning_in_OWL_2_RL_and_RDF_Graphs_using_Rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `(s p o)`, `p owl:inverseOf q` ⊢ `(o q s)`
    InverseOf,
    /// `(x rdf:type C)`, `C rdfs:subClassOf D` ⊢ `(x rdf:type D)`
    SubClassOf,
    /// `(x P y)`, `P rdfs:subPropertyOf Q` ⊢ `(x Q y)`
    SubPropertyOf,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Self::InverseOf => "prp-inv",
            Self::SubClassOf => "cax-sco",
            Self::SubPropertyOf => "prp-spo1",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The rules a [`ForwardChainer`] applies. All are enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    pub inverse: bool,
    pub sub_class: bool,
    pub sub_property: bool,
}

impl RuleSet {
    pub const fn all() -> Self {
        Self {
            inverse: true,
            sub_class: true,
            sub_property: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            inverse: false,
            sub_class: false,
            sub_property: false,
        }
    }

    #[must_use]
    pub const fn with(mut self, rule: Rule, enabled: bool) -> Self {
        match rule {
            Rule::InverseOf => self.inverse = enabled,
            Rule::SubClassOf => self.sub_class = enabled,
            Rule::SubPropertyOf => self.sub_property = enabled,
        }
        self
    }

    pub const fn contains(self, rule: Rule) -> bool {
        match rule {
            Rule::InverseOf => self.inverse,
            Rule::SubClassOf => self.sub_class,
            Rule::SubPropertyOf => self.sub_property,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Statistics about a closure computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClosureReport {
    /// Number of rounds, including the last one that derived nothing.
    pub rounds: usize,
    pub inverse_of: usize,
    pub sub_class_of: usize,
    pub sub_property_of: usize,
    /// Size of the closed graph.
    pub triples: usize,
}

impl ClosureReport {
    /// Total number of new triples.
    pub fn derived(&self) -> usize {
        self.inverse_of + self.sub_class_of + self.sub_property_of
    }

    fn record(&mut self, rule: Rule) {
        match rule {
            Rule::InverseOf => self.inverse_of += 1,
            Rule::SubClassOf => self.sub_class_of += 1,
            Rule::SubPropertyOf => self.sub_property_of += 1,
        }
    }
}

/// Computes the closure of a graph under the `owl:inverseOf`, `rdfs:subClassOf`
/// and `rdfs:subPropertyOf` axioms of an [`AxiomIndex`].
///
/// Each round reads an immutable snapshot of the triples added by the previous round
/// (the whole graph for the first one) and inserts its derivations into the graph.
/// Every rule has a single data premise, so a triple can only fire new derivations
/// in the round after it was added.
/// The loop stops after a round that adds nothing. It always terminates:
/// no term is ever created, so the set of derivable triples is finite, even with
/// cyclic axioms.
///
/// ```
/// use oxclosure::{AxiomIndex, ForwardChainer};
/// use oxclosure::vocab::{rdf, rdfs};
/// use oxrdf::{Graph, NamedNodeRef, TripleRef};
///
/// let dog = NamedNodeRef::new("http://example.com/Dog")?;
/// let animal = NamedNodeRef::new("http://example.com/Animal")?;
/// let rex = NamedNodeRef::new("http://example.com/Rex")?;
///
/// let mut graph = Graph::new();
/// graph.insert(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal));
/// let axioms = AxiomIndex::from_ontology(&graph);
/// graph.insert(TripleRef::new(rex, rdf::TYPE, dog));
///
/// let report = ForwardChainer::new(&axioms).close(&mut graph);
/// assert!(graph.contains(TripleRef::new(rex, rdf::TYPE, animal)));
/// assert_eq!(report.derived(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ForwardChainer<'a> {
    axioms: &'a AxiomIndex,
    rules: RuleSet,
}

impl<'a> ForwardChainer<'a> {
    pub fn new(axioms: &'a AxiomIndex) -> Self {
        Self {
            axioms,
            rules: RuleSet::default(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Adds to `graph` all the triples derivable from it.
    pub fn close(&self, graph: &mut Graph) -> ClosureReport {
        let mut report = ClosureReport::default();
        let mut snapshot: Vec<Triple> = graph.iter().map(TripleRef::into_owned).collect();
        let mut derivations = Vec::new();
        while !snapshot.is_empty() {
            report.rounds += 1;
            let mut added = Vec::new();
            for triple in &snapshot {
                self.derive(triple, &mut derivations);
                for (rule, derived) in derivations.drain(..) {
                    if graph.insert(&derived) {
                        report.record(rule);
                        added.push(derived);
                    }
                }
            }
            debug!(
                round = report.rounds,
                input = snapshot.len(),
                added = added.len(),
                "closure round"
            );
            snapshot = added;
        }
        report.triples = graph.len();
        info!(
            rounds = report.rounds,
            inverse_of = report.inverse_of,
            sub_class_of = report.sub_class_of,
            sub_property_of = report.sub_property_of,
            triples = report.triples,
            "closure reached"
        );
        report
    }

    fn derive(&self, triple: &Triple, output: &mut Vec<(Rule, Triple)>) {
        if self.rules.inverse {
            if let Some(inverse) = self.axioms.inverse(triple.predicate.as_ref()) {
                // Literals can't be subjects
                let subject = match &triple.object {
                    Term::NamedNode(node) => Some(NamedOrBlankNode::from(node.clone())),
                    Term::BlankNode(node) => Some(NamedOrBlankNode::from(node.clone())),
                    Term::Literal(_) => None,
                };
                if let Some(subject) = subject {
                    output.push((
                        Rule::InverseOf,
                        Triple::new(subject, inverse, triple.subject.clone()),
                    ));
                }
            }
        }
        if self.rules.sub_class && triple.predicate == rdf::TYPE {
            if let Term::NamedNode(class) = &triple.object {
                for super_class in self.axioms.super_classes(class.as_ref()) {
                    output.push((
                        Rule::SubClassOf,
                        Triple::new(triple.subject.clone(), rdf::TYPE, super_class),
                    ));
                }
            }
        }
        if self.rules.sub_property {
            for super_property in self.axioms.super_properties(triple.predicate.as_ref()) {
                output.push((
                    Rule::SubPropertyOf,
                    Triple::new(
                        triple.subject.clone(),
                        super_property,
                        triple.object.clone(),
                    ),
                ));
            }
        }
    }
}
