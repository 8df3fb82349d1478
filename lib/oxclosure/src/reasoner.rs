use crate::annotation::duplicate_annotations;
use crate::axioms::AxiomIndex;
use crate::chainer::{ClosureReport, ForwardChainer, RuleSet};
use crate::error::FormatError;
use crate::io::{Document, GraphSerializer};
use crate::namespace::NamespaceTable;
use oxrdf::Graph;
use std::io::Write;
use tracing::info;

/// Options of [`reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonerOptions {
    pub rules: RuleSet,
    /// Copy labels and descriptions to Schema.org, see [`duplicate_annotations`].
    pub annotations: bool,
}

impl Default for ReasonerOptions {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            annotations: true,
        }
    }
}

/// The output of [`reason`].
#[derive(Debug)]
pub struct Closure {
    /// Input triples and all the derived ones.
    pub graph: Graph,
    /// Prefixes declared by the inputs, ontology first.
    pub namespaces: NamespaceTable,
    pub report: ClosureReport,
    /// Number of triples added by annotation duplication.
    pub annotations: usize,
}

impl Closure {
    /// Writes the graph with the inherited prefixes replaced by `forced` ones
    /// (see [`NamespaceTable::canonicalize`]).
    pub fn write(
        &self,
        serializer: &impl GraphSerializer,
        forced: &NamespaceTable,
        writer: impl Write,
    ) -> Result<(), FormatError> {
        serializer.serialize(&self.graph, &self.namespaces.canonicalize(forced), writer)
    }
}

/// Merges the ontology with the data documents and computes the closure.
///
/// Axioms are only read from `ontology`: a `rdfs:subClassOf` triple in a data
/// document is kept in the output but does not drive any derivation.
///
/// ```
/// use oxclosure::{GraphParser, RdfIoParser, ReasonerOptions, reason};
/// use oxrdfio::RdfFormat;
///
/// let parser = RdfIoParser::new(RdfFormat::Turtle)?;
/// let ontology = parser.parse(
///     b"@prefix ex: <http://example.com/> .
///       @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
///       ex:Dog rdfs:subClassOf ex:Animal .".as_slice(),
/// )?;
/// let data = parser.parse(b"<http://example.com/Rex> a <http://example.com/Dog> .".as_slice())?;
///
/// let closure = reason(&ontology, [&data], &ReasonerOptions::default());
/// assert_eq!(closure.graph.len(), 3);
/// assert_eq!(closure.report.sub_class_of, 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn reason<'a>(
    ontology: &Document,
    data: impl IntoIterator<Item = &'a Document>,
    options: &ReasonerOptions,
) -> Closure {
    let axioms = AxiomIndex::from_ontology(&ontology.graph);
    info!(
        sub_class_of = axioms.sub_class_axiom_count(),
        sub_property_of = axioms.sub_property_axiom_count(),
        inverse_of = axioms.inverse_property_count(),
        "indexed ontology axioms"
    );

    let mut merged = Document::new(ontology.graph.iter().collect(), ontology.namespaces.clone());
    for document in data {
        merged.merge(document);
    }
    let Document {
        mut graph,
        namespaces,
    } = merged;
    info!(triples = graph.len(), "merged inputs");

    let report = ForwardChainer::new(&axioms)
        .with_rules(options.rules)
        .close(&mut graph);
    let annotations = if options.annotations {
        duplicate_annotations(&mut graph)
    } else {
        0
    };
    info!(
        derived = report.derived(),
        annotations,
        total = graph.len(),
        "finished reasoning"
    );
    Closure {
        graph,
        namespaces,
        report,
        annotations,
    }
}
