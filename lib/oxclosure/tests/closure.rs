//! End to end closure tests on Turtle inputs.
#![allow(clippy::panic_in_result_fn)]

use oxclosure::vocab::{rdf, schema};
use oxclosure::{
    Document, ForwardChainer, GraphParser, NamespaceTable, RdfIoParser, RdfIoSerializer,
    ReasonerOptions, Rule, RuleSet, reason,
};
use oxrdf::{Literal, NamedNode, TermRef, Triple, TripleRef};
use oxrdfio::RdfFormat;
use std::error::Error;

const PREFIXES: &str = "@prefix ex: <https://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
";

fn parse(body: &str) -> Result<Document, Box<dyn Error>> {
    Ok(RdfIoParser::new(RdfFormat::Turtle)?.parse(format!("{PREFIXES}{body}").as_bytes())?)
}

fn ex(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("https://example.org/{name}"))
}

#[test]
fn dog_is_an_animal() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:Dog rdfs:subClassOf ex:Animal .")?;
    let data = parse("ex:Rex a ex:Dog .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    assert!(closure.graph.contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Dog"))));
    assert!(closure.graph.contains(&Triple::new(ex("Rex"), rdf::TYPE, ex("Animal"))));
    assert_eq!(closure.graph.len(), 3);
    Ok(())
}

#[test]
fn parent_of_implies_child_of() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:parentOf owl:inverseOf ex:childOf .")?;
    let data = parse("ex:A ex:parentOf ex:B .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    assert!(closure.graph.contains(&Triple::new(ex("B"), ex("childOf"), ex("A"))));
    assert_eq!(closure.report.inverse_of, 1);
    Ok(())
}

#[test]
fn subclass_chain_is_followed_to_the_end() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:A rdfs:subClassOf ex:B . ex:B rdfs:subClassOf ex:C .")?;
    let data = parse("ex:x a ex:A .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    for class in ["A", "B", "C"] {
        assert!(
            closure
                .graph
                .contains(&Triple::new(ex("x"), rdf::TYPE, ex(class))),
            "x should be a {class}"
        );
    }
    Ok(())
}

#[test]
fn label_is_copied_to_name() -> Result<(), Box<dyn Error>> {
    let ontology = parse("")?;
    let data = parse("ex:Rex rdfs:label \"Rex\" .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    assert!(closure.graph.contains(&Triple::new(
        ex("Rex"),
        schema::NAME,
        Literal::new_simple_literal("Rex")
    )));
    assert_eq!(closure.annotations, 1);
    Ok(())
}

#[test]
fn forced_prefix_replaces_inherited_alias() -> Result<(), Box<dyn Error>> {
    let ontology = RdfIoParser::new(RdfFormat::Turtle)?
        .parse(b"@prefix ex1: <https://example.org/> .\nex1:a ex1:p ex1:b .".as_slice())?;
    let closure = reason(&ontology, [] as [&Document; 0], &ReasonerOptions::default());
    let forced = NamespaceTable::from_bindings([("ex", "https://example.org/")])?;

    let canonical = closure.namespaces.canonicalize(&forced);
    assert_eq!(canonical.get("ex"), Some("https://example.org/"));
    assert_eq!(canonical.get("ex1"), None);

    let mut output = Vec::new();
    closure.write(&RdfIoSerializer::default(), &forced, &mut output)?;
    let output = String::from_utf8(output)?;
    assert!(output.contains("@prefix ex: <https://example.org/> ."), "{output}");
    assert!(!output.contains("ex1"), "{output}");
    Ok(())
}

#[test]
fn closure_is_idempotent() -> Result<(), Box<dyn Error>> {
    let ontology = parse(
        "ex:Dog rdfs:subClassOf ex:Animal .
         ex:hasMother rdfs:subPropertyOf ex:hasParent .
         ex:hasParent owl:inverseOf ex:hasChild .",
    )?;
    let data = parse("ex:Rex a ex:Dog ; ex:hasMother ex:Lassie ; rdfs:comment \"good boy\" .")?;
    let first = reason(&ontology, [&data], &ReasonerOptions::default());
    assert!(first.graph.contains(&Triple::new(ex("Lassie"), ex("hasChild"), ex("Rex"))));

    let again = reason(
        &Document::new(first.graph.iter().collect(), first.namespaces.clone()),
        [] as [&Document; 0],
        &ReasonerOptions::default(),
    );
    assert_eq!(again.report.derived(), 0);
    assert_eq!(again.annotations, 0);
    assert_eq!(again.graph, first.graph);
    Ok(())
}

#[test]
fn inverse_closure_is_symmetric() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:parentOf owl:inverseOf ex:childOf .")?;
    let data = parse("ex:A ex:parentOf ex:B . ex:C ex:childOf ex:D .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    for (property, inverse) in [("parentOf", "childOf"), ("childOf", "parentOf")] {
        for triple in closure.graph.triples_for_predicate(ex(property).as_ref()) {
            let TermRef::NamedNode(object) = triple.object else {
                continue;
            };
            let inverse = ex(inverse);
            assert!(
                closure
                    .graph
                    .contains(TripleRef::new(object, inverse.as_ref(), triple.subject)),
                "missing inverse of {triple}"
            );
        }
    }
    assert!(closure.graph.contains(&Triple::new(ex("D"), ex("parentOf"), ex("C"))));
    Ok(())
}

#[test]
fn subproperty_rule_can_be_disabled() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:hasMother rdfs:subPropertyOf ex:hasParent .")?;
    let data = parse("ex:Rex ex:hasMother ex:Lassie .")?;
    let options = ReasonerOptions {
        rules: RuleSet::all().with(Rule::SubPropertyOf, false),
        ..ReasonerOptions::default()
    };
    let closure = reason(&ontology, [&data], &options);
    assert_eq!(closure.graph.len(), 2);
    Ok(())
}

#[test]
fn cyclic_axioms_terminate() -> Result<(), Box<dyn Error>> {
    let ontology = parse(
        "ex:A rdfs:subClassOf ex:B . ex:B rdfs:subClassOf ex:C . ex:C rdfs:subClassOf ex:A .
         ex:p rdfs:subPropertyOf ex:q . ex:q rdfs:subPropertyOf ex:p .
         ex:p owl:inverseOf ex:p .",
    )?;
    let data = parse("ex:x a ex:B . ex:x ex:p ex:y .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    for class in ["A", "B", "C"] {
        assert!(closure.graph.contains(&Triple::new(ex("x"), rdf::TYPE, ex(class))));
    }
    assert!(closure.graph.contains(&Triple::new(ex("y"), ex("q"), ex("x"))));
    Ok(())
}

#[test]
fn literals_never_become_subjects() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:name owl:inverseOf ex:nameOf .")?;
    let data = parse("ex:Rex ex:name \"Rex\" .")?;
    let closure = reason(&ontology, [&data], &ReasonerOptions::default());
    assert_eq!(closure.report.inverse_of, 0);
    assert_eq!(
        closure
            .graph
            .triples_for_predicate(ex("nameOf").as_ref())
            .count(),
        0
    );
    Ok(())
}

#[test]
fn chainer_can_be_used_on_its_own() -> Result<(), Box<dyn Error>> {
    let ontology = parse("ex:Dog rdfs:subClassOf ex:Animal .")?;
    let axioms = oxclosure::AxiomIndex::from_ontology(&ontology.graph);
    let mut graph = parse("ex:Rex a ex:Dog .")?.graph;
    let report = ForwardChainer::new(&axioms).close(&mut graph);
    assert_eq!(report.sub_class_of, 1);
    assert_eq!(graph.len(), 2);
    Ok(())
}
