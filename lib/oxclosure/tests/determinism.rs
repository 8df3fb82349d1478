//! The written closure must not depend on input order, parser blank node labels or hash map order.
#![allow(clippy::panic_in_result_fn)]

use oxclosure::{
    Document, GraphParser, NamespaceTable, RdfIoParser, RdfIoSerializer, ReasonerOptions, reason,
};
use oxrdfio::RdfFormat;
use std::collections::HashSet;
use std::error::Error;

const ONTOLOGY: &str = "@prefix ex: <https://example.org/> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex:Dog rdfs:subClassOf ex:Animal .
ex:parentOf owl:inverseOf ex:childOf .
ex:hasMother rdfs:subPropertyOf ex:hasParent .
";

const FIRST: &str = "@prefix ex1: <https://example.org/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
ex1:Rex a ex1:Dog ;
    rdfs:label \"Rex\"@en ;
    ex1:address [ ex1:city \"Bern\" ] .
ex1:Rex ex1:parentOf ex1:Fido .
";

const SECOND: &str = "@prefix ex2: <https://example.org/> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
ex2:Fido a ex2:Dog ;
    ex2:hasMother ex2:Lassie ;
    ex2:address [ ex2:city \"Zurich\" ] .
ex2:Lassie foaf:name \"Lassie\" .
";

fn parse(text: &str) -> Result<Document, Box<dyn Error>> {
    Ok(RdfIoParser::new(RdfFormat::Turtle)?.parse(text.as_bytes())?)
}

fn run(data: &[&str]) -> Result<String, Box<dyn Error>> {
    let ontology = parse(ONTOLOGY)?;
    let data = data.iter().map(|text| parse(text)).collect::<Result<Vec<_>, _>>()?;
    let closure = reason(&ontology, &data, &ReasonerOptions::default());
    let forced = NamespaceTable::from_bindings([("ex", "https://example.org/")])?;
    let mut output = Vec::new();
    closure.write(&RdfIoSerializer::default(), &forced, &mut output)?;
    Ok(String::from_utf8(output)?)
}

#[test]
fn output_is_independent_of_input_order() -> Result<(), Box<dyn Error>> {
    let forward = run(&[FIRST, SECOND])?;
    let backward = run(&[SECOND, FIRST])?;
    assert_eq!(forward, backward);
    assert!(forward.contains("@prefix ex: <https://example.org/> ."), "{forward}");
    assert!(forward.contains("@prefix foaf: <http://xmlns.com/foaf/0.1/> ."), "{forward}");
    assert!(!forward.contains("ex1:"), "{forward}");
    assert!(!forward.contains("ex2:"), "{forward}");
    Ok(())
}

#[test]
fn output_is_stable_across_runs() -> Result<(), Box<dyn Error>> {
    let expected = run(&[FIRST, SECOND])?;
    for _ in 0..5 {
        assert_eq!(run(&[FIRST, SECOND])?, expected);
    }
    Ok(())
}

#[test]
fn written_output_is_a_fixpoint() -> Result<(), Box<dyn Error>> {
    let output = run(&[FIRST, SECOND])?;
    let rewritten = {
        let document = parse(&output)?;
        let closure = reason(&document, [] as [&Document; 0], &ReasonerOptions::default());
        assert_eq!(closure.report.derived(), 0);
        assert_eq!(closure.annotations, 0);
        let forced = NamespaceTable::from_bindings([("ex", "https://example.org/")])?;
        let mut buffer = Vec::new();
        closure.write(&RdfIoSerializer::default(), &forced, &mut buffer)?;
        String::from_utf8(buffer)?
    };
    assert_eq!(rewritten, output);
    Ok(())
}

const NESTED: &str = "@prefix ex: <https://example.org/> .
ex:a ex:p [ ex:q [ ex:r \"1\" ] ] , [ ex:q [ ex:r \"2\" ] ] .
ex:b ex:p [ ex:q [ ex:r \"1\" ] ] , [ ex:q [ ex:r \"1\" ] ] .
";

#[test]
fn nested_anonymous_nodes_are_stable() -> Result<(), Box<dyn Error>> {
    let expected = run(&[NESTED])?;
    for _ in 0..20 {
        assert_eq!(run(&[NESTED])?, expected);
    }
    Ok(())
}

#[test]
fn shared_blank_node_labels_stay_distinct() -> Result<(), Box<dyn Error>> {
    let alice = "_:b0 <https://example.org/name> \"Alice\" .";
    let bob = "_:b0 <https://example.org/name> \"Bob\" .";
    let output = parse(&run(&[alice, bob])?)?;
    let subjects = output
        .graph
        .iter()
        .filter(|triple| triple.predicate.as_str() == "https://example.org/name")
        .map(|triple| triple.subject.into_owned())
        .collect::<HashSet<_>>();
    assert_eq!(subjects.len(), 2);
    Ok(())
}

#[test]
fn written_outputs_can_be_merged_again() -> Result<(), Box<dyn Error>> {
    let first = run(&[FIRST])?;
    let second = run(&[SECOND])?;
    // both outputs label their address node b0
    assert_eq!(run(&[first.as_str(), second.as_str()])?, run(&[FIRST, SECOND])?);
    Ok(())
}
