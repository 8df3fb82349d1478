use crate::vocab::{dcterms, rdfs, schema};
use oxrdf::{Graph, NamedNodeRef, Triple, TripleRef};
use tracing::debug;

/// Predicates whose values are copied and the predicate they are copied to.
const DUPLICATIONS: [(NamedNodeRef<'static>, NamedNodeRef<'static>); 4] = [
    (rdfs::LABEL, schema::NAME),
    (dcterms::TITLE, schema::NAME),
    (rdfs::COMMENT, schema::DESCRIPTION),
    (dcterms::DESCRIPTION, schema::DESCRIPTION),
];

/// Copies human-readable annotations to their [Schema.org](https://schema.org/) counterpart.
///
/// For each `(s rdfs:label o)` or `(s dcterms:title o)` triple, `(s schema:name o)` is added,
/// and for each `(s rdfs:comment o)` or `(s dcterms:description o)` triple, `(s schema:description o)` is added.
///
/// Runs a single pass and returns the number of added triples. Running it twice adds nothing.
///
/// ```
/// use oxclosure::duplicate_annotations;
/// use oxclosure::vocab::{rdfs, schema};
/// use oxrdf::{Graph, LiteralRef, NamedNodeRef, TripleRef};
///
/// let rex = NamedNodeRef::new("http://example.com/Rex")?;
/// let mut graph = Graph::new();
/// graph.insert(TripleRef::new(rex, rdfs::LABEL, LiteralRef::new_simple_literal("Rex")));
///
/// assert_eq!(duplicate_annotations(&mut graph), 1);
/// assert!(graph.contains(TripleRef::new(rex, schema::NAME, LiteralRef::new_simple_literal("Rex"))));
/// assert_eq!(duplicate_annotations(&mut graph), 0);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn duplicate_annotations(graph: &mut Graph) -> usize {
    let copies: Vec<Triple> = DUPLICATIONS
        .iter()
        .flat_map(|(source, target)| {
            graph
                .triples_for_predicate(*source)
                .map(move |t| TripleRef::new(t.subject, *target, t.object).into_owned())
        })
        .collect();
    let added = copies
        .iter()
        .filter(|triple| graph.insert(*triple))
        .count();
    debug!(added, "annotations duplicated");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{BlankNode, Literal, NamedNode};

    fn node(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn label_and_comment_are_copied() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(
            node("Rex"),
            rdfs::LABEL,
            Literal::new_language_tagged_literal_unchecked("Rex", "en"),
        ));
        graph.insert(&Triple::new(
            node("Rex"),
            rdfs::COMMENT,
            Literal::new_simple_literal("A dog"),
        ));

        assert_eq!(duplicate_annotations(&mut graph), 2);
        assert!(graph.contains(&Triple::new(
            node("Rex"),
            schema::NAME,
            Literal::new_language_tagged_literal_unchecked("Rex", "en"),
        )));
        assert!(graph.contains(&Triple::new(
            node("Rex"),
            schema::DESCRIPTION,
            Literal::new_simple_literal("A dog"),
        )));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn dcterms_are_copied() {
        let subject = BlankNode::new_unchecked("doc");
        let mut graph = Graph::new();
        graph.insert(&Triple::new(
            subject.clone(),
            dcterms::TITLE,
            Literal::new_simple_literal("Report"),
        ));
        graph.insert(&Triple::new(
            subject.clone(),
            dcterms::DESCRIPTION,
            Literal::new_simple_literal("Yearly report"),
        ));

        assert_eq!(duplicate_annotations(&mut graph), 2);
        assert!(graph.contains(&Triple::new(
            subject.clone(),
            schema::NAME,
            Literal::new_simple_literal("Report"),
        )));
        assert!(graph.contains(&Triple::new(
            subject,
            schema::DESCRIPTION,
            Literal::new_simple_literal("Yearly report"),
        )));
    }

    #[test]
    fn existing_and_shared_values_are_not_duplicated() {
        let mut graph = Graph::new();
        let name = Literal::new_simple_literal("Rex");
        graph.insert(&Triple::new(node("Rex"), rdfs::LABEL, name.clone()));
        graph.insert(&Triple::new(node("Rex"), dcterms::TITLE, name.clone()));
        graph.insert(&Triple::new(node("Fido"), rdfs::LABEL, name.clone()));
        graph.insert(&Triple::new(node("Fido"), schema::NAME, name));

        assert_eq!(duplicate_annotations(&mut graph), 1);
        assert_eq!(duplicate_annotations(&mut graph), 0);
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn other_predicates_are_untouched() {
        let mut graph = Graph::new();
        graph.insert(&Triple::new(node("Rex"), node("nickname"), node("Rexy")));
        assert_eq!(duplicate_annotations(&mut graph), 0);
        assert_eq!(graph.len(), 1);
    }
}
