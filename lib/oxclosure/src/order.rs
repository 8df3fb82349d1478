//! Total order on triples and deterministic blank node labels.

use oxrdf::{
    BlankNode, BlankNodeRef, Graph, LiteralRef, NamedOrBlankNode, NamedOrBlankNodeRef, TermRef,
    Triple, TripleRef,
};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Compares two terms.
///
/// IRIs sort before blank nodes, which sort before literals.
/// IRIs compare by their IRI string and blank nodes by their label.
/// Literals compare by lexical form, then datatype IRI, then language tag.
pub fn cmp_terms(a: TermRef<'_>, b: TermRef<'_>) -> Ordering {
    match (a, b) {
        (TermRef::NamedNode(a), TermRef::NamedNode(b)) => a.as_str().cmp(b.as_str()),
        (TermRef::BlankNode(a), TermRef::BlankNode(b)) => a.as_str().cmp(b.as_str()),
        (TermRef::Literal(a), TermRef::Literal(b)) => cmp_literals(a, b),
        (a, b) => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Compares two triples by subject, then predicate, then object using [`cmp_terms`].
///
/// ```
/// use oxclosure::cmp_triples;
/// use oxrdf::{BlankNodeRef, LiteralRef, NamedNodeRef, TripleRef};
/// use std::cmp::Ordering;
///
/// let s = NamedNodeRef::new("http://example.com/s")?;
/// let p = NamedNodeRef::new("http://example.com/p")?;
/// let with_literal = TripleRef::new(s, p, LiteralRef::new_simple_literal("o"));
/// let with_bnode = TripleRef::new(s, p, BlankNodeRef::new("o")?);
/// assert_eq!(cmp_triples(with_bnode, with_literal), Ordering::Less);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub fn cmp_triples(a: TripleRef<'_>, b: TripleRef<'_>) -> Ordering {
    cmp_subjects(a.subject, b.subject)
        .then_with(|| a.predicate.as_str().cmp(b.predicate.as_str()))
        .then_with(|| cmp_terms(a.object, b.object))
}

/// Sorts triples with [`cmp_triples`].
pub fn sort_triples(triples: &mut [Triple]) {
    triples.sort_unstable_by(|a, b| cmp_triples(a.as_ref(), b.as_ref()));
}

/// Returns the triples of `graph` with deterministic blank node labels,
/// sorted with [`cmp_triples`].
///
/// See [`relabel_blank_nodes`].
pub fn canonical_triples(graph: &Graph) -> Vec<Triple> {
    let mut triples: Vec<Triple> = relabel_blank_nodes(graph)
        .iter()
        .map(TripleRef::into_owned)
        .collect();
    sort_triples(&mut triples);
    triples
}

/// Renames the blank nodes of `graph` to `b0`, `b1`...
///
/// Parsers mint fresh labels for anonymous blank nodes on every run, so labels
/// can't be relied on to get a stable output.
/// Blank nodes are coloured by refinement: every node starts with the same colour,
/// then its new colour is the rank of the sorted descriptions of the triples it appears in,
/// where the other blank nodes are written with their previous colour.
/// Once the number of colours is stable, the first node of a remaining tie gets a colour
/// of its own and the refinement starts again, until every node has a distinct colour.
/// Nodes are numbered by ascending colour.
pub fn relabel_blank_nodes(graph: &Graph) -> Graph {
    let mut neighbourhoods = FxHashMap::<BlankNodeRef<'_>, Vec<TripleRef<'_>>>::default();
    for triple in graph {
        if let NamedOrBlankNodeRef::BlankNode(node) = triple.subject {
            neighbourhoods.entry(node).or_default().push(triple);
        }
        if let TermRef::BlankNode(node) = triple.object {
            if triple.subject != NamedOrBlankNodeRef::BlankNode(node) {
                neighbourhoods.entry(node).or_default().push(triple);
            }
        }
    }
    if neighbourhoods.is_empty() {
        return graph.iter().collect();
    }

    let mut nodes = neighbourhoods.keys().copied().collect::<Vec<_>>();
    nodes.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));
    let mut colours = nodes
        .iter()
        .map(|node| (*node, 0))
        .collect::<FxHashMap<_, usize>>();
    loop {
        refine(&neighbourhoods, &mut colours);
        let mut sizes = FxHashMap::<usize, usize>::default();
        for colour in colours.values() {
            *sizes.entry(*colour).or_default() += 1;
        }
        let Some(tied) = sizes
            .into_iter()
            .filter(|(_, size)| *size > 1)
            .map(|(colour, _)| colour)
            .min()
        else {
            break;
        };
        // Nodes left tied are symmetric for the refinement, any of them can go first
        if let Some(node) = nodes.iter().find(|node| colours.get(*node) == Some(&tied)) {
            colours.insert(*node, nodes.len());
        }
    }

    let mut ranked = colours.into_iter().collect::<Vec<_>>();
    ranked.sort_unstable_by_key(|(_, colour)| *colour);
    let labels = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (node, _))| (node, BlankNode::new_unchecked(format!("b{i}"))))
        .collect::<FxHashMap<_, _>>();

    graph
        .iter()
        .map(|triple| {
            let subject = match triple.subject {
                NamedOrBlankNodeRef::NamedNode(node) => NamedOrBlankNode::from(node.into_owned()),
                NamedOrBlankNodeRef::BlankNode(node) => labels
                    .get(&node)
                    .map_or_else(|| node.into_owned(), Clone::clone)
                    .into(),
            };
            let object = match triple.object {
                TermRef::BlankNode(node) => labels
                    .get(&node)
                    .map_or_else(|| node.into_owned(), Clone::clone)
                    .into(),
                object => object.into_owned(),
            };
            Triple::new(subject, triple.predicate, object)
        })
        .collect()
}

/// Recolours the nodes until the number of colours stops growing.
///
/// A node's previous colour is part of its description, so classes are only ever split.
fn refine<'a>(
    neighbourhoods: &FxHashMap<BlankNodeRef<'a>, Vec<TripleRef<'a>>>,
    colours: &mut FxHashMap<BlankNodeRef<'a>, usize>,
) {
    let mut count = distinct_colours(colours);
    loop {
        let signatures = neighbourhoods
            .iter()
            .map(|(node, triples)| {
                let mut lines = triples
                    .iter()
                    .map(|triple| describe(*triple, *node, colours))
                    .collect::<Vec<_>>();
                lines.sort_unstable();
                let colour = colours.get(node).copied().unwrap_or_default();
                (*node, format!("{colour}\n{}", lines.join("\n")))
            })
            .collect::<Vec<_>>();
        let mut ranks = signatures
            .iter()
            .map(|(_, signature)| signature.as_str())
            .collect::<Vec<_>>();
        ranks.sort_unstable();
        ranks.dedup();
        let refined = signatures
            .iter()
            .map(|(node, signature)| {
                let rank = ranks
                    .binary_search(&signature.as_str())
                    .unwrap_or_else(|i| i);
                (*node, rank)
            })
            .collect::<FxHashMap<_, _>>();
        *colours = refined;
        let new_count = ranks.len();
        if new_count == count {
            return;
        }
        count = new_count;
    }
}

fn distinct_colours(colours: &FxHashMap<BlankNodeRef<'_>, usize>) -> usize {
    let mut values = colours.values().copied().collect::<Vec<_>>();
    values.sort_unstable();
    values.dedup();
    values.len()
}

/// N-Triples like line where `node` is written `_:@` and other blank nodes `_:` followed by their colour.
fn describe<'a>(
    triple: TripleRef<'a>,
    node: BlankNodeRef<'a>,
    colours: &FxHashMap<BlankNodeRef<'a>, usize>,
) -> String {
    let term = |term: TermRef<'a>| match term {
        TermRef::BlankNode(b) if b == node => "_:@".to_owned(),
        TermRef::BlankNode(b) => format!("_:{}", colours.get(&b).copied().unwrap_or_default()),
        term => term.to_string(),
    };
    format!(
        "{} {} {}",
        term(triple.subject.into()),
        triple.predicate,
        term(triple.object)
    )
}

fn cmp_subjects(a: NamedOrBlankNodeRef<'_>, b: NamedOrBlankNodeRef<'_>) -> Ordering {
    cmp_terms(a.into(), b.into())
}

fn cmp_literals(a: LiteralRef<'_>, b: LiteralRef<'_>) -> Ordering {
    a.value()
        .cmp(b.value())
        .then_with(|| a.datatype().as_str().cmp(b.datatype().as_str()))
        .then_with(|| a.language().cmp(&b.language()))
}

fn kind_rank(term: TermRef<'_>) -> u8 {
    match term {
        TermRef::NamedNode(_) => 0,
        TermRef::BlankNode(_) => 1,
        TermRef::Literal(_) => 2,
    }
}
