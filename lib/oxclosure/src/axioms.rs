use crate::vocab::{owl, rdfs};
use oxrdf::{Graph, NamedNode, NamedNodeRef, NamedOrBlankNodeRef, TermRef, TripleRef};
use rustc_hash::{FxHashMap, FxHashSet};

/// The schema axioms the [`ForwardChainer`](crate::ForwardChainer) is driven by.
///
/// Built once from the ontology graph only.
/// Axioms whose subject or object is a blank node or a literal are ignored:
/// schema relations are only considered between named terms.
///
/// ```
/// use oxclosure::AxiomIndex;
/// use oxclosure::vocab::rdfs;
/// use oxrdf::{Graph, NamedNodeRef, TripleRef};
///
/// let dog = NamedNodeRef::new("http://example.com/Dog")?;
/// let animal = NamedNodeRef::new("http://example.com/Animal")?;
/// let mut ontology = Graph::new();
/// ontology.insert(TripleRef::new(dog, rdfs::SUB_CLASS_OF, animal));
///
/// let index = AxiomIndex::from_ontology(&ontology);
/// assert!(index.super_classes(dog).any(|c| c == animal));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct AxiomIndex {
    /// class -> direct super classes
    sub_class_of: FxHashMap<NamedNode, FxHashSet<NamedNode>>,
    /// property -> direct super properties
    sub_property_of: FxHashMap<NamedNode, FxHashSet<NamedNode>>,
    /// property -> inverse property, always stored in both directions
    inverse_of: FxHashMap<NamedNode, NamedNode>,
}

impl AxiomIndex {
    /// Scans the ontology graph once and indexes its `rdfs:subClassOf`,
    /// `rdfs:subPropertyOf` and `owl:inverseOf` axioms.
    pub fn from_ontology(ontology: &Graph) -> Self {
        let mut index = Self::default();
        let mut inverses = Vec::new();
        for triple in ontology {
            let Some((subject, object)) = named_endpoints(triple) else {
                continue;
            };
            if triple.predicate == rdfs::SUB_CLASS_OF {
                index
                    .sub_class_of
                    .entry(subject.into_owned())
                    .or_default()
                    .insert(object.into_owned());
            } else if triple.predicate == rdfs::SUB_PROPERTY_OF {
                index
                    .sub_property_of
                    .entry(subject.into_owned())
                    .or_default()
                    .insert(object.into_owned());
            } else if triple.predicate == owl::INVERSE_OF {
                inverses.push((subject.into_owned(), object.into_owned()));
            }
        }
        // A property declared inverse of several others keeps the last declaration:
        // graph iteration order is unspecified so the declarations are sorted first.
        inverses.sort_unstable_by(|(s1, o1), (s2, o2)| {
            (s1.as_str(), o1.as_str()).cmp(&(s2.as_str(), o2.as_str()))
        });
        for (subject, object) in inverses {
            index.inverse_of.insert(subject.clone(), object.clone());
            index.inverse_of.insert(object, subject);
        }
        index
    }

    /// Direct super classes of `class`.
    pub fn super_classes<'a>(
        &'a self,
        class: NamedNodeRef<'_>,
    ) -> impl Iterator<Item = NamedNodeRef<'a>> + use<'a> {
        lookup_set(&self.sub_class_of, class)
    }

    /// Direct super properties of `property`.
    pub fn super_properties<'a>(
        &'a self,
        property: NamedNodeRef<'_>,
    ) -> impl Iterator<Item = NamedNodeRef<'a>> + use<'a> {
        lookup_set(&self.sub_property_of, property)
    }

    /// The inverse of `property`, if one is declared.
    pub fn inverse(&self, property: NamedNodeRef<'_>) -> Option<NamedNodeRef<'_>> {
        self.inverse_of
            .get(&property.into_owned())
            .map(NamedNode::as_ref)
    }

    /// Number of indexed `rdfs:subClassOf` pairs.
    pub fn sub_class_axiom_count(&self) -> usize {
        self.sub_class_of.values().map(FxHashSet::len).sum()
    }

    /// Number of indexed `rdfs:subPropertyOf` pairs.
    pub fn sub_property_axiom_count(&self) -> usize {
        self.sub_property_of.values().map(FxHashSet::len).sum()
    }

    /// Number of properties with a declared inverse.
    pub fn inverse_property_count(&self) -> usize {
        self.inverse_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_class_of.is_empty() && self.sub_property_of.is_empty() && self.inverse_of.is_empty()
    }
}

fn named_endpoints(triple: TripleRef<'_>) -> Option<(NamedNodeRef<'_>, NamedNodeRef<'_>)> {
    let NamedOrBlankNodeRef::NamedNode(subject) = triple.subject else {
        return None;
    };
    let TermRef::NamedNode(object) = triple.object else {
        return None;
    };
    Some((subject, object))
}

fn lookup_set<'a>(
    map: &'a FxHashMap<NamedNode, FxHashSet<NamedNode>>,
    key: NamedNodeRef<'_>,
) -> impl Iterator<Item = NamedNodeRef<'a>> + use<'a> {
    map.get(&key.into_owned())
        .into_iter()
        .flatten()
        .map(NamedNode::as_ref)
}
