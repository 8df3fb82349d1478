//! Vocabulary terms the closure rules and the annotation duplication rely on.
//!
//! `rdf:` and `rdfs:` terms are taken from [`oxrdf::vocab`].

pub use oxrdf::vocab::{rdf, rdfs};

pub mod owl {
    //! [OWL 2](https://www.w3.org/TR/owl2-syntax/) vocabulary subset.
    use oxrdf::NamedNodeRef;

    /// The namespace IRI.
    pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";
    /// The property that determines that two given properties are inverse.
    pub const INVERSE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#inverseOf");
}

pub mod dcterms {
    //! [DCMI Metadata Terms](https://www.dublincore.org/specifications/dublin-core/dcmi-terms/) subset.
    use oxrdf::NamedNodeRef;

    /// The namespace IRI.
    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";
    /// A name given to the resource.
    pub const TITLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
    /// An account of the resource.
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
}

pub mod schema {
    //! [Schema.org](https://schema.org/) subset.
    use oxrdf::NamedNodeRef;

    /// The namespace IRI.
    pub const NAMESPACE: &str = "http://schema.org/";
    /// The name of the item.
    pub const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://schema.org/name");
    /// A description of the item.
    pub const DESCRIPTION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://schema.org/description");
}

/// `rdf:` namespace IRI.
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// `rdfs:` namespace IRI.
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// `xsd:` namespace IRI.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";
