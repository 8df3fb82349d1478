//! Reading and writing graphs.
//!
//! [`GraphParser`] and [`GraphSerializer`] are the seams between the closure
//! logic and concrete RDF syntaxes. [`RdfIoParser`] and [`RdfIoSerializer`]
//! implement them with [`oxrdfio`].

use crate::error::{ClosureError, FormatError};
use crate::namespace::NamespaceTable;
use crate::order::canonical_triples;
use oxiri::Iri;
use oxrdf::{Graph, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::debug;

/// A parsed graph with the prefixes its source declared.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub graph: Graph,
    pub namespaces: NamespaceTable,
}

impl Document {
    pub fn new(graph: Graph, namespaces: NamespaceTable) -> Self {
        Self { graph, namespaces }
    }

    /// Adds the triples and the prefixes of `other`.
    ///
    /// Prefixes are combined with [`NamespaceTable::absorb`]: bindings of `self` win.
    pub fn merge(&mut self, other: &Self) {
        self.graph.extend(other.graph.iter());
        self.namespaces.absorb_all(&other.namespaces);
    }
}

/// Reads a [`Document`] from bytes.
pub trait GraphParser {
    fn parse(&self, reader: impl Read) -> Result<Document, FormatError>;
}

/// Writes a graph with a set of prefix declarations.
///
/// Implementations must produce the same bytes for equal graphs and tables.
pub trait GraphSerializer {
    fn serialize(
        &self,
        graph: &Graph,
        namespaces: &NamespaceTable,
        writer: impl Write,
    ) -> Result<(), FormatError>;
}

/// [`GraphParser`] for all the graph formats supported by [`oxrdfio`].
///
/// ```
/// use oxclosure::{GraphParser, RdfIoParser};
/// use oxrdfio::RdfFormat;
///
/// let file = b"@prefix ex: <http://example.com/> .\nex:Rex a ex:Dog .";
/// let document = RdfIoParser::new(RdfFormat::Turtle)?.parse(file.as_slice())?;
/// assert_eq!(document.graph.len(), 1);
/// assert_eq!(document.namespaces.get("ex"), Some("http://example.com/"));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone)]
pub struct RdfIoParser {
    format: RdfFormat,
    base_iri: Option<String>,
}

impl RdfIoParser {
    /// Fails if `format` is a dataset format like N-Quads or TriG.
    pub fn new(format: RdfFormat) -> Result<Self, FormatError> {
        if format.supports_datasets() {
            return Err(FormatError::DatasetFormat(format));
        }
        Ok(Self {
            format,
            base_iri: None,
        })
    }

    /// Guesses the format from the extension of `path`.
    pub fn for_path(path: &Path) -> Result<Self, FormatError> {
        Self::new(format_from_path(path)?)
    }

    /// Sets the IRI relative IRIs are resolved against.
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, FormatError> {
        let base_iri = base_iri.into();
        if let Err(error) = Iri::parse(base_iri.as_str()) {
            return Err(FormatError::InvalidBaseIri {
                iri: base_iri,
                error,
            });
        }
        self.base_iri = Some(base_iri);
        Ok(self)
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }
}

impl GraphParser for RdfIoParser {
    fn parse(&self, reader: impl Read) -> Result<Document, FormatError> {
        // Blank nodes are scoped to their document
        let mut parser = RdfParser::from_format(self.format).rename_blank_nodes();
        if let Some(base_iri) = &self.base_iri {
            parser = parser
                .with_base_iri(base_iri)
                .map_err(|error| FormatError::InvalidBaseIri {
                    iri: base_iri.clone(),
                    error,
                })?;
        }
        let mut reader = parser.for_reader(reader);
        let mut graph = Graph::new();
        for quad in reader.by_ref() {
            graph.insert(&Triple::from(quad?));
        }
        let mut namespaces = NamespaceTable::new();
        for (prefix, iri) in reader.prefixes() {
            namespaces.absorb(prefix, iri);
        }
        debug!(
            format = self.format.name(),
            triples = graph.len(),
            prefixes = namespaces.len(),
            "parsed document"
        );
        Ok(Document::new(graph, namespaces))
    }
}

/// [`GraphSerializer`] for all the graph formats supported by [`oxrdfio`].
///
/// Blank nodes are relabeled and triples sorted with [`canonical_triples`].
#[derive(Debug, Clone, Copy)]
pub struct RdfIoSerializer {
    format: RdfFormat,
}

impl RdfIoSerializer {
    /// Fails if `format` is a dataset format like N-Quads or TriG.
    pub fn new(format: RdfFormat) -> Result<Self, FormatError> {
        if format.supports_datasets() {
            return Err(FormatError::DatasetFormat(format));
        }
        Ok(Self { format })
    }

    /// Guesses the format from the extension of `path`.
    pub fn for_path(path: &Path) -> Result<Self, FormatError> {
        Self::new(format_from_path(path)?)
    }

    pub fn format(&self) -> RdfFormat {
        self.format
    }
}

impl Default for RdfIoSerializer {
    fn default() -> Self {
        Self {
            format: RdfFormat::Turtle,
        }
    }
}

impl GraphSerializer for RdfIoSerializer {
    fn serialize(
        &self,
        graph: &Graph,
        namespaces: &NamespaceTable,
        writer: impl Write,
    ) -> Result<(), FormatError> {
        let mut serializer = RdfSerializer::from_format(self.format);
        for (prefix, iri) in namespaces {
            serializer = serializer.with_prefix(prefix, iri).map_err(|error| {
                FormatError::InvalidPrefix {
                    prefix: prefix.to_owned(),
                    iri: iri.to_owned(),
                    error,
                }
            })?;
        }
        let mut writer = serializer.for_writer(writer);
        for triple in canonical_triples(graph) {
            writer.serialize_triple(&triple)?;
        }
        writer.finish()?.flush()?;
        Ok(())
    }
}

/// Parses the file at `path`.
pub fn read_document(path: &Path, parser: &impl GraphParser) -> Result<Document, ClosureError> {
    File::open(path)
        .map_err(FormatError::from)
        .and_then(|file| parser.parse(BufReader::new(file)))
        .map_err(|error| ClosureError::Load {
            path: path.to_owned(),
            error,
        })
}

/// Guesses a graph format from a file extension.
pub fn format_from_path(path: &Path) -> Result<RdfFormat, FormatError> {
    path.extension()
        .and_then(OsStr::to_str)
        .and_then(RdfFormat::from_extension)
        .ok_or_else(|| FormatError::UnknownFormat(path.display().to_string()))
}

/// Reads a format from an extension (`ttl`) or a media type (`text/turtle`).
pub fn format_from_name(name: &str) -> Result<RdfFormat, FormatError> {
    RdfFormat::from_extension(name)
        .or_else(|| RdfFormat::from_media_type(name))
        .ok_or_else(|| FormatError::UnknownFormat(name.to_owned()))
}
