use oxiri::IriParseError;
use oxrdfio::{RdfFormat, RdfParseError, RdfSyntaxError};
use std::io;
use std::path::PathBuf;

/// Error returned while reading or writing a graph.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// I/O error (file not found, broken pipe...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error in the syntax of the parsed file.
    #[error(transparent)]
    Syntax(#[from] RdfSyntaxError),
    /// The format could not be guessed from the file extension.
    #[error("cannot guess the RDF format of {0}, use one of the .ttl, .nt, .n3 or .rdf extensions")]
    UnknownFormat(String),
    /// The format stores datasets and not plain graphs.
    #[error("{0} is a dataset format, only graph formats are supported")]
    DatasetFormat(RdfFormat),
    /// The base IRI given to the parser is not valid.
    #[error("invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// A namespace could not be declared on the serializer.
    #[error("the serializer rejected the prefix {prefix}: <{iri}>: {error}")]
    InvalidPrefix {
        prefix: String,
        iri: String,
        #[source]
        error: IriParseError,
    },
}

impl From<RdfParseError> for FormatError {
    #[inline]
    fn from(error: RdfParseError) -> Self {
        match error {
            RdfParseError::Io(e) => Self::Io(e),
            RdfParseError::Syntax(e) => Self::Syntax(e),
        }
    }
}

/// Error returned when a forced namespace binding is not usable.
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// The prefix is not a valid Turtle prefix name.
    #[error("'{0}' is not a valid prefix name")]
    InvalidPrefix(String),
    /// The namespace is not an absolute IRI.
    #[error("the namespace <{iri}> of prefix '{prefix}' is not a valid IRI: {error}")]
    InvalidIri {
        prefix: String,
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// Two prefixes of the same forced table point to the same namespace.
    #[error("prefixes '{first}' and '{second}' are both bound to <{iri}>")]
    ConflictingPrefixes {
        first: String,
        second: String,
        iri: String,
    },
}

/// Error returned while producing a closure from files.
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    /// An input file could not be loaded.
    #[error("failed to load {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        error: FormatError,
    },
    /// The output could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        error: FormatError,
    },
}
