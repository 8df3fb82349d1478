#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod annotation;
mod axioms;
mod chainer;
mod error;
mod io;
mod namespace;
mod order;
mod reasoner;
pub mod vocab;

pub use annotation::duplicate_annotations;
pub use axioms::AxiomIndex;
pub use chainer::{ClosureReport, ForwardChainer, Rule, RuleSet};
pub use error::{ClosureError, FormatError, NamespaceError};
pub use io::{
    Document, GraphParser, GraphSerializer, RdfIoParser, RdfIoSerializer, format_from_name,
    format_from_path, read_document,
};
pub use namespace::{Iter as NamespaceIter, NamespaceTable};
pub use order::{canonical_triples, cmp_terms, cmp_triples, relabel_blank_nodes, sort_triples};
pub use reasoner::{Closure, ReasonerOptions, reason};
