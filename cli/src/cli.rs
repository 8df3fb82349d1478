use clap::{Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxclosure")]
/// Merge an ontology with data graphs, add the triples entailed by its
/// subclass, subproperty and inverse axioms and write a sorted graph
pub struct Args {
    /// File holding the ontology
    ///
    /// Only this file is read for rdfs:subClassOf, rdfs:subPropertyOf and owl:inverseOf axioms.
    #[arg(value_hint = ValueHint::FilePath)]
    pub ontology: PathBuf,
    /// Data file(s) to merge with the ontology
    #[arg(required = true, num_args = 1.., value_hint = ValueHint::FilePath)]
    pub data: Vec<PathBuf>,
    /// File to write the result to
    ///
    /// Its extension selects the output format. Defaults to rdf/graph.ttl.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// JSON configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Prefix to force in the output, like "ex=https://example.org/"
    ///
    /// Replaces any prefix of the inputs using the same name or the same namespace.
    #[arg(short, long = "prefix", value_name = "NAME=IRI")]
    pub prefixes: Vec<String>,
    /// The format of the input files
    ///
    /// It can be an extension like "nt" or a MIME type like "application/n-triples".
    ///
    /// By default, the format is guessed from each file extension.
    #[arg(long)]
    pub format: Option<String>,
    /// Base IRI of the input files
    #[arg(long, value_hint = ValueHint::Url)]
    pub base: Option<String>,
    /// Do not apply rdfs:subPropertyOf axioms
    #[arg(long)]
    pub no_sub_property: bool,
    /// Do not copy labels and descriptions to schema:name and schema:description
    #[arg(long)]
    pub no_annotations: bool,
    /// Also rewrite each input file sorted and with the forced prefixes
    #[arg(long)]
    pub sort_inputs: bool,
    /// Format of the log lines written to stderr
    ///
    /// The verbosity is set with the RUST_LOG environment variable.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    Text,
    /// One JSON object per line
    Json,
}
