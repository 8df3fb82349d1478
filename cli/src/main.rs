use crate::cli::{Args, LogFormat};
use crate::config::Settings;
use anyhow::Context;
use clap::Parser;
use oxclosure::{
    ClosureError, Document, FormatError, GraphSerializer, NamespaceTable, RdfIoParser,
    RdfIoSerializer, read_document, reason,
};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_format)?;
    let settings = Settings::resolve(&args)?;
    run(&args, &settings)
}

fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("oxclosure=info,oxclosure_cli=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.try_init().map_err(|e| anyhow::anyhow!(e))?,
        LogFormat::Json => builder.json().try_init().map_err(|e| anyhow::anyhow!(e))?,
    }
    Ok(())
}

fn run(args: &Args, settings: &Settings) -> anyhow::Result<()> {
    info!(path = %args.ontology.display(), "loading ontology");
    let ontology_parser = parser_for(&args.ontology, settings)?;
    let ontology = read_document(&args.ontology, &ontology_parser)?;
    let mut data = Vec::with_capacity(args.data.len());
    for path in &args.data {
        info!(path = %path.display(), "loading data");
        let parser = parser_for(path, settings)?;
        data.push((read_document(path, &parser)?, parser));
    }

    if settings.sort_inputs {
        // Only once all inputs parsed, so a syntax error leaves every file untouched
        rewrite_sorted(&args.ontology, &ontology, &ontology_parser, &settings.namespaces)?;
        for (path, (document, parser)) in args.data.iter().zip(&data) {
            rewrite_sorted(path, document, parser, &settings.namespaces)?;
        }
    }

    let closure = reason(
        &ontology,
        data.iter().map(|(document, _)| document),
        &settings.options,
    );

    let output = &settings.output;
    let serializer = RdfIoSerializer::for_path(output)
        .with_context(|| format!("Unsupported output file {}", output.display()))?;
    write_atomically(output, |writer| {
        closure.write(&serializer, &settings.namespaces, writer)
    })?;
    normalize_output(output, &serializer, &settings.namespaces)?;
    info!(
        path = %output.display(),
        triples = closure.graph.len(),
        derived = closure.report.derived(),
        "wrote closure"
    );
    Ok(())
}

fn parser_for(path: &Path, settings: &Settings) -> anyhow::Result<RdfIoParser> {
    let parser = match settings.format {
        Some(format) => RdfIoParser::new(format),
        None => RdfIoParser::for_path(path),
    }
    .with_context(|| format!("Unsupported input file {}", path.display()))?;
    Ok(match &settings.base {
        Some(base) => parser.with_base_iri(base)?,
        None => parser,
    })
}

/// Overwrites an input file with its sorted content and the forced prefixes.
fn rewrite_sorted(
    path: &Path,
    document: &Document,
    parser: &RdfIoParser,
    forced: &NamespaceTable,
) -> anyhow::Result<()> {
    let serializer = RdfIoSerializer::new(parser.format())?;
    let namespaces = document.namespaces.canonicalize(forced);
    write_atomically(path, |writer| {
        serializer.serialize(&document.graph, &namespaces, writer)
    })?;
    info!(path = %path.display(), "sorted input file");
    Ok(())
}

/// Parses back the written output and rewrites it if a second canonicalization changes it.
fn normalize_output(
    path: &Path,
    serializer: &RdfIoSerializer,
    forced: &NamespaceTable,
) -> anyhow::Result<()> {
    let document = read_document(path, &RdfIoParser::new(serializer.format())?)?;
    let mut buffer = Vec::new();
    serializer.serialize(
        &document.graph,
        &document.namespaces.canonicalize(forced),
        &mut buffer,
    )?;
    let written = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if written == buffer {
        debug!(path = %path.display(), "output is already canonical");
        return Ok(());
    }
    write_atomically(path, |writer| Ok(writer.write_all(&buffer)?))
}

/// Writes to a temporary file next to `path` and renames it to `path` once complete.
fn write_atomically(
    path: &Path,
    serialize: impl FnOnce(&mut dyn Write) -> Result<(), FormatError>,
) -> anyhow::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory {}", directory.display()))?;
    let mut file = NamedTempFile::new_in(directory).with_context(|| {
        format!(
            "Failed to create a temporary file in {}",
            directory.display()
        )
    })?;
    let mut writer = BufWriter::new(file.as_file_mut());
    serialize(&mut writer)
        .and_then(|()| Ok(writer.flush()?))
        .map_err(|error| ClosureError::Write {
            path: path.to_owned(),
            error,
        })?;
    drop(writer);
    file.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
