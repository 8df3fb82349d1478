use crate::cli::Args;
use anyhow::{Context, bail};
use oxclosure::vocab::{dcterms, owl, schema};
use oxclosure::vocab::{RDF_NAMESPACE, RDFS_NAMESPACE, XSD_NAMESPACE};
use oxclosure::{NamespaceTable, ReasonerOptions, Rule, RuleSet, format_from_name};
use oxrdfio::RdfFormat;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT: &str = "rdf/graph.ttl";

/// Content of the `--config` JSON file. All fields are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub output: Option<PathBuf>,
    pub namespaces: BTreeMap<String, String>,
    pub rules: RulesConfig,
    pub annotations: Option<bool>,
    pub sort_inputs: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    pub inverse: Option<bool>,
    pub sub_class: Option<bool>,
    pub sub_property: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open configuration file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid configuration file {}", path.display()))
    }
}

/// Effective settings: built-in defaults, overridden by the configuration file,
/// overridden by the command line.
#[derive(Debug)]
pub struct Settings {
    pub output: PathBuf,
    pub namespaces: NamespaceTable,
    pub options: ReasonerOptions,
    pub sort_inputs: bool,
    pub format: Option<RdfFormat>,
    pub base: Option<String>,
}

impl Settings {
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Self::from_parts(args, config)
    }

    fn from_parts(args: &Args, config: ConfigFile) -> anyhow::Result<Self> {
        let mut namespaces = default_namespaces();
        namespaces.overlay(
            &NamespaceTable::from_bindings(config.namespaces)
                .context("Invalid namespaces in the configuration file")?,
        );
        for prefix in &args.prefixes {
            let (name, iri) = parse_prefix(prefix)?;
            namespaces
                .bind(name, iri)
                .with_context(|| format!("Invalid --prefix {prefix}"))?;
        }

        let mut rules = RuleSet::default();
        for (rule, enabled) in [
            (Rule::InverseOf, config.rules.inverse),
            (Rule::SubClassOf, config.rules.sub_class),
            (Rule::SubPropertyOf, config.rules.sub_property),
        ] {
            if let Some(enabled) = enabled {
                rules = rules.with(rule, enabled);
            }
        }
        if args.no_sub_property {
            rules = rules.with(Rule::SubPropertyOf, false);
        }

        Ok(Self {
            output: args
                .output
                .clone()
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            namespaces,
            options: ReasonerOptions {
                rules,
                annotations: !args.no_annotations && config.annotations.unwrap_or(true),
            },
            sort_inputs: args.sort_inputs || config.sort_inputs.unwrap_or(false),
            format: args.format.as_deref().map(format_from_name).transpose()?,
            base: args.base.clone(),
        })
    }
}

/// Prefixes bound in every output.
pub fn default_namespaces() -> NamespaceTable {
    let mut namespaces = NamespaceTable::new();
    for (prefix, iri) in [
        ("dcterms", dcterms::NAMESPACE),
        ("owl", owl::NAMESPACE),
        ("rdf", RDF_NAMESPACE),
        ("rdfs", RDFS_NAMESPACE),
        ("schema", schema::NAMESPACE),
        ("xsd", XSD_NAMESPACE),
    ] {
        namespaces.absorb(prefix, iri);
    }
    namespaces
}

fn parse_prefix(value: &str) -> anyhow::Result<(&str, &str)> {
    let Some((name, iri)) = value.split_once('=') else {
        bail!("The prefix '{value}' must be written NAME=IRI, like ex=https://example.org/")
    };
    Ok((name.trim(), iri.trim()))
}
