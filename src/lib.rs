//! Specimen Library
//!
//! Command-line front end for the specimen randomization engine: load a type
//! catalog, build an engine from parameters, and print generated values.
//!
//! # CLI Usage
//!
//! ```bash
//! # Three random people as JSON
//! specimen populate --types catalog.yaml --type Person --count 3 --seed 42
//!
//! # A map of lists, as YAML, with parameters from a file
//! specimen populate --types catalog.yaml \
//!   --type '{type: map, key: string, value: {type: sequence, element: Person}}' \
//!   --config params.toml --format yaml
//!
//! # Validate a catalog and list its types
//! specimen check --types catalog.yaml
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use specimen_core::{FieldKey, TypeCatalog, TypeDefinition, TypeKind, TypeRef, Value};
use specimen_generator::{RandomizationEngine, SubtypeScanner};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub mod config;

pub use config::{load_parameters, ParameterOverrides};

/// Output format for generated values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    #[value(name = "json")]
    Json,
    /// YAML
    #[value(name = "yaml")]
    Yaml,
}

#[derive(Parser, Clone, Debug)]
pub struct PopulateArgs {
    /// Type catalog (YAML)
    #[arg(long, value_name = "PATH")]
    pub types: PathBuf,

    /// Type to populate: a catalog type name, a primitive keyword, or an
    /// inline YAML type such as '{type: sequence, element: Person}'
    #[arg(long = "type", value_name = "TYPE")]
    pub type_ref: String,

    /// Number of values to generate
    #[arg(long, default_value = "1")]
    pub count: usize,

    /// Randomization parameters (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Fields to leave unpopulated (format: Type.field)
    #[arg(long = "exclude", value_name = "FIELD")]
    pub exclude: Vec<FieldKey>,

    /// Parameter overrides
    #[command(flatten)]
    pub overrides: ParameterOverrides,
}

/// Parse a type reference from its catalog notation.
pub fn parse_type_ref(value: &str) -> anyhow::Result<TypeRef> {
    serde_yaml::from_str(value).with_context(|| format!("Invalid type '{value}'"))
}

fn load_catalog(path: &Path) -> anyhow::Result<TypeCatalog> {
    let catalog = TypeCatalog::from_file(path)
        .with_context(|| format!("Failed to load type catalog from {path:?}"))?;
    info!("Loaded {} types from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Generate values and render them in the requested format.
pub fn run_populate(args: &PopulateArgs) -> anyhow::Result<String> {
    let catalog = load_catalog(&args.types)?;
    let ty = parse_type_ref(&args.type_ref)?;
    let params = load_parameters(args.config.as_deref(), &args.overrides)?;

    let engine = args
        .exclude
        .iter()
        .fold(
            RandomizationEngine::builder(catalog).parameters(params),
            |builder, key| builder.exclude_field(key.clone()),
        )
        .build()
        .context("Failed to build randomization engine")?;

    info!(
        "Populating {} value(s) of {} with seed {}",
        args.count,
        ty,
        engine.seed()
    );

    let values = engine
        .populate_many(&ty, args.count)
        .with_context(|| format!("Failed to populate {ty}"))?;

    let mut documents: Vec<serde_json::Value> = values.iter().map(Value::to_json).collect();
    let document = if documents.len() == 1 {
        documents.remove(0)
    } else {
        serde_json::Value::Array(documents)
    };

    render(&document, args.format)
}

fn render(document: &serde_json::Value, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).context("Failed to serialize output as YAML")
        }
    }
}

fn kind_label(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Abstract => "abstract",
        TypeKind::Interface => "interface",
        TypeKind::Enum => "enum",
    }
}

fn describe(scanner: &SubtypeScanner, def: &TypeDefinition) -> String {
    let ty = TypeRef::named(&def.name);
    match def.kind {
        TypeKind::Enum => format!("{} constants", def.constants.len()),
        TypeKind::Abstract | TypeKind::Interface => {
            let subtypes: Vec<String> = scanner
                .concrete_subtypes(&ty)
                .iter()
                .map(TypeRef::to_string)
                .collect();
            if subtypes.is_empty() {
                "no concrete subtypes".to_string()
            } else {
                format!("concrete subtypes: {}", subtypes.join(", "))
            }
        }
        TypeKind::Class => {
            let fields = scanner.catalog().fields_of(&ty);
            let populated = fields.iter().filter(|f| !f.is_static).count();
            format!("{} fields ({} populated)", fields.len(), populated)
        }
    }
}

/// Validate a catalog and summarize its types.
pub fn run_check(types: &Path) -> anyhow::Result<String> {
    let scanner = SubtypeScanner::new(Arc::new(load_catalog(types)?));
    let catalog = scanner.catalog();

    let mut report = String::new();
    for def in catalog.definitions() {
        let mut name = def.name.clone();
        if !def.type_params.is_empty() {
            name = format!("{}<{}>", name, def.type_params.join(", "));
        }
        writeln!(
            report,
            "{} ({}): {}",
            name,
            kind_label(def.kind),
            describe(&scanner, def)
        )?;
    }
    write!(report, "{} types OK", catalog.len())?;

    Ok(report)
}
