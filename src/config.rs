//! Randomization parameters for the CLI.
//!
//! Parameters come from an optional TOML file; individual command-line
//! overrides are applied on top and the result is validated.

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use specimen_core::{Charset, RandomizationParameters, Range};
use std::path::Path;

/// Command-line overrides for randomization parameters.
#[derive(Parser, Clone, Debug, Default)]
pub struct ParameterOverrides {
    /// Seed for reproducible output
    #[arg(long, env = "SPECIMEN_SEED")]
    pub seed: Option<u64>,

    /// Minimum size of arrays, collections and maps
    #[arg(long)]
    pub min_collection_size: Option<usize>,

    /// Maximum size of arrays, collections and maps
    #[arg(long)]
    pub max_collection_size: Option<usize>,

    /// Minimum string length
    #[arg(long)]
    pub min_string_length: Option<usize>,

    /// Maximum string length
    #[arg(long)]
    pub max_string_length: Option<usize>,

    /// Instances kept per type for reuse
    #[arg(long)]
    pub max_object_pool_size: Option<usize>,

    /// Nesting depth past which objects are left unpopulated
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Character set for chars and strings (us-ascii, iso-8859-1, utf-8)
    #[arg(long)]
    pub charset: Option<Charset>,

    /// Resolve abstract types and interfaces to concrete subtypes
    #[arg(long)]
    pub scan_concrete_types: bool,

    /// Populate fields that have a default value
    #[arg(long)]
    pub override_defaults: bool,

    /// Earliest generated date (YYYY-MM-DD)
    #[arg(long)]
    pub date_min: Option<NaiveDate>,

    /// Latest generated date (YYYY-MM-DD)
    #[arg(long)]
    pub date_max: Option<NaiveDate>,

    /// Earliest generated time of day (HH:MM:SS)
    #[arg(long)]
    pub time_min: Option<NaiveTime>,

    /// Latest generated time of day (HH:MM:SS)
    #[arg(long)]
    pub time_max: Option<NaiveTime>,
}

impl ParameterOverrides {
    /// Apply the overrides that were given.
    pub fn apply(&self, params: &mut RandomizationParameters) {
        if let Some(seed) = self.seed {
            params.seed = Some(seed);
        }
        override_range(
            &mut params.collection_size,
            self.min_collection_size,
            self.max_collection_size,
        );
        override_range(
            &mut params.string_length,
            self.min_string_length,
            self.max_string_length,
        );
        override_range(&mut params.date_range, self.date_min, self.date_max);
        override_range(&mut params.time_range, self.time_min, self.time_max);
        if let Some(size) = self.max_object_pool_size {
            params.max_object_pool_size = size;
        }
        if let Some(depth) = self.max_depth {
            params.max_randomization_depth = depth;
        }
        if let Some(charset) = self.charset {
            params.charset = charset;
        }
        if self.scan_concrete_types {
            params.scan_classpath_for_concrete_types = true;
        }
        if self.override_defaults {
            params.override_default_initialization = true;
        }
    }
}

fn override_range<T>(range: &mut Range<T>, min: Option<T>, max: Option<T>) {
    if let Some(min) = min {
        range.min = min;
    }
    if let Some(max) = max {
        range.max = max;
    }
}

/// Load parameters from an optional file and apply overrides.
pub fn load_parameters(
    path: Option<&Path>,
    overrides: &ParameterOverrides,
) -> anyhow::Result<RandomizationParameters> {
    let mut params = match path {
        Some(path) => RandomizationParameters::from_file(path)
            .with_context(|| format!("Failed to load parameters from {path:?}"))?,
        None => RandomizationParameters::default(),
    };

    overrides.apply(&mut params);
    params
        .validate()
        .context("Invalid randomization parameters")?;

    Ok(params)
}
