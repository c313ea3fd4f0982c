//! Command-line front end for region classification.
//!
//! Loads a region catalog from JSON, classifies each supplied point and
//! prints one JSON line per point.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use atlas::config::Config;
use atlas::models::{Classification, CoordValue, Point, Region, RegionRecord};
use atlas::pip::{Classifier, RegionCatalog};

#[derive(Parser, Debug)]
#[command(name = "atlas")]
#[command(about = "Classify points into named regions")]
struct Args {
    /// JSON file holding an array of region records
    #[arg(short, long)]
    regions: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Point as "A,B" in the configured coordinate order (repeatable)
    #[arg(short, long = "point")]
    points: Vec<String>,

    /// JSON file holding an array of coordinate pairs
    #[arg(long = "points")]
    points_file: Option<PathBuf>,

    /// Only test against the region with this name
    #[arg(long)]
    custom: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// One output line
#[derive(Debug, Serialize)]
struct Report {
    input: Vec<CoordValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inside: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Report {
    fn new(input: Vec<CoordValue>) -> Self {
        Self {
            input,
            classification: None,
            inside: None,
            error: None,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout carries the results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    let classifier = Classifier::from(&config.classifier);

    let content = fs::read_to_string(&args.regions).context("Failed to read regions file")?;
    let records: Vec<RegionRecord> =
        serde_json::from_str(&content).context("Failed to parse regions file")?;
    let catalog = RegionCatalog::from_records(0, &records, classifier.order)
        .context("Invalid region definition")?;
    info!(
        "Loaded {} regions from {}",
        catalog.len(),
        args.regions.display()
    );

    let mut inputs: Vec<Vec<CoordValue>> =
        args.points.iter().map(|s| parse_point_arg(s)).collect();
    if let Some(path) = &args.points_file {
        let content = fs::read_to_string(path).context("Failed to read points file")?;
        let pairs: Vec<Vec<CoordValue>> =
            serde_json::from_str(&content).context("Failed to parse points file")?;
        inputs.extend(pairs);
    }

    let custom = match &args.custom {
        Some(name) => Some(
            catalog
                .find(name)
                .with_context(|| format!("No region named '{}'", name))?,
        ),
        None => None,
    };

    info!("Classifying {} points", inputs.len());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for input in inputs {
        let report = classify_input(input, &classifier, &catalog, custom);
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Classify one raw input against the catalog, or against `custom` when set
fn classify_input(
    input: Vec<CoordValue>,
    classifier: &Classifier,
    catalog: &RegionCatalog,
    custom: Option<&Region>,
) -> Report {
    let mut report = Report::new(input);

    match Point::from_pair(&report.input, classifier.order) {
        Ok(point) => match custom {
            Some(region) => report.inside = Some(classifier.classify_custom(&point, region)),
            None => match catalog.lookup(classifier, Some(&point)) {
                Ok(c) => report.classification = Some(c),
                Err(e) => report.error = Some(e.to_string()),
            },
        },
        Err(e) => report.error = Some(e.to_string()),
    }

    report
}

/// Split "A,B" into raw coordinate values; blank input means no coordinates
fn parse_point_arg(s: &str) -> Vec<CoordValue> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',')
        .map(|part| CoordValue::from(part.trim()))
        .collect()
}
