//! ppe-audit: protective-equipment compliance from object detections.
//!
//! Given the labelled boxes a detector found in a still image, ppe-audit
//! decides which equipment categories each detected person is wearing and
//! aggregates the result into compliance statistics and a JSON report.
//!
//! # Modules
//!
//! - [`scene`]: Bounding boxes, the overlap predicate, persons and equipment
//! - [`detection`]: Parsing of detector responses into persons and equipment
//! - [`matching`]: Equipment-to-person assignment and its diagnostics
//! - [`stats`]: Population statistics, summary text and the JSON report
//! - [`config`]: Label vocabulary and equipment taxonomy
//! - [`audit`]: The parse, match and aggregate pipeline for one image
//! - [`error`]: Error types for ppe-audit operations

pub mod audit;
pub mod config;
pub mod detection;
pub mod error;
pub mod matching;
pub mod scene;
pub mod stats;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use walkdir::WalkDir;

pub use audit::{audit_detections, audit_documents, audit_files, Audit};
pub use config::AuditConfig;
pub use error::PpeAuditError;
pub use stats::{ComplianceReport, Stats};

/// The ppe-audit CLI application.
#[derive(Parser)]
#[command(name = "ppe-audit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Audit one image from one or more saved detector responses.
    Audit(AuditArgs),
    /// Audit every detector response in a directory, one image per file.
    Batch(BatchArgs),
    /// List the configured equipment categories.
    Categories(CategoriesArgs),
}

/// Arguments for the audit subcommand.
#[derive(clap::Args)]
struct AuditArgs {
    /// Detector response files (JSON) describing the same image.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Category configuration file (YAML). Defaults to the built-in taxonomy.
    #[arg(long, env = "PPE_AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Link to the source image, copied into the JSON report.
    #[arg(long, default_value = "")]
    image_url: String,

    /// Output format ('text', 'json', or 'metrics').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the batch subcommand.
#[derive(clap::Args)]
struct BatchArgs {
    /// Directory to scan for detector response files (*.json).
    dir: PathBuf,

    /// Category configuration file (YAML). Defaults to the built-in taxonomy.
    #[arg(long, env = "PPE_AUDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the categories subcommand.
#[derive(clap::Args)]
struct CategoriesArgs {
    /// Category configuration file (YAML). Defaults to the built-in taxonomy.
    #[arg(long, env = "PPE_AUDIT_CONFIG")]
    config: Option<PathBuf>,
}

/// Run the ppe-audit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PpeAuditError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Audit(args)) => run_audit(args),
        Some(Commands::Batch(args)) => run_batch(args),
        Some(Commands::Categories(args)) => run_categories(args),
        None => {
            println!("ppe-audit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Protective-equipment compliance from object detections.");
            println!();
            println!("Run 'ppe-audit --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the audit subcommand.
fn run_audit(args: AuditArgs) -> Result<(), PpeAuditError> {
    check_output(&args.output, &["text", "json", "metrics"])?;
    let config = config::load_config(args.config.as_deref())?;

    let audit = audit_files(&args.inputs, &config)?;

    match args.output.as_str() {
        "json" => print_json(&audit.stats.build_report(&args.image_url))?,
        "metrics" => print_json(&audit.stats.metrics())?,
        _ => {
            print!("{}", audit.stats);
            if !audit.matching.is_clean() {
                println!();
                print!("{}", audit.matching);
            }
        }
    }

    Ok(())
}

/// One audited file in batch JSON output.
#[derive(Serialize)]
struct BatchEntry {
    file: PathBuf,
    report: ComplianceReport,
}

/// Execute the batch subcommand.
fn run_batch(args: BatchArgs) -> Result<(), PpeAuditError> {
    check_output(&args.output, &["text", "json"])?;
    let config = config::load_config(args.config.as_deref())?;

    let files = collect_json_files(&args.dir)?;
    log::debug!("batch: {} file(s) under {}", files.len(), args.dir.display());

    let mut entries = Vec::with_capacity(files.len());
    let mut persons = 0usize;
    let mut equipped = 0usize;
    let mut unequipped = 0usize;

    for file in files {
        let audit = audit_files(&[&file], &config)?;
        persons += audit.stats.population_count();
        equipped += audit.stats.equipped_count();
        unequipped += audit.stats.unequipped_count();

        if args.output == "text" {
            println!("== {}", file.display());
            print!("{}", audit.stats);
            println!();
        }
        entries.push(BatchEntry {
            report: audit.stats.build_report(""),
            file,
        });
    }

    if args.output == "json" {
        print_json(&entries)?;
    } else {
        println!(
            "Audited {} image(s): {} persons, {} equipped, {} unequipped.",
            entries.len(),
            persons,
            equipped,
            unequipped
        );
    }

    Ok(())
}

/// Execute the categories subcommand.
fn run_categories(args: CategoriesArgs) -> Result<(), PpeAuditError> {
    let config = config::load_config(args.config.as_deref())?;

    println!("Person labels: {}", config.person_labels.join(", "));
    for category in &config.categories {
        let state = if category.enabled { "on " } else { "off" };
        println!(
            "  [{}] {}: {}",
            state,
            category.name,
            category.synonyms.join(", ")
        );
    }
    Ok(())
}

/// Finds `*.json` files under `dir`, sorted by path.
fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>, PpeAuditError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PpeAuditError::Io(e.into()))?;
        let is_json = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn check_output(output: &str, supported: &[&str]) -> Result<(), PpeAuditError> {
    if supported.contains(&output) {
        Ok(())
    } else {
        Err(PpeAuditError::UnsupportedOutput(format!(
            "'{}' (supported: {})",
            output,
            supported.join(", ")
        )))
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), PpeAuditError> {
    let json = serde_json::to_string_pretty(value).map_err(PpeAuditError::ReportWrite)?;
    println!("{}", json);
    Ok(())
}
