//! Rubric document tooling.
//!
//! Manages rubric documents (`rubric.json`) describing a criterion/indicator
//! tree with per-level descriptors, validates them against the wire schema
//! and structural invariants, and resolves dotted index paths into them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rubric::core::resolve::resolve;
use rubric::document::starter_document;
use rubric::io::config::{load_config, write_config};
use rubric::io::document_store::{V1_SCHEMA, load_document, write_document};
use rubric::io::render::render_markdown;

#[derive(Parser)]
#[command(name = "rubric", version, about = "Rubric document tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `rubric.json`, `rubric.toml` and the schema file if missing.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check a document against the schema and structural invariants.
    Validate {
        /// Document to check.
        file: PathBuf,
    },
    /// Resolve an index path (e.g. `$.criterios[0].indicadores[1]`) in a document.
    Resolve {
        /// Document to resolve into.
        file: PathBuf,
        /// Path to resolve.
        path: String,
    },
    /// Render a document as a markdown table.
    Render {
        /// Document to render.
        file: PathBuf,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    rubric::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(force),
        Command::Validate { file } => cmd_validate(&file),
        Command::Resolve { file, path } => cmd_resolve(&file, &path),
        Command::Render { file, output } => cmd_render(&file, output.as_deref()),
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let document_path = Path::new("rubric.json");
    let config_path = Path::new("rubric.toml");
    let schema_path = Path::new("schemas/rubric/v1.schema.json");

    fs::create_dir_all("schemas/rubric").context("create schema directory")?;

    if force || !schema_path.exists() {
        fs::write(schema_path, V1_SCHEMA).context("write v1 schema")?;
    }

    let config = load_config(config_path)?;
    if force || !config_path.exists() {
        write_config(config_path, &config)?;
    }

    if force || !document_path.exists() {
        let document = starter_document(&config.default_levels);
        write_document(document_path, &document).context("write rubric.json")?;
    }

    Ok(())
}

fn cmd_validate(file: &Path) -> Result<()> {
    load_document(file)?;
    println!("ok: {}", file.display());
    Ok(())
}

fn cmd_resolve(file: &Path, path: &str) -> Result<()> {
    // Raw JSON, no validation: resolution is speculative and must work on
    // partially built documents.
    let raw = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", file.display()))?;
    match resolve(&value, path) {
        Some(target) => {
            let payload = serde_json::to_string_pretty(target).context("serialize value")?;
            println!("{payload}");
        }
        None => println!("N/A"),
    }
    Ok(())
}

fn cmd_render(file: &Path, output: Option<&Path>) -> Result<()> {
    let document = load_document(file)?;
    let rendered = render_markdown(&document)?;
    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    /// Catch invalid arg definitions at test time.
    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_command() {
        let cli = Cli::try_parse_from(["rubric", "resolve", "rubric.json", "$.criterios[0]"])
            .expect("parse");
        match cli.command {
            Command::Resolve { file, path } => {
                assert_eq!(file, PathBuf::from("rubric.json"));
                assert_eq!(path, "$.criterios[0]");
            }
            _ => panic!("expected resolve command"),
        }
    }
}
