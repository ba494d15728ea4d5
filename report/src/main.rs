mod cli;
mod export;
mod job;
mod pin;
mod questions;
mod response;
mod stats;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "report", version, about = "Survey results reporting for rubric")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary statistics and per-question level distributions.
    Stats {
        #[arg(long)]
        job: PathBuf,
        /// Filter responses by respondent name, place, company type or line.
        #[arg(long)]
        search: Option<String>,
    },
    /// Write the results CSV and its metadata.
    Export {
        #[arg(long)]
        job: PathBuf,
    },
    /// Questions grouped by indicator with resolved rubric names.
    Questions {
        #[arg(long)]
        job: PathBuf,
    },
    /// Generate invitation PINs for an external survey.
    Pins {
        #[arg(long)]
        survey_id: i64,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> Result<()> {
    rubric::logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Stats { job, search } => cli::stats_command(&job, search.as_deref()),
        Command::Export { job } => cli::export_command(&job),
        Command::Questions { job } => cli::questions_command(&job),
        Command::Pins { survey_id, count } => cli::pins_command(survey_id, count),
    }
}
