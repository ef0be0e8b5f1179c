//! shortlabel CLI
//!
//! Generates short labels for protein mutation features from FASTA/JSON
//! datasets or a SQLite feature store.

mod commands;
mod dto;
mod sink;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shortlabel_engine::GeneratorConfig;
use tracing::debug;

#[derive(Parser)]
#[command(name = "shortlabel")]
#[command(author, version, about = "Short label generator for protein mutation features")]
#[command(
    long_about = "Generate short labels such as Gln10[6] or [Ala2Gly;Glu5Lys] for curated mutation features.

Examples:
  shortlabel label --fasta proteins.fasta --features features.json
  shortlabel import --db features.db --features features.json --fasta proteins.fasta
  shortlabel label-db --db features.db
  shortlabel parse '[Ala2Gly;Gln10[6]]'"
)]
struct Cli {
    /// Generator configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. info or shortlabel_engine=debug (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Print every generator event as a JSON line instead of one result per feature
    #[arg(long, global = true)]
    json_events: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label every feature of a JSON dataset
    Label {
        /// Protein sequences (FASTA)
        #[arg(long)]
        fasta: Option<PathBuf>,

        /// Feature dataset (JSON)
        #[arg(long)]
        features: PathBuf,
    },

    /// Load a dataset into a SQLite feature store
    Import {
        /// SQLite database file, created if missing
        #[arg(long)]
        db: PathBuf,

        /// Feature dataset (JSON)
        #[arg(long)]
        features: PathBuf,

        /// Protein sequences (FASTA)
        #[arg(long)]
        fasta: Option<PathBuf>,
    },

    /// Label features held in a SQLite feature store
    LabelDb {
        /// SQLite database file
        #[arg(long)]
        db: PathBuf,

        /// Only label this feature
        #[arg(long)]
        feature: Option<String>,
    },

    /// Parse a short label into its fragments
    Parse {
        /// Short label, e.g. 'Ala1_Leu2delinsValLeu'
        label: String,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    // stdout carries results, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = load_config(cli.config.as_ref())?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Label { fasta, features } => {
            commands::label::run(&config, fasta.as_deref(), &features, cli.json_events)
        }
        Commands::Import {
            db,
            features,
            fasta,
        } => commands::store::import(&db, &features, fasta.as_deref()),
        Commands::LabelDb { db, feature } => {
            commands::store::label(&config, &db, feature.as_deref(), cli.json_events)
        }
        Commands::Parse { label } => commands::parse::run(&label),
    }
}
