mod expand;
mod io;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::expand::{ExpandOverrides, SourceOverrides};

#[derive(Debug, Parser)]
#[command(name = "catex")]
#[command(about = "Expand catalog option blocks into per-variant product rows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand a batch into one row per option combination
    Expand {
        /// Batch name under the input directory, or a path to a CSV file
        batch: String,
        /// Options catalog CSV (overrides `CATEX_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Export profile YAML (overrides `CATEX_PROFILE_PATH`)
        #[arg(long)]
        profile: Option<PathBuf>,
        /// Directory for generated files (overrides `CATEX_OUTPUT_DIR`)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Threads used to build rows (overrides `CATEX_WORKERS`)
        #[arg(long)]
        workers: Option<usize>,
        /// Stock split across each product's variants (overrides `CATEX_TOTAL_STOCK`)
        #[arg(long)]
        total_stock: Option<u32>,
        /// Also write the intermediate product records as JSON
        #[arg(long)]
        dump_json: bool,
        /// Expand and report counts without writing any files
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the intermediate product records as JSON
    Inspect {
        /// Batch name under the input directory, or a path to a CSV file
        batch: String,
        /// Options catalog CSV (overrides `CATEX_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Export profile YAML (overrides `CATEX_PROFILE_PATH`)
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Print the output header a batch would be expanded into
    Schema {
        /// Batch name under the input directory, or a path to a CSV file
        batch: String,
        /// Options catalog CSV (overrides `CATEX_CATALOG_PATH`)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Export profile YAML (overrides `CATEX_PROFILE_PATH`)
        #[arg(long)]
        profile: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Loads `.env` before reading the environment.
    let config = catex_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Expand {
            batch,
            catalog,
            profile,
            output_dir,
            workers,
            total_stock,
            dump_json,
            dry_run,
        } => {
            let sources = SourceOverrides { catalog, profile };
            let overrides = ExpandOverrides {
                output_dir,
                workers,
                total_stock,
                dump_json,
                dry_run,
            };
            expand::run_expand(&config, &batch, &sources, &overrides)?;
        }
        Commands::Inspect {
            batch,
            catalog,
            profile,
        } => {
            expand::run_inspect(&config, &batch, &SourceOverrides { catalog, profile })?;
        }
        Commands::Schema {
            batch,
            catalog,
            profile,
        } => {
            expand::run_schema(&config, &batch, &SourceOverrides { catalog, profile })?;
        }
    }

    Ok(())
}
