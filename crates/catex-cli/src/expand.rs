//! Command handlers for `expand`, `inspect`, and `schema`.
//!
//! Each handler loads the batch, the options catalog, and the export profile
//! up front, then hands the in-memory tables to `catex_engine`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use catex_core::{AppConfig, ExportProfile};
use catex_engine::{ExpandSettings, Table};

use crate::io;

/// Input overrides shared by every batch command.
#[derive(Debug, Clone, Default)]
pub(crate) struct SourceOverrides {
    pub catalog: Option<PathBuf>,
    pub profile: Option<PathBuf>,
}

/// Output and tuning overrides for `expand`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpandOverrides {
    pub output_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub total_stock: Option<u32>,
    pub dump_json: bool,
    pub dry_run: bool,
}

/// Everything a batch command needs, loaded from disk.
#[derive(Debug)]
pub(crate) struct LoadedBatch {
    pub name: String,
    pub source: Table,
    pub catalog: Table,
    pub profile: ExportProfile,
}

pub(crate) fn load_batch(
    config: &AppConfig,
    batch: &str,
    sources: &SourceOverrides,
) -> anyhow::Result<LoadedBatch> {
    let input = io::resolve_batch(&config.input_dir, batch)?;
    let catalog_path = sources.catalog.as_deref().unwrap_or(config.catalog_path.as_path());

    let profile = match sources.profile.as_deref().or(config.profile_path.as_deref()) {
        Some(path) => catex_core::load_profile(path)
            .with_context(|| format!("failed to load export profile {}", path.display()))?,
        None => ExportProfile::default(),
    };

    let source = io::read_table("canonical", &input.path)?;
    let catalog = io::read_table("catalog", catalog_path)?;

    tracing::info!(
        batch = %input.name,
        source = %input.path.display(),
        catalog = %catalog_path.display(),
        "loaded batch inputs"
    );

    Ok(LoadedBatch {
        name: input.name,
        source,
        catalog,
        profile,
    })
}

/// Expand a batch and write `<batch>_from_catalog.csv` (and optionally
/// `<batch>_records.json`) to the output directory.
///
/// When `dry_run` is `true` the batch is fully expanded and the counts are
/// logged, but nothing is written.
///
/// # Errors
///
/// Returns an error if any input cannot be read, the expansion fails, or an
/// output file cannot be written. No output is written when expansion fails.
pub(crate) fn run_expand(
    config: &AppConfig,
    batch: &str,
    sources: &SourceOverrides,
    overrides: &ExpandOverrides,
) -> anyhow::Result<()> {
    let settings = ExpandSettings {
        total_stock: overrides.total_stock.unwrap_or(config.total_stock),
        workers: overrides.workers.unwrap_or(config.workers),
    };
    anyhow::ensure!(settings.total_stock > 0, "--total-stock must be greater than 0");
    anyhow::ensure!(settings.workers > 0, "--workers must be at least 1");

    let loaded = load_batch(config, batch, sources)?;
    let expansion =
        catex_engine::expand_catalog(&loaded.source, &loaded.catalog, &loaded.profile, settings)
            .with_context(|| format!("failed to expand batch '{}'", loaded.name))?;

    if overrides.dry_run {
        println!(
            "[dry-run] {}: {} products -> {} rows x {} columns",
            loaded.name,
            expansion.products.len(),
            expansion.rows.len(),
            expansion.schema.columns.len()
        );
        return Ok(());
    }

    let output_dir: &Path = overrides
        .output_dir
        .as_deref()
        .unwrap_or(config.output_dir.as_path());
    io::ensure_output_dir(output_dir)?;

    let output = io::expanded_output_path(output_dir, &loaded.name);
    io::write_table(&output, &expansion.schema.columns, &expansion.rows)?;
    tracing::info!(path = %output.display(), rows = expansion.rows.len(), "wrote expanded batch");

    if overrides.dump_json {
        let dump = io::record_dump_path(output_dir, &loaded.name);
        io::write_json(&dump, &expansion.record_dump())?;
        tracing::info!(path = %dump.display(), "wrote record dump");
    }

    Ok(())
}

/// Print the intermediate product records as `{"data": [...]}` JSON.
///
/// # Errors
///
/// Returns an error if any input cannot be read or a product fails to
/// assemble.
pub(crate) fn run_inspect(
    config: &AppConfig,
    batch: &str,
    sources: &SourceOverrides,
) -> anyhow::Result<()> {
    let loaded = load_batch(config, batch, sources)?;
    let products =
        catex_engine::assemble_products(&loaded.source, &loaded.catalog, &loaded.profile)
            .with_context(|| format!("failed to assemble batch '{}'", loaded.name))?;

    let dump = catex_engine::RecordDump { data: &products };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

/// Print the reconciled output header, one column per line.
///
/// # Errors
///
/// Returns an error if any input cannot be read, a product fails to
/// assemble, or the canonical header has no option-column span.
pub(crate) fn run_schema(
    config: &AppConfig,
    batch: &str,
    sources: &SourceOverrides,
) -> anyhow::Result<()> {
    let loaded = load_batch(config, batch, sources)?;
    let products =
        catex_engine::assemble_products(&loaded.source, &loaded.catalog, &loaded.profile)
            .with_context(|| format!("failed to assemble batch '{}'", loaded.name))?;
    let schema = catex_engine::batch_schema(&loaded.source, &products, &loaded.profile)?;

    for column in &schema.columns {
        println!("{column}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "expand_test.rs"]
mod tests;
