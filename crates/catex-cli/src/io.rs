//! CSV table I/O and output file placement.
//!
//! Every output file is written to a `.tmp` sibling first and renamed into
//! place, so a failed run leaves the previous output (or nothing) behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use catex_engine::Table;
use serde::Serialize;

/// Input CSV for one batch plus the name its outputs are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BatchInput {
    pub name: String,
    pub path: PathBuf,
}

/// Resolves `batch` to an input file: `batch` itself when it names an
/// existing file, otherwise `<input_dir>/<batch>.csv`.
pub(crate) fn resolve_batch(input_dir: &Path, batch: &str) -> anyhow::Result<BatchInput> {
    let direct = Path::new(batch);
    let path = if direct.is_file() {
        direct.to_path_buf()
    } else {
        input_dir.join(format!("{batch}.csv"))
    };

    if !path.is_file() {
        anyhow::bail!("batch '{batch}' not found: {} does not exist", path.display());
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(batch)
        .to_string();

    Ok(BatchInput { name, path })
}

pub(crate) fn expanded_output_path(output_dir: &Path, batch: &str) -> PathBuf {
    output_dir.join(format!("{batch}_from_catalog.csv"))
}

pub(crate) fn record_dump_path(output_dir: &Path, batch: &str) -> PathBuf {
    output_dir.join(format!("{batch}_records.json"))
}

/// Reads a headed CSV file into a [`Table`]. Rows may be shorter or longer
/// than the header.
pub(crate) fn read_table(name: &str, path: &Path) -> anyhow::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {name} table {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // +2: 1-based, after the header line.
        let record = record.with_context(|| {
            format!("failed to parse row {} of {}", idx + 2, path.display())
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(
        table = name,
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "loaded table"
    );

    Ok(Table::new(name, headers, rows))
}

/// Writes `columns` as the header followed by `rows`.
pub(crate) fn write_table(
    path: &Path,
    columns: &[String],
    rows: &[Vec<String>],
) -> anyhow::Result<()> {
    write_atomically(path, |out| {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    })
}

/// Writes `value` as pretty-printed JSON.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    write_atomically(path, |out| {
        serde_json::to_writer_pretty(&mut *out, value)?;
        out.write_all(b"\n")?;
        Ok(())
    })
}

pub(crate) fn ensure_output_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

fn write_atomically<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    let tmp = tmp_path(path);
    if let Err(err) = write_file(&tmp, write) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::debug!(path = %tmp.display(), error = %cleanup, "temporary file not removed");
        }
        return Err(err);
    }

    fs::rename(&tmp, path).with_context(|| {
        format!(
            "failed to move {} into place at {}",
            tmp.display(),
            path.display()
        )
    })
}

fn write_file<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "io_test.rs"]
mod tests;
