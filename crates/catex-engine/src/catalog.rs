//! Lookups across the two input tables: which base products a batch holds,
//! and which option block belongs to each.

use std::collections::{HashMap, HashSet};

use catex_core::ExportProfile;

use crate::error::EngineError;
use crate::table::Table;

/// Options catalog indexed by base product code.
#[derive(Debug)]
pub struct OptionsCatalog<'a> {
    blocks: HashMap<&'a str, &'a str>,
}

impl<'a> OptionsCatalog<'a> {
    /// Indexes `table` by the profile's catalog code column. Rows with a
    /// blank code are ignored.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingColumn`] if the code or options column is absent.
    /// - [`EngineError::DuplicateCatalogEntry`] if a code appears twice.
    pub fn from_table(table: &'a Table, profile: &ExportProfile) -> Result<Self, EngineError> {
        let code_idx = table.require_column(&profile.catalog_code_column)?;
        let options_idx = table.require_column(&profile.catalog_options_column)?;

        let mut blocks = HashMap::with_capacity(table.len());
        for row in 0..table.len() {
            let code = table.cell(row, code_idx).trim();
            if code.is_empty() {
                continue;
            }
            if blocks.insert(code, table.cell(row, options_idx)).is_some() {
                return Err(EngineError::DuplicateCatalogEntry {
                    code: code.to_string(),
                });
            }
        }

        tracing::debug!(entries = blocks.len(), "indexed options catalog");
        Ok(Self { blocks })
    }

    /// Raw option block for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LookupFailure`] if the catalog has no entry.
    pub fn options_for(&self, code: &str) -> Result<&'a str, EngineError> {
        self.blocks
            .get(code)
            .copied()
            .ok_or_else(|| EngineError::LookupFailure {
                code: code.to_string(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Distinct base codes in the canonical table, in first-seen order.
///
/// Rows with a blank code (image-only continuation rows in a Shopify export)
/// are skipped.
///
/// # Errors
///
/// - [`EngineError::MissingColumn`] if the code column is absent.
/// - [`EngineError::InvalidVariantCode`] for a code without a variant suffix.
pub fn base_codes(source: &Table, profile: &ExportProfile) -> Result<Vec<String>, EngineError> {
    let code_idx = source.require_column(&profile.code_column)?;

    let mut seen = HashSet::new();
    let mut codes = Vec::new();
    for row in 0..source.len() {
        let value = source.cell(row, code_idx).trim();
        if value.is_empty() {
            tracing::debug!(row, "skipping row without a variant code");
            continue;
        }
        let base = profile
            .base_code(value)
            .ok_or_else(|| EngineError::InvalidVariantCode {
                row,
                value: value.to_string(),
            })?;
        if seen.insert(base) {
            codes.push(base.to_string());
        }
    }

    Ok(codes)
}
