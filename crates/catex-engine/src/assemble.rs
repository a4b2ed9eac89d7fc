//! Assembly of typed [`Product`] records from the canonical table and the
//! parsed option blocks.
//!
//! Option parsing is delegated to [`crate::options`] and [`crate::rate`];
//! this module joins those results with the product's first-variant row.

use std::collections::{HashMap, HashSet};

use catex_core::{CellValue, ExportProfile, OptionValue, PassThrough, Product, ProductOption};

use crate::error::EngineError;
use crate::options::RawOption;
use crate::rate::extract_rate;
use crate::table::Table;

/// Canonical table rows indexed by their variant code. When a code repeats,
/// the first row wins.
#[derive(Debug)]
pub struct CanonicalIndex<'a> {
    table: &'a Table,
    rows: HashMap<&'a str, usize>,
}

impl<'a> CanonicalIndex<'a> {
    /// # Errors
    ///
    /// Returns [`EngineError::MissingColumn`] if the code column is absent.
    pub fn from_table(table: &'a Table, profile: &ExportProfile) -> Result<Self, EngineError> {
        let code_idx = table.require_column(&profile.code_column)?;
        let mut rows = HashMap::with_capacity(table.len());
        for row in 0..table.len() {
            let code = table.cell(row, code_idx).trim();
            if !code.is_empty() {
                rows.entry(code).or_insert(row);
            }
        }
        Ok(Self { table, rows })
    }

    #[must_use]
    pub fn row_of(&self, code: &str) -> Option<usize> {
        self.rows.get(code).copied()
    }

    #[must_use]
    pub fn table(&self) -> &'a Table {
        self.table
    }
}

/// Builds the [`Product`] for base `code` from its parsed options and its
/// first-variant canonical row.
///
/// # Errors
///
/// - [`EngineError::MissingCanonicalRow`] if `code` has no first-variant row.
/// - [`EngineError::MissingColumn`] if a price or pass-through column is absent.
/// - [`EngineError::InvalidPrice`] if a price is blank or not a number.
/// - [`EngineError::DuplicateValueLabel`] if an option repeats a value label.
pub fn assemble_product(
    code: &str,
    raw_options: Vec<RawOption>,
    index: &CanonicalIndex<'_>,
    profile: &ExportProfile,
) -> Result<Product, EngineError> {
    let key = profile.first_variant_code(code);
    let row = index
        .row_of(&key)
        .ok_or_else(|| EngineError::MissingCanonicalRow {
            code: code.to_string(),
            key: key.clone(),
        })?;
    let table = index.table();

    let rate_of = |column: &str| -> Result<i64, EngineError> {
        let raw = table.cell(row, table.require_column(column)?);
        parse_rate(raw).ok_or_else(|| EngineError::InvalidPrice {
            code: code.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
        })
    };
    let basic_rate = rate_of(profile.price_column.as_str())?;
    let compare_rate = rate_of(profile.compare_price_column.as_str())?;

    let pass_through = profile
        .pass_through
        .iter()
        .map(|column| {
            let idx = table.require_column(column)?;
            Ok(PassThrough {
                column: column.clone(),
                value: CellValue::coerce(table.cell(row, idx)),
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let options = raw_options
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| build_option(code, idx + 1, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        code: code.to_string(),
        basic_rate,
        compare_rate,
        options,
        pass_through,
    })
}

fn build_option(
    code: &str,
    position: usize,
    raw: RawOption,
) -> Result<ProductOption, EngineError> {
    let values: Vec<OptionValue> = raw.raw_values.iter().map(|v| extract_rate(v)).collect();

    let mut seen = HashSet::with_capacity(values.len());
    for value in &values {
        if !seen.insert(value.label.as_str()) {
            return Err(EngineError::DuplicateValueLabel {
                code: code.to_string(),
                option: raw.name,
                label: value.label.clone(),
            });
        }
    }

    Ok(ProductOption {
        name: raw.name,
        position,
        values,
    })
}

/// Parses a price cell as a whole number. Decimal prices are truncated toward
/// zero (`"500.00"` and `"500.99"` both read as `500`).
fn parse_rate(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = whole.strip_prefix(['-', '+']).unwrap_or(whole);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    whole.parse::<i64>().ok()
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod tests;
