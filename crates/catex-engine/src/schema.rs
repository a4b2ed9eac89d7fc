//! Output header derivation: the canonical header with its option-column
//! span resized to fit the batch's widest product.

use catex_core::{option_name_column, option_value_column};
use serde::Serialize;

use crate::error::EngineError;

/// Column layout of the expanded export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSchema {
    /// Every output column, in order.
    pub columns: Vec<String>,
    /// The synthetic `Option{i} Name` / `Option{i} Value` block, in order.
    pub option_columns: Vec<String>,
}

/// Replaces the span of `prefix`-named columns in `headers` with
/// `2 * max_options` alternating name/value columns. Columns before and after
/// the span keep their order.
///
/// # Errors
///
/// Returns [`EngineError::SchemaMismatch`] when no header starts with
/// `prefix`, or when the prefixed headers are not contiguous.
pub fn reconcile_schema(
    headers: &[String],
    prefix: &str,
    max_options: usize,
) -> Result<OutputSchema, EngineError> {
    let is_option = |h: &String| h.starts_with(prefix);

    let first = headers
        .iter()
        .position(is_option)
        .ok_or_else(|| EngineError::SchemaMismatch {
            reason: format!("no column starts with \"{prefix}\""),
        })?;
    // `first` exists, so `rposition` does too.
    let last = headers.iter().rposition(is_option).unwrap_or(first);

    if let Some(stray) = headers[first..=last].iter().find(|h| !h.starts_with(prefix)) {
        return Err(EngineError::SchemaMismatch {
            reason: format!("column \"{stray}\" splits the \"{prefix}\" column span"),
        });
    }

    let option_columns: Vec<String> = (1..=max_options)
        .flat_map(|i| [option_name_column(prefix, i), option_value_column(prefix, i)])
        .collect();

    let mut columns = Vec::with_capacity(headers.len() - (last - first + 1) + option_columns.len());
    columns.extend_from_slice(&headers[..first]);
    columns.extend(option_columns.iter().cloned());
    columns.extend_from_slice(&headers[last + 1..]);

    tracing::debug!(
        replaced = last - first + 1,
        inserted = option_columns.len(),
        total = columns.len(),
        "reconciled output schema"
    );

    Ok(OutputSchema {
        columns,
        option_columns,
    })
}
