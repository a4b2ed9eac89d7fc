use std::fmt;

use serde::{Deserialize, Serialize};

/// A base catalog entry, expanded into one export row per combination of
/// its option values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Base code with the variant suffix stripped, e.g. `"BED-100"`.
    pub code: String,
    pub basic_rate: i64,
    pub compare_rate: i64,
    /// Ordered options; position `n` maps onto the `Option{n}` columns.
    pub options: Vec<ProductOption>,
    /// Attributes copied verbatim from the product's first-variant row.
    pub pass_through: Vec<PassThrough>,
}

impl Product {
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Number of combinations this product expands into (the product of all
    /// option value counts), or `None` if that overflows `usize`.
    #[must_use]
    pub fn combination_count(&self) -> Option<usize> {
        self.options
            .iter()
            .try_fold(1usize, |acc, o| acc.checked_mul(o.values.len()))
    }
}

/// A named axis of variation, e.g. `Color`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    /// 1-based position within the product.
    pub position: usize,
    pub values: Vec<OptionValue>,
}

impl ProductOption {
    /// Output column holding this option's name, e.g. `"Option1 Name"`.
    #[must_use]
    pub fn name_alias(&self, prefix: &str) -> String {
        option_name_column(prefix, self.position)
    }

    /// Output column holding the selected value, e.g. `"Option1 Value"`.
    #[must_use]
    pub fn value_alias(&self, prefix: &str) -> String {
        option_value_column(prefix, self.position)
    }
}

#[must_use]
pub fn option_name_column(prefix: &str, position: usize) -> String {
    format!("{prefix}{position} Name")
}

#[must_use]
pub fn option_value_column(prefix: &str, position: usize) -> String {
    format!("{prefix}{position} Value")
}

/// One concrete choice for a [`ProductOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Display text with the `(+N)` annotation removed.
    pub label: String,
    /// Amount added to the base and compare prices when selected.
    pub additional_rate: i64,
}

/// A product-level attribute copied into every generated row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassThrough {
    pub column: String,
    pub value: CellValue,
}

/// A scalar cell copied from the canonical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCell", into = "RawCell")]
pub enum CellValue {
    Int(i64),
    Text(String),
    Empty,
}

/// Wire shape of [`CellValue`]: ints as JSON numbers, everything else as
/// strings, with `Empty` written as `""` to match the CSV output.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Int(i64),
    Text(String),
}

impl From<RawCell> for CellValue {
    fn from(raw: RawCell) -> Self {
        match raw {
            RawCell::Int(n) => CellValue::Int(n),
            RawCell::Text(s) if s.is_empty() => CellValue::Empty,
            RawCell::Text(s) => CellValue::Text(s),
        }
    }
}

impl From<CellValue> for RawCell {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Int(n) => RawCell::Int(n),
            CellValue::Text(s) => RawCell::Text(s),
            CellValue::Empty => RawCell::Text(String::new()),
        }
    }
}

impl CellValue {
    /// Coerces raw cell text: purely numeric text becomes [`CellValue::Int`],
    /// blank text becomes [`CellValue::Empty`], everything else is kept as
    /// trimmed text. Never fails.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<i64>() {
            Ok(n) => CellValue::Int(n),
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
        }
    }
}
