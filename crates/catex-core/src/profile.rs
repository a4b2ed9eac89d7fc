use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Shopify product-CSV columns copied from a product's first variant into
/// every generated variant.
const SHOPIFY_PASS_THROUGH: &[&str] = &[
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Standardized Product Type",
    "Custom Product Type",
    "Tags",
    "Published",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Barcode",
    "Gift Card",
    "SEO Title",
    "SEO Description",
    "Google Shopping / Google Product Category",
    "Google Shopping / Gender",
    "Google Shopping / Age Group",
    "Google Shopping / MPN",
    "Google Shopping / AdWords Grouping",
    "Google Shopping / AdWords Labels",
    "Google Shopping / Condition",
    "Google Shopping / Custom Product",
    "Google Shopping / Custom Label 0",
    "Google Shopping / Custom Label 1",
    "Google Shopping / Custom Label 2",
    "Google Shopping / Custom Label 3",
    "Google Shopping / Custom Label 4",
    "Variant Image",
    "Variant Weight Unit",
    "Variant Tax Code",
    "Cost per item",
    "Status",
];

/// Column layout of the canonical table, the options catalog, and the export.
///
/// Every field has a Shopify default, so a profile file only needs to list
/// what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportProfile {
    /// Variant code column in the canonical table and the export.
    pub code_column: String,
    pub price_column: String,
    pub compare_price_column: String,
    pub inventory_column: String,
    /// Prefix shared by every option column, e.g. `"Option"` for `"Option1 Name"`.
    pub option_prefix: String,
    /// Text between the base code and the variant number, e.g. `"-"`.
    pub variant_separator: String,
    /// Zero-padded width of the variant number.
    pub variant_digits: usize,
    /// Base code column in the options catalog.
    pub catalog_code_column: String,
    /// Encoded option block column in the options catalog.
    pub catalog_options_column: String,
    pub pass_through: Vec<String>,
}

impl Default for ExportProfile {
    fn default() -> Self {
        Self {
            code_column: "Variant SKU".to_string(),
            price_column: "Variant Price".to_string(),
            compare_price_column: "Variant Compare At Price".to_string(),
            inventory_column: "Variant Inventory Qty".to_string(),
            option_prefix: "Option".to_string(),
            variant_separator: "-".to_string(),
            variant_digits: 2,
            catalog_code_column: "code (Variant SKU)".to_string(),
            catalog_options_column: "options".to_string(),
            pass_through: SHOPIFY_PASS_THROUGH
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
        }
    }
}

impl ExportProfile {
    /// Variant code for the 1-based sequence number `seq`, e.g. `"BED-100-03"`.
    #[must_use]
    pub fn variant_code(&self, base: &str, seq: usize) -> String {
        format!(
            "{base}{}{seq:0width$}",
            self.variant_separator,
            width = self.variant_digits
        )
    }

    /// Code of the canonical row that supplies a product's base data.
    #[must_use]
    pub fn first_variant_code(&self, base: &str) -> String {
        self.variant_code(base, 1)
    }

    /// Strips the separator and variant number from `code`.
    ///
    /// Returns `None` unless `code` ends in the separator followed by exactly
    /// `variant_digits` ASCII digits with a non-empty base before it.
    #[must_use]
    pub fn base_code<'a>(&self, code: &'a str) -> Option<&'a str> {
        let digits_start = code.len().checked_sub(self.variant_digits)?;
        let digits = code.get(digits_start..)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let base = code[..digits_start].strip_suffix(self.variant_separator.as_str())?;
        if base.is_empty() {
            None
        } else {
            Some(base)
        }
    }

    /// Columns the engine computes itself; these never come from pass-through.
    #[must_use]
    pub fn derived_columns(&self) -> [&str; 4] {
        [
            self.code_column.as_str(),
            self.price_column.as_str(),
            self.compare_price_column.as_str(),
            self.inventory_column.as_str(),
        ]
    }
}

/// Load and validate an export profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<ExportProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: ExportProfile = serde_yaml::from_str(&content)?;

    validate_profile(&profile)?;

    Ok(profile)
}

/// Checks a profile for settings that would make the export ambiguous.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] describing the first problem found.
pub fn validate_profile(profile: &ExportProfile) -> Result<(), ConfigError> {
    let named = [
        ("code_column", &profile.code_column),
        ("price_column", &profile.price_column),
        ("compare_price_column", &profile.compare_price_column),
        ("inventory_column", &profile.inventory_column),
        ("option_prefix", &profile.option_prefix),
        ("catalog_code_column", &profile.catalog_code_column),
        ("catalog_options_column", &profile.catalog_options_column),
    ];
    for (field, value) in named {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{field} must be non-empty")));
        }
    }

    if profile.variant_digits == 0 {
        return Err(ConfigError::Validation(
            "variant_digits must be at least 1".to_string(),
        ));
    }

    let derived = profile.derived_columns();
    let mut seen = HashSet::new();
    for column in &profile.pass_through {
        if column.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pass-through column names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(column.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate pass-through column: '{column}'"
            )));
        }
        if derived.contains(&column.as_str()) {
            return Err(ConfigError::Validation(format!(
                "pass-through column '{column}' is computed during expansion"
            )));
        }
        if column.starts_with(profile.option_prefix.as_str()) {
            return Err(ConfigError::Validation(format!(
                "pass-through column '{column}' overlaps the '{}' option columns",
                profile.option_prefix
            )));
        }
    }

    Ok(())
}
