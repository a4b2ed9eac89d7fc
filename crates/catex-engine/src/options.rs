//! Parser for the quote-delimited option blocks stored in the options catalog.
//!
//! One block holds every option of a product, one option per line:
//!
//! ```text
//! "Color" "Red" "Blue (+50)"
//! "Size" "Queen" "King (+200)"
//! ```
//!
//! The first quoted token on a line is the option name and the rest are its
//! values, still carrying any `(+N)` surcharge. Surcharges are split off later
//! by [`crate::rate::extract_rate`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::EngineError;

/// Separator between two quoted tokens: a closing quote, whitespace, and an
/// opening quote.
static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""\s+""#).expect("valid token separator regex"));

/// One option line, before value surcharges are extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawOption {
    pub name: String,
    pub raw_values: Vec<String>,
}

/// Parses a product's option block into its options, in line order.
///
/// Blank lines are skipped and Windows line endings are tolerated.
///
/// # Errors
///
/// - [`EngineError::MalformedOption`] when a line has no name or no values.
/// - [`EngineError::EmptyOptionBlock`] when the block has no option lines.
pub fn parse_option_block(code: &str, block: &str) -> Result<Vec<RawOption>, EngineError> {
    let options = block
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_option_line(code, line))
        .collect::<Result<Vec<_>, _>>()?;

    if options.is_empty() {
        return Err(EngineError::EmptyOptionBlock {
            code: code.to_string(),
        });
    }

    Ok(options)
}

fn parse_option_line(code: &str, line: &str) -> Result<RawOption, EngineError> {
    let malformed = || EngineError::MalformedOption {
        code: code.to_string(),
        line: line.to_string(),
    };

    let mut tokens = TOKEN_SEPARATOR
        .split(line.trim())
        .map(|token| token.replace('"', "").trim().to_string());

    let name = tokens.next().filter(|n| !n.is_empty()).ok_or_else(malformed)?;
    let raw_values: Vec<String> = tokens.collect();

    if raw_values.is_empty() || raw_values.iter().any(String::is_empty) {
        return Err(malformed());
    }

    Ok(RawOption { name, raw_values })
}
