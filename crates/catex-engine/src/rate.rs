//! Splits an option value's display text into its label and surcharge.

use std::sync::LazyLock;

use catex_core::OptionValue;
use regex::Regex;

static SURCHARGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+(\d+)").expect("valid surcharge regex"));

/// Extracts the `+N` surcharge from a raw value such as `"Queen (+150)"`.
///
/// The first `+<digits>` in the text is the surcharge. Every parenthesised
/// `(+<digits>)` occurrence of it is removed from the label, which is then
/// trimmed. Text without a surcharge (or with one too large for `i64`) keeps
/// a rate of `0` and its trimmed text as the label.
#[must_use]
pub fn extract_rate(raw: &str) -> OptionValue {
    let Some(captures) = SURCHARGE.captures(raw) else {
        return unpriced(raw);
    };
    let digits = &captures[1];
    let Ok(additional_rate) = digits.parse::<i64>() else {
        return unpriced(raw);
    };

    let label = raw.replace(&format!("(+{digits})"), "").trim().to_string();

    OptionValue {
        label,
        additional_rate,
    }
}

fn unpriced(raw: &str) -> OptionValue {
    OptionValue {
        label: raw.trim().to_string(),
        additional_rate: 0,
    }
}
