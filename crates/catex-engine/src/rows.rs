//! Row synthesis: one export row per combination of a product's option values.

use std::collections::HashMap;

use catex_core::{ExportProfile, Product};

use crate::combinations::Combinations;
use crate::error::EngineError;
use crate::inventory::InventoryPlan;
use crate::schema::OutputSchema;

/// Upper bound on the rows a single product may expand into.
pub const MAX_COMBINATIONS_PER_PRODUCT: usize = 1_000_000;

/// Builds every export row for `product`, in combination order, with cells
/// laid out per `schema.columns`.
///
/// Each row carries the sequential variant code, the option name/value
/// pairs, the surcharged price and compare price, its inventory share, and
/// the product's pass-through attributes. Option columns past this product's
/// option count, and any other column nothing populates, are left empty.
///
/// # Errors
///
/// - [`EngineError::NoCombinations`] if any option has no values.
/// - [`EngineError::TooManyCombinations`] if the product would expand into
///   more than [`MAX_COMBINATIONS_PER_PRODUCT`] rows.
pub fn build_product_rows(
    product: &Product,
    schema: &OutputSchema,
    profile: &ExportProfile,
    total_stock: u32,
) -> Result<Vec<Vec<String>>, EngineError> {
    let too_many = || EngineError::TooManyCombinations {
        code: product.code.clone(),
        limit: MAX_COMBINATIONS_PER_PRODUCT,
    };
    let count = product
        .combination_count()
        .filter(|&n| n <= MAX_COMBINATIONS_PER_PRODUCT)
        .ok_or_else(too_many)?;
    let plan = InventoryPlan::new(&product.code, total_stock, count)?;

    let sizes: Vec<usize> = product.options.iter().map(|o| o.values.len()).collect();
    let combinations = Combinations::new(&sizes).ok_or_else(too_many)?;

    // Option columns and pass-through values are identical across this
    // product's rows, so the aliases are resolved once.
    let aliases: Vec<(String, String)> = product
        .options
        .iter()
        .map(|o| (o.name_alias(&profile.option_prefix), o.value_alias(&profile.option_prefix)))
        .collect();
    let pass_through: Vec<(&str, String)> = product
        .pass_through
        .iter()
        .map(|p| (p.column.as_str(), p.value.to_string()))
        .collect();

    let mut rows = Vec::new();
    let mut next_milestone = 0.25_f64;

    for (index, combination) in combinations.enumerate() {
        let mut payload: HashMap<&str, String> = HashMap::with_capacity(schema.columns.len());
        payload.insert(
            profile.code_column.as_str(),
            profile.variant_code(&product.code, index + 1),
        );

        let mut extra_rate: i64 = 0;
        for ((option, (name_col, value_col)), &value_idx) in
            product.options.iter().zip(&aliases).zip(&combination)
        {
            let value = &option.values[value_idx];
            payload.insert(name_col.as_str(), option.name.clone());
            payload.insert(value_col.as_str(), value.label.clone());
            extra_rate = extra_rate.saturating_add(value.additional_rate);
        }

        payload.insert(
            profile.price_column.as_str(),
            product.basic_rate.saturating_add(extra_rate).to_string(),
        );
        payload.insert(
            profile.compare_price_column.as_str(),
            product.compare_rate.saturating_add(extra_rate).to_string(),
        );
        payload.insert(
            profile.inventory_column.as_str(),
            plan.quantity_at(index).to_string(),
        );

        for (column, value) in &pass_through {
            payload.insert(*column, value.clone());
        }

        rows.push(reindex(&mut payload, &schema.columns));

        #[allow(clippy::cast_precision_loss)]
        let progress = (index + 1) as f64 / count as f64;
        if progress >= next_milestone {
            tracing::debug!(
                code = %product.code,
                done = index + 1,
                total = count,
                "building variant rows ({:.0}%)",
                progress * 100.0
            );
            while next_milestone <= progress {
                next_milestone += 0.25;
            }
        }
    }

    Ok(rows)
}

/// Lays `payload` out in `columns` order. Columns without a value are empty
/// and payload keys outside `columns` are dropped.
fn reindex(payload: &mut HashMap<&str, String>, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| payload.remove(column.as_str()).unwrap_or_default())
        .collect()
}
