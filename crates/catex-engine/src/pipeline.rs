//! Batch orchestration for catalog expansion.

use catex_core::{ExportProfile, Product};
use rayon::prelude::*;
use serde::Serialize;

use crate::assemble::{assemble_product, CanonicalIndex};
use crate::catalog::{base_codes, OptionsCatalog};
use crate::error::EngineError;
use crate::options::parse_option_block;
use crate::rows::build_product_rows;
use crate::schema::{reconcile_schema, OutputSchema};
use crate::table::Table;

/// Default stock spread across each product's combinations.
pub const DEFAULT_TOTAL_STOCK: u32 = 1000;

/// Tunables for one expansion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandSettings {
    pub total_stock: u32,
    /// Threads used to build rows; `1` keeps the run on the calling thread.
    pub workers: usize,
}

impl Default for ExpandSettings {
    fn default() -> Self {
        Self {
            total_stock: DEFAULT_TOTAL_STOCK,
            workers: 1,
        }
    }
}

/// Result of a completed batch.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub schema: OutputSchema,
    /// Assembled records in canonical-table order.
    pub products: Vec<Product>,
    /// Export rows; each row is laid out per `schema.columns`.
    pub rows: Vec<Vec<String>>,
}

impl Expansion {
    /// Intermediate records in the `{"data": [...]}` shape used for inspection.
    #[must_use]
    pub fn record_dump(&self) -> RecordDump<'_> {
        RecordDump {
            data: &self.products,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordDump<'a> {
    pub data: &'a [Product],
}

/// Parses and assembles every product in the batch without building rows.
///
/// # Errors
///
/// Returns the first [`EngineError`] hit while enumerating codes, looking
/// up or parsing option blocks, or assembling records.
pub fn assemble_products(
    source: &Table,
    catalog: &Table,
    profile: &ExportProfile,
) -> Result<Vec<Product>, EngineError> {
    let codes = base_codes(source, profile)?;
    let options_catalog = OptionsCatalog::from_table(catalog, profile)?;
    let index = CanonicalIndex::from_table(source, profile)?;

    tracing::info!(
        products = codes.len(),
        catalog_entries = options_catalog.len(),
        "assembling product records"
    );

    codes
        .iter()
        .map(|code| {
            let block = options_catalog.options_for(code)?;
            let raw_options = parse_option_block(code, block)?;
            assemble_product(code, raw_options, &index, profile)
        })
        .collect()
}

/// Reconciled output schema for an already assembled batch.
///
/// # Errors
///
/// Returns [`EngineError::SchemaMismatch`] if the canonical header has no
/// option-column span.
pub fn batch_schema(
    source: &Table,
    products: &[Product],
    profile: &ExportProfile,
) -> Result<OutputSchema, EngineError> {
    let max_options = products
        .iter()
        .map(Product::option_count)
        .max()
        .unwrap_or(0);
    reconcile_schema(&source.headers, &profile.option_prefix, max_options)
}

/// Expands a whole batch: one export row per option combination of every
/// product in `source`, using option blocks from `catalog`.
///
/// Rows are grouped by product in canonical-table order, with combinations
/// in generation order inside each product. The order is the same whether
/// rows are built on one thread or on `settings.workers` threads.
///
/// # Errors
///
/// Returns the first [`EngineError`] from any stage; nothing partial is
/// returned. A schema mismatch is reported before any row is built.
pub fn expand_catalog(
    source: &Table,
    catalog: &Table,
    profile: &ExportProfile,
    settings: ExpandSettings,
) -> Result<Expansion, EngineError> {
    let products = assemble_products(source, catalog, profile)?;
    let schema = batch_schema(source, &products, profile)?;

    let build = |product: &Product| {
        build_product_rows(product, &schema, profile, settings.total_stock)
    };

    let per_product: Vec<Vec<Vec<String>>> = if settings.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.workers)
            .build()?;
        pool.install(|| {
            products
                .par_iter()
                .map(build)
                .collect::<Result<_, EngineError>>()
        })?
    } else {
        products
            .iter()
            .map(build)
            .collect::<Result<_, EngineError>>()?
    };

    let rows: Vec<Vec<String>> = per_product.into_iter().flatten().collect();

    tracing::info!(
        products = products.len(),
        rows = rows.len(),
        columns = schema.columns.len(),
        "catalog expansion complete"
    );

    Ok(Expansion {
        schema,
        products,
        rows,
    })
}
