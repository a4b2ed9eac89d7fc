pub mod assemble;
pub mod catalog;
pub mod combinations;
pub mod error;
pub mod inventory;
pub mod options;
pub mod pipeline;
pub mod rate;
pub mod rows;
pub mod schema;
pub mod table;

pub use assemble::{assemble_product, CanonicalIndex};
pub use catalog::{base_codes, OptionsCatalog};
pub use combinations::Combinations;
pub use error::EngineError;
pub use inventory::InventoryPlan;
pub use options::{parse_option_block, RawOption};
pub use pipeline::{
    assemble_products, batch_schema, expand_catalog, ExpandSettings, Expansion, RecordDump,
    DEFAULT_TOTAL_STOCK,
};
pub use rate::extract_rate;
pub use rows::{build_product_rows, MAX_COMBINATIONS_PER_PRODUCT};
pub use schema::{reconcile_schema, OutputSchema};
pub use table::Table;
