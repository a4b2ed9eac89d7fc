use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("column \"{column}\" not found in {table} table")]
    MissingColumn { table: String, column: String },

    #[error("no options catalog entry for product {code}")]
    LookupFailure { code: String },

    #[error("options catalog lists product {code} more than once")]
    DuplicateCatalogEntry { code: String },

    #[error("canonical row {key} for product {code} not found")]
    MissingCanonicalRow { code: String, key: String },

    #[error("variant code \"{value}\" on row {row} has no well-formed variant suffix")]
    InvalidVariantCode { row: usize, value: String },

    #[error("malformed option line for product {code}: {line:?}")]
    MalformedOption { code: String, line: String },

    #[error("options block for product {code} declares no options")]
    EmptyOptionBlock { code: String },

    #[error("option \"{option}\" of product {code} lists value \"{label}\" more than once")]
    DuplicateValueLabel {
        code: String,
        option: String,
        label: String,
    },

    #[error("invalid {column} for product {code}: {value:?}")]
    InvalidPrice {
        code: String,
        column: String,
        value: String,
    },

    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },

    #[error("product {code} has no combinations to allocate inventory to")]
    NoCombinations { code: String },

    #[error("product {code} expands to more than {limit} combinations")]
    TooManyCombinations { code: String, limit: usize },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
