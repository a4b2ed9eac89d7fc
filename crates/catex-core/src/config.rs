use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("CATEX_LOG_LEVEL", "info");
    let input_dir = PathBuf::from(or_default("CATEX_INPUT_DIR", "./input"));
    let catalog_path = PathBuf::from(or_default("CATEX_CATALOG_PATH", "./static/catalog.csv"));
    let output_dir = PathBuf::from(or_default("CATEX_OUTPUT_DIR", "./output"));
    let profile_path = lookup("CATEX_PROFILE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let total_stock = parse_u32("CATEX_TOTAL_STOCK", "1000")?;
    if total_stock == 0 {
        return Err(invalid("CATEX_TOTAL_STOCK", "must be greater than 0".into()));
    }

    let workers = parse_usize("CATEX_WORKERS", "1")?;
    if workers == 0 {
        return Err(invalid("CATEX_WORKERS", "must be at least 1".into()));
    }

    Ok(AppConfig {
        log_level,
        input_dir,
        catalog_path,
        output_dir,
        profile_path,
        total_stock,
        workers,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
