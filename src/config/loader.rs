//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedexConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::MedexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedexConfig
/// 4. Applies environment variable overrides (MEDEX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, TOML parsing fails, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use medex::config::loader::load_config;
///
/// let config = load_config("medex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: MedexConfig = toml::from_str(&contents)
        .map_err(|e| MedexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config
        .validate()
        .map_err(|e| MedexError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MedexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the MEDEX_* prefix
///
/// Environment variables follow the pattern MEDEX_<SECTION>_<KEY>,
/// e.g. MEDEX_SOURCE_BASE_URL, MEDEX_WAREHOUSE_ACCESS_TOKEN.
fn apply_env_overrides(config: &mut MedexConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MEDEX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDEX_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Source overrides
    if let Ok(val) = std::env::var("MEDEX_SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("MEDEX_SOURCE_DATASET_ID") {
        config.source.dataset_id = val;
    }
    if let Ok(val) = std::env::var("MEDEX_SOURCE_STATES") {
        config.source.states = split_csv(&val);
    }
    if let Ok(val) = std::env::var("MEDEX_SOURCE_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.source.page_size = size;
        }
    }

    // Warehouse overrides
    if let Ok(val) = std::env::var("MEDEX_WAREHOUSE_PROJECT") {
        config.warehouse.project = val;
    }
    if let Ok(val) = std::env::var("MEDEX_WAREHOUSE_DATASET") {
        config.warehouse.dataset = val;
    }
    if let Ok(val) = std::env::var("MEDEX_WAREHOUSE_API_BASE_URL") {
        config.warehouse.api_base_url = val;
    }
    if let Ok(val) = std::env::var("MEDEX_WAREHOUSE_ACCESS_TOKEN") {
        config.warehouse.access_token = secret_string(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDEX_LOGGING_FILE_ENABLED") {
        config.logging.file_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDEX_LOGGING_FILE_PATH") {
        config.logging.file_path = val;
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
