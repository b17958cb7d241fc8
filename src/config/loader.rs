//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EmbarkConfig;
use super::secret::secret_string;
use crate::domain::errors::EmbarkError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`EmbarkConfig`]
/// 4. Applies environment variable overrides (`EMBARK_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`EmbarkError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use embark::config::loader::load_config;
///
/// let config = load_config("embark.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EmbarkConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EmbarkError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EmbarkError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: EmbarkConfig = toml::from_str(&contents)
        .map_err(|e| EmbarkError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        EmbarkError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied verbatim. All missing variables are reported in a
/// single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EmbarkError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut missing_vars: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            re.replace_all(line, |caps: &regex::Captures<'_>| {
                let var_name = &caps[1];
                match std::env::var(var_name) {
                    Ok(value) => value,
                    Err(_) => {
                        if !missing_vars.iter().any(|v| v == var_name) {
                            missing_vars.push(var_name.to_string());
                        }
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
        })
        .collect();

    if !missing_vars.is_empty() {
        return Err(EmbarkError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the `EMBARK_*` prefix
///
/// Variables follow the pattern `EMBARK_<SECTION>_<KEY>`, for example
/// `EMBARK_ELASTICSEARCH_BASE_URL` or `EMBARK_EXPORT_PAGE_SIZE`. Values that
/// fail to parse are ignored.
fn apply_env_overrides(config: &mut EmbarkConfig) {
    fn var(name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
        var(name).and_then(|v| v.parse().ok())
    }

    if let Some(val) = var("EMBARK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Elasticsearch overrides
    if let Some(val) = var("EMBARK_ELASTICSEARCH_BASE_URL") {
        config.elasticsearch.base_url = val;
    }
    if let Some(val) = var("EMBARK_ELASTICSEARCH_INDEX") {
        config.elasticsearch.index = val;
    }
    if let Some(val) = var("EMBARK_ELASTICSEARCH_USERNAME") {
        config.elasticsearch.username = val;
    }
    if let Some(val) = var("EMBARK_ELASTICSEARCH_PASSWORD") {
        config.elasticsearch.password = secret_string(val);
    }
    if let Some(val) = parsed("EMBARK_ELASTICSEARCH_TLS_VERIFY") {
        config.elasticsearch.tls_verify = val;
    }
    if let Some(val) = parsed("EMBARK_ELASTICSEARCH_TIMEOUT_SECONDS") {
        config.elasticsearch.timeout_seconds = val;
    }

    // Qdrant overrides
    if let Some(val) = var("EMBARK_QDRANT_URL") {
        config.qdrant.url = val;
    }
    if let Some(val) = var("EMBARK_QDRANT_API_KEY") {
        config.qdrant.api_key = Some(secret_string(val));
    }
    if let Some(val) = var("EMBARK_QDRANT_COLLECTION_NAME") {
        config.qdrant.collection_name = val;
    }
    if let Some(val) = parsed("EMBARK_QDRANT_VECTOR_SIZE") {
        config.qdrant.vector_size = val;
    }

    // Export overrides
    if let Some(val) = parsed("EMBARK_EXPORT_PAGE_SIZE") {
        config.export.page_size = val;
    }
    if let Some(val) = parsed("EMBARK_EXPORT_MAX_CONSECUTIVE_FETCH_ERRORS") {
        config.export.max_consecutive_fetch_errors = val;
    }
    if let Some(val) = parsed("EMBARK_EXPORT_BATCH_PAUSE_MS") {
        config.export.batch_pause_ms = val;
    }
    if let Some(val) = parsed("EMBARK_EXPORT_UPSERT_CONCURRENCY") {
        config.export.upsert_concurrency = val;
    }
    if let Some(val) = parsed("EMBARK_EXPORT_DRY_RUN") {
        config.export.dry_run = val;
    }

    // Logging overrides
    if let Some(val) = parsed("EMBARK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val;
    }
    if let Some(val) = var("EMBARK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("EMBARK_UNIT_SUBST_VAR", "test_value");
        let input = "password = \"${EMBARK_UNIT_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"");
        std::env::remove_var("EMBARK_UNIT_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("EMBARK_UNIT_MISSING_A");
        std::env::remove_var("EMBARK_UNIT_MISSING_B");
        let input = "a = \"${EMBARK_UNIT_MISSING_A}\"\nb = \"${EMBARK_UNIT_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("EMBARK_UNIT_MISSING_A"));
        assert!(err.contains("EMBARK_UNIT_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("EMBARK_UNIT_COMMENTED");
        let input = "# password = \"${EMBARK_UNIT_COMMENTED}\"\nkey = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${EMBARK_UNIT_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-embark.toml");
        assert!(matches!(result, Err(EmbarkError::Configuration(_))));
    }

    #[test]
    fn test_load_config_minimal() {
        let toml_content = r#"
[elasticsearch]
base_url = "https://elastic:9200"
index = "documents"
username = "elastic"
password = "changeme"

[qdrant]
collection_name = "documents"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.elasticsearch.index, "documents");
        assert_eq!(config.elasticsearch.text_field, "text");
        assert_eq!(config.qdrant.vector_size, 1536);
        assert_eq!(config.export.page_size, 1000);
    }
}
