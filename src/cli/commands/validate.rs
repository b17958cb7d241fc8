//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Embark configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Credentials are never printed.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Elasticsearch URL: {}", config.elasticsearch.base_url);
        println!("  Elasticsearch Index: {}", config.elasticsearch.index);
        println!("  Elasticsearch User: {}", config.elasticsearch.username);
        println!(
            "  Fields: id = {}, text = {}",
            config.elasticsearch.id_field, config.elasticsearch.text_field
        );
        println!("  TLS Verify: {}", config.elasticsearch.tls_verify);
        println!("  Qdrant URL: {}", config.qdrant.url);
        println!(
            "  Qdrant API Key: {}",
            if config.qdrant.api_key.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        println!("  Collection: {}", config.qdrant.collection_name);
        println!("  Vector Size: {}", config.qdrant.vector_size);
        println!("  Page Size: {}", config.export.page_size);
        println!(
            "  Max Consecutive Fetch Errors: {}",
            config.export.max_consecutive_fetch_errors
        );
        println!("  Upsert Concurrency: {}", config.export.upsert_concurrency);
        println!("  Dry Run: {}", config.export.dry_run);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/embark.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[elasticsearch]
base_url = "http://localhost:9200"
index = "documents"
username = "elastic"
password = "changeme"

[qdrant]
collection_name = "documents"
"#
        )
        .unwrap();

        let args = ValidateArgs {};
        let code = args
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
