//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "embark.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Embark configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set EMBARK_ES_PASSWORD");
                println!("     - Set EMBARK_QDRANT_API_KEY (if your Qdrant requires one)");
                println!("  3. Validate configuration: embark validate-config");
                println!("  4. Check connectivity: embark status");
                println!("  5. Run export: embark export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Embark Configuration File
# Elasticsearch to Qdrant export tool

environment = "development"

[application]
log_level = "info"

[elasticsearch]
base_url = "http://localhost:9200"
index = "documents"
username = "elastic"
password = "${EMBARK_ES_PASSWORD}"

[qdrant]
url = "http://localhost:6334"
collection_name = "documents"
vector_size = 1536

[export]
page_size = 1000
"#
        .to_string()
    }

    /// Generate configuration with all options documented
    fn generate_config_with_examples() -> String {
        r#"# Embark Configuration File
# Elasticsearch to Qdrant export tool
#
# Any value can reference an environment variable as ${VAR_NAME}.
# Any value can also be overridden with EMBARK_<SECTION>_<KEY>,
# e.g. EMBARK_EXPORT_PAGE_SIZE=500.

# development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"

[elasticsearch]
base_url = "https://elasticsearch.example.com:9200"
index = "documents"
username = "elastic"
password = "${EMBARK_ES_PASSWORD}"

# Document fields holding the numeric point id and the text to embed
id_field = "id"
text_field = "text"

tls_verify = true
timeout_seconds = 10

[qdrant]
# gRPC endpoint
url = "http://localhost:6334"
# api_key = "${EMBARK_QDRANT_API_KEY}"
collection_name = "documents"

# Must match the embedding model output
vector_size = 1536
timeout_seconds = 30

[export]
# Documents per search request (from + size is limited to 10000 by default)
page_size = 1000

# Abort after this many failed page fetches in a row
max_consecutive_fetch_errors = 5

# Pause between pages and between fetch retries
batch_pause_ms = 10

# Upserts in flight within one page (1 = strictly sequential)
upsert_concurrency = 1

# Debug progress event every N records within a page
progress_log_interval = 100

# Fetch, decode and embed without writing to Qdrant
dry_run = false

[logging]
local_enabled = false
local_path = "/var/log/embark"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbarkConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "embark.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "embark.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        let parsed: EmbarkConfig = toml::from_str(&config).unwrap();
        assert_eq!(parsed.elasticsearch.index, "documents");
        assert_eq!(parsed.qdrant.vector_size, 1536);
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        let parsed: EmbarkConfig = toml::from_str(&config).unwrap();
        assert_eq!(parsed.export.max_consecutive_fetch_errors, 5);
        assert_eq!(parsed.elasticsearch.text_field, "text");
        assert!(parsed.qdrant.api_key.is_none());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("embark.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[qdrant]"));
    }
}
