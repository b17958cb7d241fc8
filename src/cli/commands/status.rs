//! Status command implementation
//!
//! This module implements the `status` command: it reports how many documents
//! the source index holds and whether the destination collection exists,
//! without writing anything.

use crate::adapters::elasticsearch::models::reachable_documents;
use crate::adapters::elasticsearch::ElasticsearchSource;
use crate::adapters::qdrant::QdrantDestination;
use crate::adapters::traits::SourceReader;
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        println!("📊 Export Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let source = match ElasticsearchSource::new(&config.elasticsearch) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to create Elasticsearch client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let mut exit_code = 0;

        // A zero-size page returns only the total
        match source.fetch_page(0, 0).await {
            Ok(page) => {
                println!(
                    "  Source {} / {}: {} documents",
                    config.elasticsearch.base_url, config.elasticsearch.index, page.total_count
                );
                let reachable = reachable_documents(page.total_count);
                if reachable < page.total_count {
                    println!(
                        "  ⚠️  Only the first {reachable} documents can be paged with from/size; \
                         the export will abort past that offset"
                    );
                }
            }
            Err(e) => {
                println!("  ❌ Source unreachable: {e}");
                exit_code = 4;
            }
        }

        let destination = match QdrantDestination::new(&config.qdrant) {
            Ok(d) => d,
            Err(e) => {
                println!("  ❌ Failed to create Qdrant client: {e}");
                return Ok(4);
            }
        };

        match destination.collection_exists().await {
            Ok(true) => println!(
                "  Destination {} / {}: exists",
                config.qdrant.url,
                destination.collection_name()
            ),
            Ok(false) => println!(
                "  Destination {} / {}: not created yet",
                config.qdrant.url,
                destination.collection_name()
            ),
            Err(e) => {
                println!("  ❌ Destination unreachable: {e}");
                exit_code = 4;
            }
        }

        println!();
        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_status_missing_config() {
        let args = StatusArgs {};
        let code = args.execute("/nonexistent/embark.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
