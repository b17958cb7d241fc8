//! Export command implementation
//!
//! This module implements the `export` command for exporting documents
//! from Elasticsearch into a Qdrant collection.

use super::exit_code_for;
use crate::config::{load_config, EmbarkConfig};
use crate::core::export::{ExportCoordinator, ExportOutcome, ExportSummary};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - fetch, decode and embed without writing to Qdrant
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of documents requested per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Override the destination collection name
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.export.dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No data will be written to Qdrant");
            println!();
        }

        if !self.yes && !config.export.dry_run {
            println!("Export Configuration:");
            println!(
                "  Source: {} (index {})",
                config.elasticsearch.base_url, config.elasticsearch.index
            );
            println!(
                "  Destination: {} (collection {})",
                config.qdrant.url, config.qdrant.collection_name
            );
            println!("  Vector size: {}", config.qdrant.vector_size);
            println!("  Page size: {}", config.export.page_size);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        tracing::info!("Creating export coordinator");
        let coordinator = match ExportCoordinator::from_config(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = coordinator.execute_export().await;
        print_summary(&summary);

        Ok(summary.exit_code())
    }

    fn apply_overrides(&self, config: &mut EmbarkConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.export.dry_run = true;
        }

        if let Some(page_size) = self.page_size {
            tracing::info!(page_size = page_size, "Overriding page size from CLI");
            config.export.page_size = page_size;
        }

        if let Some(ref collection) = self.collection {
            tracing::info!(collection = %collection, "Overriding collection from CLI");
            config.qdrant.collection_name = collection.clone();
        }
    }
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Processed: {}", summary.total_processed);
    println!("  Errors: {}", summary.total_errors);
    println!("  Pages: {}", summary.pages_fetched);
    println!("  Fetch failures: {}", summary.fetch_failures);
    if let Some(total) = summary.last_total_count {
        println!("  Source total: {total}");
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Write errors (first {}):", summary.errors.len().min(10));
        for error in summary.errors.iter().take(10) {
            println!("  - {error}");
        }
        if summary.total_errors > 10 {
            println!("  ... and {} more", summary.total_errors - 10);
        }
        println!();
    }

    match &summary.outcome {
        ExportOutcome::Completed if summary.total_errors == 0 => {
            println!("✅ Export completed successfully!");
        }
        ExportOutcome::Completed => println!("⚠️  Export completed with write errors"),
        ExportOutcome::Aborted(reason) => println!("❌ Export aborted: {reason}"),
        ExportOutcome::Interrupted => {
            println!("⚠️  Export interrupted gracefully.");
            println!("   Points already written are kept; re-running the export is safe.");
        }
    }
}
