//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, InputArgs};
use crate::config::{load_dotenv, Settings};
use crate::error::Result;
use crate::projection::Projector;
use crate::source::load_dataset;
use crate::store::RestStore;
use crate::types::JsonValue;
use crate::upload::{BatchReport, UploadDriver, UploadOptions};
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Upload {
                input,
                batch_size,
                table,
                on_conflict,
                timeout_secs,
            } => {
                let options = UploadOptions::new()
                    .with_table(table)
                    .with_conflict_key(on_conflict)
                    .with_batch_size(*batch_size);
                self.upload(input, options, Duration::from_secs(*timeout_secs))
                    .await
            }
            Commands::Preview { input, limit } => self.preview(input, *limit),
        }
    }

    /// Load, connect and upload.
    ///
    /// Every fatal precondition (options, settings, input file) is checked
    /// before the first request is sent.
    async fn upload(
        &self,
        input: &InputArgs,
        options: UploadOptions,
        timeout: Duration,
    ) -> Result<()> {
        options.validate()?;
        load_dotenv(self.cli.env_file.as_deref())?;
        let settings = Settings::from_env()?;

        println!("Loading {}…", input.input.display());
        let dataset = load_dataset(&input.input)?;
        println!(
            "Loaded {} rows, {} columns\n",
            with_thousands(dataset.len()),
            dataset.column_count()
        );

        println!("Connecting to Supabase: {}", settings.endpoint_preview());
        let store = RestStore::new(&settings, timeout)?;
        let driver = UploadDriver::new(store, Projector::firms(), options)?;

        println!(
            "Uploading {} rows in {} batches of {}…\n",
            with_thousands(dataset.len()),
            driver.batch_count(dataset.len()),
            driver.options().batch_size
        );

        let summary = driver.run(&dataset.records, print_report).await;

        println!(
            "\n✅ Upload complete: {} rows succeeded, {} errors",
            with_thousands(summary.succeeded),
            with_thousands(summary.failed)
        );
        info!(
            file = %dataset.file_name(),
            batches = summary.batches,
            failed_batches = summary.failed_batches,
            duration_ms = summary.duration_ms,
            "Run finished"
        );

        Ok(())
    }

    /// Print the first `limit` projected rows
    fn preview(&self, input: &InputArgs, limit: usize) -> Result<()> {
        let dataset = load_dataset(&input.input)?;
        let shown = limit.min(dataset.len());

        let rows: Vec<JsonValue> = Projector::firms()
            .project_all(&dataset.records[..shown])
            .into_iter()
            .map(JsonValue::Object)
            .collect();

        println!("{}", serde_json::to_string_pretty(&rows)?);
        eprintln!(
            "Showing {shown} of {} rows from {}",
            with_thousands(dataset.len()),
            dataset.file_name()
        );
        Ok(())
    }
}

/// Print one progress line per batch
pub fn print_report(report: &BatchReport) {
    println!("  {report}");
}

/// Format a count with `,` thousands separators
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_parse_upload_defaults() {
        let cli = Cli::try_parse_from(["firm-upload", "upload"]).unwrap();
        match cli.command {
            Commands::Upload {
                input,
                batch_size,
                table,
                on_conflict,
                timeout_secs,
            } => {
                assert!(input.input.ends_with("merged/firms_master.parquet"));
                assert_eq!(batch_size, 500);
                assert_eq!(table, "firms");
                assert_eq!(on_conflict, "firm_id");
                assert_eq!(timeout_secs, 30);
            }
            other => panic!("Expected upload, got {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_preview_with_flags() {
        let cli = Cli::try_parse_from([
            "firm-upload",
            "preview",
            "--input",
            "/tmp/firms.parquet",
            "-n",
            "2",
            "--verbose",
        ])
        .unwrap();
        match cli.command {
            Commands::Preview { input, limit } => {
                assert_eq!(input.input.to_str(), Some("/tmp/firms.parquet"));
                assert_eq!(limit, 2);
            }
            other => panic!("Expected preview, got {other:?}"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_input_help_mentions_working_directory() {
        use clap::CommandFactory;

        let mut cmd = Cli::command();
        let help = cmd
            .find_subcommand_mut("upload")
            .unwrap()
            .render_long_help()
            .to_string();
        assert!(help.contains("current working directory"));
    }

    #[tokio::test]
    async fn test_upload_rejects_zero_batch_size_before_loading() {
        let cli = Cli::try_parse_from([
            "firm-upload",
            "upload",
            "--batch-size",
            "0",
            "--input",
            "/nonexistent/firms.parquet",
        ])
        .unwrap();

        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidConfigValue { ref field, .. } if field == "batch_size"
        ));
    }

    #[tokio::test]
    async fn test_preview_missing_input() {
        let cli = Cli::try_parse_from([
            "firm-upload",
            "preview",
            "--input",
            "/nonexistent/firms.parquet",
        ])
        .unwrap();

        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(matches!(err, crate::Error::InputNotFound { .. }));
    }
}
