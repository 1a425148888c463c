// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for the Myra benchmark results report.
//!
//! This crate provides the `myra-bench` command-line interface: it resolves
//! configuration (defaults, config file, environment, flags), sets up
//! logging and hands already-validated inputs to `myra-bench-report`.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use myra_bench_report::config::DEFAULT_RESULTS_FILE;
use myra_bench_report::{document, io, markdown, ReportConfig, ReportPaths, RunMetadata, UpdateRequest};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Myra benchmark report CLI.
#[derive(Parser, Debug)]
#[command(name = "myra-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Missing files are ignored.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge JMH results into the results document.
    ///
    /// Rewrites the latest run and summary regions and prepends the run to
    /// the history region. The document is only written if every region
    /// renders successfully.
    Update(UpdateArgs),

    /// Parse a results file and print the records.
    Parse {
        /// JMH results file. Defaults to the configured results file.
        #[arg(long, value_name = "FILE")]
        results_file: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Check that a document carries all region markers.
    Check {
        /// Results document.
        #[arg(long, value_name = "FILE")]
        doc_file: Option<PathBuf>,
    },
}

/// Output format for `parse`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON records.
    Json,
    /// The markdown summary table.
    Summary,
}

/// Arguments for `update`. Unset options fall back to configuration.
#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// JMH results file.
    #[arg(long, value_name = "FILE")]
    pub results_file: Option<PathBuf>,

    /// Results document to update.
    #[arg(long, value_name = "FILE")]
    pub doc_file: Option<PathBuf>,

    /// Command that produced the results, shown in the run heading.
    #[arg(long)]
    pub command: String,

    /// Host the benchmarks ran on.
    #[arg(long)]
    pub host: Option<String>,

    /// JVM identity.
    #[arg(long)]
    pub jvm: Option<String>,

    /// Warmup iterations.
    #[arg(long)]
    pub warmups: Option<u32>,

    /// Duration of one warmup iteration.
    #[arg(long)]
    pub warmup_time: Option<String>,

    /// Measurement iterations.
    #[arg(long)]
    pub measurements: Option<u32>,

    /// Duration of one measurement iteration.
    #[arg(long)]
    pub measurement_time: Option<String>,

    /// JMH forks.
    #[arg(long)]
    pub forks: Option<u32>,

    /// Free-text notes.
    #[arg(long)]
    pub notes: Option<String>,

    /// Run timestamp. Defaults to the current UTC time.
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Also write the parsed records as JSON.
    #[arg(long, value_name = "FILE")]
    pub json_out: Option<PathBuf>,

    /// Print the updated document instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateArgs {
    /// Layer these flags over the loaded configuration.
    pub fn resolve(&self, config: ReportConfig) -> (ReportPaths, RunMetadata) {
        let ReportConfig {
            mut paths,
            mut metadata,
        } = config;

        if let Some(p) = &self.results_file {
            paths.results_file = p.clone();
        }
        if let Some(p) = &self.doc_file {
            paths.doc_file = p.clone();
        }
        if self.json_out.is_some() {
            paths.json_out = self.json_out.clone();
        }

        metadata.command = self.command.clone();
        if let Some(v) = &self.host {
            metadata.host = v.clone();
        }
        if let Some(v) = &self.jvm {
            metadata.jvm = v.clone();
        }
        if let Some(v) = self.warmups {
            metadata.warmups = v;
        }
        if let Some(v) = &self.warmup_time {
            metadata.warmup_time = v.clone();
        }
        if let Some(v) = self.measurements {
            metadata.measurements = v;
        }
        if let Some(v) = &self.measurement_time {
            metadata.measurement_time = v.clone();
        }
        if let Some(v) = self.forks {
            metadata.forks = v;
        }
        if self.notes.is_some() {
            metadata.notes = self.notes.clone();
        }
        if let Some(v) = &self.timestamp {
            metadata.timestamp = v.clone();
        }

        (paths, metadata.with_default_timestamp())
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "myra_bench_report=debug,myra_bench_cli=debug"
    } else {
        "myra_bench_report=info,myra_bench_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI with the given arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

/// Execute an already-parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = ReportConfig::load(cli.config.as_deref()).context("loading configuration")?;
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Update(args) => {
            let (paths, metadata) = args.resolve(config);
            let request = UpdateRequest {
                paths: &paths,
                metadata: &metadata,
                dry_run: args.dry_run,
            };
            let update = myra_bench_report::run_update(&request).with_context(|| {
                format!(
                    "updating {} from {}",
                    paths.doc_file.display(),
                    paths.results_file.display()
                )
            })?;

            if args.dry_run {
                print!("{}", update.document);
            } else {
                println!(
                    "Updated {} with {} benchmark rows from {}.",
                    paths.doc_file.display(),
                    update.records.len(),
                    paths.results_file.display()
                );
            }
            Ok(())
        }
        Commands::Parse {
            results_file,
            format,
        } => {
            let results_file = results_file.unwrap_or(config.paths.results_file);
            let records = myra_bench_report::parse_file(&results_file)
                .with_context(|| format!("parsing {}", results_file.display()))?;
            info!(rows = records.len(), "Parsed results");

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Summary => println!("{}", markdown::render_summary(&records)),
            }
            Ok(())
        }
        Commands::Check { doc_file } => {
            let doc_file = doc_file.unwrap_or(config.paths.doc_file);
            let text = io::read_document(&doc_file)?;
            document::validate_markers(&text)
                .with_context(|| format!("checking {}", doc_file.display()))?;
            println!("{} has all report regions.", doc_file.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("myra-bench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_update_requires_command() {
        let result = Cli::try_parse_from(["myra-bench", "update"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_flags_override_config() {
        let cli = parse(&[
            "update",
            "--command",
            "./gradlew jmh",
            "--host",
            "bench-02",
            "--forks",
            "1",
            "--doc-file",
            "out.md",
            "--timestamp",
            "2025-01-01T00:00:00Z",
        ]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };

        let mut config = ReportConfig::default();
        config.metadata.jvm = "from config".to_string();
        config.metadata.host = "from config".to_string();

        let (paths, meta) = args.resolve(config);
        assert_eq!(paths.doc_file, PathBuf::from("out.md"));
        assert_eq!(paths.results_file, PathBuf::from(DEFAULT_RESULTS_FILE));
        assert_eq!(meta.command, "./gradlew jmh");
        assert_eq!(meta.host, "bench-02");
        assert_eq!(meta.jvm, "from config");
        assert_eq!(meta.forks, 1);
        assert_eq!(meta.warmups, 5);
        assert_eq!(meta.timestamp, "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_update_defaults_timestamp() {
        let cli = parse(&["update", "--command", "jmh"]);
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };
        let (_, meta) = args.resolve(ReportConfig::default());
        assert!(meta.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_parse_subcommand_format() {
        let cli = parse(&["parse", "--format", "summary", "--results-file", "r.txt"]);
        match cli.command {
            Commands::Parse {
                results_file,
                format,
            } => {
                assert_eq!(results_file, Some(PathBuf::from("r.txt")));
                assert_eq!(format, OutputFormat::Summary);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_results_file_falls_back_to_config() {
        let cli = parse(&["parse"]);
        assert!(matches!(
            cli.command,
            Commands::Parse {
                results_file: None,
                ..
            }
        ));

        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("configured.txt");
        std::fs::write(&results, "com.x.SbeBenchmark.decode a thrpt 5 1.0 ops/s\n").unwrap();
        let config_file = dir.path().join("bench.toml");
        std::fs::write(
            &config_file,
            format!("results_file = {:?}\n", results.display().to_string()),
        )
        .unwrap();

        let cli = parse(&["parse", "--config", config_file.to_str().unwrap()]);
        let outcome = execute(cli);
        assert!(outcome.is_ok(), "{outcome:?}");

        let absent = dir.path().join("absent.txt");
        let cli = parse(&[
            "parse",
            "--config",
            config_file.to_str().unwrap(),
            "--results-file",
            absent.to_str().unwrap(),
        ]);
        assert!(execute(cli).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["--verbose", "check", "--config", "custom.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
