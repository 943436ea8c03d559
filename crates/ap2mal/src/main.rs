//! ap2mal CLI application.

use anyhow::{Context, Result};
use ap2mal::{JikanClient, ListConverter, Resolver};
use clap::Parser;
use shared::Config;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Input list export (overrides config)
    #[arg(short, long)]
    input: Option<String>,

    /// Output import document (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Skip log for unmatched titles (overrides config)
    #[arg(long)]
    skip_log: Option<String>,

    /// Username written into the export header (overrides config)
    #[arg(short, long)]
    username: Option<String>,

    /// Pacing delay in milliseconds (overrides config)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Search attempts per title (overrides config)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Resolve everything but write no files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply command-line overrides
    if let Some(input) = args.input {
        config.files.input = input;
    }
    if let Some(output) = args.output {
        config.files.output = output;
    }
    if let Some(skip_log) = args.skip_log {
        config.files.skip_log = skip_log;
    }
    if let Some(username) = args.username {
        config.export.user_name = username;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.resolver.delay_ms = delay_ms;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.resolver.max_attempts = max_attempts;
    }

    // Initialize logging
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.logging.level()
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "ap2mal".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!("ap2mal starting");
    info!(config_file = %args.config.display(), "Loaded configuration");
    info!(
        input = %config.files.input,
        output = %config.files.output,
        delay_ms = config.resolver.delay_ms,
        max_attempts = config.resolver.max_attempts,
        "Runtime settings"
    );

    if args.dry_run {
        info!("Dry run enabled, no files will be written");
    }

    // Initialize API client and conversion pipeline
    let client = JikanClient::new(config.resolver.base_url.clone())
        .context("Failed to create Jikan client")?;
    let resolver = Resolver::new(client, config.resolver.delay(), config.resolver.max_attempts);
    let converter = ListConverter::new(resolver, config.export.user_name.clone(), args.dry_run);

    // Run conversion
    let stats = converter
        .convert_file(
            &config.input_path(),
            &config.output_path(),
            &config.skip_log_path(),
        )
        .await
        .context("Conversion failed")?;

    // Display final statistics
    info!("=== Conversion Complete ===");
    info!("Converted: {}", stats.converted);
    info!("Skipped: {}", stats.skipped);
    info!("Total entries: {}", stats.total);

    info!("ap2mal finished successfully");

    Ok(())
}
