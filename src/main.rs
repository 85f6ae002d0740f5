//! Article-Scout main entry point
//!
//! This is the command-line interface for the Article-Scout selector
//! discovery pipeline.

use anyhow::Context;
use article_scout::config::{load_config_with_hash, Config};
use article_scout::output::{to_json, write_markdown_summary, write_report};
use article_scout::refine::{ChatAdvisor, SelectorAdvisor};
use article_scout::url::{normalize_url, site_id};
use article_scout::{discover, ScoutError};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Article-Scout: CSS selector discovery for article sites
///
/// Article-Scout crawls a small, bounded part of a site, finds its article
/// pages, and proposes CSS selectors for article links, titles and bodies.
/// When an advisor is configured, the selectors are reviewed and validated
/// against the real pages.
#[derive(Parser, Debug)]
#[command(name = "article-scout")]
#[command(version = "1.0.0")]
#[command(about = "CSS selector discovery for article sites", long_about = None)]
struct Cli {
    /// Homepage of the site to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a markdown summary to a file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Skip the advisor even if one is configured
    #[arg(long)]
    no_advisor: bool,

    /// Validate config and show what would be done without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        return handle_dry_run(&cli, &config);
    }

    handle_discover(&cli, &config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("article_scout=info,warn"),
            1 => EnvFilter::new("article_scout=debug,info"),
            2 => EnvFilter::new("article_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the advisor if one is configured and its API key is available
fn build_advisor(cli: &Cli, config: &Config) -> Option<ChatAdvisor> {
    if cli.no_advisor {
        tracing::info!("Advisor disabled, using automatic detection only");
        return None;
    }

    let advisor_config = config.advisor.as_ref()?;
    match ChatAdvisor::from_config(advisor_config) {
        Ok(advisor) => {
            tracing::info!(
                "Advisor enabled: {} via {}",
                advisor.model(),
                advisor.base_url()
            );
            Some(advisor)
        }
        Err(e) => {
            tracing::warn!("Advisor not available: {}", e);
            tracing::warn!("Will use automatic detection only");
            None
        }
    }
}

/// Handles the --dry-run mode: validates input and shows the effective settings
fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let homepage = normalize_url(&cli.url).context("Invalid homepage URL")?;

    println!("=== Article-Scout Dry Run ===\n");

    println!("Target:");
    println!("  Homepage: {}", homepage);
    println!("  Site ID: {}", site_id(&homepage));

    println!("\nCrawler Configuration:");
    println!("  Homepage/section budget: {} pages", config.crawler.homepage_budget);
    println!("  Page ceiling: {} pages", config.crawler.max_pages);
    println!("  Article samples: {}", config.crawler.sample_articles);
    println!("  Sample pacing: {}ms", config.crawler.pacing_ms);

    println!("\nUser Agent:");
    println!("  Value: {}", config.user_agent.value);
    println!("  Timeout: {}s", config.user_agent.timeout_secs);

    println!("\nAdvisor:");
    match &config.advisor {
        Some(advisor) if !cli.no_advisor => {
            println!("  Model: {}", advisor.model);
            println!("  Base URL: {}", advisor.base_url);
            let key_present = std::env::var(&advisor.api_key_env).is_ok();
            println!(
                "  API key ({}): {}",
                advisor.api_key_env,
                if key_present { "present" } else { "missing" }
            );
        }
        Some(_) => println!("  Disabled (--no-advisor)"),
        None => println!("  Not configured"),
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main discovery operation
async fn handle_discover(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let advisor = build_advisor(cli, config);
    let advisor_ref = advisor.as_ref().map(|a| a as &dyn SelectorAdvisor);

    let report = match discover(&cli.url, config, advisor_ref).await {
        Ok(report) => report,
        Err(ScoutError::HomepageUnreachable { url }) => {
            tracing::error!("Homepage could not be fetched: {}", url);
            anyhow::bail!("homepage unreachable: {}", url);
        }
        Err(e) => {
            tracing::error!("Discovery failed: {}", e);
            return Err(e.into());
        }
    };

    match &cli.output {
        Some(path) => {
            write_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", to_json(&report)?),
    }

    if let Some(path) = &cli.summary {
        write_markdown_summary(&report, path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        tracing::info!("Summary written to {}", path.display());
    }

    Ok(())
}
