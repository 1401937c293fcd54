//! Site-Auditor main entry point
//!
//! This is the command-line interface for the Site-Auditor SEO crawler.

use anyhow::{bail, Context};
use clap::Parser;
use site_auditor::config::{load_config_with_hash, validate, Config};
use site_auditor::output::{handlers_for, print_statistics, write_all, SiteStatistics};
use site_auditor::run_audit;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Auditor: a polite single-site SEO crawler
///
/// Site-Auditor crawls one website breadth-first while respecting robots.txt,
/// extracts per-page SEO metrics, analyzes the internal link graph, and
/// writes a markdown summary plus an optional JSON export.
#[derive(Parser, Debug)]
#[command(name = "site-auditor")]
#[command(version)]
#[command(about = "A polite single-site SEO crawler", long_about = None)]
struct Cli {
    /// URL to start from (overrides the config's seed-url)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Maximum link depth from the seed
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Write the full report as JSON to this path
    #[arg(long, value_name = "PATH")]
    json: Option<String>,

    /// Write the markdown summary to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_audit(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_auditor=info,warn"),
            1 => EnvFilter::new("site_auditor=debug,info"),
            2 => EnvFilter::new("site_auditor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match (&cli.config, &cli.seed) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        (None, Some(seed)) => Config::for_seed(seed),
        (None, None) => bail!("either a SEED URL or --config FILE is required"),
    };

    if let Some(seed) = &cli.seed {
        config.crawler.seed_url = seed.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(summary) = &cli.summary {
        config.output.summary_path = summary.clone();
    }
    if let Some(json) = &cli.json {
        config.output.json_path = Some(json.clone());
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Site-Auditor Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.crawler.seed_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Frontier slack factor: {}",
        config.crawler.frontier_slack_factor
    );
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Load sitemap: {}", config.crawler.load_sitemap);
    println!("  Seed from sitemap: {}", config.crawler.seed_from_sitemap);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.user_agent);
    println!("  Robots token: {}", config.user_agent.robots_token);

    println!("\nOutput:");
    println!("  Summary: {}", config.output.summary_path);
    match &config.output.json_path {
        Some(path) => println!("  JSON: {}", path),
        None => println!("  JSON: (disabled)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main audit operation
async fn handle_audit(config: Config) -> anyhow::Result<()> {
    let handlers = handlers_for(&config.output);

    let report = run_audit(config).await.context("audit failed")?;

    let stats = SiteStatistics::from_report(&report);
    print_statistics(&stats);

    write_all(&handlers, &report).context("failed to write report")?;
    tracing::info!(
        "Audit of {} finished in {}s",
        report.domain,
        report.duration_secs()
    );

    Ok(())
}
