//! linkrank main entry point
//!
//! This is the command-line interface: crawl a site (or load a saved graph),
//! then optionally rank its pages and show its degree distribution.

use anyhow::Context;
use clap::Parser;
use linkrank::analysis::{degree_histogram, rank, PageRankConfig};
use linkrank::config::{load_seed_file, load_settings_or_default, Settings};
use linkrank::crawler::Crawler;
use linkrank::graph::WebGraph;
use linkrank::output::{
    graph_statistics, print_crawl_report, print_loglog, print_statistics, save_rankings,
};
use linkrank::storage::{load_graph, save_graph};
use linkrank::ConfigError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// linkrank: crawl a site's link graph and rank its pages
///
/// Either crawls from a seed file (--crawler, saving the graph to
/// --crawler_graph) or loads a saved graph (--input). The graph can then be
/// ranked with PageRank (--pagerank_values) and its degree distribution
/// shown on log-log axes (--loglogplot).
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version)]
#[command(about = "Crawl a site's link graph and rank its pages", long_about = None)]
struct Cli {
    /// Load a previously saved graph (GML) instead of crawling
    #[arg(long, value_name = "GRAPH")]
    input: Option<PathBuf>,

    /// Crawl using a seed file (budget, domain URL, seed URLs)
    #[arg(long, value_name = "SEED_FILE")]
    crawler: Option<PathBuf>,

    /// Where to save the crawled graph (required with --crawler)
    #[arg(long = "crawler_graph", value_name = "OUT_FILE")]
    crawler_graph: Option<PathBuf>,

    /// Compute PageRank and write "<URL> <rank>" lines to this file
    #[arg(long = "pagerank_values", value_name = "OUT_FILE")]
    pagerank_values: Option<PathBuf>,

    /// Show the degree distribution on log-log axes
    #[arg(long)]
    loglogplot: bool,

    /// Path to TOML settings file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Exiting after error: {:?}", e);
            println!("Error: {}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrank=info,warn"),
            1 => EnvFilter::new("linkrank=debug,info"),
            2 => EnvFilter::new("linkrank=trace,debug"),
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

/// Joins an error with the causes its own message does not already include
fn describe(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message = format!("{}: {}", message, cause);
        }
    }
    message
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_settings_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "loading settings from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    let graph = match (&cli.input, &cli.crawler) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::ConflictingArguments(
                "--input and --crawler cannot be used together".to_string(),
            )
            .into())
        }
        (Some(input), None) => handle_load(input, cli.quiet)?,
        (None, Some(seed_file)) => {
            let out = cli.crawler_graph.as_deref().ok_or_else(|| {
                ConfigError::MissingArgument(
                    "--crawler_graph <OUT_FILE> is required with --crawler".to_string(),
                )
            })?;
            handle_crawl(seed_file, out, &settings, cli.quiet).await?
        }
        (None, None) => {
            return Err(ConfigError::MissingArgument(
                "either --input <GRAPH> or --crawler <SEED_FILE> is required".to_string(),
            )
            .into())
        }
    };

    if let Some(path) = &cli.pagerank_values {
        handle_pagerank(&graph, path, &settings)?;
    }

    if cli.loglogplot {
        print_loglog(&degree_histogram(&graph));
    }

    Ok(())
}

/// Handles --input: loads a saved graph
fn handle_load(path: &Path, quiet: bool) -> anyhow::Result<WebGraph> {
    tracing::info!("Loading graph from: {}", path.display());
    let graph = load_graph(path)?;

    if !quiet {
        print_statistics(&graph_statistics(&graph));
    }
    Ok(graph)
}

/// Handles --crawler: crawls from the seed file and saves the graph
async fn handle_crawl(
    seed_path: &Path,
    out: &Path,
    settings: &Settings,
    quiet: bool,
) -> anyhow::Result<WebGraph> {
    let seed_file = load_seed_file(seed_path)?;
    tracing::info!(
        "Seed file {}: {} seeds, domain '{}' (from {}), budget {}",
        seed_path.display(),
        seed_file.seeds.len(),
        seed_file.domain,
        seed_file.domain_url,
        seed_file.max_nodes
    );

    let crawler = Crawler::from_settings(&settings.crawler)?;
    let outcome = crawler
        .run(&seed_file.seeds, &seed_file.domain, seed_file.max_nodes)
        .await?;

    if !quiet {
        print_crawl_report(&outcome.report);
    }

    save_graph(&outcome.graph, out)
        .with_context(|| format!("saving graph to {}", out.display()))?;
    Ok(outcome.graph)
}

/// Handles --pagerank_values: ranks the graph and writes the result file
fn handle_pagerank(graph: &WebGraph, path: &Path, settings: &Settings) -> anyhow::Result<()> {
    let config = PageRankConfig::from(&settings.pagerank);
    tracing::info!(
        "Ranking {} pages (damping {}, tolerance {:e}, max {} iterations)",
        graph.node_count(),
        config.damping_factor,
        config.tolerance,
        config.max_iterations
    );

    let ranking = rank(graph, &config)?;
    save_rankings(&ranking, path)
        .with_context(|| format!("writing ranks to {}", path.display()))?;
    Ok(())
}
