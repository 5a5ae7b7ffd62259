use anyhow::{Context, Result};
use clap::Parser;
use repo_render::config::Config;
use repo_render::pipeline::{Checkout, render_checkout};
use repo_render::render::PlainHighlighter;
use repo_render::repo::{sanitize_filename, truncate_commit};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Render a repository checkout into a single HTML page
#[derive(Debug, Parser)]
#[command(name = "repo-render", version, long_version = LONG_VERSION)]
struct Cli {
    /// Checkout directory to render
    path: PathBuf,

    /// Repository URL shown in the page header
    #[arg(long)]
    repo_url: Option<String>,

    /// Commit identifier; read from the checkout's git HEAD when omitted
    #[arg(long)]
    commit: Option<String>,

    /// Skip files larger than this many bytes (overrides REPO_RENDER_MAX_BYTES)
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Configuration file (defaults to the platform config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTML output file (defaults to <dirname>.html)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also write the flattened LLM view to this file
    #[arg(long)]
    flat_out: Option<PathBuf>,

    /// Inspect files in parallel
    #[arg(long)]
    parallel: bool,

    /// Print statistics as JSON on stdout
    #[arg(long)]
    stats_json: bool,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };
    config.apply_env_overrides();
    if let Some(max_bytes) = cli.max_bytes {
        config.scan.max_bytes = max_bytes;
    }
    if cli.parallel {
        config.scan.parallel = true;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli).context("Failed to load configuration")?;

    let checkout = match &cli.commit {
        Some(commit) => Checkout::new(&cli.path, commit.clone()),
        None => Checkout::local(&cli.path),
    };

    let dir_name = cli
        .path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "repo".to_string());
    let repo_url = cli
        .repo_url
        .clone()
        .unwrap_or_else(|| cli.path.display().to_string());

    let rendered = render_checkout(&checkout, &repo_url, &config, &PlainHighlighter)
        .with_context(|| format!("Failed to render {}", cli.path.display()))?;

    let out = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.html", sanitize_filename(&dir_name))));
    std::fs::write(&out, &rendered.html)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Wrote {}", out.display());

    if let Some(flat_out) = &cli.flat_out {
        std::fs::write(flat_out, &rendered.flattened)
            .with_context(|| format!("Failed to write {}", flat_out.display()))?;
        tracing::info!("Wrote {}", flat_out.display());
    }

    if cli.stats_json {
        let summary = serde_json::json!({
            "repo_url": rendered.repo_url,
            "commit": truncate_commit(&rendered.commit),
            "rendered_at": rendered.rendered_at.to_rfc3339(),
            "stats": rendered.stats,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        tracing::info!(
            "{} files: {} rendered, {} skipped",
            rendered.stats.total_files,
            rendered.stats.included,
            rendered.stats.skipped
        );
    }

    Ok(())
}
