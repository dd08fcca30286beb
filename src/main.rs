/// main.rs — Interactive entry point
///
/// Runs the performance-metrics calculator:
///   1. Load config from .env
///   2. Prompt for a ticker until Yahoo Finance resolves it
///   3. Prompt for a positive initial capital
///   4. Fetch the full daily closing-price history
///   5. Build the return/equity series, compute metrics, print the report
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use asset_metrics::config::AppConfig;
use asset_metrics::data::{MarketData, YahooClient};
use asset_metrics::input::{self, Validation};
use asset_metrics::report::compute_metrics;
use asset_metrics::series::build_equity_curve;

#[tokio::main]
async fn main() -> Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ───────────────────────────────────────────────────────────
    let cfg = AppConfig::from_env()?;
    info!(
        "Config: base_url={} range={} timeout={}s",
        cfg.yahoo_base_url, cfg.history_range, cfg.http_timeout_secs
    );

    let client = YahooClient::new(&cfg).context("building HTTP client")?;

    // ── Interactive input ────────────────────────────────────────────────
    let ticker = prompt_ticker(&client).await?;
    let capital = prompt_capital()?;

    // ── Fetch full history ───────────────────────────────────────────────
    // Validation passing does not guarantee retrieval: a resolvable symbol
    // can still have no usable price history. That failure is fatal here.
    info!("Downloading full daily history for {ticker}...");
    let prices = client
        .fetch_history(&ticker)
        .await
        .with_context(|| format!("downloading price history for {ticker}"))?;
    info!(
        "Loaded {} daily closes ({} → {})",
        prices.len(),
        prices.first().map(|p| p.date.to_string()).unwrap_or_default(),
        prices.last().map(|p| p.date.to_string()).unwrap_or_default(),
    );

    // ── Derive series, compute, print ────────────────────────────────────
    let bundle = build_equity_curve(&prices, capital)
        .with_context(|| format!("building equity curve for {ticker}"))?;
    let report = compute_metrics(&ticker, &bundle);

    println!("\n{report}");

    Ok(())
}

/// Ask for a ticker until the provider resolves one. Unbounded: every
/// candidate triggers a live query.
async fn prompt_ticker(provider: &impl MarketData) -> Result<String> {
    loop {
        let raw = prompt_line("Type an asset ticker according to Yahoo Finance: ")?;
        match input::validate_ticker(provider, &raw).await {
            Validation::Valid(symbol) => return Ok(symbol),
            Validation::Invalid(msg) => println!("{msg}"),
        }
    }
}

/// Ask for an initial capital until it parses as a positive number.
fn prompt_capital() -> Result<f64> {
    loop {
        let raw = prompt_line("How much capital you want to invest: ")?;
        match input::validate_capital(&raw) {
            Validation::Valid(capital) => return Ok(capital),
            Validation::Invalid(msg) => println!("{msg}"),
        }
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin()
        .read_line(&mut line)
        .context("reading stdin")?;
    if read == 0 {
        anyhow::bail!("stdin closed before valid input was entered");
    }
    Ok(line)
}
