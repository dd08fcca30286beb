/// config.rs — Centralised configuration loaded from .env
///
/// Loading happens once at startup; the data client borrows &AppConfig.
use anyhow::Result;
use std::env;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Yahoo serves the chart endpoint an empty 429 to clients without a
/// browser-looking User-Agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Debug, Clone)]
pub struct AppConfig {
    // ── Market-data endpoint ─────────────────────────────────────────
    pub yahoo_base_url: String,
    pub user_agent: String,

    // ── HTTP behaviour ───────────────────────────────────────────────
    /// Per-request timeout; the only guard around the blocking calls.
    pub http_timeout_secs: u64,

    // ── History window ───────────────────────────────────────────────
    /// Chart-API range for the history download ("max" = full listing).
    pub history_range: String,
}

impl AppConfig {
    /// Load configuration from environment variables (after dotenv).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // ignore missing .env

        Ok(Self {
            yahoo_base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.into()),
            user_agent: env::var("HTTP_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.into()),
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            history_range: env::var("HISTORY_RANGE").unwrap_or_else(|_| "max".into()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + Copy,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Config key {key}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.history_range, "max");
        assert!(cfg.http_timeout_secs > 0);
        assert!(cfg.yahoo_base_url.starts_with("https://"));
    }
}
