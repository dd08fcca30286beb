/// data.rs — Yahoo Finance chart-API client
///
/// One provider behind the `MarketData` trait so the pipeline and the
/// input-validation layer are testable without live network calls.
/// Symbol validation and the history download hit the same `v8/finance/chart`
/// endpoint; a symbol is valid iff the chart query resolves without an API
/// error. Every candidate triggers a live query: no caching, no retry, no
/// backoff, only the client-level timeout.
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::DataError;
use crate::series::{PricePoint, PriceSeries};

/// Descriptive metadata for a resolved symbol.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub symbol: String,
    pub currency: Option<String>,
    pub exchange: Option<String>,
}

/// Market-data capability set: resolve a symbol, fetch its daily history.
#[allow(async_fn_in_trait)]
pub trait MarketData {
    /// Resolve descriptive metadata for `symbol`. Any failure (network,
    /// unknown symbol, malformed response) surfaces as an error; callers
    /// validating tickers treat all of them as "invalid".
    async fn lookup(&self, symbol: &str) -> Result<SymbolInfo, DataError>;

    /// Full available daily closing-price history for `symbol`,
    /// ascending by date. Fewer than two usable rows is an error, never
    /// an empty series.
    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, DataError>;
}

// Chart-API response shape (v8/finance/chart/{symbol})
// {
//   "chart": {
//     "result": [ { "meta": {...}, "timestamp": [...],
//                   "indicators": { "quote": [{ "close": [...] }],
//                                   "adjclose": [{ "adjclose": [...] }] } } ],
//     "error": null
//   }
// }

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: String,
    currency: Option<String>,
    #[serde(rename = "exchangeName")]
    exchange_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooClient {
    client: Client,
    base_url: String,
    history_range: String,
}

impl YahooClient {
    pub fn new(cfg: &AppConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.http_timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| DataError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: cfg.yahoo_base_url.trim_end_matches('/').to_string(),
            history_range: cfg.history_range.clone(),
        })
    }

    async fn chart(&self, symbol: &str, range: &str) -> Result<ChartResult, DataError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, range
        );
        debug!(%url, "chart query");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::UnknownSymbol(symbol.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DataError::Http(format!("HTTP {status}: {body}")));
        }

        let data: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        if let Some(err) = data.chart.error {
            return Err(DataError::Api {
                code: err.code,
                description: err.description,
            });
        }

        data.chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| DataError::UnknownSymbol(symbol.to_string()))
    }
}

impl MarketData for YahooClient {
    async fn lookup(&self, symbol: &str) -> Result<SymbolInfo, DataError> {
        // A one-day chart query is the cheapest call that still proves the
        // symbol resolves to an instrument.
        let result = self.chart(symbol, "1d").await?;
        Ok(SymbolInfo {
            symbol: result.meta.symbol,
            currency: result.meta.currency,
            exchange: result.meta.exchange_name,
        })
    }

    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let result = self.chart(symbol, &self.history_range).await?;
        history_from_chart(symbol, result)
    }
}

/// Pair timestamps with closes (adjusted when present), skipping null rows
/// the API emits for holidays and partial sessions.
fn history_from_chart(symbol: &str, result: ChartResult) -> Result<PriceSeries, DataError> {
    let timestamps = result.timestamp.unwrap_or_default();
    let indicators = result
        .indicators
        .ok_or_else(|| DataError::EmptyHistory(symbol.to_string()))?;

    let closes: Vec<Option<f64>> = match indicators.adjclose.and_then(|mut a| {
        if a.is_empty() {
            None
        } else {
            Some(a.remove(0).adjclose)
        }
    }) {
        Some(adj) => adj,
        None => indicators
            .quote
            .into_iter()
            .next()
            .and_then(|q| q.close)
            .ok_or_else(|| DataError::EmptyHistory(symbol.to_string()))?,
    };

    let mut points = Vec::with_capacity(timestamps.len());
    for (&ts, close) in timestamps.iter().zip(closes) {
        let Some(c) = close else { continue };
        if !c.is_finite() || c <= 0.0 {
            continue;
        }
        let Some(dt) = Utc.timestamp_opt(ts, 0).single() else {
            continue;
        };
        points.push(PricePoint {
            date: dt.date_naive(),
            close: c,
        });
    }

    // Intraday tails can repeat the last session's date; keep the final value.
    points.dedup_by(|b, a| {
        if a.date == b.date {
            a.close = b.close;
            true
        } else {
            false
        }
    });

    if points.len() < 2 {
        return Err(DataError::EmptyHistory(symbol.to_string()));
    }

    PriceSeries::new(points).map_err(|e| DataError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "SPY", "currency": "USD", "exchangeName": "PCX"},
                "timestamp": [1704153600, 1704240000, 1704326400, 1704412800],
                "indicators": {
                    "quote": [{"close": [100.5, null, 102.0, 99.25]}],
                    "adjclose": [{"adjclose": [100.0, null, 101.5, 98.75]}]
                }
            }],
            "error": null
        }
    }"#;

    const ERROR_BODY: &str = r#"{
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    }"#;

    fn parse(body: &str) -> ChartResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn chart_body_deserializes() {
        let resp = parse(CHART_BODY);
        let result = &resp.chart.result.as_ref().unwrap()[0];
        assert_eq!(result.meta.symbol, "SPY");
        assert_eq!(result.meta.currency.as_deref(), Some("USD"));
        assert_eq!(result.timestamp.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn error_body_carries_code_and_description() {
        let resp = parse(ERROR_BODY);
        assert!(resp.chart.result.is_none());
        let err = resp.chart.error.unwrap();
        assert_eq!(err.code, "Not Found");
        assert!(err.description.contains("delisted"));
    }

    #[test]
    fn history_prefers_adjusted_closes_and_skips_nulls() {
        let resp = parse(CHART_BODY);
        let result = resp.chart.result.unwrap().remove(0);
        let series = history_from_chart("SPY", result).unwrap();

        // null row dropped, adjclose used
        assert_eq!(series.len(), 3);
        let closes: Vec<f64> = series.points().iter().map(|p| p.close).collect();
        assert_eq!(closes, vec![100.0, 101.5, 98.75]);

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn history_without_rows_is_empty_history() {
        let body = r#"{
            "chart": {
                "result": [{
                    "meta": {"symbol": "XXXX", "currency": null, "exchangeName": null},
                    "timestamp": null,
                    "indicators": {"quote": [{"close": null}], "adjclose": null}
                }],
                "error": null
            }
        }"#;
        let result = parse(body).chart.result.unwrap().remove(0);
        let err = history_from_chart("XXXX", result).unwrap_err();
        assert!(matches!(err, DataError::EmptyHistory(_)));
    }
}
