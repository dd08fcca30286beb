/// report.rs — Metrics report assembly and console rendering
use chrono::NaiveDate;

use crate::series::SeriesBundle;
use crate::stats;

/// Summary statistics for one run: computed once, rendered once,
/// never persisted.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub symbol: String,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    /// Currency units (last equity − first equity).
    pub total_profit: f64,
    /// Percent, 2 decimals.
    pub total_return: f64,
    /// Percent, 2 decimals.
    pub cagr: f64,
    /// Percent, ≤ 0, 2 decimals.
    pub max_drawdown: f64,
    /// Unitless, 2 decimals.
    pub sharpe_ratio: f64,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute the full report from the derived series. Pure function of its
/// inputs; percentages are scaled ×100 and rounded here so the rendered
/// and stored values agree.
pub fn compute_metrics(symbol: &str, bundle: &SeriesBundle) -> MetricsReport {
    let equity = bundle.equity_values();
    let returns = bundle.return_values();

    let first = equity[0];
    let last = equity[equity.len() - 1];
    let first_day = bundle.first_day();
    let last_day = bundle.last_day();

    MetricsReport {
        symbol: symbol.to_string(),
        first_day,
        last_day,
        total_profit: round2(last - first),
        total_return: round2((last - first) / first * 100.0),
        cagr: round2(stats::cagr(&returns, first_day, last_day) * 100.0),
        max_drawdown: round2(stats::max_drawdown(&equity) * 100.0),
        sharpe_ratio: round2(stats::sharpe(&returns)),
    }
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "--- PERFORMANCE METRICS FOR THE SYMBOL: {} ---",
            self.symbol
        )?;
        writeln!(
            f,
            "START DATE: {} - END DATE: {}",
            self.first_day, self.last_day
        )?;
        writeln!(f)?;
        writeln!(f, "TOTAL PROFIT $: {:.2}", self.total_profit)?;
        writeln!(f, "TOTAL RETURN: {:.2}%", self.total_return)?;
        writeln!(
            f,
            "COMPOUND ANNUAL GROWTH RATE (CAGR): {:.2}%",
            self.cagr
        )?;
        writeln!(f, "MAXIMUM DRAWDOWN: {:.2}%", self.max_drawdown)?;
        writeln!(f, "SHARPE RATIO: {:.2}", self.sharpe_ratio)?;
        writeln!(f)?;
        write!(f, "---------------------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{build_equity_curve, PricePoint, PriceSeries};

    fn prices(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                close: c,
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn canonical_scenario_report() {
        // closes [100, 110, 99], capital 1000 → total_return −1.00%,
        // total_profit −10.00
        let bundle = build_equity_curve(&prices(&[100.0, 110.0, 99.0]), 1000.0).unwrap();
        let report = compute_metrics("SPY", &bundle);

        assert_eq!(report.total_return, -1.0);
        assert_eq!(report.total_profit, -10.0);
        assert_eq!(report.first_day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(report.last_day, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        // peak 1100 → trough 990: −10%
        assert_eq!(report.max_drawdown, -10.0);
    }

    #[test]
    fn total_return_is_invariant_under_capital_scaling() {
        let series = prices(&[100.0, 110.0, 99.0, 104.5, 101.0]);
        let tiny = compute_metrics("X", &build_equity_curve(&series, f64::MIN_POSITIVE).unwrap());
        let big = compute_metrics("X", &build_equity_curve(&series, 1e9).unwrap());
        let want = round2((101.0 / 100.0 - 1.0) * 100.0);

        assert_eq!(tiny.total_return, want);
        assert_eq!(big.total_return, want);
        assert_eq!(tiny.max_drawdown, big.max_drawdown);
        assert_eq!(tiny.sharpe_ratio, big.sharpe_ratio);
    }

    #[test]
    fn display_renders_fixed_block() {
        let bundle = build_equity_curve(&prices(&[100.0, 110.0, 99.0]), 1000.0).unwrap();
        let rendered = compute_metrics("SPY", &bundle).to_string();

        assert!(rendered.contains("--- PERFORMANCE METRICS FOR THE SYMBOL: SPY ---"));
        assert!(rendered.contains("START DATE: 2024-01-01 - END DATE: 2024-01-03"));
        assert!(rendered.contains("TOTAL PROFIT $: -10.00"));
        assert!(rendered.contains("TOTAL RETURN: -1.00%"));
        assert!(rendered.contains("MAXIMUM DRAWDOWN: -10.00%"));
        assert!(rendered.contains("SHARPE RATIO:"));
        assert!(rendered.ends_with("---------------------------------------------"));
    }
}
