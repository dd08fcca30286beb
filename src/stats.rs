/// stats.rs — Summary statistics over a daily return series
///
/// ─────────────────────────────────────────────────────────────────────────
/// MATHEMATICAL SPECIFICATION
/// ─────────────────────────────────────────────────────────────────────────
///
/// COMPOUND (TOTAL) RETURN
///   total = Π(1 + r_t) − 1
///
/// CAGR (calendar-year annualisation)
///   years = days(first_day → last_day) / 365.25
///   CAGR  = (1 + total)^(1/years) − 1
///
/// SHARPE RATIO (annualised, r_f = 0, daily bars)
///   SR = mean(r) / std(r) × √252
///
/// MAXIMUM DRAWDOWN
///   peak_t = max_{s ≤ t}(E_s)
///   MaxDD  = min_t (E_t − peak_t) / peak_t     (≤ 0)
/// ─────────────────────────────────────────────────────────────────────────
use chrono::NaiveDate;
use statrs::statistics::Statistics;

/// Trading days per year, the standard daily-bar annualisation factor.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year for CAGR's elapsed-time denominator.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Compounded total return of a return series, as a fraction.
pub fn compound(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Compound annual growth rate as a fraction (0.07 = 7%/yr).
///
/// Annualises over the calendar span between the first and last trading
/// day. Degenerate spans (no returns, zero elapsed days) yield 0.0; a
/// fully wiped-out series yields −1.0.
pub fn cagr(returns: &[f64], first_day: NaiveDate, last_day: NaiveDate) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let days = (last_day - first_day).num_days();
    if days <= 0 {
        return 0.0;
    }
    let total = compound(returns);
    if 1.0 + total <= 0.0 {
        return -1.0;
    }
    let years = days as f64 / DAYS_PER_YEAR;
    (1.0 + total).powf(1.0 / years) - 1.0
}

/// Maximum drawdown of an equity curve.
/// Returns a negative value (e.g. −0.15 = −15% drawdown).
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }
    let mut peak = equity_curve[0];
    let mut max_dd = 0.0f64;

    for &e in equity_curve {
        if e > peak {
            peak = e;
        }
        let dd = (e - peak) / peak;
        if dd < max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

/// Annualised Sharpe ratio at a zero risk-free rate.
///
/// Sample standard deviation; a flat series has no defined ratio and
/// reports 0.0 rather than ±∞.
pub fn sharpe(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = returns.iter().mean();
    let std = returns.iter().std_dev();
    if std < 1e-12 {
        return 0.0;
    }
    (mean / std) * TRADING_DAYS_PER_YEAR.sqrt()
}
