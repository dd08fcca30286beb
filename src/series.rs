/// series.rs — Price → Return → Equity pipeline
///
/// ─────────────────────────────────────────────────────────────────────────
/// MATHEMATICAL SPECIFICATION
/// ─────────────────────────────────────────────────────────────────────────
///
/// DAILY RETURNS
///   r_t = close_t / close_{t−1} − 1      (first trading day dropped)
///
/// EQUITY CURVE
///   E_0 = initial_capital                (at the first trading day)
///   E_t = initial_capital × Π_{s ≤ t}(1 + r_s)
///
/// Invariants: len(returns) = len(prices) − 1, len(equity) = len(prices),
/// and total return of the equity curve equals close_last/close_first − 1
/// independent of initial_capital.
/// ─────────────────────────────────────────────────────────────────────────
use chrono::NaiveDate;

use crate::errors::SeriesError;

/// One trading day's closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// One trading day's simple return (fraction, e.g. 0.10 = +10%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One trading day's portfolio value in currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Full daily closing-price history, ascending by date.
#[derive(Debug, Clone)]
pub struct PriceSeries(Vec<PricePoint>);

impl PriceSeries {
    /// Validates the provider's ordering invariant: dates strictly
    /// increasing, closes finite and positive.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for p in &points {
            if !p.close.is_finite() || p.close <= 0.0 {
                return Err(SeriesError::BadClose { date: p.date });
            }
        }
        for w in points.windows(2) {
            if w[1].date <= w[0].date {
                return Err(SeriesError::UnorderedDates);
            }
        }
        Ok(Self(points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.0
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.0.last()
    }
}

/// Derived return and equity series for one ticker and one capital amount.
#[derive(Debug, Clone)]
pub struct SeriesBundle {
    pub returns: Vec<ReturnPoint>,
    pub equity: Vec<EquityPoint>,
}

impl SeriesBundle {
    pub fn first_day(&self) -> NaiveDate {
        self.equity[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.equity[self.equity.len() - 1].date
    }

    pub fn return_values(&self) -> Vec<f64> {
        self.returns.iter().map(|r| r.value).collect()
    }

    pub fn equity_values(&self) -> Vec<f64> {
        self.equity.iter().map(|e| e.value).collect()
    }
}

/// Compute daily returns and the capital-scaled equity curve.
///
/// Fails explicitly on degenerate input instead of producing NaN metrics
/// downstream: fewer than two closes cannot yield a single return.
pub fn build_equity_curve(
    prices: &PriceSeries,
    initial_capital: f64,
) -> Result<SeriesBundle, SeriesError> {
    if !initial_capital.is_finite() || initial_capital <= 0.0 {
        return Err(SeriesError::NonPositiveCapital(initial_capital));
    }
    if prices.len() < 2 {
        return Err(SeriesError::TooShort { rows: prices.len() });
    }

    let points = prices.points();
    let mut returns = Vec::with_capacity(points.len() - 1);
    let mut equity = Vec::with_capacity(points.len());

    // Equity anchors at the first trading day with exactly the initial
    // capital (cumulative return 0), then compounds through each return.
    equity.push(EquityPoint {
        date: points[0].date,
        value: initial_capital,
    });

    let mut growth = 1.0_f64;
    for w in points.windows(2) {
        let r = w[1].close / w[0].close - 1.0;
        growth *= 1.0 + r;
        returns.push(ReturnPoint {
            date: w[1].date,
            value: r,
        });
        equity.push(EquityPoint {
            date: w[1].date,
            value: initial_capital * growth,
        });
    }

    Ok(SeriesBundle { returns, equity })
}
