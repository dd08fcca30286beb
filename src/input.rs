/// input.rs — Validation of the two interactive inputs
///
/// Validators are pure (or provider-backed) functions returning a tagged
/// result; the unbounded re-prompt loops live with the binary, not here.
use crate::data::MarketData;

/// Outcome of validating one candidate input. `Invalid` carries the
/// rejection message to print before re-prompting.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(String),
}

/// A ticker is valid iff the market-data provider resolves it. Network
/// failures, unknown symbols, and malformed input all collapse to the
/// same rejection.
pub async fn validate_ticker(provider: &impl MarketData, raw: &str) -> Validation<String> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Validation::Invalid(format!("Invalid ticker {candidate} - please try again."));
    }
    match provider.lookup(candidate).await {
        Ok(info) => {
            tracing::debug!(symbol = %info.symbol, exchange = ?info.exchange, "ticker resolved");
            Validation::Valid(candidate.to_string())
        }
        Err(e) => {
            tracing::debug!(error = %e, "ticker rejected");
            Validation::Invalid(format!("Invalid ticker {candidate} - please try again."))
        }
    }
}

/// Capital must parse as a number and be strictly positive. The two
/// failure modes get distinct messages.
pub fn validate_capital(raw: &str) -> Validation<f64> {
    match raw.trim().parse::<f64>() {
        Err(_) => Validation::Invalid("Invalid input. The capital value must be a number.".into()),
        Ok(v) if !v.is_finite() || v <= 0.0 => {
            Validation::Invalid("The capital must be greater than 0 - please try again.".into())
        }
        Ok(v) => Validation::Valid(v),
    }
}
