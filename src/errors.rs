use chrono::NaiveDate;

/// Failures talking to the market-data provider.
///
/// During ticker validation every variant collapses to "invalid ticker";
/// after validation has passed, any of these is fatal.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Http(String),

    #[error("yahoo api error: {code} {description}")]
    Api { code: String, description: String },

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no usable price history for {0}")]
    EmptyHistory(String),
}

impl From<reqwest::Error> for DataError {
    fn from(e: reqwest::Error) -> Self {
        DataError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Parse(e.to_string())
    }
}

/// Violations of the price/return/equity series invariants.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("price history has {rows} row(s), need at least 2 to compute returns")]
    TooShort { rows: usize },

    #[error("initial capital must be greater than 0, got {0}")]
    NonPositiveCapital(f64),

    #[error("price dates are not strictly increasing")]
    UnorderedDates,

    #[error("non-finite or non-positive close on {date}")]
    BadClose { date: NaiveDate },
}
