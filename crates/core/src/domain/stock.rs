use serde::{Deserialize, Serialize};

/// One analyst rating change as served by `/api/stock`.
///
/// Targets are kept as the currency strings the API sends (`"$150"`,
/// `"$1,020.50"`); `crate::classify` parses them when it needs numbers.
/// Timestamps stay opaque ISO-8601 strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockRating {
    pub id: String,
    pub ticker: String,
    pub company: String,
    pub brokerage: String,
    pub action: String,
    pub rating_from: String,
    pub rating_to: String,
    pub target_from: String,
    pub target_to: String,
    pub time: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `GET /api/stock`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StocksEnvelope {
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub items: Vec<StockRating>,
}

/// Body of `GET /api/stock/ticker/{ticker}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEnvelope {
    pub item: StockRating,
}
