use crate::domain::stock::StockRating;
use serde::{Deserialize, Serialize};

/// Server-scored buy suggestion. The client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub stock: StockRating,
    pub score: f64,
    #[serde(default, deserialize_with = "crate::domain::null_as_default")]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub potential_up: f64,
}
