use crate::classify::{self, Classification};
use crate::domain::stock::StockRating;
use serde::Serialize;

/// One table line, with every derived display value precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub ticker: String,
    pub company: String,
    pub brokerage: String,
    pub action: String,
    pub rating_from: String,
    pub rating_to: String,
    pub rating_class: Classification,
    pub target_from: String,
    pub target_to: String,
    pub target_class: Classification,
    pub target_change_pct: f64,
    pub time: String,
}

impl From<&StockRating> for StockRow {
    fn from(stock: &StockRating) -> Self {
        Self {
            ticker: stock.ticker.clone(),
            company: stock.company.clone(),
            brokerage: stock.brokerage.clone(),
            action: stock.action.clone(),
            rating_from: stock.rating_from.clone(),
            rating_to: stock.rating_to.clone(),
            rating_class: classify::rating_class(&stock.rating_from, &stock.rating_to),
            target_from: stock.target_from.clone(),
            target_to: stock.target_to.clone(),
            target_class: classify::target_class(&stock.target_from, &stock.target_to),
            target_change_pct: classify::calculate_target_change(
                &stock.target_from,
                &stock.target_to,
            ),
            time: classify::format_date(&stock.time),
        }
    }
}
