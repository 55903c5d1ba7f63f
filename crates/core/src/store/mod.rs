use crate::classify;
use crate::client::error::failure_kind;
use crate::client::StockApi;
use crate::domain::recommendation::Recommendation;
use crate::domain::stock::StockRating;
use tokio::sync::RwLock;

mod sequence;

use sequence::{InFlight, LoadingGuard, RequestSequence};

pub const FETCH_STOCKS_FAILED: &str = "Failed to fetch stocks";
pub const FETCH_STOCK_DETAILS_FAILED: &str = "Failed to fetch stock details";
pub const FETCH_RECOMMENDATIONS_FAILED: &str = "Failed to fetch recommendations";
pub const SYNC_STOCKS_FAILED: &str = "Failed to sync stocks";

/// Point-in-time copy of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub stocks: Vec<StockRating>,
    pub recommendations: Vec<Recommendation>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Data {
    stocks: Vec<StockRating>,
    recommendations: Vec<Recommendation>,
    error: Option<String>,
}

/// Owns the dashboard snapshot and every request that feeds it.
///
/// Operations never return errors. A failure leaves the previous data in
/// place and stores one fixed message in `error`, which the next operation
/// clears when it starts.
pub struct StockStore<A> {
    api: A,
    data: RwLock<Data>,
    in_flight: InFlight,
    stocks_seq: RequestSequence,
    recommendations_seq: RequestSequence,
}

impl<A: StockApi> StockStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            data: RwLock::new(Data::default()),
            in_flight: InFlight::default(),
            stocks_seq: RequestSequence::default(),
            recommendations_seq: RequestSequence::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn snapshot(&self) -> Snapshot {
        let data = self.data.read().await;
        Snapshot {
            stocks: data.stocks.clone(),
            recommendations: data.recommendations.clone(),
            is_loading: self.in_flight.is_active(),
            error: data.error.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_active()
    }

    pub async fn error(&self) -> Option<String> {
        self.data.read().await.error.clone()
    }

    pub async fn fetch_stocks(&self) -> Option<Vec<StockRating>> {
        let _loading = self.begin().await;
        let token = self.stocks_seq.issue();

        let res = self.api.list_stocks().await;
        let mut data = self.data.write().await;
        if !self.stocks_seq.is_current(token) {
            tracing::debug!(token, ok = res.is_ok(), "discarding stale stocks response");
            return res.ok();
        }

        match res {
            Ok(stocks) => {
                tracing::debug!(count = stocks.len(), "stocks refreshed");
                data.stocks = stocks.clone();
                Some(stocks)
            }
            Err(err) => {
                record_failure(&mut data, "fetch_stocks", FETCH_STOCKS_FAILED, &err);
                None
            }
        }
    }

    /// Looks up one stock without touching the stocks collection.
    pub async fn fetch_stock_by_ticker(&self, ticker: &str) -> Option<StockRating> {
        let _loading = self.begin().await;

        match self.api.stock_by_ticker(ticker).await {
            Ok(stock) => Some(stock),
            Err(err) => {
                let mut data = self.data.write().await;
                record_failure(
                    &mut data,
                    "fetch_stock_by_ticker",
                    FETCH_STOCK_DETAILS_FAILED,
                    &err,
                );
                None
            }
        }
    }

    /// Empty on failure; check [`Self::error`] to tell that apart from no data.
    pub async fn fetch_recommendations(&self, date: Option<&str>) -> Vec<Recommendation> {
        let _loading = self.begin().await;
        let token = self.recommendations_seq.issue();
        let date = date.filter(|d| !d.is_empty());

        let res = self.api.recommendations(date).await;
        let mut data = self.data.write().await;
        if !self.recommendations_seq.is_current(token) {
            tracing::debug!(token, ok = res.is_ok(), "discarding stale recommendations response");
            return res.unwrap_or_default();
        }

        match res {
            Ok(recommendations) => {
                tracing::debug!(count = recommendations.len(), date, "recommendations refreshed");
                data.recommendations = recommendations.clone();
                recommendations
            }
            Err(err) => {
                record_failure(
                    &mut data,
                    "fetch_recommendations",
                    FETCH_RECOMMENDATIONS_FAILED,
                    &err,
                );
                Vec::new()
            }
        }
    }

    /// Asks the backend to re-ingest, then reloads the stocks.
    ///
    /// True only when both the sync request and the reload succeed.
    pub async fn sync_stocks(&self) -> bool {
        let _loading = self.begin().await;

        if let Err(err) = self.api.trigger_sync().await {
            let mut data = self.data.write().await;
            record_failure(&mut data, "sync_stocks", SYNC_STOCKS_FAILED, &err);
            return false;
        }

        tracing::info!(base_url = self.api.base_url(), "stock sync triggered; reloading stocks");
        self.fetch_stocks().await.is_some()
    }

    pub fn rating_level(&self, rating: &str) -> u8 {
        classify::rating_level(rating)
    }

    async fn begin(&self) -> LoadingGuard<'_> {
        let guard = self.in_flight.enter();
        self.data.write().await.error = None;
        guard
    }
}

fn record_failure(data: &mut Data, operation: &'static str, message: &str, err: &anyhow::Error) {
    let kind = failure_kind(err).map(|k| k.as_str()).unwrap_or("other");
    tracing::error!(operation, kind, error = %format!("{err:#}"), "{message}");
    data.error = Some(message.to_string());
}
