use crate::domain::recommendation::Recommendation;
use crate::domain::stock::StockRating;

pub mod error;
pub mod http;

/// Network seam of the dashboard: one method per backend endpoint.
///
/// Implementations surface transport, status and decoding problems as
/// errors (usually wrapping [`error::ApiFailure`]); turning them into
/// user-facing state is the store's job.
#[async_trait::async_trait]
pub trait StockApi: Send + Sync {
    fn base_url(&self) -> &str;

    /// `GET /api/stock`
    async fn list_stocks(&self) -> anyhow::Result<Vec<StockRating>>;

    /// `GET /api/stock/ticker/{ticker}`
    async fn stock_by_ticker(&self, ticker: &str) -> anyhow::Result<StockRating>;

    /// `GET /api/stock/recommendations[?time=...]`
    async fn recommendations(&self, time: Option<&str>) -> anyhow::Result<Vec<Recommendation>>;

    /// `POST /api/stock/sync`; the response body is ignored.
    async fn trigger_sync(&self) -> anyhow::Result<()>;
}
