use crate::client::error::ApiFailure;
use crate::client::StockApi;
use crate::config::Settings;
use crate::domain::recommendation::Recommendation;
use crate::domain::stock::{StockEnvelope, StockRating, StocksEnvelope};
use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

const STOCK_PATH: [&str; 2] = ["api", "stock"];

/// reqwest-backed client for the stock backend. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpStockApi {
    http: reqwest::Client,
    base_url: Url,
    base_url_raw: String,
}

impl HttpStockApi {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.stock_api_url,
            Duration::from_secs(settings.stock_api_timeout_secs),
        )
    }

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("invalid stock API base URL: {base_url}"))?;
        anyhow::ensure!(
            !parsed.cannot_be_a_base(),
            "stock API base URL cannot carry a path: {base_url}"
        );

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build stock API http client")?;

        Ok(Self {
            http,
            base_url: parsed,
            base_url_raw: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(STOCK_PATH).extend(tail);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: &'static str, url: Url) -> Result<T> {
        tracing::debug!(operation, %url, "stock API request");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiFailure::transport(operation, e.to_string()))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| {
            ApiFailure::transport(operation, format!("failed to read response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ApiFailure::http_status(operation, status.as_u16(), text).into());
        }

        let parsed = serde_json::from_str::<T>(&text)
            .map_err(|e| ApiFailure::parse(operation, format!("{e}: {text}")))?;
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl StockApi for HttpStockApi {
    fn base_url(&self) -> &str {
        &self.base_url_raw
    }

    async fn list_stocks(&self) -> Result<Vec<StockRating>> {
        let envelope: StocksEnvelope = self.get_json("list_stocks", self.url(&[])).await?;
        Ok(envelope.items)
    }

    async fn stock_by_ticker(&self, ticker: &str) -> Result<StockRating> {
        let envelope: StockEnvelope = self
            .get_json("stock_by_ticker", self.url(&["ticker", ticker]))
            .await?;
        Ok(envelope.item)
    }

    async fn recommendations(&self, time: Option<&str>) -> Result<Vec<Recommendation>> {
        let mut url = self.url(&["recommendations"]);
        if let Some(time) = time.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("time", time);
        }

        let items: Option<Vec<Recommendation>> = self.get_json("recommendations", url).await?;
        Ok(items.unwrap_or_default())
    }

    async fn trigger_sync(&self) -> Result<()> {
        let operation = "trigger_sync";
        let url = self.url(&["sync"]);
        tracing::debug!(operation, %url, "stock API request");

        let res = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| ApiFailure::transport(operation, e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = error_body_detail(res.text().await);
            return Err(ApiFailure::http_status(operation, status.as_u16(), detail).into());
        }
        Ok(())
    }
}

// An unreadable body must not hide the status failure it came with.
fn error_body_detail<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    match body {
        Ok(text) => text,
        Err(e) => format!("<failed to read response body: {e}>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::error::{failure_kind, FailureKind};
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn serve(app: Router) -> HttpStockApi {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        HttpStockApi::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap()
    }

    fn stock_json(ticker: &str) -> Value {
        json!({
            "id": format!("id-{ticker}"),
            "ticker": ticker,
            "company": format!("{ticker} Corp"),
            "brokerage": "Morgan Stanley",
            "action": "upgraded by",
            "rating_from": "Hold",
            "rating_to": "Buy",
            "target_from": "$150",
            "target_to": "$180",
            "time": "2023-07-20T10:00:00Z",
            "created_at": "2023-07-19T10:00:00Z",
            "updated_at": "2023-07-20T10:00:00Z"
        })
    }

    #[test]
    fn builds_paths_under_base_url() {
        let api = HttpStockApi::new("http://localhost:8081/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.url(&[]).as_str(), "http://localhost:8081/api/stock");
        assert_eq!(api.base_url(), "http://localhost:8081");

        let api = HttpStockApi::new("http://gateway/backend", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.url(&["ticker", "BRK/B"]).as_str(),
            "http://gateway/backend/api/stock/ticker/BRK%2FB"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(HttpStockApi::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpStockApi::new("mailto:ops@example.com", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn lists_stocks_from_items_envelope() {
        let app = Router::new().route(
            "/api/stock",
            get(|| async { Json(json!({"items": [stock_json("AAPL"), stock_json("MSFT")]})) }),
        );
        let api = serve(app).await;

        let stocks = api.list_stocks().await.unwrap();
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].ticker, "AAPL");
        assert_eq!(stocks[1].company, "MSFT Corp");
    }

    #[tokio::test]
    async fn non_success_status_is_reported_as_http_status() {
        let app = Router::new().route(
            "/api/stock",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "No stocks found"})),
                )
            }),
        );
        let api = serve(app).await;

        let err = api.list_stocks().await.unwrap_err();
        assert_eq!(failure_kind(&err), Some(FailureKind::HttpStatus));
        assert!(err.to_string().contains("status=404"));
    }

    #[tokio::test]
    async fn malformed_body_is_reported_as_parse_failure() {
        let app = Router::new().route("/api/stock", get(|| async { "<html>oops</html>" }));
        let api = serve(app).await;

        let err = api.list_stocks().await.unwrap_err();
        assert_eq!(failure_kind(&err), Some(FailureKind::Parse));
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_as_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpStockApi::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = api.list_stocks().await.unwrap_err();
        assert_eq!(failure_kind(&err), Some(FailureKind::Transport));
    }

    #[tokio::test]
    async fn ticker_lookup_uses_ticker_path() {
        let app = Router::new().route(
            "/api/stock/ticker/:ticker",
            get(|Path(ticker): Path<String>| async move {
                Json(json!({"item": stock_json(&ticker)}))
            }),
        );
        let api = serve(app).await;

        let stock = api.stock_by_ticker("TSLA").await.unwrap();
        assert_eq!(stock.ticker, "TSLA");
        assert_eq!(stock.id, "id-TSLA");
    }

    #[tokio::test]
    async fn ticker_lookup_checks_status() {
        let app = Router::new().route(
            "/api/stock/ticker/:ticker",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({"error": "Stock not found"})),
                )
            }),
        );
        let api = serve(app).await;

        let err = api.stock_by_ticker("NOPE").await.unwrap_err();
        assert_eq!(failure_kind(&err), Some(FailureKind::HttpStatus));
    }

    #[tokio::test]
    async fn recommendations_send_time_only_when_given() {
        let app = Router::new().route(
            "/api/stock/recommendations",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let time = q.get("time").cloned().unwrap_or_else(|| "<none>".to_string());
                Json(json!([{
                    "stock": stock_json("AAPL"),
                    "score": 8.5,
                    "reasons": [format!("time={time}")],
                    "potential_up": 20.0
                }]))
            }),
        );
        let api = serve(app).await;

        let recs = api.recommendations(Some("2024-01-05")).await.unwrap();
        assert_eq!(recs[0].reasons, vec!["time=2024-01-05".to_string()]);
        assert_eq!(recs[0].potential_up, 20.0);

        let recs = api.recommendations(None).await.unwrap();
        assert_eq!(recs[0].reasons, vec!["time=<none>".to_string()]);

        let recs = api.recommendations(Some("")).await.unwrap();
        assert_eq!(recs[0].reasons, vec!["time=<none>".to_string()]);
    }

    #[tokio::test]
    async fn null_recommendations_body_is_empty() {
        let app = Router::new().route(
            "/api/stock/recommendations",
            get(|| async { Json(Value::Null) }),
        );
        let api = serve(app).await;

        assert!(api.recommendations(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_ignores_body_but_not_status() {
        let app = Router::new()
            .route("/api/stock/sync", post(|| async { "sync started" }));
        let api = serve(app).await;
        api.trigger_sync().await.unwrap();

        let app = Router::new().route(
            "/api/stock/sync",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream failed") }),
        );
        let api = serve(app).await;
        let err = api.trigger_sync().await.unwrap_err();
        assert_eq!(failure_kind(&err), Some(FailureKind::HttpStatus));
        assert!(err.to_string().contains("upstream failed"));
    }

    #[test]
    fn unreadable_error_body_is_kept_in_detail() {
        assert_eq!(error_body_detail::<String>(Ok("bad gateway".to_string())), "bad gateway");
        assert_eq!(
            error_body_detail(Err("connection closed before message completed")),
            "<failed to read response body: connection closed before message completed>"
        );
    }
}
