pub mod classify;
pub mod client;
pub mod domain;
pub mod store;
pub mod view;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_API_URL: &str = "http://localhost:8081";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub stock_api_url: String,
        pub stock_api_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let stock_api_url = std::env::var("STOCK_API_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string());

            let stock_api_timeout_secs = match std::env::var("STOCK_API_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("STOCK_API_TIMEOUT_SECS is not a number: {s}"))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            };

            Ok(Self {
                stock_api_url,
                stock_api_timeout_secs,
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn with_api_url(mut self, url: Option<String>) -> Self {
            if let Some(url) = url.filter(|s| !s.trim().is_empty()) {
                self.stock_api_url = url;
            }
            self
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                stock_api_url: DEFAULT_API_URL.to_string(),
                stock_api_timeout_secs: DEFAULT_TIMEOUT_SECS,
                sentry_dsn: None,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn api_url_override_ignores_blank_values() {
            let settings = Settings::default().with_api_url(Some("  ".to_string()));
            assert_eq!(settings.stock_api_url, DEFAULT_API_URL);

            let settings = Settings::default().with_api_url(Some("http://api:9000".to_string()));
            assert_eq!(settings.stock_api_url, "http://api:9000");
        }
    }
}
