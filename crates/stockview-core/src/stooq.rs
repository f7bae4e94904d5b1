//! Stooq historical price fetcher.
//!
//! One call per fetch: validate, issue a single GET against the configured
//! CSV endpoint, classify the response and normalize the payload. There is no
//! retry and no cache; a [`StooqFetcher`] holds only immutable configuration
//! and a shared transport, so it can serve concurrent callers as-is.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockview_core::{FetchParams, StooqFetcher};
//!
//! let fetcher = StooqFetcher::from_env();
//! let records = fetcher
//!     .fetch(FetchParams::new("^spx", "20230901", "20230930"))
//!     .await?;
//! println!("{} rows, first close {}", records.len(), records[0].close);
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::parser::parse_price_csv;
use crate::{FetchError, FetchParams, FetchRequest, PriceRecord, StooqConfig};

/// Upper bound on how much of an upstream error body reaches the log.
const MAX_LOGGED_BODY_BYTES: usize = 512;

/// Fetches and normalizes Stooq CSV price history.
#[derive(Clone)]
pub struct StooqFetcher {
    http_client: Arc<dyn HttpClient>,
    config: StooqConfig,
}

impl Default for StooqFetcher {
    fn default() -> Self {
        Self::new(StooqConfig::default())
    }
}

impl StooqFetcher {
    pub fn new(config: StooqConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn from_env() -> Self {
        Self::new(StooqConfig::from_env())
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: StooqConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Validate `params` and fetch the matching price history.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Validation`] before any network call when a field is missing or malformed
    /// - [`FetchError::UpstreamUnavailable`] when Stooq cannot be reached in time
    /// - [`FetchError::UpstreamError`] on a non-success status
    /// - [`FetchError::NoDataFound`] when Stooq answers without any rows
    /// - [`FetchError::MalformedRow`] when a row breaks the six-column contract
    pub async fn fetch(&self, params: FetchParams) -> Result<Vec<PriceRecord>, FetchError> {
        let request = FetchRequest::validate(&params)?;
        self.fetch_request(&request).await
    }

    /// Fetch an already validated request.
    pub async fn fetch_request(
        &self,
        request: &FetchRequest,
    ) -> Result<Vec<PriceRecord>, FetchError> {
        let http_request = self.build_http_request(request);
        debug!("requesting stooq history: {}", http_request.full_url());

        let response = self
            .http_client
            .execute(http_request)
            .await
            .map_err(|error| {
                warn!("stooq transport error for {}: {}", request.symbol, error);
                FetchError::unavailable(format!(
                    "stooq {} error: {}",
                    error.kind().as_str(),
                    error.message()
                ))
            })?;

        if !response.is_success() {
            warn!(
                "stooq returned status {} for {}: {}",
                response.status,
                request.symbol,
                truncate_for_log(&response.body, MAX_LOGGED_BODY_BYTES)
            );
            return Err(FetchError::UpstreamError {
                status: response.status,
                body: response.body,
            });
        }

        match parse_price_csv(&response.body) {
            Ok(records) => {
                info!(
                    "fetched {} {} rows for {} ({}..{})",
                    records.len(),
                    request.interval,
                    request.symbol,
                    request.start_date,
                    request.end_date
                );
                Ok(records)
            }
            Err(FetchError::NoDataFound) => {
                info!(
                    "stooq has no data for {} ({}..{})",
                    request.symbol, request.start_date, request.end_date
                );
                Err(FetchError::NoDataFound)
            }
            Err(error) => {
                warn!("rejecting stooq payload for {}: {}", request.symbol, error);
                Err(error)
            }
        }
    }

    fn build_http_request(&self, request: &FetchRequest) -> HttpRequest {
        HttpRequest::get(&self.config.base_url)
            .with_query("s", request.symbol.as_str())
            .with_query("d1", request.start_date.format_compact())
            .with_query("d2", request.end_date.format_compact())
            .with_query("i", request.interval.stooq_code())
            .with_header("accept", "text/csv")
            .with_timeout_ms(self.config.timeout_ms)
    }
}

/// Cut `body` to at most `max` bytes on a char boundary, marking the cut.
fn truncate_for_log(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_owned();
    }

    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, MockHttpClient};
    use crate::Interval;

    fn fetcher(client: &Arc<MockHttpClient>) -> StooqFetcher {
        let transport: Arc<dyn HttpClient> = client.clone();
        StooqFetcher::with_http_client(
            transport,
            StooqConfig::default()
                .with_base_url("http://stooq.test/q/d/l/")
                .with_timeout_ms(1_500),
        )
    }

    #[tokio::test]
    async fn sends_four_query_parameters_and_timeout() {
        let client = Arc::new(MockHttpClient::responding(
            200,
            "Date,Open,High,Low,Close,Volume\n2023-09-01,1,2,0.5,1.5,10\n",
        ));

        fetcher(&client)
            .fetch(FetchParams::new("^SPX", "20230901", "20230930").with_interval("monthly"))
            .await
            .expect("must fetch");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.url, "http://stooq.test/q/d/l/");
        assert_eq!(sent.query_param("s"), Some("^spx"));
        assert_eq!(sent.query_param("d1"), Some("20230901"));
        assert_eq!(sent.query_param("d2"), Some("20230930"));
        assert_eq!(sent.query_param("i"), Some("m"));
        assert_eq!(sent.timeout_ms, 1_500);
        assert!(sent.full_url().contains("s=%5Espx"));
    }

    #[tokio::test]
    async fn validated_request_skips_revalidation() {
        let client = Arc::new(MockHttpClient::responding(
            200,
            "Date,Open,High,Low,Close,Volume\n2023-09-01,1,2,0.5,1.5,10\n",
        ));
        let request = FetchRequest::validate(&FetchParams::new("aapl.us", "20230901", "20230902"))
            .expect("valid");

        let records = fetcher(&client)
            .fetch_request(&request)
            .await
            .expect("must fetch");

        assert_eq!(records.len(), 1);
        assert_eq!(request.interval, Interval::Daily);
        assert_eq!(client.requests()[0].query_param("i"), Some("d"));
    }

    #[tokio::test]
    async fn timeout_maps_to_unavailable() {
        let client = Arc::new(MockHttpClient::failing(HttpError::timeout(
            "request timeout: deadline elapsed",
        )));

        let err = fetcher(&client)
            .fetch(FetchParams::new("^spx", "20230901", "20230930"))
            .await
            .expect_err("must fail");

        match &err {
            FetchError::UpstreamUnavailable { message } => {
                assert!(message.starts_with("stooq timeout error"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.retryable());
    }

    #[test]
    fn short_bodies_are_logged_whole() {
        assert_eq!(truncate_for_log("Not Found", 512), "Not Found");
    }

    #[test]
    fn long_bodies_are_cut_for_the_log() {
        let body = "x".repeat(10_000);
        let logged = truncate_for_log(&body, MAX_LOGGED_BODY_BYTES);

        assert!(logged.starts_with(&"x".repeat(MAX_LOGGED_BODY_BYTES)));
        assert!(logged.ends_with("... (10000 bytes total)"));
        assert!(logged.len() < 600);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "ł" is two bytes; a cut at byte 3 would split the second one.
        let logged = truncate_for_log("łłł", 3);
        assert!(logged.starts_with("ł..."));
    }

    #[tokio::test]
    async fn non_success_status_keeps_body_for_diagnostics() {
        let client = Arc::new(MockHttpClient::responding(503, "maintenance window"));

        let err = fetcher(&client)
            .fetch(FetchParams::new("^spx", "20230901", "20230930"))
            .await
            .expect_err("must fail");

        match err {
            FetchError::UpstreamError { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance window");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
