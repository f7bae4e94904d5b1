//! # StockView Core
//!
//! Validation, fetching and normalization of Stooq historical price data.
//!
//! ## Overview
//!
//! A fetch is a straight line: validate the inbound fields, send one GET to
//! Stooq, parse the CSV it returns into ordered [`PriceRecord`] rows. Each
//! failure along the way surfaces as a distinct [`FetchError`] variant so
//! callers can tell bad input, an unreachable provider, a provider error and
//! an empty result apart.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Upstream base URL and timeout |
//! | [`domain`] | Symbol, trade date, interval and price record types |
//! | [`error`] | Validation and fetch error taxonomy |
//! | [`http_client`] | Transport trait, reqwest client and test double |
//! | [`parser`] | CSV payload to records |
//! | [`request`] | Raw params and the validator |
//! | [`stooq`] | The fetcher |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockview_core::{FetchParams, StooqFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = StooqFetcher::from_env();
//!     let records = fetcher
//!         .fetch(FetchParams::new("^spx", "20230901", "20230930").with_interval("weekly"))
//!         .await?;
//!
//!     for record in &records {
//!         println!("{} close={:.2}", record.date, record.close);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockview_core::{FetchError, FetchErrorKind};
//!
//! fn react(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::Validation | FetchErrorKind::NoDataFound => "fix the request",
//!         FetchErrorKind::UpstreamUnavailable => "retry later",
//!         FetchErrorKind::UpstreamError | FetchErrorKind::MalformedRow => "report a data source failure",
//!     }
//! }
//! ```
//!
//! Raw upstream bodies are logged, never placed in [`FetchError::public_message`].

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod parser;
pub mod request;
pub mod stooq;

pub use config::StooqConfig;

pub use domain::{Interval, PriceRecord, Symbol, TradeDate};

pub use error::{FetchError, FetchErrorKind, FieldError, ValidationError, ValidationErrors};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, MockHttpClient,
    ReqwestHttpClient,
};

pub use parser::parse_price_csv;

pub use request::{FetchParams, FetchRequest};

pub use stooq::StooqFetcher;
