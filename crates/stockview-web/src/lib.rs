//! # StockView Web
//!
//! JSON-over-HTTP wrapper around [`stockview_core::StooqFetcher`].
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Welcome message |
//! | `POST /fetch-data/` | Validate a JSON body and return the price records |
//!
//! Errors are rendered by [`ApiError`] as `{"error": {code, message, retryable, fields}}`:
//! `422` for invalid input (every bad field listed, wrongly typed ones
//! included), `404` when Stooq has no rows, `503` when Stooq is unreachable
//! and `502` for any other data source failure. A body that is not JSON keeps
//! the status axum assigns (`400`, `415`) but the same error shape.

pub mod cli;
pub mod error;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::debug;
use serde_json::{json, Value};
use stockview_core::{FetchError, FetchRequest, PriceRecord, StooqFetcher};

pub use error::{ApiError, ServerError};

/// Shared handler state; the fetcher is stateless so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    fetcher: StooqFetcher,
}

pub fn router(fetcher: StooqFetcher) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/fetch-data", post(fetch_data))
        .route("/fetch-data/", post(fetch_data))
        .with_state(AppState { fetcher })
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Stock View API" }))
}

async fn fetch_data(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<PriceRecord>>, ApiError> {
    let Json(body) = payload?;
    debug!("fetch-data request: {body}");

    let request = FetchRequest::validate_json(&body).map_err(FetchError::from)?;
    let records = state.fetcher.fetch_request(&request).await?;
    Ok(Json(records))
}
