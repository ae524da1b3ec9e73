//! Endpoint handlers

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{Html, Json},
};
use std::sync::Arc;

use crate::core::pricer::PricingService;
use crate::domain::model::{GemFeatures, Quote};
use crate::server::types::{parse_submission, StatusResponse};
use crate::utils::error::PricerError;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// GET / - Form page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /predict - Predicted price plus an optional nearby reference price
pub async fn predict(
    State(service): State<Arc<PricingService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Quote>, PricerError> {
    let fields = parse_submission(&headers, &body)?;
    let features = GemFeatures::from_fields(&fields)?;
    let quote = service.quote(&features)?;
    Ok(Json(quote))
}

/// GET /status - Health check with model and dataset statistics
pub async fn status(State(service): State<Arc<PricingService>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        summary: service.summary(),
    })
}
