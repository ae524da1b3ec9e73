//! Axum router configuration for all endpoints

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::pricer::PricingService;
use crate::server::handlers;

/// Create the application router around a fitted pricing service
pub fn create_router(service: Arc<PricingService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .route("/status", get(handlers::status))
        .with_state(service)
}
