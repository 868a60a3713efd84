pub mod events;
pub mod health;
pub mod ledgers;
pub mod settlements;
pub mod stats;
pub mod transactions;

use crate::config::Config;
use crate::orchestration::Orchestrator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/ledgers", get(ledgers::get_ledgers))
        .route("/v1/ledgers/:staff_id", get(ledgers::get_ledger))
        .route("/v1/stats", get(stats::get_stats))
        .route(
            "/v1/events/:event_id/financials",
            get(events::get_event_financials),
        )
        .route("/v1/transactions", get(transactions::get_transactions))
        .route("/v1/settlements/plan", post(settlements::plan_settlement))
        .route("/v1/advances/plan", post(settlements::plan_advance))
        .layer(cors)
        .with_state(state)
}
