use crate::api::AppState;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the snapshot source can be read.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.orchestrator.snapshot().await?;
    Ok(Json(serde_json::json!({
        "status": "ready",
        "ledgerCache": state.orchestrator.cache().is_enabled(),
    })))
}
