use crate::api::AppState;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub snapshot_key: String,
    pub total_income: String,
    pub total_expense: String,
    pub total_paid_out: String,
    pub total_debt: String,
    pub net_balance: String,
    pub debtor_count: usize,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let compiled = state.orchestrator.compiled().await?;
    let stats = &compiled.stats;

    Ok(Json(StatsResponse {
        snapshot_key: compiled.key.to_string(),
        total_income: stats.total_income.to_canonical_string(),
        total_expense: stats.total_expense.to_canonical_string(),
        total_paid_out: stats.total_paid_out.to_canonical_string(),
        total_debt: stats.total_debt.to_canonical_string(),
        net_balance: stats.net_balance.to_canonical_string(),
        debtor_count: stats.debtor_count,
    }))
}
