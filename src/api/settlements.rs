//! Settlement and advance planning. Nothing here writes: the caller persists
//! the returned draft.

use crate::api::AppState;
use crate::domain::{EventId, PaymentMethod, StaffId};
use crate::engine::PaymentDraft;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettlementRequest {
    pub staff_id: String,
    /// Earning ids to settle; empty settles the full balance.
    #[serde(default)]
    pub selection: Vec<String>,
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanAdvanceRequest {
    pub staff_id: String,
    /// Amount as entered, either a JSON string or number.
    pub amount: serde_json::Value,
    pub method: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub draft_id: String,
    pub staff_id: String,
    pub amount: String,
    pub date: String,
    pub method: String,
    pub kind: String,
    pub note: String,
    pub covered_titles: Vec<String>,
    pub basis: DraftBasisDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBasisDto {
    pub snapshot_key: String,
    pub balance: String,
}

pub async fn plan_settlement(
    State(state): State<AppState>,
    Json(req): Json<PlanSettlementRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let staff_id = parse_staff_id(&req.staff_id)?;
    let method = resolve_method(&state, req.method.as_deref())?;
    let selection: Vec<EventId> = req.selection.into_iter().map(EventId::new).collect();

    let draft = state
        .orchestrator
        .plan_settlement(&staff_id, &selection, method, today())
        .await?;

    Ok(Json(DraftResponse::from(draft)))
}

pub async fn plan_advance(
    State(state): State<AppState>,
    Json(req): Json<PlanAdvanceRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let staff_id = parse_staff_id(&req.staff_id)?;
    let method = resolve_method(&state, req.method.as_deref())?;
    let raw_amount = match &req.amount {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(AppError::BadRequest(format!(
                "amount must be a string or number, got {}",
                other
            )))
        }
    };

    let draft = state
        .orchestrator
        .plan_advance(&staff_id, &raw_amount, method, req.note.as_deref(), today())
        .await?;

    Ok(Json(DraftResponse::from(draft)))
}

fn parse_staff_id(raw: &str) -> Result<StaffId, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("staffId must not be empty".into()));
    }
    Ok(StaffId::from(raw))
}

fn resolve_method(state: &AppState, raw: Option<&str>) -> Result<PaymentMethod, AppError> {
    match raw {
        None => Ok(state.config.default_payment_method),
        Some(raw) => raw.parse::<PaymentMethod>().map_err(|_| {
            AppError::BadRequest(format!("method must be cash or transfer, got {}", raw))
        }),
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl From<PaymentDraft> for DraftResponse {
    fn from(d: PaymentDraft) -> Self {
        DraftResponse {
            draft_id: d.draft_id.to_string(),
            staff_id: d.staff_id.to_string(),
            amount: d.amount.to_canonical_string(),
            date: d.date.to_string(),
            method: d.method.to_string(),
            kind: d.kind.to_string(),
            note: d.note,
            covered_titles: d.covered_titles,
            basis: DraftBasisDto {
                snapshot_key: d.basis.snapshot_key.to_string(),
                balance: d.basis.balance.to_canonical_string(),
            },
        }
    }
}
