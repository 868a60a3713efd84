use crate::api::AppState;
use crate::domain::{StaffCategory, StaffId};
use crate::engine::{ClassifiedEarning, CoveredEvent, LedgerEntry, LedgerItem, LedgerPayment};
use crate::error::AppError;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgersQuery {
    pub debtors_only: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgersResponse {
    pub snapshot_key: String,
    pub ledgers: Vec<LedgerDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDto {
    pub staff_id: String,
    pub name: String,
    pub category: StaffCategory,
    pub total_earned: String,
    pub total_paid: String,
    pub balance: String,
    pub history: Vec<HistoryItemDto>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryItemDto {
    Earning(EarningDto),
    Payment(PaymentDto),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningDto {
    pub id: String,
    pub title: String,
    pub date: String,
    pub amount: String,
    pub paid_amount: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: String,
    pub title: String,
    pub date: String,
    pub amount: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub covered_events: Vec<CoveredEventDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveredEventDto {
    pub earning_id: String,
    pub title: String,
    pub date: String,
    pub total_amount: String,
    pub covered_amount: String,
}

pub async fn get_ledgers(
    Query(params): Query<LedgersQuery>,
    State(state): State<AppState>,
) -> Result<Json<LedgersResponse>, AppError> {
    let compiled = state.orchestrator.compiled().await?;
    let debtors_only = params.debtors_only.unwrap_or(false);

    let ledgers = compiled
        .book
        .entries()
        .iter()
        .filter(|e| !debtors_only || e.is_debtor())
        .map(LedgerDto::from)
        .collect();

    Ok(Json(LedgersResponse {
        snapshot_key: compiled.key.to_string(),
        ledgers,
    }))
}

pub async fn get_ledger(
    Path(staff_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LedgerDto>, AppError> {
    let staff_id = StaffId::new(staff_id);
    let compiled = state.orchestrator.compiled().await?;

    compiled
        .book
        .ledger_for(&staff_id)
        .map(|entry| Json(LedgerDto::from(entry)))
        .ok_or_else(|| AppError::NotFound(format!("Unknown staff member: {}", staff_id)))
}

impl From<&LedgerEntry> for LedgerDto {
    fn from(entry: &LedgerEntry) -> Self {
        LedgerDto {
            staff_id: entry.staff_id.to_string(),
            name: entry.name.clone(),
            category: entry.category,
            total_earned: entry.total_earned.to_canonical_string(),
            total_paid: entry.total_paid.to_canonical_string(),
            balance: entry.balance.to_canonical_string(),
            history: entry.history.iter().map(HistoryItemDto::from).collect(),
        }
    }
}

impl From<&LedgerItem> for HistoryItemDto {
    fn from(item: &LedgerItem) -> Self {
        match item {
            LedgerItem::Earning(e) => HistoryItemDto::Earning(EarningDto::from(e)),
            LedgerItem::Payment(p) => HistoryItemDto::Payment(PaymentDto::from(p)),
        }
    }
}

impl From<&ClassifiedEarning> for EarningDto {
    fn from(e: &ClassifiedEarning) -> Self {
        EarningDto {
            id: e.id.to_string(),
            title: e.title.clone(),
            date: e.date.to_string(),
            amount: e.amount.to_canonical_string(),
            paid_amount: e.paid_amount.to_canonical_string(),
            status: e.status.to_string(),
        }
    }
}

impl From<&LedgerPayment> for PaymentDto {
    fn from(p: &LedgerPayment) -> Self {
        PaymentDto {
            id: p.id.to_string(),
            title: p.title.clone(),
            date: p.date.to_string(),
            amount: p.amount.to_canonical_string(),
            kind: p.kind.to_string(),
            method: p.method.map(|m| m.to_string()),
            note: p.note.clone(),
            covered_events: p.covered_events.iter().map(CoveredEventDto::from).collect(),
        }
    }
}

impl From<&CoveredEvent> for CoveredEventDto {
    fn from(c: &CoveredEvent) -> Self {
        CoveredEventDto {
            earning_id: c.earning_id.to_string(),
            title: c.title.clone(),
            date: c.date.to_string(),
            total_amount: c.total_amount.to_canonical_string(),
            covered_amount: c.covered_amount.to_canonical_string(),
        }
    }
}
