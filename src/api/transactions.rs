use crate::api::AppState;
use crate::engine::{journal_to_csv, JournalEntry, JournalFilter, JournalFlow};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub search: Option<String>,
    /// `all`, `income` or `expense`
    pub flow: Option<String>,
    /// `json` (default) or `csv`
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: String,
    pub date: String,
    pub title: String,
    pub amount: String,
    pub flow: String,
    pub category: String,
}

pub async fn get_transactions(
    Query(params): Query<TransactionsQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let flow = match params.flow.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(JournalFlow::from_str(raw).map_err(|_| {
            AppError::BadRequest(format!("flow must be all, income or expense, got {}", raw))
        })?),
    };
    let csv = match params.format.as_deref() {
        None | Some("json") => false,
        Some("csv") => true,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "format must be json or csv, got {}",
                other
            )))
        }
    };

    let filter = JournalFilter {
        search: params.search,
        flow,
    };
    let entries = state.orchestrator.journal(&filter).await?;

    if csv {
        let body = journal_to_csv(&entries)?;
        return Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response());
    }

    let transactions = entries.iter().map(TransactionDto::from).collect();
    Ok(Json(TransactionsResponse { transactions }).into_response())
}

impl From<&JournalEntry> for TransactionDto {
    fn from(e: &JournalEntry) -> Self {
        TransactionDto {
            id: e.id.clone(),
            date: e.date.to_string(),
            title: e.title.clone(),
            amount: e.amount.to_canonical_string(),
            flow: e.flow.to_string(),
            category: e.category.clone(),
        }
    }
}
