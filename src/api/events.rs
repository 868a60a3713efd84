use crate::api::AppState;
use crate::domain::EventId;
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFinancialsResponse {
    pub event_id: String,
    pub title: String,
    pub price: String,
    pub advance: String,
    pub outstanding: String,
    pub staff_cost: String,
    pub net_margin: String,
    pub attended_count: usize,
}

pub async fn get_event_financials(
    Path(event_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<EventFinancialsResponse>, AppError> {
    let event_id = EventId::new(event_id);
    let fin = state
        .orchestrator
        .event_financials(&event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Unknown event: {}", event_id)))?;

    Ok(Json(EventFinancialsResponse {
        event_id: fin.event_id.to_string(),
        title: fin.title,
        price: fin.price.to_canonical_string(),
        advance: fin.advance.to_canonical_string(),
        outstanding: fin.outstanding.to_canonical_string(),
        staff_cost: fin.staff_cost.to_canonical_string(),
        net_margin: fin.net_margin.to_canonical_string(),
        attended_count: fin.attended_count,
    }))
}
