use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use tessera_core::models::Event;

/// GET /v1/events/{id}
/// Event detail for display alongside an order.
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = state
        .events
        .get_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("event {event_id} not found")))?;
    Ok(Json(event))
}
