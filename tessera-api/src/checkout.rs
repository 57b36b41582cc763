use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use tessera_core::checkout;
use tessera_core::payment::PaymentError;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub event_id: Uuid,
    pub buyer_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Provider-hosted payment page; the caller redirects the buyer here.
    pub url: String,
}

/// POST /v1/checkout
/// Create a provider checkout session for one ticket. Writes nothing
/// locally; the order is recorded when the completion webhook arrives.
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let event = state
        .events
        .get_event(request.event_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("event {} not found", request.event_id)))?;

    let session_request = checkout::build_session_request(
        &event,
        request.buyer_id,
        &state.checkout.currency,
        &state.checkout.base_url,
    )
    .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let session = state
        .gateway
        .create_checkout_session(&session_request)
        .await
        .map_err(|e| match e {
            PaymentError::InvalidAmount(msg) => AppError::ValidationError(msg),
            other => AppError::PaymentSessionError(other.to_string()),
        })?;

    tracing::info!(
        event_id = %event.id,
        buyer_id = %request.buyer_id,
        session_id = %session.id,
        "Created checkout session"
    );

    Ok(Json(CheckoutResponse { url: session.url }))
}
