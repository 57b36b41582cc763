use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;

use crate::state::AppState;
use tessera_core::repository::InsertOutcome;
use tessera_core::webhook::{StripeEvent, CHECKOUT_COMPLETED};

/// POST /v1/webhooks/stripe
/// Receive payment lifecycle callbacks from Stripe.
///
/// Must receive the raw body (not pre-parsed JSON): the HMAC signature is
/// computed over the exact bytes. Only signature failures answer 4xx;
/// every verified payload is acknowledged 200 so the provider stops
/// redelivering, including when persistence fails (logged for manual
/// reconciliation).
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    // 1. Signature checkpoint: header present and HMAC valid.
    let sig_header = match headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
    {
        Some(s) => s,
        None => {
            tracing::warn!("Missing stripe-signature header");
            return reject("missing stripe-signature header");
        }
    };

    if let Err(e) =
        tessera_payments::verify_webhook_signature(&body, sig_header, &state.webhook_secret)
    {
        tracing::warn!(error = %e, "Webhook signature verification failed");
        return reject(&e.to_string());
    }

    // 2. Dispatch on event type. A verified body that does not parse as a
    // provider event is permanently malformed; acknowledge it, since a 4xx
    // would make the provider redeliver the same body forever.
    let event: StripeEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse verified webhook payload");
            return (StatusCode::OK, Json(json!({ "message": "ignored" })));
        }
    };

    tracing::info!(event_id = %event.id, event_type = %event.type_, "Received Stripe webhook");

    if event.type_ != CHECKOUT_COMPLETED {
        return (StatusCode::OK, Json(json!({ "message": "ignored" })));
    }

    // 3. Extract and persist exactly once; the unique constraint on
    // stripe_id resolves concurrent redeliveries.
    let new_order = event.data.object.into_new_order();
    match state.orders.insert_order(&new_order).await {
        Ok(InsertOutcome::Created(order)) => {
            tracing::info!(order_id = %order.id, stripe_id = %order.stripe_id, "Order recorded");
            (StatusCode::OK, Json(json!({ "message": "OK", "order": order })))
        }
        Ok(InsertOutcome::AlreadyExists(order)) => {
            tracing::info!(stripe_id = %order.stripe_id, "Duplicate webhook delivery, order already recorded");
            (StatusCode::OK, Json(json!({ "message": "OK", "order": order })))
        }
        Err(e) => {
            // Acknowledged anyway: a non-2xx here would trigger an
            // indefinite redelivery storm for a permanently failing row.
            tracing::error!(error = %e, stripe_id = %new_order.stripe_id, "Failed to persist order from webhook");
            (StatusCode::OK, Json(json!({ "message": "OK" })))
        }
    }
}

fn reject(reason: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Webhook error", "error": reason })),
    )
}
