use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("provider rejected checkout session: {0}")]
    SessionRejected(String),

    #[error("provider transport error: {0}")]
    Transport(String),
}

/// Everything the provider needs to host a one-item checkout.
///
/// `event_id`/`buyer_id` travel as opaque session metadata and must come
/// back verbatim in the completion webhook; they are how the reconciler
/// ties the payment to an event and buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub product_name: String,
    pub unit_amount: i64,
    pub currency: String,
    pub quantity: u32,
    pub event_id: Uuid,
    pub buyer_id: Uuid,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a provider-hosted checkout session and return its redirect
    /// target. No local writes happen here; no order exists until the
    /// completion webhook fires.
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}
