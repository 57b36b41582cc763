//! Stripe integration via REST API (no SDK dependency): checkout-session
//! creation and webhook signature verification.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

use tessera_core::payment::{
    CheckoutSession, CheckoutSessionRequest, PaymentError, PaymentGateway,
};

const CHECKOUT_SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Events older than this are rejected to prevent replay.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("malformed stripe-signature header")]
    MalformedHeader,

    #[error("webhook signature mismatch")]
    Mismatch,

    #[error("webhook timestamp outside tolerance")]
    StaleTimestamp,
}

/// Stripe-backed [`PaymentGateway`]. Constructed once at startup from
/// config and injected into the API state; no module-level client.
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let unit_amount = request.unit_amount.to_string();
        let quantity = request.quantity.to_string();
        let event_id = request.event_id.to_string();
        let buyer_id = request.buyer_id.to_string();

        let response: serde_json::Value = self
            .client
            .post(CHECKOUT_SESSIONS_URL)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("mode", "payment"),
                ("line_items[0][price_data][currency]", &request.currency),
                ("line_items[0][price_data][unit_amount]", &unit_amount),
                (
                    "line_items[0][price_data][product_data][name]",
                    &request.product_name,
                ),
                ("line_items[0][quantity]", &quantity),
                ("metadata[eventId]", &event_id),
                ("metadata[buyerId]", &buyer_id),
                ("success_url", &request.success_url),
                ("cancel_url", &request.cancel_url),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        match (response["id"].as_str(), response["url"].as_str()) {
            (Some(id), Some(url)) => Ok(CheckoutSession {
                id: id.to_string(),
                url: url.to_string(),
            }),
            _ => {
                let reason = response["error"]["message"]
                    .as_str()
                    .unwrap_or("no session url in response")
                    .to_string();
                Err(PaymentError::SessionRejected(reason))
            }
        }
    }
}

/// Verify a Stripe webhook signature (HMAC-SHA256).
///
/// The header carries `t=<unix>,v1=<hex>`; the signed payload is
/// `"{t}.{raw body}"`, so the body must reach this function unparsed.
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
) -> Result<(), SignatureError> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err(SignatureError::MalformedHeader);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::MalformedHeader)?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    // Constant-time comparison via hmac::verify_slice
    let sig_bytes = hex::decode(signature).map_err(|_| SignatureError::MalformedHeader)?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| SignatureError::Mismatch)?;

    let ts: i64 = timestamp
        .parse()
        .map_err(|_| SignatureError::MalformedHeader)?;
    let now = chrono::Utc::now().timestamp();
    if (now - ts).abs() > SIGNATURE_TOLERANCE_SECS {
        return Err(SignatureError::StaleTimestamp);
    }

    Ok(())
}

/// Build the `stripe-signature` header value for `payload`. Test helper,
/// also handy for local webhook simulation.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!(
        "t={timestamp},v1={}",
        hex::encode(mac.finalize().into_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    #[test]
    fn test_valid_signature_passes() {
        let body = br#"{"id":"evt_1","type":"checkout.session.completed"}"#;
        let header = sign_payload(body, SECRET, chrono::Utc::now().timestamp());
        assert!(verify_webhook_signature(body, &header, SECRET).is_ok());
    }

    #[test]
    fn test_tampered_body_fails() {
        let body = br#"{"id":"evt_1"}"#;
        let header = sign_payload(body, SECRET, chrono::Utc::now().timestamp());
        let tampered = br#"{"id":"evt_2"}"#;
        assert!(matches!(
            verify_webhook_signature(tampered, &header, SECRET),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let body = br#"{"id":"evt_1"}"#;
        let header = sign_payload(body, "whsec_other", chrono::Utc::now().timestamp());
        assert!(matches!(
            verify_webhook_signature(body, &header, SECRET),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn test_stale_timestamp_fails() {
        let body = br#"{"id":"evt_1"}"#;
        let stale = chrono::Utc::now().timestamp() - 600;
        let header = sign_payload(body, SECRET, stale);
        assert!(matches!(
            verify_webhook_signature(body, &header, SECRET),
            Err(SignatureError::StaleTimestamp)
        ));
    }

    #[test]
    fn test_garbage_header_fails() {
        let body = br#"{}"#;
        assert!(matches!(
            verify_webhook_signature(body, "not-a-signature", SECRET),
            Err(SignatureError::MalformedHeader)
        ));
        assert!(matches!(
            verify_webhook_signature(body, "t=123,v1=zzzz", SECRET),
            Err(SignatureError::MalformedHeader)
        ));
    }
}
