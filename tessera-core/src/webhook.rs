use serde::Deserialize;
use uuid::Uuid;

use crate::models::NewOrder;

/// Event type that triggers order persistence; everything else is
/// acknowledged as a no-op.
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub data: EventData,
}

#[derive(Debug, Deserialize)]
pub struct EventData {
    pub object: SessionObject,
}

/// The checkout-session object as delivered in the webhook payload.
/// `amount_total` is absent for some session shapes; metadata is whatever
/// was attached at session creation, echoed back verbatim.
#[derive(Debug, Deserialize)]
pub struct SessionObject {
    pub id: String,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: Option<SessionMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
    #[serde(rename = "buyerId")]
    pub buyer_id: Option<String>,
}

impl SessionObject {
    /// Map a completed session to an order insert. Missing or unparseable
    /// metadata references are stored as NULL rather than failing the
    /// callback; the payload is still acknowledged.
    pub fn into_new_order(self) -> NewOrder {
        let metadata = self.metadata.unwrap_or_default();
        NewOrder {
            stripe_id: self.id,
            event_id: parse_reference(metadata.event_id.as_deref()),
            buyer_id: parse_reference(metadata.buyer_id.as_deref()),
            total_amount: format_total_amount(self.amount_total),
        }
    }
}

fn parse_reference(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|value| Uuid::parse_str(value).ok())
}

/// Minor units to decimal string: 2550 -> "25.5", 2500 -> "25",
/// 2555 -> "25.55", absent -> "0".
pub fn format_total_amount(amount_total: Option<i64>) -> String {
    let Some(minor) = amount_total else {
        return "0".to_string();
    };
    // Sign comes from the raw amount: units alone would drop it for
    // values in -99..=-1.
    let sign = if minor < 0 { "-" } else { "" };
    let units = (minor / 100).abs();
    let cents = (minor % 100).abs();
    if cents == 0 {
        format!("{sign}{units}")
    } else if cents % 10 == 0 {
        format!("{sign}{units}.{}", cents / 10)
    } else {
        format!("{sign}{units}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total_amount() {
        assert_eq!(format_total_amount(Some(2550)), "25.5");
        assert_eq!(format_total_amount(Some(2500)), "25");
        assert_eq!(format_total_amount(Some(2555)), "25.55");
        assert_eq!(format_total_amount(Some(5)), "0.05");
        assert_eq!(format_total_amount(None), "0");
    }

    #[test]
    fn test_format_total_amount_keeps_sign_on_refund_amounts() {
        assert_eq!(format_total_amount(Some(-50)), "-0.5");
        assert_eq!(format_total_amount(Some(-5)), "-0.05");
        assert_eq!(format_total_amount(Some(-2550)), "-25.5");
        assert_eq!(format_total_amount(Some(-2500)), "-25");
    }

    #[test]
    fn test_completed_session_deserializes() {
        let event_id = Uuid::new_v4();
        let buyer_id = Uuid::new_v4();
        let payload = serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_abc",
                    "amount_total": 2550,
                    "metadata": {
                        "eventId": event_id.to_string(),
                        "buyerId": buyer_id.to_string(),
                    }
                }
            }
        });

        let event: StripeEvent = serde_json::from_value(payload).unwrap();
        assert_eq!(event.type_, CHECKOUT_COMPLETED);

        let order = event.data.object.into_new_order();
        assert_eq!(order.stripe_id, "cs_test_abc");
        assert_eq!(order.event_id, Some(event_id));
        assert_eq!(order.buyer_id, Some(buyer_id));
        assert_eq!(order.total_amount, "25.5");
    }

    #[test]
    fn test_missing_metadata_yields_orphaned_order() {
        let payload = serde_json::json!({
            "id": "evt_2",
            "type": "checkout.session.completed",
            "data": { "object": { "id": "cs_test_orphan" } }
        });

        let event: StripeEvent = serde_json::from_value(payload).unwrap();
        let order = event.data.object.into_new_order();
        assert_eq!(order.event_id, None);
        assert_eq!(order.buyer_id, None);
        assert_eq!(order.total_amount, "0");
    }
}
