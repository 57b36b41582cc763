use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published event, read-only to the order core.
///
/// `price` is a decimal string (e.g. "25.50") and is ignored whenever
/// `is_free` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub price: String,
    pub is_free: bool,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A registered user; only the fields the buyer-name search needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A completed ticket purchase, written exactly once by the webhook
/// reconciler. `stripe_id` carries the provider's checkout-session id and
/// is unique; it is the idempotency key for redelivered callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub stripe_id: String,
    pub event_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub total_amount: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an order; `id` and `created_at` are assigned on
/// persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub stripe_id: String,
    pub event_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub total_amount: String,
}

/// Denormalized row returned by the by-event listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub total_amount: String,
    pub created_at: DateTime<Utc>,
    pub event_title: String,
    pub event_id: Uuid,
    pub buyer_full_name: String,
}

/// An order with its event reference resolved for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithEvent {
    pub order: Order,
    pub event: Option<Event>,
}

/// One page of results plus the page count for the whole result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total_pages: u32,
}

/// `ceil(count / page_size)`; zero pages for an empty result set.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(7, 3), 3);
        assert_eq!(total_pages(6, 3), 2);
        assert_eq!(total_pages(0, 3), 0);
        assert_eq!(total_pages(1, 6), 1);
    }

    #[test]
    fn test_full_name_joins_with_space() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");
    }
}
