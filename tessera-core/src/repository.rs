use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Event, NewOrder, Order, OrderSummary, Paginated};

/// Outcome of an order insert. Redelivered webhooks race on the same
/// `stripe_id`; exactly one writer creates, the rest observe the existing
/// row. Both are success from the provider's point of view.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Created(Order),
    AlreadyExists(Order),
}

impl InsertOutcome {
    pub fn order(&self) -> &Order {
        match self {
            InsertOutcome::Created(order) | InsertOutcome::AlreadyExists(order) => order,
        }
    }
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order. Duplicate `stripe_id` must be resolved at the
    /// storage layer (unique constraint), never by pre-checking.
    async fn insert_order(&self, order: &NewOrder) -> Result<InsertOutcome, StoreError>;

    /// Orders for one buyer, newest first. `page` is 1-based.
    async fn find_by_buyer(
        &self,
        buyer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<Order>, StoreError>;

    /// Orders for one event, newest first, filtered by a case-insensitive
    /// substring match of `search` against the buyer's full name.
    async fn find_by_event(
        &self,
        event_id: Uuid,
        search: &str,
    ) -> Result<Vec<OrderSummary>, StoreError>;
}

/// Repository trait for event lookups (the event store itself is owned
/// elsewhere; this core only reads).
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, StoreError>;
}
