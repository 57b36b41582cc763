use std::sync::Arc;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{OrderSummary, OrderWithEvent, Paginated};
use crate::repository::{EventRepository, OrderRepository};

/// Read-side composition over the order and event stores. Buyer listings
/// resolve each order's event reference to full detail for display; no
/// caching, every call hits the stores.
pub struct OrderQueryService {
    orders: Arc<dyn OrderRepository>,
    events: Arc<dyn EventRepository>,
}

impl OrderQueryService {
    pub fn new(orders: Arc<dyn OrderRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { orders, events }
    }

    pub async fn orders_by_buyer(
        &self,
        buyer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<OrderWithEvent>, StoreError> {
        let page = self.orders.find_by_buyer(buyer_id, page, page_size).await?;

        let mut data = Vec::with_capacity(page.data.len());
        for order in page.data {
            let event = match order.event_id {
                Some(event_id) => self.events.get_event(event_id).await?,
                None => None,
            };
            data.push(OrderWithEvent { order, event });
        }

        Ok(Paginated {
            data,
            total_pages: page.total_pages,
        })
    }

    pub async fn orders_by_event(
        &self,
        event_id: Uuid,
        search: &str,
    ) -> Result<Vec<OrderSummary>, StoreError> {
        self.orders.find_by_event(event_id, search).await
    }
}
