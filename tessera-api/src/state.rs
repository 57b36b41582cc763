use std::sync::Arc;

use tessera_core::payment::PaymentGateway;
use tessera_core::query::OrderQueryService;
use tessera_core::repository::{EventRepository, OrderRepository};

/// Checkout deployment parameters: a single currency per deployment, and
/// the storefront origin the provider redirects back to.
#[derive(Clone)]
pub struct CheckoutConfig {
    pub currency: String,
    pub base_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub events: Arc<dyn EventRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub queries: Arc<OrderQueryService>,
    pub checkout: CheckoutConfig,
    pub webhook_secret: String,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        events: Arc<dyn EventRepository>,
        gateway: Arc<dyn PaymentGateway>,
        checkout: CheckoutConfig,
        webhook_secret: String,
    ) -> Self {
        let queries = Arc::new(OrderQueryService::new(orders.clone(), events.clone()));
        Self {
            orders,
            events,
            gateway,
            queries,
            checkout,
            webhook_secret,
        }
    }
}
