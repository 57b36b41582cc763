pub mod checkout;
pub mod error;
pub mod models;
pub mod payment;
pub mod query;
pub mod repository;
pub mod webhook;

pub use error::StoreError;
pub use models::{Event, NewOrder, Order, OrderSummary, OrderWithEvent, Paginated, User};
pub use repository::{EventRepository, InsertOutcome, OrderRepository};
