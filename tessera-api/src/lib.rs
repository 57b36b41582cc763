use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod checkout;
pub mod error;
pub mod events;
pub mod orders;
pub mod state;
pub mod webhooks;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/v1/checkout", post(checkout::create_checkout))
        .route("/v1/webhooks/stripe", post(webhooks::handle_stripe_webhook))
        .route("/v1/orders", get(orders::list_orders_by_buyer))
        .route(
            "/v1/orders/event/{event_id}",
            get(orders::list_orders_by_event),
        )
        .route("/v1/events/{id}", get(events::get_event))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
