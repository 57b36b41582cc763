use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use tessera_core::models::{OrderSummary, OrderWithEvent, Paginated};

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    6
}

#[derive(Debug, Deserialize)]
pub struct BuyerOrdersParams {
    pub buyer_id: Uuid,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct EventOrdersParams {
    #[serde(default)]
    pub search: String,
}

/// GET /v1/orders?buyer_id=&page=&page_size=
/// A buyer's tickets, newest first, with event detail resolved.
pub async fn list_orders_by_buyer(
    State(state): State<AppState>,
    Query(params): Query<BuyerOrdersParams>,
) -> Result<Json<Paginated<OrderWithEvent>>, AppError> {
    let page = state
        .queries
        .orders_by_buyer(params.buyer_id, params.page, params.page_size)
        .await?;
    Ok(Json(page))
}

/// GET /v1/orders/event/{event_id}?search=
/// Buyer roster for one event, optionally filtered by buyer name.
pub async fn list_orders_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(params): Query<EventOrdersParams>,
) -> Result<Json<Vec<OrderSummary>>, AppError> {
    let orders = state
        .queries
        .orders_by_event(event_id, &params.search)
        .await?;
    Ok(Json(orders))
}
