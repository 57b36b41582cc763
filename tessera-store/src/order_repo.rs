use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tessera_core::error::StoreError;
use tessera_core::models::{total_pages, NewOrder, Order, OrderSummary, Paginated};
use tessera_core::repository::{InsertOutcome, OrderRepository};

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    stripe_id: String,
    event_id: Option<Uuid>,
    buyer_id: Option<Uuid>,
    total_amount: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            stripe_id: row.stripe_id,
            event_id: row.event_id,
            buyer_id: row.buyer_id,
            total_amount: row.total_amount,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    order_id: Uuid,
    total_amount: String,
    created_at: chrono::DateTime<chrono::Utc>,
    event_title: Option<String>,
    event_id: Uuid,
    buyer_full_name: Option<String>,
}

impl From<SummaryRow> for OrderSummary {
    fn from(row: SummaryRow) -> Self {
        OrderSummary {
            order_id: row.order_id,
            total_amount: row.total_amount,
            created_at: row.created_at,
            event_title: row.event_title.unwrap_or_default(),
            event_id: row.event_id,
            buyer_full_name: row.buyer_full_name.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert_order(&self, order: &NewOrder) -> Result<InsertOutcome, StoreError> {
        // Both writers of a redelivered callback attempt the insert;
        // ON CONFLICT lets exactly one create and the other read back the
        // winner. No pre-check, so there is no TOCTOU window.
        let inserted: Option<OrderRow> = sqlx::query_as(
            r#"
            INSERT INTO orders (id, stripe_id, event_id, buyer_id, total_amount)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (stripe_id) DO NOTHING
            RETURNING id, stripe_id, event_id, buyer_id, total_amount, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&order.stripe_id)
        .bind(order.event_id)
        .bind(order.buyer_id)
        .bind(&order.total_amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Created(row.into()));
        }

        let existing: OrderRow = sqlx::query_as(
            "SELECT id, stripe_id, event_id, buyer_id, total_amount, created_at
             FROM orders WHERE stripe_id = $1",
        )
        .bind(&order.stripe_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(InsertOutcome::AlreadyExists(existing.into()))
    }

    async fn find_by_buyer(
        &self,
        buyer_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Paginated<Order>, StoreError> {
        let page = page.max(1);
        let offset = (page as i64 - 1) * page_size as i64;

        let rows: Vec<OrderRow> = sqlx::query_as(
            "SELECT id, stripe_id, event_id, buyer_id, total_amount, created_at
             FROM orders
             WHERE buyer_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(buyer_id)
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE buyer_id = $1")
            .bind(buyer_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Paginated {
            data: rows.into_iter().map(Order::from).collect(),
            total_pages: total_pages(count as u64, page_size),
        })
    }

    async fn find_by_event(
        &self,
        event_id: Uuid,
        search: &str,
    ) -> Result<Vec<OrderSummary>, StoreError> {
        // Plain composed query: filter by event, then a case-insensitive
        // substring match on the joined buyer name. An empty search keeps
        // rows whose buyer is unknown (orphaned metadata).
        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT o.id AS order_id,
                   o.total_amount,
                   o.created_at,
                   e.title AS event_title,
                   o.event_id AS event_id,
                   u.first_name || ' ' || u.last_name AS buyer_full_name
            FROM orders o
            LEFT JOIN users u ON u.id = o.buyer_id
            LEFT JOIN events e ON e.id = o.event_id
            WHERE o.event_id = $1
              AND ($2 = '' OR u.first_name || ' ' || u.last_name ILIKE '%' || $2 || '%')
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(event_id)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(OrderSummary::from).collect())
    }
}
