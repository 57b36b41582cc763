use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use tessera_core::error::StoreError;
use tessera_core::models::Event;
use tessera_core::repository::EventRepository;

pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    title: String,
    price: String,
    is_free: bool,
    organizer_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        let row: Option<EventRow> = sqlx::query_as(
            "SELECT id, title, price, is_free, organizer_id, created_at
             FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(|row| Event {
            id: row.id,
            title: row.title,
            price: row.price,
            is_free: row.is_free,
            organizer_id: row.organizer_id,
            created_at: row.created_at,
        }))
    }
}
