use thiserror::Error;

/// Persistence-layer failures. The expected duplicate-key case on
/// `stripe_id` is not an error; it surfaces as
/// [`crate::repository::InsertOutcome::AlreadyExists`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("connection error: {0}")]
    Connection(String),
}
