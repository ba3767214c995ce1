use solar_core::error::CoreError;

/// Errors surfaced by store and lifecycle operations.
///
/// Validation failures arrive as [`StoreError::Core`] before any store call
/// is made; everything else is a transport or database failure that callers
/// must surface. Nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level error from `solar_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failure at startup.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::Validation(_)))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
