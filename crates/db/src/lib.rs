//! Solar Control data store client.
//!
//! - [`DocumentStore`] - the store seam: CRUD over the `quotes` and
//!   `plants` collections plus the atomic quote-to-plant promotion.
//! - [`MemoryStore`] / [`PgStore`] - in-process and PostgreSQL backends.
//! - [`SnapshotFeed`] - ordered per-collection snapshots refreshed on every
//!   write.
//! - [`LifecycleService`] - quote creation, approval, milestone updates and
//!   deletes.

pub mod error;
pub mod feed;
pub mod lifecycle;
pub mod listener;
pub mod memory_store;
pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use error::{StoreError, StoreResult};
pub use feed::{Snapshot, SnapshotFeed};
pub use lifecycle::LifecycleService;
pub use memory_store::MemoryStore;
pub use pg_store::PgStore;
pub use store::DocumentStore;

pub type DbPool = sqlx::PgPool;

/// Default pool size when `DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> StoreResult<()> {
    sqlx::migrate!("../../db/migrations").run(pool).await?;
    Ok(())
}
