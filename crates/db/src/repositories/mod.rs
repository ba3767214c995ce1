//! SQL access for the `quotes` and `plants` tables.
//!
//! Repositories are stateless: every function takes a [`sqlx::PgExecutor`]
//! so the same query runs against the pool or inside a transaction.

mod plant_repo;
mod quote_repo;

pub use plant_repo::PlantRepo;
pub use quote_repo::QuoteRepo;

/// Channel every mutation notifies on.
pub const CHANGES_CHANNEL: &str = "solar_changes";

/// Emit a change notification on [`CHANGES_CHANNEL`].
///
/// Inside a transaction the notification is delivered on commit and
/// dropped on rollback.
pub async fn notify_change<'e, E>(
    executor: E,
    event: &solar_events::ChangeEvent,
) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let payload = serde_json::to_string(event).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
    sqlx::query("SELECT pg_notify($1, $2)")
        .bind(CHANGES_CHANNEL)
        .bind(payload)
        .execute(executor)
        .await?;
    Ok(())
}
