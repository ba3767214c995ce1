//! The document store seam.

use async_trait::async_trait;
use solar_core::plant::Plant;
use solar_core::quote::{NewQuote, Quote};
use solar_core::status::{Milestone, PlantStatus};

use crate::error::StoreResult;

/// A shared store holding the `quotes` and `plants` collections.
///
/// Implementations publish a change event after every successful
/// mutation so that [`SnapshotFeed`](crate::feed::SnapshotFeed)
/// subscribers receive a refreshed snapshot. Lists are ordered by
/// `created_at` descending, newest first, ties broken by id descending.
///
/// Lookups and mutations that reference an absent id are not errors: they
/// return `None` / `false`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Verify the store is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    /// Persist a new quote with `approved = false`. A `created_at` of
    /// `None` is filled with the store's own current time.
    async fn insert_quote(&self, quote: NewQuote) -> StoreResult<Quote>;

    async fn list_quotes(&self) -> StoreResult<Vec<Quote>>;

    async fn find_quote(&self, id: &str) -> StoreResult<Option<Quote>>;

    /// Remove a quote. Returns `true` if a record was removed.
    async fn delete_quote(&self, id: &str) -> StoreResult<bool>;

    /// Atomically remove the quote and create its plant.
    ///
    /// Either both effects happen or neither does. Returns `None` if the
    /// quote no longer exists, so concurrent approvals of the same quote
    /// create exactly one plant.
    async fn promote_quote(&self, id: &str) -> StoreResult<Option<Plant>>;

    async fn list_plants(&self) -> StoreResult<Vec<Plant>>;

    async fn find_plant(&self, id: &str) -> StoreResult<Option<Plant>>;

    /// Write a single milestone field, leaving every other field untouched.
    async fn update_milestone(
        &self,
        id: &str,
        milestone: Milestone,
        status: PlantStatus,
    ) -> StoreResult<Option<Plant>>;

    /// Remove a plant. Returns `true` if a record was removed.
    async fn delete_plant(&self, id: &str) -> StoreResult<bool>;
}

/// Generate a new opaque record id.
pub fn new_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
