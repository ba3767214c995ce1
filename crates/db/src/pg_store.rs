//! PostgreSQL [`DocumentStore`] backend.
//!
//! Every mutation runs in a transaction that also issues a `pg_notify` on
//! [`CHANGES_CHANNEL`](crate::repositories::CHANGES_CHANNEL). Local
//! subscribers learn about changes through
//! [`listen_for_changes`](crate::listener::listen_for_changes), the same
//! path that carries writes made by other server instances.

use async_trait::async_trait;
use solar_core::plant::Plant;
use solar_core::quote::{NewQuote, Quote};
use solar_core::status::{Milestone, PlantStatus};
use solar_events::{ChangeEvent, Collection};

use crate::error::StoreResult;
use crate::repositories::{notify_change, PlantRepo, QuoteRepo};
use crate::store::{new_record_id, DocumentStore};
use crate::DbPool;

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_quote(&self, quote: NewQuote) -> StoreResult<Quote> {
        let mut tx = self.pool.begin().await?;
        let row = QuoteRepo::create(&mut *tx, &new_record_id(), &quote).await?;
        notify_change(&mut *tx, &ChangeEvent::created(Collection::Quotes, row.id.clone())).await?;
        tx.commit().await?;
        Ok(row.into())
    }

    async fn list_quotes(&self) -> StoreResult<Vec<Quote>> {
        let rows = QuoteRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn find_quote(&self, id: &str) -> StoreResult<Option<Quote>> {
        Ok(QuoteRepo::find_by_id(&self.pool, id).await?.map(Quote::from))
    }

    async fn delete_quote(&self, id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let removed = QuoteRepo::delete(&mut *tx, id).await?.is_some();
        if removed {
            notify_change(&mut *tx, &ChangeEvent::deleted(Collection::Quotes, id)).await?;
        }
        tx.commit().await?;
        Ok(removed)
    }

    async fn promote_quote(&self, id: &str) -> StoreResult<Option<Plant>> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken by DELETE serialises concurrent approvals; the
        // loser sees no row and creates nothing.
        let Some(row) = QuoteRepo::delete(&mut *tx, id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };
        let quote = Quote::from(row);
        let plant = Plant::from_approved_quote(new_record_id(), &quote);
        let created = PlantRepo::create(&mut *tx, &plant).await?;

        notify_change(&mut *tx, &ChangeEvent::created(Collection::Plants, created.id.clone()))
            .await?;
        notify_change(&mut *tx, &ChangeEvent::deleted(Collection::Quotes, id)).await?;
        tx.commit().await?;

        Ok(Some(created.into()))
    }

    async fn list_plants(&self) -> StoreResult<Vec<Plant>> {
        let rows = PlantRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(Plant::from).collect())
    }

    async fn find_plant(&self, id: &str) -> StoreResult<Option<Plant>> {
        Ok(PlantRepo::find_by_id(&self.pool, id).await?.map(Plant::from))
    }

    async fn update_milestone(
        &self,
        id: &str,
        milestone: Milestone,
        status: PlantStatus,
    ) -> StoreResult<Option<Plant>> {
        let mut tx = self.pool.begin().await?;
        let updated = PlantRepo::set_milestone(&mut *tx, id, milestone, status).await?;
        if updated.is_some() {
            notify_change(&mut *tx, &ChangeEvent::updated(Collection::Plants, id)).await?;
        }
        tx.commit().await?;
        Ok(updated.map(Plant::from))
    }

    async fn delete_plant(&self, id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let removed = PlantRepo::delete(&mut *tx, id).await?;
        if removed {
            notify_change(&mut *tx, &ChangeEvent::deleted(Collection::Plants, id)).await?;
        }
        tx.commit().await?;
        Ok(removed)
    }
}
