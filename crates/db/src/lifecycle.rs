//! Quote and plant lifecycle operations.
//!
//! Thin orchestration over a [`DocumentStore`]: validation happens here,
//! before any store call, and lookups on absent ids are silent no-ops.

use std::sync::Arc;

use solar_core::plant::Plant;
use solar_core::quote::{CreateQuote, Quote};
use solar_core::status::{Milestone, PlantStatus};

use crate::error::StoreResult;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn DocumentStore>,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Validate and persist a new quote.
    ///
    /// Validation failures return [`CoreError::Validation`] wrapped in
    /// [`StoreError::Core`] without touching the store.
    ///
    /// [`CoreError::Validation`]: solar_core::error::CoreError::Validation
    /// [`StoreError::Core`]: crate::error::StoreError::Core
    pub async fn create_quote(&self, input: CreateQuote) -> StoreResult<Quote> {
        let new_quote = input.validate()?;
        let quote = self.store.insert_quote(new_quote).await?;
        tracing::info!(
            quote_id = %quote.id,
            client = %quote.client_name,
            kwh = quote.kwh,
            "Quote created"
        );
        Ok(quote)
    }

    /// Convert a quote into a plant with every milestone pending.
    ///
    /// Returns `None` when the quote does not exist (already approved or
    /// deleted).
    pub async fn approve_quote(&self, quote_id: &str) -> StoreResult<Option<Plant>> {
        let plant = self.store.promote_quote(quote_id).await?;
        match &plant {
            Some(plant) => tracing::info!(quote_id, plant_id = %plant.id, "Quote approved"),
            None => tracing::debug!(quote_id, "Approve skipped, quote not found"),
        }
        Ok(plant)
    }

    pub async fn update_milestone(
        &self,
        plant_id: &str,
        milestone: Milestone,
        status: PlantStatus,
    ) -> StoreResult<Option<Plant>> {
        let plant = self
            .store
            .update_milestone(plant_id, milestone, status)
            .await?;
        if plant.is_some() {
            tracing::info!(plant_id, %milestone, %status, "Milestone updated");
        } else {
            tracing::debug!(plant_id, %milestone, "Milestone update skipped, plant not found");
        }
        Ok(plant)
    }

    /// Flip a milestone between `pendente` and `concluido`.
    pub async fn toggle_milestone(
        &self,
        plant_id: &str,
        milestone: Milestone,
    ) -> StoreResult<Option<Plant>> {
        let Some(plant) = self.store.find_plant(plant_id).await? else {
            tracing::debug!(plant_id, %milestone, "Milestone toggle skipped, plant not found");
            return Ok(None);
        };
        let status = plant.milestones.get(milestone).toggled();
        self.update_milestone(plant_id, milestone, status).await
    }

    /// Delete a quote. Absent ids succeed silently.
    pub async fn delete_quote(&self, quote_id: &str) -> StoreResult<()> {
        let removed = self.store.delete_quote(quote_id).await?;
        tracing::info!(quote_id, removed, "Quote deleted");
        Ok(())
    }

    /// Delete a plant. Absent ids succeed silently.
    pub async fn delete_plant(&self, plant_id: &str) -> StoreResult<()> {
        let removed = self.store.delete_plant(plant_id).await?;
        tracing::info!(plant_id, removed, "Plant deleted");
        Ok(())
    }

    pub async fn list_quotes(&self) -> StoreResult<Vec<Quote>> {
        self.store.list_quotes().await
    }

    pub async fn list_plants(&self) -> StoreResult<Vec<Plant>> {
        self.store.list_plants().await
    }

    pub async fn find_quote(&self, quote_id: &str) -> StoreResult<Option<Quote>> {
        self.store.find_quote(quote_id).await
    }

    pub async fn find_plant(&self, plant_id: &str) -> StoreResult<Option<Plant>> {
        self.store.find_plant(plant_id).await
    }
}
