//! In-process [`DocumentStore`] backend.
//!
//! Used when no database is configured and by the test suites. Both
//! collections live behind one `RwLock`, which makes quote promotion a
//! single critical section.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use solar_core::plant::Plant;
use solar_core::quote::{NewQuote, Quote};
use solar_core::status::{Milestone, PlantStatus};
use solar_core::types::Timestamp;
use solar_events::{ChangeEvent, Collection, EventBus};
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::{new_record_id, DocumentStore};

#[derive(Default)]
struct Collections {
    quotes: HashMap<String, Quote>,
    plants: HashMap<String, Plant>,
}

pub struct MemoryStore {
    data: RwLock<Collections>,
    bus: Arc<EventBus>,
}

impl MemoryStore {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            data: RwLock::new(Collections::default()),
            bus,
        }
    }
}

/// Newest first; ties broken by id so listings are deterministic.
fn newest_first(a: (&Timestamp, &str), b: (&Timestamp, &str)) -> Ordering {
    b.0.cmp(a.0).then_with(|| b.1.cmp(a.1))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_quote(&self, quote: NewQuote) -> StoreResult<Quote> {
        let record = Quote {
            id: new_record_id(),
            client_name: quote.client_name,
            contact: quote.contact,
            city: quote.city,
            kwh: quote.kwh,
            budget_value: quote.budget_value,
            payment_term: quote.payment_term,
            observation: quote.observation,
            approved: false,
            created_at: quote.created_at.unwrap_or_else(Utc::now),
        };
        self.data
            .write()
            .await
            .quotes
            .insert(record.id.clone(), record.clone());
        self.bus
            .publish(ChangeEvent::created(Collection::Quotes, record.id.clone()));
        Ok(record)
    }

    async fn list_quotes(&self) -> StoreResult<Vec<Quote>> {
        let mut quotes: Vec<Quote> = self.data.read().await.quotes.values().cloned().collect();
        quotes.sort_by(|a, b| newest_first((&a.created_at, a.id.as_str()), (&b.created_at, b.id.as_str())));
        Ok(quotes)
    }

    async fn find_quote(&self, id: &str) -> StoreResult<Option<Quote>> {
        Ok(self.data.read().await.quotes.get(id).cloned())
    }

    async fn delete_quote(&self, id: &str) -> StoreResult<bool> {
        let removed = self.data.write().await.quotes.remove(id).is_some();
        if removed {
            self.bus.publish(ChangeEvent::deleted(Collection::Quotes, id));
        }
        Ok(removed)
    }

    async fn promote_quote(&self, id: &str) -> StoreResult<Option<Plant>> {
        let plant = {
            let mut data = self.data.write().await;
            let Some(quote) = data.quotes.remove(id) else {
                return Ok(None);
            };
            let plant = Plant::from_approved_quote(new_record_id(), &quote);
            data.plants.insert(plant.id.clone(), plant.clone());
            plant
        };
        self.bus
            .publish(ChangeEvent::created(Collection::Plants, plant.id.clone()));
        self.bus.publish(ChangeEvent::deleted(Collection::Quotes, id));
        Ok(Some(plant))
    }

    async fn list_plants(&self) -> StoreResult<Vec<Plant>> {
        let mut plants: Vec<Plant> = self.data.read().await.plants.values().cloned().collect();
        plants.sort_by(|a, b| newest_first((&a.created_at, a.id.as_str()), (&b.created_at, b.id.as_str())));
        Ok(plants)
    }

    async fn find_plant(&self, id: &str) -> StoreResult<Option<Plant>> {
        Ok(self.data.read().await.plants.get(id).cloned())
    }

    async fn update_milestone(
        &self,
        id: &str,
        milestone: Milestone,
        status: PlantStatus,
    ) -> StoreResult<Option<Plant>> {
        let updated = {
            let mut data = self.data.write().await;
            data.plants.get_mut(id).map(|plant| {
                plant.milestones.set(milestone, status);
                plant.clone()
            })
        };
        if updated.is_some() {
            self.bus.publish(ChangeEvent::updated(Collection::Plants, id));
        }
        Ok(updated)
    }

    async fn delete_plant(&self, id: &str) -> StoreResult<bool> {
        let removed = self.data.write().await.plants.remove(id).is_some();
        if removed {
            self.bus.publish(ChangeEvent::deleted(Collection::Plants, id));
        }
        Ok(removed)
    }
}
