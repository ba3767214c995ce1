//! The three dashboard tabs derived from the live collections.
//!
//! Everything here is recomputed from the latest snapshots on each call:
//!
//! - Quotes: search, then the quotes date range.
//! - Plants (in progress): active partition, then search.
//! - Completed: completed partition, then search, then the completed date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plant::Plant;
use crate::progress;
use crate::quote::Quote;
use crate::search::{self, DateRange};
use crate::stats::{PlantStats, QuoteStats};

/// Filter state of the dashboard: one shared search box plus independent
/// date ranges on the quotes and completed tabs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardFilters {
    pub search: String,
    pub quote_from: Option<NaiveDate>,
    pub quote_to: Option<NaiveDate>,
    pub completed_from: Option<NaiveDate>,
    pub completed_to: Option<NaiveDate>,
}

impl DashboardFilters {
    pub fn quote_range(&self) -> DateRange {
        DateRange::new(self.quote_from, self.quote_to)
    }

    pub fn completed_range(&self) -> DateRange {
        DateRange::new(self.completed_from, self.completed_to)
    }
}

/// A plant row with its derived completion percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView {
    #[serde(flatten)]
    pub plant: Plant,
    pub progress: u8,
}

impl From<&Plant> for PlantView {
    fn from(plant: &Plant) -> Self {
        Self {
            progress: plant.progress(),
            plant: plant.clone(),
        }
    }
}

/// Number of rows in each tab after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCounts {
    pub quotes: usize,
    pub active: usize,
    pub completed: usize,
}

/// Everything the three tabs render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub quotes: Vec<Quote>,
    pub quote_stats: QuoteStats,
    pub active_plants: Vec<PlantView>,
    pub completed_plants: Vec<PlantView>,
    /// Summary cards over the unfiltered in-progress plants.
    pub stats: PlantStats,
    pub counts: TabCounts,
}

/// Build the dashboard from the latest quote and plant snapshots.
pub fn build_dashboard(quotes: &[Quote], plants: &[Plant], filters: &DashboardFilters) -> Dashboard {
    let quotes: Vec<Quote> = search::filter_records(quotes, &filters.search, &filters.quote_range())
        .into_iter()
        .cloned()
        .collect();

    let split = progress::partition(plants);
    let stats = PlantStats::from_plants(split.active.iter().copied());

    let active_plants: Vec<PlantView> = search::search(split.active.iter().copied(), &filters.search)
        .into_iter()
        .map(PlantView::from)
        .collect();

    let completed_plants: Vec<PlantView> = search::filter_records(
        split.completed.iter().copied(),
        &filters.search,
        &filters.completed_range(),
    )
    .into_iter()
    .map(PlantView::from)
    .collect();

    let counts = TabCounts {
        quotes: quotes.len(),
        active: active_plants.len(),
        completed: completed_plants.len(),
    };

    Dashboard {
        quote_stats: QuoteStats::from_quotes(&quotes),
        quotes,
        active_plants,
        completed_plants,
        stats,
        counts,
    }
}
