//! Aggregate figures shown on the dashboard cards.

use serde::Serialize;

use crate::plant::Plant;
use crate::quote::Quote;

/// Summary cards for a set of plants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantStats {
    pub total: usize,
    pub total_kwh: f64,
    pub completed: usize,
    pub in_progress: usize,
}

impl PlantStats {
    pub fn from_plants<'a, I>(plants: I) -> Self
    where
        I: IntoIterator<Item = &'a Plant>,
    {
        let mut stats = Self::default();
        for plant in plants {
            stats.total += 1;
            stats.total_kwh += plant.kwh;
            if plant.is_complete() {
                stats.completed += 1;
            }
        }
        stats.in_progress = stats.total - stats.completed;
        stats
    }
}

/// Totals for a set of quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStats {
    pub count: usize,
    pub total_kwh: f64,
    pub total_budget: f64,
}

impl QuoteStats {
    pub fn from_quotes<'a, I>(quotes: I) -> Self
    where
        I: IntoIterator<Item = &'a Quote>,
    {
        quotes.into_iter().fold(Self::default(), |mut acc, quote| {
            acc.count += 1;
            acc.total_kwh += quote.kwh;
            acc.total_budget += quote.budget_value;
            acc
        })
    }
}
