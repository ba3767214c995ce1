//! Quote row and conversion into the domain record.

use chrono::Utc;
use solar_core::quote::{Quote, DEFAULT_PAYMENT_TERM};
use solar_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `quotes` table.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteRow {
    pub id: String,
    pub client_name: String,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub kwh: f64,
    pub budget_value: f64,
    pub payment_term: Option<String>,
    pub observation: Option<String>,
    pub approved: bool,
    pub created_at: Option<Timestamp>,
}

impl From<QuoteRow> for Quote {
    /// A missing `created_at` loads as "now".
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            client_name: row.client_name,
            contact: row.contact.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            kwh: row.kwh,
            budget_value: row.budget_value,
            payment_term: row
                .payment_term
                .unwrap_or_else(|| DEFAULT_PAYMENT_TERM.to_string()),
            observation: row.observation.unwrap_or_default(),
            approved: row.approved,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        }
    }
}
