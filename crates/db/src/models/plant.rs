//! Plant row and conversion into the domain record.

use chrono::Utc;
use solar_core::plant::{Milestones, Plant};
use solar_core::quote::DEFAULT_PAYMENT_TERM;
use solar_core::status::PlantStatus;
use solar_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `plants` table. Milestone columns are nullable for
/// legacy rows.
#[derive(Debug, Clone, FromRow)]
pub struct PlantRow {
    pub id: String,
    pub client_name: String,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub kwh: f64,
    pub budget_value: f64,
    pub payment_term: Option<String>,
    pub observation: Option<String>,
    pub art: Option<String>,
    pub parecer_acesso: Option<String>,
    pub material: Option<String>,
    pub estoque: Option<String>,
    pub instalado: Option<String>,
    pub created_at: Option<Timestamp>,
}

impl From<PlantRow> for Plant {
    /// Absent milestones load as `pendente`; a missing `created_at` loads
    /// as "now".
    fn from(row: PlantRow) -> Self {
        let milestones = Milestones {
            art: PlantStatus::from_stored(row.art.as_deref()),
            parecer_acesso: PlantStatus::from_stored(row.parecer_acesso.as_deref()),
            material: PlantStatus::from_stored(row.material.as_deref()),
            estoque: PlantStatus::from_stored(row.estoque.as_deref()),
            instalado: PlantStatus::from_stored(row.instalado.as_deref()),
        };
        Plant {
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
            milestones,
            created_at: row.created_at.unwrap_or_else(Utc::now),
        }
    }
}
