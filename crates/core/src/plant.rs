//! Plant record: an approved quote tracked through five milestones.

use serde::{Deserialize, Serialize};

use crate::progress;
use crate::quote::Quote;
use crate::status::{Milestone, PlantStatus};
use crate::types::{RecordId, Timestamp};

/// The five milestone fields of a plant.
///
/// Absent fields deserialize as [`PlantStatus::Pendente`], so legacy
/// records are default-filled at load time rather than in business logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestones {
    pub art: PlantStatus,
    pub parecer_acesso: PlantStatus,
    pub material: PlantStatus,
    pub estoque: PlantStatus,
    pub instalado: PlantStatus,
}

impl Milestones {
    /// All milestones pending; the state of every freshly approved plant.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Every milestone done.
    pub fn all_done() -> Self {
        let mut milestones = Self::default();
        for milestone in Milestone::ALL {
            milestones.set(milestone, PlantStatus::Concluido);
        }
        milestones
    }

    pub fn get(&self, milestone: Milestone) -> PlantStatus {
        match milestone {
            Milestone::Art => self.art,
            Milestone::ParecerAcesso => self.parecer_acesso,
            Milestone::Material => self.material,
            Milestone::Estoque => self.estoque,
            Milestone::Instalado => self.instalado,
        }
    }

    pub fn set(&mut self, milestone: Milestone, status: PlantStatus) {
        let slot = match milestone {
            Milestone::Art => &mut self.art,
            Milestone::ParecerAcesso => &mut self.parecer_acesso,
            Milestone::Material => &mut self.material,
            Milestone::Estoque => &mut self.estoque,
            Milestone::Instalado => &mut self.instalado,
        };
        *slot = status;
    }

    /// Iterate `(milestone, status)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Milestone, PlantStatus)> + '_ {
        Milestone::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// An approved installation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: RecordId,
    pub client_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub city: String,
    pub kwh: f64,
    pub budget_value: f64,
    pub payment_term: String,
    #[serde(default)]
    pub observation: String,
    #[serde(flatten)]
    pub milestones: Milestones,
    pub created_at: Timestamp,
}

impl Plant {
    /// Build the plant spawned by approving `quote`.
    ///
    /// Business fields are copied verbatim, every milestone starts pending
    /// and the original quote date survives the migration.
    pub fn from_approved_quote(id: RecordId, quote: &Quote) -> Self {
        Self {
            id,
            client_name: quote.client_name.clone(),
            contact: quote.contact.clone(),
            city: quote.city.clone(),
            kwh: quote.kwh,
            budget_value: quote.budget_value,
            payment_term: quote.payment_term.clone(),
            observation: quote.observation.clone(),
            milestones: Milestones::pending(),
            created_at: quote.created_at,
        }
    }

    pub fn progress(&self) -> u8 {
        progress::compute_progress(&self.milestones)
    }

    pub fn is_complete(&self) -> bool {
        progress::is_complete(&self.milestones)
    }
}
