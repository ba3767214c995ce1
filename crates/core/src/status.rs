//! Milestone status vocabulary.
//!
//! Every plant tracks the same five installation milestones, each of which
//! is either pending or done. There is no in-progress or error state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// PlantStatus
// ---------------------------------------------------------------------------

/// State of a single milestone.
///
/// `Pendente` is the default: a stored plant lacking a milestone value is
/// treated as if it were explicitly pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantStatus {
    #[default]
    Pendente,
    Concluido,
}

impl PlantStatus {
    /// Store spelling of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            PlantStatus::Pendente => "pendente",
            PlantStatus::Concluido => "concluido",
        }
    }

    /// The opposite status, used when a milestone badge is clicked.
    pub fn toggled(self) -> Self {
        match self {
            PlantStatus::Pendente => PlantStatus::Concluido,
            PlantStatus::Concluido => PlantStatus::Pendente,
        }
    }

    pub fn is_done(self) -> bool {
        self == PlantStatus::Concluido
    }

    /// Parse a stored value, falling back to `Pendente` for absent or
    /// unrecognised values (legacy records).
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(PlantStatus::Pendente),
            "concluido" => Ok(PlantStatus::Concluido),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: pendente, concluido"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Milestone
// ---------------------------------------------------------------------------

/// The five fixed installation milestones, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Milestone {
    /// Technical responsibility annotation (ART).
    Art,
    /// Utility grid access approval.
    ParecerAcesso,
    Material,
    Estoque,
    Instalado,
}

impl Milestone {
    /// All milestones in display order.
    pub const ALL: [Milestone; 5] = [
        Milestone::Art,
        Milestone::ParecerAcesso,
        Milestone::Material,
        Milestone::Estoque,
        Milestone::Instalado,
    ];

    /// Field name as stored in the `plants` collection.
    pub fn field_name(self) -> &'static str {
        match self {
            Milestone::Art => "art",
            Milestone::ParecerAcesso => "parecerAcesso",
            Milestone::Material => "material",
            Milestone::Estoque => "estoque",
            Milestone::Instalado => "instalado",
        }
    }

    /// Column name in the relational schema.
    pub fn column_name(self) -> &'static str {
        match self {
            Milestone::Art => "art",
            Milestone::ParecerAcesso => "parecer_acesso",
            Milestone::Material => "material",
            Milestone::Estoque => "estoque",
            Milestone::Instalado => "instalado",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Milestone {
    type Err = CoreError;

    /// Only the five milestone names are accepted; any other plant field
    /// is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Milestone::ALL
            .into_iter()
            .find(|m| m.field_name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Milestone::ALL.iter().map(|m| m.field_name()).collect();
                CoreError::Validation(format!(
                    "Invalid milestone '{s}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_pendente() {
        assert_eq!(PlantStatus::default(), PlantStatus::Pendente);
    }

    #[test]
    fn status_toggles_both_ways() {
        assert_eq!(PlantStatus::Pendente.toggled(), PlantStatus::Concluido);
        assert_eq!(PlantStatus::Concluido.toggled(), PlantStatus::Pendente);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&PlantStatus::Concluido).unwrap();
        assert_eq!(json, "\"concluido\"");
        let parsed: PlantStatus = serde_json::from_str("\"pendente\"").unwrap();
        assert_eq!(parsed, PlantStatus::Pendente);
    }

    #[test]
    fn from_stored_fills_missing_and_unknown_with_pendente() {
        assert_eq!(PlantStatus::from_stored(None), PlantStatus::Pendente);
        assert_eq!(PlantStatus::from_stored(Some("")), PlantStatus::Pendente);
        assert_eq!(PlantStatus::from_stored(Some("em_andamento")), PlantStatus::Pendente);
        assert_eq!(PlantStatus::from_stored(Some("concluido")), PlantStatus::Concluido);
    }

    #[test]
    fn milestone_parses_store_field_names() {
        assert_eq!("parecerAcesso".parse::<Milestone>().unwrap(), Milestone::ParecerAcesso);
        assert_eq!("instalado".parse::<Milestone>().unwrap(), Milestone::Instalado);
    }

    #[test]
    fn milestone_rejects_non_milestone_fields() {
        let err = "clientName".parse::<Milestone>().unwrap_err();
        assert!(err.to_string().contains("Invalid milestone"));
        assert!("createdAt".parse::<Milestone>().is_err());
        assert!("parecer_acesso".parse::<Milestone>().is_err());
    }

    #[test]
    fn milestone_serde_matches_field_name() {
        for milestone in Milestone::ALL {
            let json = serde_json::to_string(&milestone).unwrap();
            assert_eq!(json, format!("\"{}\"", milestone.field_name()));
        }
    }
}
