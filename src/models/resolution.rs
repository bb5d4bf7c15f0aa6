use crate::models::error::SError;
use crate::models::mod_dto::CatalogVersion;
use crate::models::state::ModState;
use serde::{Deserialize, Serialize};

/// Result of resolving one installed mod against a catalog.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ResolutionOutcome {
    NoUpdate,
    UpdateAvailable {
        catalog_id: String,
        version: CatalogVersion,
    },
    Unresolved(SError),
}

impl ResolutionOutcome {
    /// State recorded in the registry for this outcome.
    pub fn state(&self) -> ModState {
        match self {
            Self::NoUpdate => ModState::Installed,
            Self::UpdateAvailable { .. } => ModState::Outdated,
            Self::Unresolved(_) => ModState::Unknown,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::UpdateAvailable { .. })
    }
}

/// Per-mod outcomes of one pass, in the order the mods were submitted.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpdateReport {
    pub outcomes: Vec<(String, ResolutionOutcome)>,
}

impl UpdateReport {
    pub fn outcome(&self, local_id: &str) -> Option<&ResolutionOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == local_id)
            .map(|(_, o)| o)
    }

    pub fn updates(&self) -> usize {
        self.count(|o| o.is_update())
    }

    pub fn up_to_date(&self) -> usize {
        self.count(|o| matches!(o, ResolutionOutcome::NoUpdate))
    }

    pub fn unresolved(&self) -> usize {
        self.count(|o| matches!(o, ResolutionOutcome::Unresolved(_)))
    }

    fn count(&self, f: impl Fn(&ResolutionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| f(o)).count()
    }
}
