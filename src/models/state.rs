use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModState {
    Installed,
    Outdated,
    Downloadable,
    Unknown,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ModStateEntry {
    pub local_id: String,
    pub catalog_id: String,
    pub state: ModState,
}

impl ModStateEntry {
    pub fn matches(&self, id: &str) -> bool {
        self.local_id == id || self.catalog_id == id
    }
}
