use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `provider -> catalog id` pair declared by an installed mod.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProviderMapping {
    pub provider: String,
    pub catalog_id: String,
}

/// A modification present in the host environment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InstalledMod {
    pub id: String,
    pub display_name: String,
    pub installed_version: String,
    // Declaration order matters: the resolver keeps the last usable entry.
    #[serde(default)]
    pub provider_mappings: Vec<ProviderMapping>,
}

impl InstalledMod {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        installed_version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            installed_version: installed_version.into(),
            provider_mappings: Vec::new(),
        }
    }

    pub fn with_mapping(mut self, provider: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        self.provider_mappings.push(ProviderMapping {
            provider: provider.into(),
            catalog_id: catalog_id.into(),
        });
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    Release,
    Beta,
    Alpha,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Asset {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub hashes: BTreeMap<String, String>,
}

/// One published release of a mod on a catalog.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogVersion {
    pub version: String,
    #[serde(default)]
    pub changelog: String,
    #[serde(alias = "type", default = "unknown_kind")]
    pub release_kind: ReleaseKind,
    #[serde(alias = "game_versions", default)]
    pub compatible_game_versions: Vec<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

fn unknown_kind() -> ReleaseKind {
    ReleaseKind::Unknown
}

impl CatalogVersion {
    pub fn supports(&self, game_version: &str) -> bool {
        self.compatible_game_versions.iter().any(|v| v == game_version)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: String,
}

/// Summary of a mod as listed by a catalog search or listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogMod {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub published: String,
}

/// Full description of a single catalog entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModDetail {
    pub summary: CatalogMod,
    pub description: String,
    pub license: String,
    pub categories: Vec<Category>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sorting {
    #[default]
    Relevance,
    Downloads,
    Updated,
    Newest,
}

/// A pending update discovered by the last resolution pass.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Update {
    pub catalog_id: String,
    pub local_id: String,
    pub version: CatalogVersion,
}
