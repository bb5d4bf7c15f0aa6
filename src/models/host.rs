use crate::models::mod_dto::{InstalledMod, ProviderMapping};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Key of the custom block that maps provider names to catalog ids.
pub const MAPPING_KEY: &str = "modmanager";
/// Custom flag set on mods generated by the build toolchain.
pub const GENERATED_KEY: &str = "fabric-loom:generated";

/// A mod as reported by the host loader, or read from a `fabric.mod.json`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HostMod {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl HostMod {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn is_generated(&self) -> bool {
        self.custom
            .get(GENERATED_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Mapping entries in declaration order. Non-string ids are dropped.
    pub fn provider_mappings(&self) -> Vec<ProviderMapping> {
        let Some(block) = self.custom.get(MAPPING_KEY).and_then(Value::as_object) else {
            return Vec::new();
        };

        block
            .iter()
            .filter_map(|(provider, id)| match id.as_str() {
                Some(catalog_id) => Some(ProviderMapping {
                    provider: provider.clone(),
                    catalog_id: catalog_id.to_string(),
                }),
                None => {
                    warn!(mod_id = %self.id, %provider, "ignoring non-string catalog id");
                    None
                }
            })
            .collect()
    }

    pub fn to_installed(&self) -> InstalledMod {
        InstalledMod {
            id: self.id.clone(),
            display_name: self.display_name().to_string(),
            installed_version: self.version.clone(),
            provider_mappings: self.provider_mappings(),
        }
    }
}
