//! Catalog provider abstraction.
//!
//! A provider is one remote (or snapshot) catalog of mods. The resolver only
//! needs `search` and `versions_for_mod`; the browsing calls are for frontends
//! and have default implementations that report themselves unsupported.

use crate::models::error::SError;
use crate::models::mod_dto::{CatalogMod, CatalogVersion, Category, ModDetail, Sorting};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Registry key, compared case-insensitively.
    fn name(&self) -> &str;

    async fn search(&self, query: &str, page: usize, limit: usize) -> Result<Vec<CatalogMod>, SError>;

    async fn versions_for_mod(&self, catalog_id: &str) -> Result<Vec<CatalogVersion>, SError>;

    async fn categories(&self) -> Result<Vec<Category>, SError> {
        Err(unsupported(self.name(), "categories"))
    }

    async fn mods_by_category(
        &self,
        _category: &Category,
        _page: usize,
        _limit: usize,
    ) -> Result<Vec<CatalogMod>, SError> {
        Err(unsupported(self.name(), "category listing"))
    }

    async fn mods_sorted(
        &self,
        _sorting: Sorting,
        _page: usize,
        _limit: usize,
    ) -> Result<Vec<CatalogMod>, SError> {
        Err(unsupported(self.name(), "sorted listing"))
    }

    async fn mod_detail(&self, _catalog_id: &str) -> Result<ModDetail, SError> {
        Err(unsupported(self.name(), "mod detail"))
    }
}

fn unsupported(provider: &str, operation: &str) -> SError {
    SError::invalid_response(format!("{provider} does not support {operation}"), None)
}

/// Providers available to the resolver, keyed by lower-cased name.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CatalogProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its own name, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn CatalogProvider>) {
        let key = provider.name().to_lowercase();
        info!(provider = %key, "registered catalog provider");
        self.providers.insert(key, provider);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CatalogProvider>> {
        self.providers.get(&name.to_lowercase()).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<dyn CatalogProvider>, SError> {
        self.get(name)
            .ok_or_else(|| SError::ProviderUnknown(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
