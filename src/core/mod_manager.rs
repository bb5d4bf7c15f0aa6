use crate::core::provider::{CatalogProvider, ProviderRegistry};
use crate::core::registry::ModStateRegistry;
use crate::core::resolver::UpdateResolver;
use crate::core::scanner::InventoryScanner;
use crate::models::config::UpdateConfig;
use crate::models::error::SError;
use crate::models::host::HostMod;
use crate::models::mod_dto::{CatalogMod, InstalledMod, Update};
use crate::models::resolution::{ResolutionOutcome, UpdateReport};
use crate::models::state::ModState;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument, warn};

/// Owns everything an update pass needs: configuration, the registered
/// providers, the state registry and the updates found by the last pass.
pub struct ModManager {
    resolver: Arc<UpdateResolver>,
    providers: Arc<ProviderRegistry>,
    states: Arc<ModStateRegistry>,
    updates: Mutex<Vec<Update>>,
}

impl ModManager {
    pub fn new(config: UpdateConfig, providers: ProviderRegistry) -> Self {
        Self::with_states(config, providers, Arc::new(ModStateRegistry::new()))
    }

    /// Starts from a previously saved registry.
    pub fn with_states(
        config: UpdateConfig,
        providers: ProviderRegistry,
        states: Arc<ModStateRegistry>,
    ) -> Self {
        if !providers.contains(&config.default_provider) {
            warn!(provider = %config.default_provider, "default provider is not registered");
        }
        Self {
            resolver: Arc::new(UpdateResolver::new(config, states.clone())),
            providers: Arc::new(providers),
            states,
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &UpdateConfig {
        self.resolver.config()
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn states(&self) -> &Arc<ModStateRegistry> {
        &self.states
    }

    /// The provider used for browsing and for fallback searches.
    pub fn selected_provider(&self) -> Option<Arc<dyn CatalogProvider>> {
        self.providers.get(&self.config().default_provider)
    }

    pub async fn search(&self, query: &str, page: usize, limit: usize) -> Result<Vec<CatalogMod>, SError> {
        self.selected_provider()
            .ok_or_else(|| SError::ProviderUnknown(self.config().default_provider.clone()))?
            .search(query, page, limit)
            .await
    }

    pub fn mod_state(&self, id: &str) -> ModState {
        self.states.get(id)
    }

    /// Pending update for a mod, looked up by catalog id or local id.
    pub fn update_for(&self, id: &str) -> Option<Update> {
        self.updates
            .lock()
            .iter()
            .find(|u| u.catalog_id == id || u.local_id == id)
            .cloned()
    }

    pub fn updates(&self) -> Vec<Update> {
        self.updates.lock().clone()
    }

    /// Scans the host inventory and checks every surviving mod.
    pub async fn check_inventory(
        &self,
        scanner: &InventoryScanner,
        host_mods: &[HostMod],
    ) -> Result<UpdateReport, SError> {
        let mods = scanner.scan(host_mods)?;
        Ok(self.check_updates(mods).await)
    }

    /// Resolves all mods concurrently and waits for every one of them. A
    /// failing or panicking mod only affects its own outcome.
    #[instrument(skip_all, fields(mods = mods.len()))]
    pub async fn check_updates(&self, mods: Vec<InstalledMod>) -> UpdateReport {
        let permits = Arc::new(Semaphore::new(self.config().max_concurrent_checks.max(1)));
        let default_provider = self.selected_provider();

        let handles: Vec<_> = mods
            .into_iter()
            .map(|installed| {
                let resolver = self.resolver.clone();
                let providers = self.providers.clone();
                let default_provider = default_provider.clone();
                let permits = permits.clone();
                let local_id = installed.id.clone();
                let handle = tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.ok();
                    resolver
                        .resolve(&installed, default_provider.as_deref(), &providers)
                        .await
                });
                (local_id, handle)
            })
            .collect();

        let mut report = UpdateReport::default();
        for (local_id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(mod_id = %local_id, error = %e, "update check task failed");
                    self.states.set(&local_id, &local_id, ModState::Unknown);
                    ResolutionOutcome::Unresolved(SError::from(e))
                }
            };
            report.outcomes.push((local_id, outcome));
        }

        let found: Vec<Update> = report
            .outcomes
            .iter()
            .filter_map(|(local_id, outcome)| match outcome {
                ResolutionOutcome::UpdateAvailable { catalog_id, version } => Some(Update {
                    catalog_id: catalog_id.clone(),
                    local_id: local_id.clone(),
                    version: version.clone(),
                }),
                _ => None,
            })
            .collect();
        *self.updates.lock() = found;

        info!(
            updates = report.updates(),
            up_to_date = report.up_to_date(),
            unresolved = report.unresolved(),
            "update check finished"
        );
        report
    }
}
