use crate::core::provider::{CatalogProvider, ProviderRegistry};
use crate::core::registry::ModStateRegistry;
use crate::core::version::{self, ParsedVersion};
use crate::models::config::UpdateConfig;
use crate::models::error::SError;
use crate::models::mod_dto::{CatalogVersion, InstalledMod};
use crate::models::resolution::ResolutionOutcome;
use std::cmp::Ordering;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Page size used when searching the default provider for an undeclared mod.
pub const FALLBACK_SEARCH_LIMIT: usize = 10;

/// Decides, for one installed mod at a time, whether a newer compatible
/// release exists and records the result in the state registry.
pub struct UpdateResolver {
    config: UpdateConfig,
    states: Arc<ModStateRegistry>,
}

impl UpdateResolver {
    pub fn new(config: UpdateConfig, states: Arc<ModStateRegistry>) -> Self {
        Self { config, states }
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    pub fn states(&self) -> &Arc<ModStateRegistry> {
        &self.states
    }

    /// Resolves one mod. Exactly one registry entry is written before this
    /// returns, whatever the outcome.
    #[instrument(skip_all, fields(mod_id = %installed.id))]
    pub async fn resolve(
        &self,
        installed: &InstalledMod,
        default_provider: Option<&dyn CatalogProvider>,
        providers: &ProviderRegistry,
    ) -> ResolutionOutcome {
        let (catalog_id, versions) = match Self::declared_mapping(installed, providers) {
            Some((provider, catalog_id)) => {
                info!(provider = provider.name(), %catalog_id, "checking updates using declared mod id");
                let versions = self.fetch_versions(provider.as_ref(), &catalog_id).await;
                (catalog_id, versions)
            }
            None => {
                info!("checking updates using fallback search");
                self.resolve_by_search(installed, default_provider).await
            }
        };

        let outcome = match versions {
            Ok(versions) => self.decide(installed, &catalog_id, &versions),
            Err(e) => {
                warn!(error = %e, "update status unavailable");
                ResolutionOutcome::Unresolved(e)
            }
        };

        self.states.set(&installed.id, &catalog_id, outcome.state());
        outcome
    }

    /// Walks every declared mapping and keeps the last one whose provider is
    /// registered. It does not stop at the first usable entry.
    fn declared_mapping(
        installed: &InstalledMod,
        providers: &ProviderRegistry,
    ) -> Option<(Arc<dyn CatalogProvider>, String)> {
        let mut chosen = None;
        for mapping in &installed.provider_mappings {
            match providers.get(&mapping.provider) {
                Some(provider) => chosen = Some((provider, mapping.catalog_id.clone())),
                None => warn!(
                    provider = %mapping.provider.to_lowercase(),
                    "update provider not registered, skipping mapping"
                ),
            }
        }
        if chosen.is_none() && !installed.provider_mappings.is_empty() {
            warn!("no declared provider is registered");
        }
        chosen
    }

    async fn resolve_by_search(
        &self,
        installed: &InstalledMod,
        default_provider: Option<&dyn CatalogProvider>,
    ) -> (String, Result<Vec<CatalogVersion>, SError>) {
        let Some(provider) = default_provider else {
            let err = SError::ProviderUnknown(self.config.default_provider.clone());
            return (installed.id.clone(), Err(err));
        };

        match self.search_catalog_id(installed, provider).await {
            Ok(catalog_id) => {
                let versions = self.fetch_versions(provider, &catalog_id).await;
                (catalog_id, versions)
            }
            Err(e) => (installed.id.clone(), Err(e)),
        }
    }

    /// First hit whose slug is the local id or whose name is the display name.
    async fn search_catalog_id(
        &self,
        installed: &InstalledMod,
        provider: &dyn CatalogProvider,
    ) -> Result<String, SError> {
        let hits = self
            .bounded(
                "search",
                provider.search(&installed.display_name, 0, FALLBACK_SEARCH_LIMIT),
            )
            .await?;

        hits.into_iter()
            .find(|hit| hit.slug == installed.id || hit.name == installed.display_name)
            .map(|hit| {
                debug!(catalog_id = %hit.id, slug = %hit.slug, "fallback search matched");
                hit.id
            })
            .ok_or_else(|| SError::NoMatch(installed.id.clone()))
    }

    async fn fetch_versions(
        &self,
        provider: &dyn CatalogProvider,
        catalog_id: &str,
    ) -> Result<Vec<CatalogVersion>, SError> {
        self.bounded("version list", provider.versions_for_mod(catalog_id))
            .await
    }

    async fn bounded<T>(
        &self,
        call: &str,
        fut: impl Future<Output = Result<T, SError>>,
    ) -> Result<T, SError> {
        let timeout = self.config.request_timeout();
        tokio::time::timeout(timeout, fut)
            .await
            .map_err(|_| SError::Timeout(format!("{call} exceeded {}s", timeout.as_secs())))?
    }

    fn decide(
        &self,
        installed: &InstalledMod,
        catalog_id: &str,
        versions: &[CatalogVersion],
    ) -> ResolutionOutcome {
        let current = match version::parse(&installed.installed_version) {
            Ok(v) => v,
            Err(e) => {
                warn!(version = %installed.installed_version, "installed version is not comparable");
                return ResolutionOutcome::Unresolved(e);
            }
        };

        let Some((candidate, parsed)) = latest_compatible(versions, &self.config) else {
            info!("no compatible version found");
            return ResolutionOutcome::NoUpdate;
        };

        match current.cmp(&parsed) {
            Ordering::Less => {
                info!(
                    from = %installed.installed_version,
                    to = %candidate.version,
                    "update found"
                );
                ResolutionOutcome::UpdateAvailable {
                    catalog_id: catalog_id.to_string(),
                    version: candidate.clone(),
                }
            }
            Ordering::Equal => {
                info!("already on the latest version");
                ResolutionOutcome::NoUpdate
            }
            Ordering::Greater => {
                info!(latest = %candidate.version, "installed version is ahead of the catalog");
                ResolutionOutcome::NoUpdate
            }
        }
    }
}

/// Greatest version that targets the configured game version and is allowed
/// by the release channel. Equal versions keep the first one seen.
pub fn latest_compatible<'a>(
    versions: &'a [CatalogVersion],
    config: &UpdateConfig,
) -> Option<(&'a CatalogVersion, ParsedVersion)> {
    versions
        .iter()
        .filter(|v| v.supports(&config.target_game_version))
        .filter(|v| config.is_release_allowed(v.release_kind))
        .filter_map(|v| match version::parse(&v.version) {
            Ok(parsed) => Some((v, parsed)),
            Err(e) => {
                debug!(error = %e, "skipping catalog version");
                None
            }
        })
        .fold(None, |best, (v, parsed)| match best {
            Some((kept, kept_parsed)) if parsed <= kept_parsed => Some((kept, kept_parsed)),
            _ => Some((v, parsed)),
        })
}
