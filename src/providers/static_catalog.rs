//! Catalog backed by an in-memory snapshot, typically loaded from a JSON file.

use crate::core::provider::CatalogProvider;
use crate::models::error::SError;
use crate::models::mod_dto::{CatalogMod, CatalogVersion, Category, ModDetail, Sorting};
use async_trait::async_trait;
use camino::Utf8Path;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use tracing::{debug, info};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub summary: CatalogMod,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub versions: Vec<CatalogVersion>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CatalogSnapshot {
    pub name: String,
    #[serde(default)]
    pub mods: Vec<CatalogEntry>,
}

pub struct StaticCatalog {
    name: String,
    entries: Vec<CatalogEntry>,
    category_cache: Mutex<HashMap<String, Vec<CatalogMod>>>,
}

impl StaticCatalog {
    pub fn new(name: impl Into<String>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
            category_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self::new(snapshot.name, snapshot.mods)
    }

    pub fn load(path: &Utf8Path) -> Result<Self, SError> {
        let snapshot: CatalogSnapshot = serde_json::from_reader(File::open(path)?)
            .map_err(|e| SError::invalid_response(format!("bad catalog snapshot {path}"), Some(e.to_string())))?;
        info!(catalog = %snapshot.name, mods = snapshot.mods.len(), "catalog snapshot loaded");
        Ok(Self::from_snapshot(snapshot))
    }

    fn find(&self, catalog_id: &str) -> Result<&CatalogEntry, SError> {
        self.entries
            .iter()
            .find(|e| e.summary.id == catalog_id || e.summary.slug == catalog_id)
            .ok_or_else(|| SError::invalid_response(format!("{catalog_id} is not in {}", self.name), None))
    }

    fn page<'a>(mods: impl Iterator<Item = &'a CatalogEntry>, page: usize, limit: usize) -> Vec<CatalogMod> {
        mods.skip(page.saturating_mul(limit))
            .take(limit)
            .map(|e| e.summary.clone())
            .collect()
    }
}

fn matches_query(entry: &CatalogEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let summary = &entry.summary;
    [&summary.name, &summary.slug, &summary.short_description]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, page: usize, limit: usize) -> Result<Vec<CatalogMod>, SError> {
        debug!(catalog = %self.name, query, page, limit, "searching catalog");
        Ok(Self::page(
            self.entries.iter().filter(|e| matches_query(e, query)),
            page,
            limit,
        ))
    }

    async fn versions_for_mod(&self, catalog_id: &str) -> Result<Vec<CatalogVersion>, SError> {
        Ok(self.find(catalog_id)?.versions.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, SError> {
        let ids: BTreeSet<&String> = self
            .entries
            .iter()
            .flat_map(|e| e.summary.categories.iter())
            .collect();
        Ok(ids.into_iter().map(|id| Category { id: id.clone() }).collect())
    }

    async fn mods_by_category(
        &self,
        category: &Category,
        page: usize,
        limit: usize,
    ) -> Result<Vec<CatalogMod>, SError> {
        let key = format!("{}|{}|{}", category.id, page, limit);
        if let Some(cached) = self.category_cache.lock().get(&key) {
            return Ok(cached.clone());
        }

        let listed = Self::page(
            self.entries
                .iter()
                .filter(|e| e.summary.categories.contains(&category.id)),
            page,
            limit,
        );
        self.category_cache.lock().insert(key, listed.clone());
        Ok(listed)
    }

    async fn mods_sorted(
        &self,
        sorting: Sorting,
        page: usize,
        limit: usize,
    ) -> Result<Vec<CatalogMod>, SError> {
        let mut sorted: Vec<&CatalogEntry> = self.entries.iter().collect();
        match sorting {
            Sorting::Relevance => {}
            Sorting::Downloads => sorted.sort_by(|a, b| b.summary.downloads.cmp(&a.summary.downloads)),
            Sorting::Updated => sorted.sort_by(|a, b| b.summary.updated.cmp(&a.summary.updated)),
            Sorting::Newest => sorted.sort_by(|a, b| b.summary.published.cmp(&a.summary.published)),
        }
        Ok(Self::page(sorted.into_iter(), page, limit))
    }

    async fn mod_detail(&self, catalog_id: &str) -> Result<ModDetail, SError> {
        let entry = self.find(catalog_id)?;
        Ok(ModDetail {
            summary: entry.summary.clone(),
            description: entry.description.clone(),
            license: entry.license.clone(),
            categories: entry
                .summary
                .categories
                .iter()
                .map(|id| Category { id: id.clone() })
                .collect(),
        })
    }
}
