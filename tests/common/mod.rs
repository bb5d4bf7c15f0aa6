#![allow(dead_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use mod_scout_lib::core::provider::CatalogProvider;
use mod_scout_lib::models::error::SError;
use mod_scout_lib::models::mod_dto::{CatalogMod, CatalogVersion, ReleaseKind};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::time::Duration;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Scripted provider that records every call it receives.
pub struct MockProvider {
    name: String,
    search_results: Vec<CatalogMod>,
    versions: HashMap<String, Vec<CatalogVersion>>,
    search_error: Option<SError>,
    versions_error: Option<SError>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            search_results: Vec::new(),
            versions: HashMap::new(),
            search_error: None,
            versions_error: None,
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_hit(mut self, hit: CatalogMod) -> Self {
        self.search_results.push(hit);
        self
    }

    pub fn with_versions(mut self, catalog_id: &str, versions: Vec<CatalogVersion>) -> Self {
        self.versions.insert(catalog_id.to_string(), versions);
        self
    }

    pub fn failing_search(mut self, err: SError) -> Self {
        self.search_error = Some(err);
        self
    }

    pub fn failing_versions(mut self, err: SError) -> Self {
        self.versions_error = Some(err);
        self
    }

    /// Stalls `versions_for_mod(catalog_id)` for the given duration.
    pub fn with_delay(mut self, catalog_id: &str, delay: Duration) -> Self {
        self.delays.insert(catalog_id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CatalogProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, page: usize, limit: usize) -> Result<Vec<CatalogMod>, SError> {
        self.calls.lock().push(format!("search:{query}:{page}:{limit}"));
        match &self.search_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.search_results.clone()),
        }
    }

    async fn versions_for_mod(&self, catalog_id: &str) -> Result<Vec<CatalogVersion>, SError> {
        self.calls.lock().push(format!("versions:{catalog_id}"));
        if let Some(delay) = self.delays.get(catalog_id) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(e) = &self.versions_error {
            return Err(e.clone());
        }
        self.versions
            .get(catalog_id)
            .cloned()
            .ok_or_else(|| SError::invalid_response(format!("no such mod {catalog_id}"), None))
    }
}

pub fn hit(id: &str, slug: &str, name: &str) -> CatalogMod {
    CatalogMod {
        id: id.into(),
        slug: slug.into(),
        name: name.into(),
        author: "jellysquid3".into(),
        short_description: String::new(),
        icon_url: None,
        categories: vec![],
        downloads: 0,
        updated: String::new(),
        published: String::new(),
    }
}

pub fn version(v: &str, games: &[&str], kind: ReleaseKind) -> CatalogVersion {
    CatalogVersion {
        version: v.into(),
        changelog: String::new(),
        release_kind: kind,
        compatible_game_versions: games.iter().map(|g| g.to_string()).collect(),
        assets: vec![],
    }
}

pub fn release(v: &str) -> CatalogVersion {
    version(v, &["1.17.1"], ReleaseKind::Release)
}

/// Temp dir holding a `mods` folder.
pub fn setup_mods_dir() -> (TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    let mods = root.join("mods");
    std::fs::create_dir_all(&mods).unwrap();
    (tmp, mods)
}

/// Writes a jar whose `fabric.mod.json` holds `metadata`.
pub fn write_jar(dir: &Utf8Path, file_name: &str, metadata: &str) -> Utf8PathBuf {
    let path = dir.join(file_name);
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("fabric.mod.json", SimpleFileOptions::default()).unwrap();
    zip.write_all(metadata.as_bytes()).unwrap();
    zip.start_file("assets/icon.png", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"not really a png").unwrap();
    zip.finish().unwrap();
    path
}

pub fn write_mod_jar(dir: &Utf8Path, id: &str, version: &str) -> Utf8PathBuf {
    let metadata = format!(r#"{{"schemaVersion":1,"id":"{id}","name":"{id}","version":"{version}"}}"#);
    write_jar(dir, &format!("{id}-{version}.jar"), &metadata)
}
