use crate::models::error::SError;
use crate::models::host::HostMod;
use crate::models::mod_dto::InstalledMod;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::fs::File;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Ids the host reports that are not real mods.
pub const BLOCKED_IDS: [&str; 2] = ["java", "minecraft"];
/// Loader internals all share this id prefix.
pub const HOST_ID_PREFIX: &str = "fabric";
pub const METADATA_FILE: &str = "fabric.mod.json";
pub const ARCHIVE_EXTENSION: &str = "jar";

/// Turns the host's mod list into the set of mods worth checking for updates.
pub struct InventoryScanner {
    mods_dir: Utf8PathBuf,
}

impl InventoryScanner {
    pub fn new(mods_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            mods_dir: mods_dir.into(),
        }
    }

    pub fn mods_dir(&self) -> &Utf8Path {
        &self.mods_dir
    }

    /// Filters the host inventory down to updatable mods. A mod is dropped if
    /// it is a host pseudo-mod, build-generated, or has no archive on disk.
    pub fn scan(&self, host_mods: &[HostMod]) -> Result<Vec<InstalledMod>, SError> {
        let archives = self.index_archives()?;

        let mods: Vec<InstalledMod> = host_mods
            .iter()
            .filter(|m| Self::is_checkable(m))
            .filter(|m| {
                let present = archives.contains_key(&m.id);
                if !present {
                    info!(mod_id = %m.id, "skipping update check, no archive in mods folder");
                }
                present
            })
            .map(HostMod::to_installed)
            .collect();

        debug!(count = mods.len(), "inventory scanned");
        Ok(mods)
    }

    /// Builds the inventory straight from the archives in the mods folder.
    pub fn scan_dir(&self) -> Result<Vec<InstalledMod>, SError> {
        let mut host_mods: Vec<HostMod> = self
            .archives()?
            .iter()
            .filter_map(|jar| Self::read_metadata_logged(jar))
            .collect();
        host_mods.sort_by(|a, b| a.id.cmp(&b.id));
        host_mods.dedup_by(|a, b| a.id == b.id);
        self.scan(&host_mods)
    }

    /// Maps mod id to the archive that declares it.
    pub fn index_archives(&self) -> Result<HashMap<String, Utf8PathBuf>, SError> {
        Ok(self
            .archives()?
            .into_iter()
            .filter_map(|jar| Self::read_metadata_logged(&jar).map(|meta| (meta.id, jar)))
            .collect())
    }

    pub fn is_checkable(m: &HostMod) -> bool {
        !m.id.starts_with(HOST_ID_PREFIX) && !m.is_generated() && !BLOCKED_IDS.contains(&m.id.as_str())
    }

    /// Reads the loader metadata packaged inside one archive.
    pub fn read_metadata(jar: &Utf8Path) -> Result<HostMod, SError> {
        let mut archive = zip::ZipArchive::new(File::open(jar)?)?;
        let entry = archive.by_name(METADATA_FILE)?;
        Ok(serde_json::from_reader(entry)?)
    }

    fn read_metadata_logged(jar: &Utf8Path) -> Option<HostMod> {
        Self::read_metadata(jar)
            .inspect_err(|e| warn!(archive = %jar, error = %e, "unreadable mod archive"))
            .ok()
    }

    fn archives(&self) -> Result<Vec<Utf8PathBuf>, SError> {
        if !self.mods_dir.is_dir() {
            warn!(dir = %self.mods_dir, "mods folder does not exist");
            return Ok(Vec::new());
        }

        let mut jars: Vec<Utf8PathBuf> = WalkDir::new(&self.mods_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| Utf8PathBuf::from_path_buf(e.into_path()).ok())
            .filter(|p| p.extension() == Some(ARCHIVE_EXTENSION))
            .collect();
        jars.sort();
        Ok(jars)
    }
}
