use crate::models::config::UpdateConfig;
use crate::models::error::SError;
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use tracing::warn;

const APP_NAME: &str = "mod_scout";
const CONFIG_NAME: &str = "config";

/// Per-user data directory, falling back to the executable's folder.
pub fn data_dir() -> Utf8PathBuf {
    ProjectDirs::from("com", "martes", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe_path| exe_path.parent().map(|p| p.to_path_buf()))
        })
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("."))
}

pub fn logs_dir() -> Utf8PathBuf {
    data_dir().join("logs")
}

/// Where the mod state registry snapshot is kept between runs.
pub fn state_file() -> Utf8PathBuf {
    data_dir().join("states.toml")
}

impl UpdateConfig {
    pub fn load() -> Result<UpdateConfig, SError> {
        Ok(confy::load(APP_NAME, CONFIG_NAME)?)
    }

    /// Like [`UpdateConfig::load`], but a broken config file yields defaults.
    pub fn load_or_default() -> UpdateConfig {
        Self::load()
            .inspect_err(|e| warn!(error = %e, "using default update config"))
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), SError> {
        Ok(confy::store(APP_NAME, CONFIG_NAME, self)?)
    }

    pub fn load_path(path: &Utf8Path) -> Result<UpdateConfig, SError> {
        Ok(confy::load_path(path)?)
    }

    pub fn save_path(&self, path: &Utf8Path) -> Result<(), SError> {
        Ok(confy::store_path(path, self)?)
    }
}
