// src/models/config.rs
use crate::models::mod_dto::ReleaseKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which pre-release kinds are eligible as update candidates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReleaseChannel {
    #[default]
    StableOnly,
    AllowBeta,
    AllowAlpha,
}

impl ReleaseChannel {
    pub fn allows(self, kind: ReleaseKind) -> bool {
        match kind {
            ReleaseKind::Release => true,
            ReleaseKind::Beta => matches!(self, Self::AllowBeta | Self::AllowAlpha),
            ReleaseKind::Alpha => self == Self::AllowAlpha,
            ReleaseKind::Unknown => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UpdateConfig {
    pub default_provider: String,
    pub release_channel: ReleaseChannel,
    pub target_game_version: String,
    pub request_timeout_secs: u64,
    pub max_concurrent_checks: usize,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            default_provider: "modrinth".into(),
            release_channel: ReleaseChannel::default(),
            target_game_version: "1.17.1".into(),
            request_timeout_secs: 15,
            max_concurrent_checks: 8,
        }
    }
}

impl UpdateConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn is_release_allowed(&self, kind: ReleaseKind) -> bool {
        self.release_channel.allows(kind)
    }
}
