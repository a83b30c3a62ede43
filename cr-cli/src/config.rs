use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use data_error::CrError;
use fs_records::{ARENAS_FILE, SETTINGS_FILE};
use profile_resolver::{ResolverConfig, API_FETCH_TIMEOUT};

use crate::AppError;

/// Contents of `settings.json`. Every field has a default, so a missing
/// file or a missing key falls back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile_api_url: Option<Url>,
    pub fetch_timeout_secs: u64,
    pub arenas_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile_api_url: None,
            fetch_timeout_secs: API_FETCH_TIMEOUT.as_secs(),
            arenas_path: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let path = data_dir.join(SETTINGS_FILE);
        if !path.exists() {
            log::debug!("settings: {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let bytes = std::fs::read(&path)?;
        let settings: Settings =
            serde_json::from_slice(&bytes).map_err(CrError::from)?;
        if settings.fetch_timeout_secs == 0 {
            return Err(CrError::Config(format!(
                "fetch_timeout_secs in {} must be at least 1",
                path.display()
            ))
            .into());
        }
        Ok(settings)
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            profile_api_url: self.profile_api_url.clone(),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }

    pub fn arenas_path(&self, data_dir: &Path) -> PathBuf {
        self.arenas_path
            .clone()
            .unwrap_or_else(|| data_dir.join(ARENAS_FILE))
    }
}
