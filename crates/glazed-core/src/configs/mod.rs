use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{fs::read_toml_config, manifest::Manifest, VERSION_CHECK_URL};

/// `Settings` is the installer's optional configuration file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub version_url: String,
    /// Overrides the marker file in the home directory.
    pub marker_file: Option<PathBuf>,
    /// Overrides the platform's `.minecraft/mods` directory.
    pub mods_dir: Option<PathBuf>,
    /// Replaces the built-in download links.
    pub manifest: Option<Manifest>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version_url: VERSION_CHECK_URL.to_owned(),
            marker_file: None,
            mods_dir: None,
            manifest: None,
        }
    }
}

impl Settings {
    /// Reads the settings file, falling back to defaults when it does not exist.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!("No settings at {}, using defaults", path.to_string_lossy());
            return Ok(Self::default());
        }

        read_toml_config(path).await
    }
}
