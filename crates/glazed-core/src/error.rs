use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::manifest::Role;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{error}")]
    Network { url: String, error: String },

    #[error(transparent)]
    Filesystem(#[from] FsError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("An installation is already in progress")]
    AlreadyInstalling,
}

impl Error {
    pub fn network(url: impl Into<String>, error: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            error: error.to_string(),
        }
    }

    pub fn io(path: impl AsRef<Path>, error: &std::io::Error) -> Self {
        Self::Filesystem(FsError::Io {
            path: path.as_ref().to_path_buf(),
            error: error.to_string(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Filesystem(FsError::NotFound { .. }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("Cannot find Minecraft folder. Make sure the game is installed.")]
    GameDirUnresolved,

    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("{error}")]
    Io { path: PathBuf, error: String },

    #[error("{} is not a valid version marker", path.display())]
    MalformedMarker { path: PathBuf },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("Failed to load download URLs for Minecraft {0}. Please check your internet connection.")]
    UnknownTarget(String),

    #[error("Glazed Client not found. Please check if the latest release is available.")]
    CoreMissing,

    #[error("Missing required files: {}. Please try again later.", .0.iter().join(", "))]
    MissingRoles(Vec<Role>),
}
