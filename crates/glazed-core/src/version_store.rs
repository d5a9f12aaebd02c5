use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use tracing::{debug, error, warn};

use crate::{
    error::{Error, FsError},
    UNKNOWN_VERSION, VERSION_FILE_NAME,
};

/// What the marker file says is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRecord {
    pub tool_version: String,
    /// Empty when nothing has been installed yet.
    pub target_version: String,
}

impl Default for VersionRecord {
    fn default() -> Self {
        Self {
            tool_version: UNKNOWN_VERSION.to_owned(),
            target_version: String::new(),
        }
    }
}

impl VersionRecord {
    pub fn new(tool_version: impl Into<String>, target_version: impl Into<String>) -> Self {
        Self {
            tool_version: tool_version.into(),
            target_version: target_version.into(),
        }
    }

    /// Parses `"<tool>,<target>"`. Fields after the second are ignored.
    ///
    /// An empty tool field makes the whole record malformed, so a saved
    /// target next to it is not kept.
    pub fn parse(content: &str) -> Option<Self> {
        let mut fields = content.trim().split(',');

        let tool_version = fields.next().filter(|tool| !tool.is_empty())?;
        let target_version = fields.next().unwrap_or_default();

        Some(Self::new(tool_version, target_version))
    }
}

impl Display for VersionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.tool_version, self.target_version)
    }
}

/// One-line marker file holding the installed [`VersionRecord`].
///
/// The format has no escaping, so versions must not contain commas.
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
}

impl VersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.glazed_version.txt`, or a file in the current directory when the
    /// home directory is unknown.
    pub fn default_path() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(VERSION_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_read(&self) -> Result<VersionRecord, Error> {
        let bytes = std::fs::read(&self.path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path: self.path.clone() }.into(),
            _ => Error::io(&self.path, &err),
        })?;

        let malformed = || FsError::MalformedMarker { path: self.path.clone() };

        let content = String::from_utf8(bytes).map_err(|_| malformed())?;
        VersionRecord::parse(&content).ok_or_else(|| malformed().into())
    }

    /// Never fails: a missing or unreadable marker is treated as "nothing
    /// installed".
    pub fn read(&self) -> VersionRecord {
        match self.try_read() {
            Ok(record) => record,
            Err(err) if err.is_not_found() => {
                debug!("No version marker at {}", self.path.display());
                VersionRecord::default()
            }
            Err(err) => {
                warn!("Error reading saved version: {err}");
                VersionRecord::default()
            }
        }
    }

    pub fn try_write(&self, tool_version: &str, target_version: &str) -> Result<(), Error> {
        if tool_version.contains(',') || target_version.contains(',') {
            warn!(tool_version, target_version, "Version strings contain a comma, the marker will not read back as written");
        }

        let record = VersionRecord::new(tool_version, target_version);
        std::fs::write(&self.path, record.to_string()).map_err(|err| Error::io(&self.path, &err))?;

        debug!("Saved version marker {record} to {}", self.path.display());

        Ok(())
    }

    /// Overwrites the marker. Failures are logged and otherwise ignored.
    pub fn write(&self, tool_version: &str, target_version: &str) {
        if let Err(err) = self.try_write(tool_version, target_version) {
            error!("Error saving version: {err}");
        }
    }
}
