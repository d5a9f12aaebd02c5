use std::path::{Path, PathBuf};

/// Where the mods should go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModsLocation {
    /// `.minecraft/mods` following the platform's conventions.
    #[default]
    Platform,
    Custom(PathBuf),
}

impl ModsLocation {
    pub fn from_override(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Platform, Self::Custom)
    }

    pub fn resolve(&self) -> Option<PathBuf> {
        match self {
            ModsLocation::Platform => minecraft_dir().map(|dir| mods_dir(&dir)),
            ModsLocation::Custom(path) => Some(path.clone()),
        }
    }
}

pub fn mods_dir(minecraft_dir: &Path) -> PathBuf {
    minecraft_dir.join("mods")
}

/// `%APPDATA%\.minecraft`
#[cfg(target_os = "windows")]
pub fn minecraft_dir() -> Option<PathBuf> {
    minecraft_dir_in(dirs::data_dir())
}

/// `~/Library/Application Support/minecraft`
#[cfg(target_os = "macos")]
pub fn minecraft_dir() -> Option<PathBuf> {
    minecraft_dir_in(dirs::data_dir())
}

/// `~/.minecraft`
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn minecraft_dir() -> Option<PathBuf> {
    minecraft_dir_in(dirs::home_dir())
}

fn minecraft_dir_in(base: Option<PathBuf>) -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    const NAME: &str = "minecraft";
    #[cfg(not(target_os = "macos"))]
    const NAME: &str = ".minecraft";

    base.filter(|base| !base.as_os_str().is_empty()).map(|base| base.join(NAME))
}
