use std::time::Duration;

pub const DOT_GLAZED_DIR: &str = "./.glazed";
pub const DOT_GLAZED_SETTINGS_CONFIG: &str = "./.glazed/Settings.toml";
pub const DOT_GLAZED_LOGS_DIR: &str = "./.glazed/logs";

/// Name of the marker file inside the user's home directory.
pub const VERSION_FILE_NAME: &str = ".glazed_version.txt";

pub const VERSION_CHECK_URL: &str = "https://glazedclient.com/VERSION.txt";
pub const GLAZED_1_21_4_URL: &str = "https://glazedclient.com/szpuszi/glazed-1.21.4.jar";
pub const GLAZED_1_21_5_URL: &str = "https://glazedclient.com/szpuszi/glazed-1.21.5.jar";

/// Files shipped by earlier releases. They are removed before every install.
pub const LEGACY_MOD_FILES: [&str; 6] = [
    "baritone-meteor-1.21.4.jar",
    "glazed-1.21.4.jar",
    "meteor-client-1.21.4-42.jar",
    "baritone-meteor-1.21.5.jar",
    "glazed-1.21.5.jar",
    "meteor-client-1.21.5-54.jar",
];

pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Delay before the check that runs when the installer starts.
pub const STARTUP_CHECK_DELAY: Duration = Duration::from_secs(1);

/// Tool version assumed when no marker exists.
pub const UNKNOWN_VERSION: &str = "0";

pub const INSTALLER_NAME: &str = "Glazed Client";
pub const USER_AGENT: &str = concat!("glazed-installer/", env!("CARGO_PKG_VERSION"));
