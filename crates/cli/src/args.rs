use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glazed_core::DOT_GLAZED_SETTINGS_CONFIG;

#[derive(Parser)]
#[command(verbatim_doc_comment, version)]
///    ________                     __
///   / ____/ /___ _____  ___  ____/ /
///  / / __/ / __ `/_  / / _ \/ __  /
/// / /_/ / / /_/ / / /_/  __/ /_/ /
/// \____/_/\__,_/ /___/\___/\__,_/
/// Glazed Client installer
pub struct Cli {
    /// Settings file
    #[arg(long, short = 'c', default_value = DOT_GLAZED_SETTINGS_CONFIG)]
    pub config: PathBuf,
    /// Put the mods here instead of `.minecraft/mods`
    #[arg(long, short = 'm')]
    pub mods_dir: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `glazed_core=trace`
    #[arg(long, short = 'l')]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show Minecraft versions that can be installed
    Versions,
    /// Check for a new installer version
    Check,
    /// Install the mods for a Minecraft version
    Install {
        /// Minecraft version, e.g. 1.21.4
        target: String,
        /// Answer yes to every question
        #[arg(long, short)]
        yes: bool,
        /// Skip the update check that runs alongside the install
        #[arg(long)]
        no_update_check: bool,
    },
    /// Show the installed version and the mods folder
    Status,
    /// Write a settings file with the default values
    InitConfig,
}
