#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
pub mod app;
pub mod configs;
pub mod downloads;
pub mod installer;
pub mod manifest;
pub mod presenter;
pub mod update;
pub mod version_store;

pub mod error;

pub mod fs;
pub mod game_paths;

pub mod consts;

pub use consts::*;
pub use error::{Error, FsError, ManifestError};
