use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;
use reqwest::Url;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::{
    downloads::Fetcher,
    error::{Error, FsError},
    game_paths::ModsLocation,
    manifest::{file_name_from_url, Manifest, Role},
    presenter::Presenter,
    version_store::VersionStore,
    INSTALLER_NAME, LEGACY_MOD_FILES,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InstallState {
    #[default]
    Idle,
    ResolvingPath,
    EnsuringDirectory,
    RemovingLegacy,
    ValidatingManifest,
    Downloading {
        index: usize,
        file_name: String,
    },
    Persisting,
    Done,
    Failed,
}

impl InstallState {
    /// `true` between the start of an install and its terminal state.
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle | Self::Done | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    pub target_version: String,
}

impl InstallRequest {
    pub fn new(target_version: impl Into<String>) -> Self {
        Self {
            target_version: target_version.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    /// The file existed and the user chose to keep it.
    Skipped(PathBuf),
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub mods_dir: PathBuf,
    pub target_version: String,
    pub files: Vec<(Role, DownloadOutcome)>,
}

impl InstallReport {
    pub fn message(&self) -> String {
        format!(
            "{INSTALLER_NAME} has been installed for Minecraft {}!\n\n\
             Files have been placed in: {}\n\n\
             Launch Minecraft with the selected version to play with mods.",
            self.target_version,
            self.mods_dir.display()
        )
    }
}

/// Why an install stopped, and where.
#[derive(Debug)]
pub struct InstallFailure {
    pub state: InstallState,
    pub error: Error,
}

impl std::error::Error for InstallFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Display for InstallFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            InstallState::EnsuringDirectory => write!(f, "Cannot create mods folder: {}", self.error),
            InstallState::Downloading { file_name, .. } => {
                write!(f, "Error while downloading {file_name}: {}", self.error)
            }
            _ => write!(f, "{}", self.error),
        }
    }
}

/// Puts the mod files of one game version into the mods directory.
#[derive(TypedBuilder)]
pub struct Installer {
    fetcher: Arc<dyn Fetcher>,
    store: VersionStore,
    #[builder(default = Manifest::builtin())]
    manifest: Arc<Manifest>,
    #[builder(default)]
    mods_location: ModsLocation,
    #[builder(setter(skip), default)]
    state: Mutex<InstallState>,
}

impl Installer {
    pub fn state(&self) -> InstallState {
        self.state.lock().clone()
    }

    pub fn is_installing(&self) -> bool {
        self.state.lock().is_busy()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Runs the whole install and reports the outcome to `presenter`.
    ///
    /// While another install is running this does nothing and returns
    /// [`Error::AlreadyInstalling`].
    pub async fn start_install(
        &self,
        request: &InstallRequest,
        presenter: &dyn Presenter,
    ) -> Result<InstallReport, InstallFailure> {
        let guard = InstallGuard::begin(&self.state).map_err(|state| {
            warn!("Ignoring install request for {}, already {state:?}", request.target_version);
            InstallFailure {
                state,
                error: Error::AlreadyInstalling,
            }
        })?;

        info!("Starting installation for Minecraft {}", request.target_version);

        let result = self.run(&guard, request, presenter).await;

        match &result {
            Ok(report) => {
                guard.enter(InstallState::Done);
                presenter.report_success(&report.message());
            }
            Err(failure) => {
                guard.enter(InstallState::Failed);
                warn!(state = ?failure.state, "Installation failed: {failure}");
                presenter.report_error(&failure.to_string());
            }
        }

        info!("Installation finished.");

        result
    }

    async fn run(
        &self,
        guard: &InstallGuard<'_>,
        request: &InstallRequest,
        presenter: &dyn Presenter,
    ) -> Result<InstallReport, InstallFailure> {
        let target = request.target_version.as_str();

        let mods_dir = self
            .mods_location
            .resolve()
            .ok_or_else(|| guard.fail(FsError::GameDirUnresolved.into()))?;
        checkpoint().await;

        guard.enter(InstallState::EnsuringDirectory);
        tokio::fs::create_dir_all(&mods_dir)
            .await
            .map_err(|err| guard.fail(Error::io(&mods_dir, &err)))?;
        checkpoint().await;

        guard.enter(InstallState::RemovingLegacy);
        remove_legacy_files(&mods_dir, presenter).await;
        checkpoint().await;

        guard.enter(InstallState::ValidatingManifest);
        let files = self
            .manifest
            .validate(target)
            .map_err(|err| guard.fail(err.into()))?;
        checkpoint().await;

        let total = files.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, (role, url)) in files.into_iter().enumerate() {
            let Some(file_name) = file_name_from_url(url) else {
                guard.enter(InstallState::Downloading {
                    index,
                    file_name: role.name().to_owned(),
                });
                return Err(guard.fail(Error::network(url, "the link does not name a file")));
            };
            guard.enter(InstallState::Downloading {
                index,
                file_name: file_name.to_owned(),
            });

            let path = mods_dir.join(file_name);
            if tokio::fs::try_exists(&path).await.unwrap_or(false)
                && !presenter.confirm(&format!("File {file_name} already exists. Do you want to overwrite it?"))
            {
                info!("Keeping existing {file_name}");
                outcomes.push((role, DownloadOutcome::Skipped(path)));
                continue;
            }

            presenter.notify(&format!("Downloading {file_name} from {}...", source_name(url)));
            checkpoint().await;

            self.fetcher.download(url, &path).await.map_err(|err| guard.fail(err))?;
            info!("Progress: {:.1}%", percent(index + 1, total));

            outcomes.push((role, DownloadOutcome::Downloaded(path)));
            checkpoint().await;
        }

        presenter.notify("Installation completed successfully!");

        guard.enter(InstallState::Persisting);
        let saved = self.store.read();
        self.store.write(&saved.tool_version, target);

        Ok(InstallReport {
            mods_dir,
            target_version: target.to_owned(),
            files: outcomes,
        })
    }
}

/// Owns the busy state of one install and leaves it terminal on every exit
/// path, including panics and a dropped future.
struct InstallGuard<'a> {
    state: &'a Mutex<InstallState>,
}

impl<'a> InstallGuard<'a> {
    fn begin(state: &'a Mutex<InstallState>) -> Result<Self, InstallState> {
        let mut current = state.lock();
        if current.is_busy() {
            return Err(current.clone());
        }
        *current = InstallState::ResolvingPath;

        Ok(Self { state })
    }

    fn enter(&self, next: InstallState) {
        debug!(state = ?next, "Install step");
        *self.state.lock() = next;
    }

    fn fail(&self, error: Error) -> InstallFailure {
        InstallFailure {
            state: self.state.lock().clone(),
            error,
        }
    }
}

impl Drop for InstallGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.is_busy() {
            *state = InstallState::Failed;
        }
    }
}

async fn remove_legacy_files(mods_dir: &Path, presenter: &dyn Presenter) {
    for file_name in LEGACY_MOD_FILES {
        let path = mods_dir.join(file_name);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }

        presenter.notify(&format!("Removing old mod: {file_name}"));
        if let Err(err) = tokio::fs::remove_file(&path).await {
            warn!("Could not remove {file_name}: {err}");
        }
    }
}

/// Lets the front-end run between steps.
async fn checkpoint() {
    tokio::task::yield_now().await;
}

fn source_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[allow(clippy::cast_precision_loss)]
fn percent(done: usize, total: usize) -> f64 {
    done as f64 / total as f64 * 100.0
}
