use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::{self, Receiver, Sender},
    task::JoinHandle,
};
use tracing::{debug, error, info};

use crate::{
    configs::Settings,
    downloads::{Fetcher, HttpFetcher},
    error::Error,
    game_paths::ModsLocation,
    installer::{InstallFailure, InstallReport, InstallRequest, Installer},
    manifest::Manifest,
    presenter::Presenter,
    update::UpdateChecker,
    version_store::VersionStore,
    INSTALLER_NAME, STARTUP_CHECK_DELAY,
};

/// Work handed back to the orchestration loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    UpdateChecked {
        manual: bool,
        has_update: bool,
        latest: String,
    },
}

/// Ties the workflow together for a front-end.
///
/// Background work only ever sends [`AppEvent`]s; the presenter and the
/// version marker are touched exclusively from [`App::handle_event`].
pub struct App<P> {
    presenter: P,
    checker: UpdateChecker,
    installer: Installer,
    store: VersionStore,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl<P: Presenter> App<P> {
    pub fn new(presenter: P, fetcher: Arc<dyn Fetcher>, store: VersionStore, settings: Settings) -> Self {
        let manifest = settings.manifest.map_or_else(Manifest::builtin, Arc::new);

        let checker = UpdateChecker::new(fetcher.clone(), store.clone(), settings.version_url);
        let installer = Installer::builder()
            .fetcher(fetcher)
            .store(store.clone())
            .manifest(manifest)
            .mods_location(ModsLocation::from_override(settings.mods_dir))
            .build();

        let (tx, rx) = mpsc::channel(8);

        Self {
            presenter,
            checker,
            installer,
            store,
            tx,
            rx,
        }
    }

    /// Wires the app to the real network and the configured marker file.
    pub fn from_settings(presenter: P, settings: Settings) -> Result<Self, Error> {
        let store = VersionStore::new(settings.marker_file.clone().unwrap_or_else(VersionStore::default_path));
        let fetcher = Arc::new(HttpFetcher::new()?);

        Ok(Self::new(presenter, fetcher, store, settings))
    }

    pub fn installer(&self) -> &Installer {
        &self.installer
    }

    pub fn store(&self) -> &VersionStore {
        &self.store
    }

    /// The deferred one-shot check done when the installer opens.
    pub fn check_for_updates_on_startup(&self) -> JoinHandle<()> {
        self.spawn_check(false, STARTUP_CHECK_DELAY)
    }

    pub fn check_for_updates(&self, manual: bool) -> JoinHandle<()> {
        self.spawn_check(manual, Duration::ZERO)
    }

    fn spawn_check(&self, manual: bool, delay: Duration) -> JoinHandle<()> {
        let checker = self.checker.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let (has_update, latest) = checker.check().await;

            let event = AppEvent::UpdateChecked {
                manual,
                has_update,
                latest,
            };
            // The receiver lives as long as the app.
            let _ = tx.send(event).await;
        })
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<AppEvent> {
        self.rx.try_recv().ok()
    }

    /// Waits for a background task and handles everything it queued.
    pub async fn settle(&mut self, task: JoinHandle<()>) {
        if let Err(err) = task.await {
            error!("Background task failed: {err}");
        }

        while let Some(event) = self.try_next_event() {
            self.handle_event(event).await;
        }
    }

    pub async fn handle_event(&self, event: AppEvent) {
        match event {
            AppEvent::UpdateChecked {
                has_update: true, latest, ..
            } => self.offer_update(&latest).await,
            AppEvent::UpdateChecked { manual: true, .. } => {
                self.presenter.report_success("You have the latest version!");
            }
            AppEvent::UpdateChecked { .. } => debug!("Installer is up to date"),
        }
    }

    pub async fn start_install(&self, request: &InstallRequest) -> Result<InstallReport, InstallFailure> {
        self.installer.start_install(request, &self.presenter).await
    }

    /// Opens the installer and then installs `request`.
    ///
    /// The startup check is handled first, so an accepted update is recorded
    /// before the marker names the new target.
    pub async fn install_after_startup_check(
        &mut self,
        request: &InstallRequest,
        update_check: bool,
    ) -> Result<InstallReport, InstallFailure> {
        if update_check {
            let task = self.check_for_updates_on_startup();
            self.settle(task).await;
        }

        self.start_install(request).await
    }

    async fn offer_update(&self, version: &str) {
        let saved = self.store.read();

        let question = format!(
            "New {INSTALLER_NAME} version {version} is available!\n\n\
             Current version: {}\n\
             New version: {version}\n\n\
             Would you like to download the new version?",
            saved.tool_version
        );
        if !self.presenter.confirm(&question) {
            info!("Update to {version} declined");
            return;
        }

        self.store.write(version, &saved.target_version);

        if saved.target_version.is_empty() {
            self.presenter.report_success(&format!(
                "Version {version} has been saved. Please select a Minecraft version and install."
            ));
            return;
        }

        self.presenter
            .notify(&format!("Installing for Minecraft {}...", saved.target_version));
        if let Err(failure) = self.start_install(&InstallRequest::new(saved.target_version)).await {
            debug!(state = ?failure.state, "Reinstall after update did not finish: {failure}");
        }
    }
}
