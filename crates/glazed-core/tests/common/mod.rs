#![allow(dead_code)]

use std::{collections::HashMap, path::Path, sync::Arc};

use glazed_core::{
    downloads::{decode_text, Fetcher}, game_paths::ModsLocation, installer::Installer, manifest::Manifest, presenter::Presenter,
    version_store::VersionStore, Error,
};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// Serves canned responses instead of going to the network.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<Vec<u8>, String>>,
    requests: Mutex<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_owned(), Ok(body.into()));
        self
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.responses.insert(url.to_owned(), Err(reason.to_owned()));
        self
    }

    /// Every download waits for a permit of `gate` first.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Serves every file of `target` with its own URL as the body.
    pub fn serve_target(self, manifest: &Manifest, target: &str) -> Self {
        let urls = manifest.urls_for(target).unwrap().values().cloned().collect::<Vec<_>>();
        urls.into_iter().fold(self, |fetcher, url| {
            let body = url.clone().into_bytes();
            fetcher.serve(&url, body)
        })
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.requests.lock().push(url.to_owned());
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(Error::network(url, reason)),
            None => Err(Error::network(url, "HTTP status client error (404 Not Found)")),
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let body = self.respond(url)?;
        Ok(decode_text(&body))
    }

    async fn download(&self, url: &str, path: &Path) -> Result<(), Error> {
        let _permit = match &self.gate {
            Some(gate) => Some(gate.acquire().await.unwrap()),
            None => None,
        };

        let body = self.respond(url)?;
        tokio::fs::write(path, body).await.map_err(|err| Error::io(path, &err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Confirm(String),
    Notify(String),
    Error(String),
    Success(String),
}

/// Remembers every callback and answers questions with a fixed choice.
pub struct RecordingPresenter {
    answer: bool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingPresenter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.filter(|call| match call {
            Call::Error(message) => Some(message.clone()),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.filter(|call| match call {
            Call::Success(message) => Some(message.clone()),
            _ => None,
        })
    }

    pub fn questions(&self) -> Vec<String> {
        self.filter(|call| match call {
            Call::Confirm(message) => Some(message.clone()),
            _ => None,
        })
    }

    fn filter(&self, f: impl Fn(&Call) -> Option<String>) -> Vec<String> {
        self.calls.lock().iter().filter_map(f).collect()
    }
}

impl Presenter for RecordingPresenter {
    fn confirm(&self, message: &str) -> bool {
        self.calls.lock().push(Call::Confirm(message.to_owned()));
        self.answer
    }

    fn notify(&self, message: &str) {
        self.calls.lock().push(Call::Notify(message.to_owned()));
    }

    fn report_error(&self, message: &str) {
        self.calls.lock().push(Call::Error(message.to_owned()));
    }

    fn report_success(&self, message: &str) {
        self.calls.lock().push(Call::Success(message.to_owned()));
    }
}

pub struct Sandbox {
    pub dir: tempfile::TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn mods_dir(&self) -> std::path::PathBuf {
        self.dir.path().join(".minecraft").join("mods")
    }

    pub fn store(&self) -> VersionStore {
        VersionStore::new(self.dir.path().join(".glazed_version.txt"))
    }

    pub fn marker(&self) -> Option<String> {
        std::fs::read_to_string(self.store().path()).ok()
    }

    pub fn installer(&self, fetcher: Arc<FakeFetcher>, manifest: Arc<Manifest>) -> Installer {
        Installer::builder()
            .fetcher(fetcher)
            .store(self.store())
            .manifest(manifest)
            .mods_location(ModsLocation::Custom(self.mods_dir()))
            .build()
    }
}
