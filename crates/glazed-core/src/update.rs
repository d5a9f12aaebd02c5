use std::sync::Arc;

use tracing::{info, warn};

use crate::{downloads::Fetcher, error::Error, version_store::VersionStore, UNKNOWN_VERSION};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatus {
    pub has_update: bool,
    /// Trimmed body of the version endpoint.
    pub latest: String,
    /// Tool version the marker file had at the time of the check.
    pub current: String,
}

/// Compares the published installer version with the installed one.
#[derive(Clone)]
pub struct UpdateChecker {
    fetcher: Arc<dyn Fetcher>,
    store: VersionStore,
    url: String,
}

impl UpdateChecker {
    pub fn new(fetcher: Arc<dyn Fetcher>, store: VersionStore, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            store,
            url: url.into(),
        }
    }

    pub async fn try_check(&self) -> Result<UpdateStatus, Error> {
        let body = self.fetcher.fetch_text(&self.url).await?;
        let latest = body.trim().to_owned();
        let current = self.store.read().tool_version;

        info!("Latest version: {latest}, Saved version: {current}");

        Ok(UpdateStatus {
            has_update: latest != current,
            latest,
            current,
        })
    }

    /// Returns `(has_update, latest_version)`. Any failure yields `(false, "0")`.
    pub async fn check(&self) -> (bool, String) {
        match self.try_check().await {
            Ok(status) => (status.has_update, status.latest),
            Err(err) => {
                warn!(url = %self.url, "Error checking Glazed version: {err}");
                (false, UNKNOWN_VERSION.to_owned())
            }
        }
    }
}
