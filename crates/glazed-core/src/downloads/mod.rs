use std::{path::Path, time::Duration};

use futures_util::stream::StreamExt;
use reqwest::Client;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, error};

use crate::{error::Error, DOWNLOAD_CHUNK_SIZE, DOWNLOAD_TIMEOUT, USER_AGENT, VERSION_CHECK_TIMEOUT};

/// Source of remote content.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// GETs `url` and returns its body as UTF-8 text, see [`decode_text`].
    async fn fetch_text(&self, url: &str) -> Result<String, Error>;

    /// Streams `url` into `path`, creating or truncating the file.
    ///
    /// Nothing is cleaned up on failure, a partial file may stay behind.
    async fn download(&self, url: &str, path: &Path) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    text_timeout: Duration,
    download_timeout: Duration,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| Error::network("", err))?;

        Ok(Self {
            client,
            text_timeout: VERSION_CHECK_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let bytes = self
            .client
            .get(url)
            .timeout(self.text_timeout)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| Error::network(url, err))?
            .bytes()
            .await
            .map_err(|err| Error::network(url, err))?;

        Ok(decode_text(&bytes))
    }

    async fn download(&self, url: &str, path: &Path) -> Result<(), Error> {
        let res = self
            .client
            .get(url)
            .timeout(self.download_timeout)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| Error::network(url, err))?;

        let file = tokio::fs::File::create(path).await.map_err(|err| {
            error!("Error occurred during file creating\nPath: {}\nError: {}", path.to_string_lossy(), err);
            Error::io(path, &err)
        })?;
        let mut file = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);

        let mut stream = res.bytes_stream();

        while let Some(item) = stream.next().await {
            let chunk = item.map_err(|err| {
                error!("Error occurred during file downloading\nError: {}", err);
                Error::network(url, err)
            })?;

            file.write_all(&chunk).await.map_err(|err| {
                error!("Error occurred during writing to file\nError: {}", err);
                Error::io(path, &err)
            })?;
        }

        file.flush().await.map_err(|err| Error::io(path, &err))?;

        debug!("Downloaded successfully {}", path.to_string_lossy());

        Ok(())
    }
}

/// Decodes UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
