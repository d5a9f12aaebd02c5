use std::path::Path;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;

pub async fn write_toml_config<T>(data: &T, path: impl AsRef<Path>) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    let body = toml::to_string_pretty(data)?;
    write_to_file(body.as_bytes(), path).await?;

    tracing::info!("Config {} has been created successfully", path.to_string_lossy());

    Ok(())
}

pub async fn read_toml_config<T>(path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    let string = tokio::fs::read_to_string(&path).await?;
    let body: T = serde_path_to_error::deserialize(toml::Deserializer::new(&string))
        .with_context(|| format!("invalid config {}", path.to_string_lossy()))?;

    tracing::info!("Config {} has been read successfully", path.to_string_lossy());

    Ok(body)
}

pub async fn write_to_file(data: &[u8], path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let mut file = tokio::fs::File::create(&path).await?;

    file.write_all(data).await?;

    Ok(())
}
