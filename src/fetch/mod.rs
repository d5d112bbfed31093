//! Loading the dataset document from a URL or a local file.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Fetches `url` and returns the body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Dataset downloaded");
    Ok(bytes)
}

/// Loads raw bytes from an `http(s)` URL or a local path.
#[tracing::instrument(skip(client))]
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source)
            .await
            .with_context(|| format!("fetching {}", source))
    } else {
        std::fs::read(source).with_context(|| format!("reading {}", source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Client that must never be called.
    struct Offline;

    #[async_trait]
    impl HttpClient for Offline {
        async fn execute(&self, _req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            unreachable!("local sources never hit the network")
        }
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let path = format!("{}/route_insights_fetch_test.json", std::env::temp_dir().display());
        std::fs::write(&path, b"[]").unwrap();

        let bytes = load_source(&Offline, &path).await.unwrap();
        assert_eq!(bytes, b"[]");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_names_source() {
        let err = load_source(&Offline, "/nonexistent/bus_data.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bus_data.json"));
    }
}
