// src/services/data_source.rs
use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::path::PathBuf;

use crate::models::DataDocument;

/// Where the `data.json` document lives. Every call reads a fresh copy.
#[derive(Debug, Clone)]
pub enum DataSource {
    File(PathBuf),
    Http { url: String, client: Client },
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Http {
                url: location.to_string(),
                client: Client::new(),
            }
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Http { url, .. } => url.clone(),
        }
    }

    /// Raw document text.
    pub async fn fetch_raw(&self) -> Result<String> {
        match self {
            DataSource::File(path) => {
                debug!("Reading data document from {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))
            }
            DataSource::Http { url, client } => {
                info!("Fetching data document from URL: {}", url);
                let text = client
                    .get(url)
                    .header(CACHE_CONTROL, "no-cache")
                    .header(PRAGMA, "no-cache")
                    .send()
                    .await
                    .with_context(|| format!("request to {} failed", url))?
                    .error_for_status()?
                    .text()
                    .await?;
                Ok(text)
            }
        }
    }

    pub async fn fetch(&self) -> Result<DataDocument> {
        let raw = self.fetch_raw().await?;
        let doc: DataDocument =
            serde_json::from_str(&raw).context("data document is not valid JSON")?;
        debug!("Loaded {} index records", doc.indexes.len());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn location_scheme_selects_source() {
        assert!(matches!(
            DataSource::from_location("https://example.com/data/data.json"),
            DataSource::Http { .. }
        ));
        assert!(matches!(
            DataSource::from_location("public/data/data.json"),
            DataSource::File(_)
        ));
    }

    #[tokio::test]
    async fn file_source_rereads_on_every_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"indexes":[]}}"#).unwrap();
        let source = DataSource::File(file.path().to_path_buf());
        assert!(source.fetch().await.unwrap().indexes.is_empty());

        std::fs::write(file.path(), r#"{"indexes":[{"code":"^HSI","name":"恒生指数"}]}"#).unwrap();
        assert_eq!(source.fetch().await.unwrap().indexes.len(), 1);
    }

    #[tokio::test]
    async fn malformed_document_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>not json</html>").unwrap();
        let source = DataSource::File(file.path().to_path_buf());
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = DataSource::File(PathBuf::from("/nonexistent/data.json"));
        assert!(source.fetch().await.is_err());
    }
}
