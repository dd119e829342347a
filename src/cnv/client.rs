// src/cnv/client.rs
use std::time::Duration;

use crate::cnv::models::{DownloadedDocument, SelectedLink};
use crate::extractors::find_download_link;
use crate::storage::StorageManager;
use crate::utils::config::Settings;
use crate::utils::error::CnvError;

/// Creates a plain reqwest client; the CNV site needs no special headers.
fn build_cnv_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
}

/// Sends a GET and turns non-2xx statuses into `CnvError::Http`.
async fn get_checked(client: &reqwest::Client, url: &str) -> Result<reqwest::Response, CnvError> {
    let response = client.get(url).send().await?; // Propagates reqwest::Error as CnvError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(CnvError::Http(status, url.to_string()));
    }

    Ok(response)
}

/// Fetches the index page HTML.
pub async fn fetch_index_page(client: &reqwest::Client, url: &str) -> Result<String, CnvError> {
    tracing::debug!("Fetching index page: {}", url);
    let body = get_checked(client, url).await?.text().await?;
    tracing::debug!("Index page is {} bytes", body.len());
    Ok(body)
}

/// Downloads the spreadsheet behind `link` as raw bytes.
pub async fn download_document(client: &reqwest::Client, link: &SelectedLink) -> Result<Vec<u8>, CnvError> {
    tracing::info!("Downloading spreadsheet for {}...", link.label);
    tracing::debug!("Download URL: {}", link.url);

    let bytes = get_checked(client, &link.url).await?.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", bytes.len(), link.url);
    Ok(bytes.to_vec())
}

/// Finds the newest recognized spreadsheet on the index page and saves it to
/// the download directory under today's temp name.
pub async fn download_latest(settings: &Settings, storage: &StorageManager) -> Result<DownloadedDocument, CnvError> {
    let client = build_cnv_client(settings.request_timeout)?;

    let html = fetch_index_page(&client, &settings.index_url).await?;
    // Only the first matching anchor counts; an empty href there means no link
    let anchor = find_download_link(&html, &settings.link_labels)
        .filter(|anchor| !anchor.href.is_empty())
        .ok_or(CnvError::LinkNotFound)?;
    let link = SelectedLink::resolve(&anchor, &settings.index_url)?;

    let bytes = download_document(&client, &link).await?;
    let path = storage.save_download(&bytes, chrono::Local::now().date_naive())?;

    Ok(DownloadedDocument { path, label: link.label })
}

/// Same as [`download_latest`], with failures logged and collapsed to `None`.
pub async fn fetch_latest(settings: &Settings, storage: &StorageManager) -> Option<DownloadedDocument> {
    match download_latest(settings, storage).await {
        Ok(document) => Some(document),
        Err(CnvError::LinkNotFound) => {
            tracing::error!("No download link found (looked for {:?})", settings.link_labels);
            None
        }
        Err(e) => {
            tracing::error!("Error downloading: {}", e);
            None
        }
    }
}
