// src/cnv/models.rs
use std::path::PathBuf;

use url::Url;

use crate::extractors::Anchor;
use crate::utils::error::CnvError;

/// The download link chosen from the index page
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLink {
    pub url: String,  // Absolute
    pub label: String, // Trimmed anchor text, e.g. "jun. 2025"
}

impl SelectedLink {
    /// Resolves the anchor's href against the index page URL.
    /// Hrefs that already start with `http` are kept verbatim.
    pub fn resolve(anchor: &Anchor, index_url: &str) -> Result<Self, CnvError> {
        let url = if anchor.href.starts_with("http") {
            anchor.href.clone()
        } else {
            Url::parse(index_url)?.join(&anchor.href)?.to_string()
        };

        Ok(Self {
            url,
            label: anchor.label().to_string(),
        })
    }
}

/// A spreadsheet saved to the download directory, waiting to be summarized
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedDocument {
    pub path: PathBuf,
    pub label: String,
}
