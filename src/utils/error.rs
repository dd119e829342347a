// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum CnvError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {0} for URL: {1}")]
    Http(reqwest::StatusCode, String), // e.g., 404 Not Found, 503 Service Unavailable

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No download link found")]
    LinkNotFound,

    #[error("Could not store downloaded file: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Could not open spreadsheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    #[error("Spreadsheet has no sheets")]
    EmptyWorkbook,

    #[error("Spreadsheet has {found} columns, at least {required} are required")]
    TooFewColumns { found: usize, required: usize },

    #[error("Could not save summary: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet write error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Could not determine the home directory")]
    NoHomeDir,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
