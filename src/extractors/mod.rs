// src/extractors/mod.rs
pub mod links;

// Re-export key extraction types for convenience
pub use links::{find_download_link, Anchor};
