// src/cnv/mod.rs
pub mod client;
pub mod models;

pub use client::fetch_latest;

