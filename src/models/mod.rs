//! Database models and configuration shared across the service.

pub mod ads_song;
#[cfg(feature = "server")]
pub mod config;
