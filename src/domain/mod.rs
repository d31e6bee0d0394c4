//! Domain types exposed by the ads song service layer.

pub mod ads_song;
pub mod criteria;
pub mod types;
