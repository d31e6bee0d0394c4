//! HTTP surface of the service.

use actix_web::web;

pub mod ads_song;
pub mod errors;
pub mod headers;

/// Registers the ads song endpoints. Mounted under `/api` by [`crate::run`].
///
/// `/ads-songs/count` is registered ahead of `/ads-songs/{id}` so the literal
/// segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ads_song::create_ads_song)
        .service(ads_song::update_ads_song)
        .service(ads_song::get_all_ads_songs)
        .service(ads_song::count_ads_songs)
        .service(ads_song::get_ads_song)
        .service(ads_song::delete_ads_song)
        .service(ads_song::search_ads_songs);
}
