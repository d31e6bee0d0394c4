//! REST endpoints for managing ads songs.

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use log::debug;
use serde::Deserialize;

use crate::domain::ads_song::{AdsSong, ENTITY_NAME};
use crate::domain::criteria::AdsSongCriteria;
use crate::domain::types::{AdsSongId, TypeConstraintError};
use crate::models::config::ServerConfig;
use crate::pagination::{Page, PageParams, PageRequest};
use crate::repository::DieselRepository;
use crate::routes::errors::ApiError;
use crate::routes::headers::{HeaderUtil, apply_headers, pagination_headers};
use crate::services::{ServiceError, ads_song as ads_song_service};

#[derive(Deserialize)]
struct SearchQueryParams {
    query: String,
}

fn service_error(config: &ServerConfig) -> impl Fn(ServiceError) -> ApiError + '_ {
    |err| ApiError::from_service(err, &config.application_name, ENTITY_NAME)
}

fn validation_error(config: &ServerConfig) -> impl Fn(TypeConstraintError) -> ApiError + '_ {
    |err| {
        ApiError::bad_request(
            &config.application_name,
            err.to_string(),
            ENTITY_NAME,
            "validation",
        )
    }
}

fn page_request(config: &ServerConfig, params: PageParams) -> Result<PageRequest, ApiError> {
    PageRequest::try_from(params).map_err(validation_error(config))
}

fn paged_response(req: &HttpRequest, page: Page<AdsSong>) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    apply_headers(
        &mut builder,
        pagination_headers(req.path(), req.query_string(), &page),
    );
    builder.json(page.into_content())
}

#[post("/ads-songs")]
/// Create a new song. The payload must not carry an id.
pub async fn create_ads_song(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    web::Json(dto): web::Json<AdsSong>,
) -> Result<HttpResponse, ApiError> {
    debug!("REST request to save AdsSong : {dto:?}");
    if dto.id.is_some() {
        return Err(ApiError::bad_request(
            &config.application_name,
            "A new adsSong cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let result =
        ads_song_service::save_ads_song(repo.get_ref(), &dto).map_err(service_error(&config))?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    let mut builder = HttpResponse::Created();
    builder.insert_header(("Location", format!("/api/ads-songs/{id}")));
    apply_headers(
        &mut builder,
        HeaderUtil::new(&config.application_name).entity_creation_alert(ENTITY_NAME, &id),
    );
    Ok(builder.json(result))
}

#[put("/ads-songs")]
/// Replace an existing song. The payload must carry an id.
pub async fn update_ads_song(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    web::Json(dto): web::Json<AdsSong>,
) -> Result<HttpResponse, ApiError> {
    debug!("REST request to update AdsSong : {dto:?}");
    let Some(id) = dto.id else {
        return Err(ApiError::bad_request(
            &config.application_name,
            "Invalid id",
            ENTITY_NAME,
            "idnull",
        ));
    };

    let result =
        ads_song_service::save_ads_song(repo.get_ref(), &dto).map_err(service_error(&config))?;

    let mut builder = HttpResponse::Ok();
    apply_headers(
        &mut builder,
        HeaderUtil::new(&config.application_name)
            .entity_update_alert(ENTITY_NAME, &id.to_string()),
    );
    Ok(builder.json(result))
}

#[get("/ads-songs")]
/// List the songs matching the `field.operator` criteria, one page at a time.
pub async fn get_all_ads_songs(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    params: web::Query<HashMap<String, String>>,
    paging: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    let criteria = AdsSongCriteria::from_params(&params).map_err(validation_error(&config))?;
    debug!("REST request to get AdsSongs by criteria: {criteria:?}");
    let page_request = page_request(&config, paging.into_inner())?;

    let page = ads_song_service::find_by_criteria(repo.get_ref(), &criteria, &page_request)
        .map_err(service_error(&config))?;

    Ok(paged_response(&req, page))
}

#[get("/ads-songs/count")]
/// Count the songs matching the criteria.
pub async fn count_ads_songs(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError> {
    let criteria = AdsSongCriteria::from_params(&params).map_err(validation_error(&config))?;
    debug!("REST request to count AdsSongs by criteria: {criteria:?}");

    let count = ads_song_service::count_by_criteria(repo.get_ref(), &criteria)
        .map_err(service_error(&config))?;

    Ok(HttpResponse::Ok().json(count))
}

#[get("/ads-songs/{id}")]
/// Fetch a single song, or 404.
pub async fn get_ads_song(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    debug!("REST request to get AdsSong : {id}");
    let Ok(id) = AdsSongId::new(id) else {
        return Err(ApiError::NotFound);
    };

    match ads_song_service::find_ads_song(repo.get_ref(), id).map_err(service_error(&config))? {
        Some(song) => Ok(HttpResponse::Ok().json(song)),
        None => Err(ApiError::NotFound),
    }
}

#[delete("/ads-songs/{id}")]
/// Delete a song. Succeeds whether or not it existed.
pub async fn delete_ads_song(
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let raw_id = id.into_inner();
    debug!("REST request to delete AdsSong : {raw_id}");
    if let Ok(id) = AdsSongId::new(raw_id) {
        ads_song_service::delete_ads_song(repo.get_ref(), id).map_err(service_error(&config))?;
    }

    let mut builder = HttpResponse::NoContent();
    apply_headers(
        &mut builder,
        HeaderUtil::new(&config.application_name)
            .entity_deletion_alert(ENTITY_NAME, &raw_id.to_string()),
    );
    Ok(builder.finish())
}

#[get("/_search/ads-songs")]
/// Free-text search over the songs, one page at a time.
pub async fn search_ads_songs(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    params: web::Query<SearchQueryParams>,
    paging: web::Query<PageParams>,
) -> Result<HttpResponse, ApiError> {
    debug!(
        "REST request to search for a page of AdsSongs for query {}",
        params.query
    );
    let page_request = page_request(&config, paging.into_inner())?;

    let page = ads_song_service::search_ads_songs(repo.get_ref(), &params.query, &page_request)
        .map_err(service_error(&config))?;

    Ok(paged_response(&req, page))
}
