//! Translation of service failures into HTTP problem responses.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::routes::headers::{HeaderUtil, apply_headers};
use crate::services::ServiceError;

const PROBLEM_JSON: &str = "application/problem+json";

/// A rejected request carrying the entity and reason code shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadRequestAlert {
    pub application_name: String,
    pub title: String,
    pub entity_name: String,
    pub error_key: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.title)]
    BadRequest(BadRequestAlert),

    #[error("Not Found")]
    NotFound,

    #[error("Internal Server Error")]
    Internal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem<'a> {
    title: &'a str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ApiError {
    pub fn bad_request(
        application_name: &str,
        title: impl Into<String>,
        entity_name: &str,
        error_key: &str,
    ) -> Self {
        ApiError::BadRequest(BadRequestAlert {
            application_name: application_name.to_string(),
            title: title.into(),
            entity_name: entity_name.to_string(),
            error_key: error_key.to_string(),
        })
    }

    /// Maps a service failure; storage errors are logged and hidden.
    pub fn from_service(err: ServiceError, application_name: &str, entity_name: &str) -> Self {
        match err {
            ServiceError::NotFound => ApiError::NotFound,
            ServiceError::Validation(message) => {
                ApiError::bad_request(application_name, message, entity_name, "validation")
            }
            ServiceError::Repository(err) => {
                error!("Repository failure for {entity_name}: {err}");
                ApiError::Internal
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        builder.insert_header((header::CONTENT_TYPE, PROBLEM_JSON));

        let problem = match self {
            ApiError::BadRequest(alert) => {
                apply_headers(
                    &mut builder,
                    HeaderUtil::new(&alert.application_name)
                        .failure_alert(&alert.entity_name, &alert.error_key),
                );
                Problem {
                    title: &alert.title,
                    status: status.as_u16(),
                    entity_name: Some(&alert.entity_name),
                    error_key: Some(&alert.error_key),
                    message: Some(format!("error.{}", alert.error_key)),
                }
            }
            _ => Problem {
                title: status.canonical_reason().unwrap_or("Error"),
                status: status.as_u16(),
                entity_name: None,
                error_key: None,
                message: None,
            },
        };

        match serde_json::to_string(&problem) {
            Ok(body) => builder.body(body),
            Err(_) => builder.finish(),
        }
    }
}

