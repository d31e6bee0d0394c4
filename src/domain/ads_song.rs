use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{AdsSongId, NonEmptyString, TypeConstraintError};

/// Entity name used in alert headers and error payloads.
pub const ENTITY_NAME: &str = "adsSong";

/// Externally exposed shape of an ads song.
///
/// The identifier is absent on records that have not been persisted yet.
/// Timestamps are maintained by the store and ignored on input.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdsSong {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub artist: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[serde(default)]
    #[validate(url)]
    pub url: Option<String>,
    #[serde(default, skip_deserializing)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_deserializing)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Validated payload for inserting a song.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAdsSong {
    pub title: NonEmptyString,
    pub artist: Option<String>,
    pub duration: Option<i32>,
    pub url: Option<String>,
}

/// Validated payload for replacing the fields of a stored song.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAdsSong {
    pub title: NonEmptyString,
    pub artist: Option<String>,
    pub duration: Option<i32>,
    pub url: Option<String>,
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl NewAdsSong {
    pub fn new(
        title: impl Into<String>,
        artist: Option<&str>,
        duration: Option<i32>,
        url: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            title: NonEmptyString::new(title)?,
            artist: normalize_optional(artist),
            duration,
            url: normalize_optional(url),
        })
    }
}

impl UpdateAdsSong {
    pub fn new(
        title: impl Into<String>,
        artist: Option<&str>,
        duration: Option<i32>,
        url: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            title: NonEmptyString::new(title)?,
            artist: normalize_optional(artist),
            duration,
            url: normalize_optional(url),
        })
    }
}

impl TryFrom<&AdsSong> for NewAdsSong {
    type Error = TypeConstraintError;

    fn try_from(dto: &AdsSong) -> Result<Self, Self::Error> {
        Self::new(
            dto.title.as_str(),
            dto.artist.as_deref(),
            dto.duration,
            dto.url.as_deref(),
        )
    }
}

impl TryFrom<&AdsSong> for UpdateAdsSong {
    type Error = TypeConstraintError;

    fn try_from(dto: &AdsSong) -> Result<Self, Self::Error> {
        Self::new(
            dto.title.as_str(),
            dto.artist.as_deref(),
            dto.duration,
            dto.url.as_deref(),
        )
    }
}

impl AdsSong {
    /// Returns the identifier as a typed id when present and valid.
    pub fn typed_id(&self) -> Option<Result<AdsSongId, TypeConstraintError>> {
        self.id.map(AdsSongId::new)
    }
}
