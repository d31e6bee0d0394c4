use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ads_song::{
    AdsSong as DomainAdsSong, NewAdsSong as DomainNewAdsSong,
    UpdateAdsSong as DomainUpdateAdsSong,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ads_songs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::ads_song::AdsSong`].
pub struct AdsSong {
    pub id: i64,
    pub title: String,
    pub artist: Option<String>,
    pub duration: Option<i32>,
    pub url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ads_songs)]
/// Insertable form of [`AdsSong`].
pub struct NewAdsSong<'a> {
    pub title: &'a str,
    pub artist: Option<&'a str>,
    pub duration: Option<i32>,
    pub url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::ads_songs)]
#[diesel(treat_none_as_null = true)]
/// Data used when replacing an [`AdsSong`] record.
pub struct UpdateAdsSong<'a> {
    pub title: &'a str,
    pub artist: Option<&'a str>,
    pub duration: Option<i32>,
    pub url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<AdsSong> for DomainAdsSong {
    fn from(song: AdsSong) -> Self {
        Self {
            id: Some(song.id),
            title: song.title,
            artist: song.artist,
            duration: song.duration,
            url: song.url,
            created_at: Some(song.created_at),
            updated_at: Some(song.updated_at),
        }
    }
}

impl<'a> NewAdsSong<'a> {
    pub fn from_domain(song: &'a DomainNewAdsSong, now: NaiveDateTime) -> Self {
        Self {
            title: song.title.as_str(),
            artist: song.artist.as_deref(),
            duration: song.duration,
            url: song.url.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateAdsSong<'a> {
    pub fn from_domain(song: &'a DomainUpdateAdsSong, now: NaiveDateTime) -> Self {
        Self {
            title: song.title.as_str(),
            artist: song.artist.as_deref(),
            duration: song.duration,
            url: song.url.as_deref(),
            updated_at: now,
        }
    }
}
