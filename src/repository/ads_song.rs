use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::ads_song::{AdsSong, NewAdsSong, UpdateAdsSong};
use crate::domain::criteria::AdsSongCriteria;
use crate::domain::types::AdsSongId;
use crate::models::ads_song::{
    AdsSong as DbAdsSong, NewAdsSong as DbNewAdsSong, UpdateAdsSong as DbUpdateAdsSong,
};
use crate::pagination::{Page, PageRequest, Sort, SortDirection};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdsSongReader, AdsSongWriter, DieselRepository};
use crate::schema::ads_songs;

type BoxedQuery<'a> = ads_songs::BoxedQuery<'a, Sqlite>;

/// Escapes `LIKE` wildcards and wraps the value for a substring match.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

macro_rules! filter_range {
    ($query:ident, $column:expr, $filter:expr) => {{
        let filter = &$filter;
        if let Some(value) = filter.equals {
            $query = $query.filter($column.eq(value));
        }
        if let Some(value) = filter.not_equals {
            $query = $query.filter($column.ne(value));
        }
        if let Some(values) = &filter.in_list {
            $query = $query.filter($column.eq_any(values.clone()));
        }
        if let Some(value) = filter.greater_than {
            $query = $query.filter($column.gt(value));
        }
        if let Some(value) = filter.less_than {
            $query = $query.filter($column.lt(value));
        }
        if let Some(value) = filter.greater_than_or_equal {
            $query = $query.filter($column.ge(value));
        }
        if let Some(value) = filter.less_than_or_equal {
            $query = $query.filter($column.le(value));
        }
        if let Some(specified) = filter.specified {
            $query = if specified {
                $query.filter($column.is_not_null())
            } else {
                $query.filter($column.is_null())
            };
        }
    }};
}

macro_rules! filter_string {
    ($query:ident, $column:expr, $filter:expr) => {{
        let filter = &$filter;
        if let Some(value) = &filter.equals {
            $query = $query.filter($column.eq(value.clone()));
        }
        if let Some(value) = &filter.not_equals {
            $query = $query.filter($column.ne(value.clone()));
        }
        if let Some(value) = &filter.contains {
            $query = $query.filter($column.like(like_pattern(value)).escape('\\'));
        }
        if let Some(value) = &filter.does_not_contain {
            $query = $query.filter($column.not_like(like_pattern(value)).escape('\\'));
        }
        if let Some(values) = &filter.in_list {
            $query = $query.filter($column.eq_any(values.clone()));
        }
        if let Some(specified) = filter.specified {
            $query = if specified {
                $query.filter($column.is_not_null())
            } else {
                $query.filter($column.is_null())
            };
        }
    }};
}

fn apply_criteria<'a>(mut query: BoxedQuery<'a>, criteria: &AdsSongCriteria) -> BoxedQuery<'a> {
    filter_range!(query, ads_songs::id, criteria.id);
    filter_string!(query, ads_songs::title, criteria.title);
    filter_string!(query, ads_songs::artist, criteria.artist);
    filter_range!(query, ads_songs::duration, criteria.duration);
    filter_string!(query, ads_songs::url, criteria.url);
    query
}

fn apply_search<'a>(mut query: BoxedQuery<'a>, search: &str) -> BoxedQuery<'a> {
    for term in search.split_whitespace() {
        let pattern = like_pattern(term);
        query = query.filter(
            ads_songs::title
                .nullable()
                .like(pattern.clone())
                .escape('\\')
                .or(ads_songs::artist.like(pattern.clone()).escape('\\'))
                .or(ads_songs::url.like(pattern).escape('\\')),
        );
    }
    query
}

macro_rules! order_by {
    ($query:ident, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $query.order($column.asc()),
            SortDirection::Desc => $query.order($column.desc()),
        }
    };
}

/// Orders by the requested property, breaking ties by id.
fn apply_sort<'a>(query: BoxedQuery<'a>, sort: Option<&Sort>) -> RepositoryResult<BoxedQuery<'a>> {
    let Some(sort) = sort else {
        return Ok(query.order(ads_songs::id.asc()));
    };

    let query = match sort.property.as_str() {
        "id" => return Ok(order_by!(query, ads_songs::id, sort.direction)),
        "title" => order_by!(query, ads_songs::title, sort.direction),
        "artist" => order_by!(query, ads_songs::artist, sort.direction),
        "duration" => order_by!(query, ads_songs::duration, sort.direction),
        "url" => order_by!(query, ads_songs::url, sort.direction),
        "createdAt" => order_by!(query, ads_songs::created_at, sort.direction),
        "updatedAt" => order_by!(query, ads_songs::updated_at, sort.direction),
        other => {
            return Err(RepositoryError::ValidationError(format!(
                "Unknown sort property: {other}"
            )));
        }
    };

    Ok(query.then_order_by(ads_songs::id.asc()))
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl DieselRepository {
    fn load_page(
        &self,
        filtered: impl Fn() -> BoxedQuery<'static>,
        page: &PageRequest,
    ) -> RepositoryResult<Page<AdsSong>> {
        let mut conn = self.conn()?;

        let total: i64 = filtered().count().get_result(&mut conn)?;

        let items = apply_sort(filtered(), page.sort.as_ref())?
            .limit(to_i64(page.size))
            .offset(to_i64(page.offset()))
            .select(DbAdsSong::as_select())
            .load::<DbAdsSong>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<AdsSong>>();

        Ok(Page::new(items, page, total as usize))
    }
}

impl AdsSongReader for DieselRepository {
    fn get_ads_song_by_id(&self, id: AdsSongId) -> RepositoryResult<Option<AdsSong>> {
        let mut conn = self.conn()?;
        let song = ads_songs::table
            .find(id.get())
            .select(DbAdsSong::as_select())
            .first::<DbAdsSong>(&mut conn)
            .optional()?;

        Ok(song.map(Into::into))
    }

    fn list_ads_songs(
        &self,
        criteria: &AdsSongCriteria,
        page: &PageRequest,
    ) -> RepositoryResult<Page<AdsSong>> {
        self.load_page(
            || apply_criteria(ads_songs::table.into_boxed(), criteria),
            page,
        )
    }

    fn count_ads_songs(&self, criteria: &AdsSongCriteria) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let total: i64 = apply_criteria(ads_songs::table.into_boxed(), criteria)
            .count()
            .get_result(&mut conn)?;

        Ok(total as usize)
    }

    fn search_ads_songs(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> RepositoryResult<Page<AdsSong>> {
        self.load_page(|| apply_search(ads_songs::table.into_boxed(), query), page)
    }
}

impl AdsSongWriter for DieselRepository {
    fn create_ads_song(&self, new_song: &NewAdsSong) -> RepositoryResult<AdsSong> {
        let mut conn = self.conn()?;
        let insertable = DbNewAdsSong::from_domain(new_song, Utc::now().naive_utc());

        let created = diesel::insert_into(ads_songs::table)
            .values(&insertable)
            .returning(DbAdsSong::as_returning())
            .get_result::<DbAdsSong>(&mut conn)?;

        Ok(created.into())
    }

    fn update_ads_song(
        &self,
        id: AdsSongId,
        updates: &UpdateAdsSong,
    ) -> RepositoryResult<AdsSong> {
        let mut conn = self.conn()?;
        let changes = DbUpdateAdsSong::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(ads_songs::table.find(id.get()))
            .set(&changes)
            .returning(DbAdsSong::as_returning())
            .get_result::<DbAdsSong>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_ads_song(&self, id: AdsSongId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        diesel::delete(ads_songs::table.find(id.get())).execute(&mut conn)?;
        Ok(())
    }
}
