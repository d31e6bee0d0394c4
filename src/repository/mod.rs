use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        ads_song::{AdsSong, NewAdsSong, UpdateAdsSong},
        criteria::AdsSongCriteria,
        types::AdsSongId,
    },
    pagination::{Page, PageRequest},
    repository::errors::RepositoryResult,
};

pub mod ads_song;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed repository shared by all handlers.
///
/// Cloning is cheap: only the pool handle is duplicated.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait AdsSongReader {
    fn get_ads_song_by_id(&self, id: AdsSongId) -> RepositoryResult<Option<AdsSong>>;
    fn list_ads_songs(
        &self,
        criteria: &AdsSongCriteria,
        page: &PageRequest,
    ) -> RepositoryResult<Page<AdsSong>>;
    fn count_ads_songs(&self, criteria: &AdsSongCriteria) -> RepositoryResult<usize>;
    /// Free-text search: every whitespace-separated term must occur in the
    /// title, artist or url.
    fn search_ads_songs(&self, query: &str, page: &PageRequest)
    -> RepositoryResult<Page<AdsSong>>;
}

pub trait AdsSongWriter {
    fn create_ads_song(&self, new_song: &NewAdsSong) -> RepositoryResult<AdsSong>;
    fn update_ads_song(&self, id: AdsSongId, updates: &UpdateAdsSong)
    -> RepositoryResult<AdsSong>;
    /// Deleting a missing record is not an error.
    fn delete_ads_song(&self, id: AdsSongId) -> RepositoryResult<()>;
}
