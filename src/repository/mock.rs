//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::ads_song::{AdsSong, NewAdsSong, UpdateAdsSong};
use crate::domain::criteria::AdsSongCriteria;
use crate::domain::types::AdsSongId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AdsSongReader, AdsSongWriter};

mock! {
    pub Repository {}

    impl AdsSongReader for Repository {
        fn get_ads_song_by_id(&self, id: AdsSongId) -> RepositoryResult<Option<AdsSong>>;
        fn list_ads_songs(
            &self,
            criteria: &AdsSongCriteria,
            page: &PageRequest,
        ) -> RepositoryResult<Page<AdsSong>>;
        fn count_ads_songs(&self, criteria: &AdsSongCriteria) -> RepositoryResult<usize>;
        fn search_ads_songs(
            &self,
            query: &str,
            page: &PageRequest,
        ) -> RepositoryResult<Page<AdsSong>>;
    }

    impl AdsSongWriter for Repository {
        fn create_ads_song(&self, new_song: &NewAdsSong) -> RepositoryResult<AdsSong>;
        fn update_ads_song(
            &self,
            id: AdsSongId,
            updates: &UpdateAdsSong,
        ) -> RepositoryResult<AdsSong>;
        fn delete_ads_song(&self, id: AdsSongId) -> RepositoryResult<()>;
    }
}
