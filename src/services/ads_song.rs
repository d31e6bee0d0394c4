use validator::Validate;

use crate::domain::ads_song::{AdsSong, NewAdsSong, UpdateAdsSong};
use crate::domain::criteria::AdsSongCriteria;
use crate::domain::types::AdsSongId;
use crate::pagination::{Page, PageRequest};
use crate::repository::{AdsSongReader, AdsSongWriter};
use crate::services::{ServiceError, ServiceResult};

/// Persists the song: inserts it when it has no id, replaces the stored
/// record otherwise.
pub fn save_ads_song<R>(repo: &R, dto: &AdsSong) -> ServiceResult<AdsSong>
where
    R: AdsSongWriter + ?Sized,
{
    dto.validate()?;

    match dto.typed_id() {
        None => {
            let new_song = NewAdsSong::try_from(dto)?;
            repo.create_ads_song(&new_song).map_err(ServiceError::from)
        }
        Some(id) => {
            let id = id?;
            let updates = UpdateAdsSong::try_from(dto)?;
            repo.update_ads_song(id, &updates).map_err(ServiceError::from)
        }
    }
}

/// Fetches a song by its identifier.
pub fn find_ads_song<R>(repo: &R, id: AdsSongId) -> ServiceResult<Option<AdsSong>>
where
    R: AdsSongReader + ?Sized,
{
    repo.get_ads_song_by_id(id).map_err(ServiceError::from)
}

/// Removes a song; a missing id is not an error.
pub fn delete_ads_song<R>(repo: &R, id: AdsSongId) -> ServiceResult<()>
where
    R: AdsSongWriter + ?Sized,
{
    repo.delete_ads_song(id).map_err(ServiceError::from)
}

/// Runs a free-text search. Surrounding whitespace is ignored and a blank
/// query matches every song.
pub fn search_ads_songs<R>(
    repo: &R,
    query: &str,
    page: &PageRequest,
) -> ServiceResult<Page<AdsSong>>
where
    R: AdsSongReader + ?Sized,
{
    repo.search_ads_songs(query.trim(), page).map_err(ServiceError::from)
}

/// Returns the page of songs matching the criteria.
pub fn find_by_criteria<R>(
    repo: &R,
    criteria: &AdsSongCriteria,
    page: &PageRequest,
) -> ServiceResult<Page<AdsSong>>
where
    R: AdsSongReader + ?Sized,
{
    repo.list_ads_songs(criteria, page).map_err(ServiceError::from)
}

/// Counts the songs matching the criteria.
pub fn count_by_criteria<R>(repo: &R, criteria: &AdsSongCriteria) -> ServiceResult<usize>
where
    R: AdsSongReader + ?Sized,
{
    repo.count_ads_songs(criteria).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn stored(id: i64, title: &str) -> AdsSong {
        AdsSong {
            id: Some(id),
            title: title.to_string(),
            ..AdsSong::default()
        }
    }

    #[test]
    fn save_without_id_creates() {
        let mut repo = MockRepository::new();
        repo.expect_create_ads_song()
            .times(1)
            .withf(|new| new.title.as_str() == "Jingle" && new.duration == Some(30))
            .returning(|new| Ok(stored(1, new.title.as_str())));
        repo.expect_update_ads_song().never();

        let dto = AdsSong {
            title: " Jingle ".to_string(),
            duration: Some(30),
            ..AdsSong::default()
        };

        let saved = save_ads_song(&repo, &dto).expect("save should succeed");
        assert_eq!(saved.id, Some(1));
    }

    #[test]
    fn save_with_id_updates() {
        let mut repo = MockRepository::new();
        repo.expect_update_ads_song()
            .times(1)
            .withf(|id, updates| id.get() == 5 && updates.title.as_str() == "Outro")
            .returning(|id, updates| Ok(stored(id.get(), updates.title.as_str())));
        repo.expect_create_ads_song().never();

        let dto = stored(5, "Outro");

        let saved = save_ads_song(&repo, &dto).expect("update should succeed");
        assert_eq!(saved.id, Some(5));
        assert_eq!(saved.title, "Outro");
    }

    #[test]
    fn save_rejects_invalid_payload_without_touching_repo() {
        let mut repo = MockRepository::new();
        repo.expect_create_ads_song().never();

        let dto = AdsSong {
            title: String::new(),
            ..AdsSong::default()
        };

        assert!(matches!(
            save_ads_song(&repo, &dto),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn save_rejects_non_positive_id() {
        let mut repo = MockRepository::new();
        repo.expect_update_ads_song().never();

        let dto = stored(0, "Jingle");

        assert!(matches!(
            save_ads_song(&repo, &dto),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn update_of_missing_record_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_update_ads_song()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            save_ads_song(&repo, &stored(99, "Ghost")),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn search_trims_query() {
        let mut repo = MockRepository::new();
        repo.expect_search_ads_songs()
            .times(1)
            .withf(|query, _| query == "jingle")
            .returning(|_, page| Ok(Page::new(vec![], page, 0)));

        let page = search_ads_songs(&repo, "  jingle ", &PageRequest::default()).unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn count_propagates_repository_errors() {
        let mut repo = MockRepository::new();
        repo.expect_count_ads_songs()
            .returning(|_| Err(RepositoryError::ConnectionError("down".to_string())));

        assert!(matches!(
            count_by_criteria(&repo, &AdsSongCriteria::default()),
            Err(ServiceError::Repository(RepositoryError::ConnectionError(_)))
        ));
    }
}
