use std::sync::Arc;

use super::run;
use crate::adapters::{arr, radarr as adapt};
use crate::client::{MovieManagerCall, MovieManagerClient};
use crate::domain::{DownloadQueueResult, ManagedMovie, QualityProfile, RootFolder};
use crate::error::{ApiError, ErrorContext, Failure};
use crate::schema::radarr as schema;
use crate::{AddMovieOptions, ProviderId};

pub const DEFAULT_QUEUE_PAGE: u32 = 1;
pub const DEFAULT_QUEUE_PAGE_SIZE: u32 = 20;

/// Library and download management through the movie manager.
pub struct MovieService {
    client: Arc<dyn MovieManagerClient>,
}

impl MovieService {
    pub fn new(client: Arc<dyn MovieManagerClient>) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub async fn get_movies(&self) -> Result<Vec<ManagedMovie>, ApiError> {
        let call = MovieManagerCall::GetMovies;
        run(self.is_configured(), context("get_movies"), async move {
            let movies = schema::movie_list(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_movies(&movies))
        })
        .await
    }

    /// `None` when the movie manager does not track the title.
    pub async fn get_movie_by_tmdb_id(&self, tmdb_id: i64) -> Result<Option<ManagedMovie>, ApiError> {
        let call = MovieManagerCall::LookupByTmdbId { tmdb_id };
        let context = context("get_movie_by_tmdb_id").with_item(tmdb_id);
        run(self.is_configured(), context, async move {
            let movie = schema::movie_lookup(self.client.execute(call).await?)?;
            Ok::<_, Failure>(movie.as_ref().map(adapt::adapt_movie))
        })
        .await
    }

    pub async fn get_movie_details(&self, movie_id: i64) -> Result<ManagedMovie, ApiError> {
        self.movie_call(
            MovieManagerCall::GetMovie { movie_id },
            context("get_movie_details").with_item(movie_id),
        )
        .await
    }

    /// One queue page. `None` falls back to page 1 of 20 records.
    pub async fn get_queue(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<DownloadQueueResult, ApiError> {
        let call = MovieManagerCall::GetQueue {
            page: page.unwrap_or(DEFAULT_QUEUE_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_QUEUE_PAGE_SIZE),
        };
        run(self.is_configured(), context("get_queue"), async move {
            let queue = schema::queue(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_queue(&queue))
        })
        .await
    }

    pub async fn get_root_folders(&self) -> Result<Vec<RootFolder>, ApiError> {
        let call = MovieManagerCall::GetRootFolders;
        run(self.is_configured(), context("get_root_folders"), async move {
            let folders = schema::root_folders(self.client.execute(call).await?)?;
            Ok::<_, Failure>(arr::adapt_root_folders(&folders))
        })
        .await
    }

    pub async fn get_quality_profiles(&self) -> Result<Vec<QualityProfile>, ApiError> {
        let call = MovieManagerCall::GetQualityProfiles;
        run(self.is_configured(), context("get_quality_profiles"), async move {
            let profiles = schema::quality_profiles(self.client.execute(call).await?)?;
            Ok::<_, Failure>(arr::adapt_quality_profiles(&profiles))
        })
        .await
    }

    pub async fn add_movie(&self, options: &AddMovieOptions) -> Result<ManagedMovie, ApiError> {
        self.movie_call(
            MovieManagerCall::AddMovie(options.clone()),
            context("add_movie").with_item(options.tmdb_id),
        )
        .await
    }

    /// Sets the monitored flag and returns the movie as stored afterwards.
    pub async fn toggle_monitored(
        &self,
        movie_id: i64,
        monitored: bool,
    ) -> Result<ManagedMovie, ApiError> {
        self.movie_call(
            MovieManagerCall::SetMonitored {
                movie_id,
                monitored,
            },
            context("toggle_monitored").with_item(movie_id),
        )
        .await
    }

    pub async fn delete_movie(&self, movie_id: i64, delete_files: bool) -> Result<(), ApiError> {
        self.command(
            MovieManagerCall::DeleteMovie {
                movie_id,
                delete_files,
            },
            context("delete_movie").with_item(movie_id),
        )
        .await
    }

    pub async fn trigger_search(&self, movie_id: i64) -> Result<(), ApiError> {
        self.command(
            MovieManagerCall::SearchMovie { movie_id },
            context("trigger_search").with_item(movie_id),
        )
        .await
    }

    pub async fn remove_from_queue(
        &self,
        queue_id: i64,
        remove_from_client: bool,
        blocklist: bool,
    ) -> Result<(), ApiError> {
        self.command(
            MovieManagerCall::RemoveFromQueue {
                queue_id,
                remove_from_client,
                blocklist,
            },
            context("remove_from_queue").with_item(queue_id),
        )
        .await
    }

    async fn movie_call(
        &self,
        call: MovieManagerCall,
        context: ErrorContext,
    ) -> Result<ManagedMovie, ApiError> {
        run(self.is_configured(), context, async move {
            let movie = schema::movie(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_movie(&movie))
        })
        .await
    }

    async fn command(&self, call: MovieManagerCall, context: ErrorContext) -> Result<(), ApiError> {
        run(self.is_configured(), context, async move {
            self.client.execute(call).await?;
            Ok::<_, Failure>(())
        })
        .await
    }
}

fn context(operation: &str) -> ErrorContext {
    ErrorContext::new(ProviderId::Radarr, operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{RecordedCall, ReplayClient, TransportError};
    use crate::domain::MovieStatus;
    use crate::error::ErrorCode;
    use crate::services::test_support::block_on;
    use serde_json::{json, Value};

    fn movie_json() -> Value {
        json!({
            "id": 4, "title": "Arrival", "sortTitle": "arrival", "sizeOnDisk": 0,
            "status": "released", "images": [{"coverType": "poster", "url": "/p.jpg"}],
            "year": 2016, "hasFile": false, "qualityProfileId": 1, "monitored": true,
            "isAvailable": true, "runtime": 116, "tmdbId": 329865, "genres": ["Drama"]
        })
    }

    #[test]
    fn queue_defaults_to_first_page_of_twenty() {
        let client = Arc::new(ReplayClient::returning(json!({
            "page": 1, "pageSize": 20, "sortKey": "timeleft", "sortDirection": "ascending",
            "totalRecords": 0, "records": []
        })));
        let queue = block_on(MovieService::new(client.clone()).get_queue(None, None))
            .expect("queue page");

        assert!(queue.items.is_empty());
        assert_eq!(queue.page_size, 20);
        assert_eq!(
            client.calls(),
            vec![RecordedCall::MovieManager(MovieManagerCall::GetQueue {
                page: 1,
                page_size: 20,
            })]
        );
    }

    #[test]
    fn lookup_of_untracked_movie_is_none() {
        let client = Arc::new(ReplayClient::returning(json!([])));
        let movie = block_on(MovieService::new(client).get_movie_by_tmdb_id(603)).expect("lookup");
        assert_eq!(movie, None);
    }

    #[test]
    fn toggle_monitored_returns_updated_movie() {
        let mut payload = movie_json();
        payload["monitored"] = json!(false);
        let client = Arc::new(ReplayClient::returning(payload));
        let movie = block_on(MovieService::new(client.clone()).toggle_monitored(4, false))
            .expect("movie");

        assert!(!movie.monitored);
        assert_eq!(movie.status, MovieStatus::Released);
        assert_eq!(client.operations(), vec!["toggle_monitored"]);
    }

    #[test]
    fn remove_from_queue_forwards_flags() {
        let client = Arc::new(ReplayClient::returning(json!({})));
        block_on(MovieService::new(client.clone()).remove_from_queue(9, true, false))
            .expect("removed");
        assert_eq!(
            client.calls(),
            vec![RecordedCall::MovieManager(MovieManagerCall::RemoveFromQueue {
                queue_id: 9,
                remove_from_client: true,
                blocklist: false,
            })]
        );
    }

    #[test]
    fn refused_connection_is_retryable() {
        let client = Arc::new(ReplayClient::failing(TransportError::network(
            "ECONNREFUSED",
            "connect ECONNREFUSED 127.0.0.1:7878",
        )));
        let error = block_on(MovieService::new(client).get_movies()).expect_err("refused");

        assert_eq!(error.code(), ErrorCode::Network);
        assert_eq!(error.provider(), Some(ProviderId::Radarr));
        assert!(error.is_retryable());
    }

    #[test]
    fn unconfigured_service_never_calls_client() {
        let client = Arc::new(ReplayClient::unconfigured());
        let error = block_on(MovieService::new(client.clone()).trigger_search(4))
            .expect_err("not configured");

        assert_eq!(error.code(), ErrorCode::Unknown);
        assert!(client.calls().is_empty());
    }
}
