//! Combined download queue across both acquisition managers.

use crate::domain::{DownloadQueueItem, DownloadQueueResult};
use crate::error::ApiError;
use crate::services::{MovieService, SeriesService};
use crate::ProviderId;

/// A provider whose queue could not be read.
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub error: ApiError,
}

/// Queue items from every reachable manager, movies first.
#[derive(Debug, Clone, Default)]
pub struct CombinedQueue {
    pub items: Vec<DownloadQueueItem>,
    pub failures: Vec<ProviderFailure>,
}

impl CombinedQueue {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn absorb(
        &mut self,
        provider: ProviderId,
        outcome: Option<Result<DownloadQueueResult, ApiError>>,
    ) {
        match outcome {
            Some(Ok(page)) => self.items.extend(page.items),
            Some(Err(error)) => {
                tracing::warn!(
                    provider = %provider,
                    code = error.code().as_str(),
                    "queue unavailable; continuing with remaining providers"
                );
                self.failures.push(ProviderFailure { provider, error });
            }
            None => {}
        }
    }
}

/// Reads both queues concurrently.
///
/// Missing or unconfigured services are skipped. A failure on one side is
/// recorded and never hides the other side's items.
pub async fn collect_downloads(
    movies: Option<&MovieService>,
    series: Option<&SeriesService>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> CombinedQueue {
    let movie_queue = async {
        match movies {
            Some(service) if service.is_configured() => Some(service.get_queue(page, page_size).await),
            _ => None,
        }
    };
    let series_queue = async {
        match series {
            Some(service) if service.is_configured() => Some(service.get_queue(page, page_size).await),
            _ => None,
        }
    };

    let (movie_queue, series_queue) = tokio::join!(movie_queue, series_queue);

    let mut combined = CombinedQueue::default();
    combined.absorb(ProviderId::Radarr, movie_queue);
    combined.absorb(ProviderId::Sonarr, series_queue);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ReplayClient, TransportError};
    use crate::domain::QueueMediaInfo;
    use crate::error::ErrorCode;
    use crate::services::test_support::block_on;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn movie_queue() -> Value {
        json!({
            "page": 1, "pageSize": 20, "sortKey": "timeleft", "sortDirection": "ascending",
            "totalRecords": 1,
            "records": [{
                "id": 9, "movieId": 4, "title": "Arrival.2016.1080p",
                "status": "downloading", "protocol": "usenet",
                "quality": {"quality": {"id": 7, "name": "Bluray-1080p"}, "revision": {"version": 1, "real": 0}},
                "size": 1000, "sizeleft": 500,
                "movie": {"title": "Arrival", "tmdbId": 329865}
            }]
        })
    }

    #[test]
    fn series_failure_keeps_movie_items() {
        let movies = MovieService::new(Arc::new(ReplayClient::returning(movie_queue())));
        let series = SeriesService::new(Arc::new(ReplayClient::failing(TransportError::http(
            401, None,
        ))));

        let combined = block_on(collect_downloads(Some(&movies), Some(&series), None, None));

        assert_eq!(combined.items.len(), 1);
        assert!(matches!(
            combined.items[0].media_info,
            QueueMediaInfo::Movie { media_id: 4, .. }
        ));
        assert!(!combined.is_complete());
        assert_eq!(combined.failures[0].provider, ProviderId::Sonarr);
        assert_eq!(combined.failures[0].error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn unconfigured_managers_are_skipped() {
        let movies = MovieService::new(Arc::new(ReplayClient::returning(movie_queue())));
        let series_client = Arc::new(ReplayClient::unconfigured());
        let series = SeriesService::new(series_client.clone());

        let combined = block_on(collect_downloads(Some(&movies), Some(&series), None, None));

        assert_eq!(combined.items.len(), 1);
        assert!(combined.is_complete());
        assert!(series_client.calls().is_empty());
    }

    #[test]
    fn no_managers_yield_empty_queue() {
        let combined = block_on(collect_downloads(None, None, Some(1), Some(10)));
        assert!(combined.items.is_empty());
        assert!(combined.is_complete());
    }
}
