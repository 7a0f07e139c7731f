use std::sync::Arc;

use super::run;
use crate::adapters::jellyseerr as adapt;
use crate::client::{CreateRequestBody, DiscoverCategory, RequestBrokerCall, RequestBrokerClient};
use crate::domain::{DiscoverResult, MediaRequest, RequestsQuery, RequestsResult};
use crate::error::{ApiError, ErrorContext, Failure};
use crate::schema::jellyseerr as schema;
use crate::{MediaRequestType, ProviderId};

/// Discovery and acquisition requests through the request broker.
///
/// Page numbers start at 1.
pub struct RequestService {
    client: Arc<dyn RequestBrokerClient>,
}

impl RequestService {
    pub fn new(client: Arc<dyn RequestBrokerClient>) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub async fn get_discover_movies(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::Movies, page, "get_discover_movies")
            .await
    }

    pub async fn get_discover_tv(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::Tv, page, "get_discover_tv").await
    }

    pub async fn get_trending(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::Trending, page, "get_trending")
            .await
    }

    pub async fn get_popular_movies(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::PopularMovies, page, "get_popular_movies")
            .await
    }

    pub async fn get_popular_tv(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::PopularTv, page, "get_popular_tv")
            .await
    }

    pub async fn get_upcoming_movies(&self, page: u32) -> Result<DiscoverResult, ApiError> {
        self.discover(DiscoverCategory::UpcomingMovies, page, "get_upcoming_movies")
            .await
    }

    pub async fn discover_by_genre(
        &self,
        media_type: MediaRequestType,
        genre_id: i64,
        page: u32,
    ) -> Result<DiscoverResult, ApiError> {
        let category = match media_type {
            MediaRequestType::Movie => DiscoverCategory::MoviesByGenre(genre_id),
            MediaRequestType::Tv => DiscoverCategory::TvByGenre(genre_id),
        };
        self.discover(category, page, "discover_by_genre").await
    }

    /// Multi-search. Results that are neither movies nor tv shows are dropped.
    pub async fn search(&self, query: &str, page: u32) -> Result<DiscoverResult, ApiError> {
        let call = RequestBrokerCall::Search {
            query: query.to_owned(),
            page,
        };
        self.discover_call(call, MediaRequestType::Movie, context("search"))
            .await
    }

    pub async fn get_requests(&self, query: &RequestsQuery) -> Result<RequestsResult, ApiError> {
        let call = RequestBrokerCall::GetRequests {
            take: query.take,
            skip: query.skip,
            filter: query.filter.map(|filter| filter.as_str().to_owned()),
            sort: query.sort.map(|sort| sort.as_str().to_owned()),
            requested_by: query.requested_by,
        };
        run(self.is_configured(), context("get_requests"), async move {
            let response = schema::requests_response(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_requests(&response))
        })
        .await
    }

    pub async fn get_request(&self, request_id: i64) -> Result<MediaRequest, ApiError> {
        self.request_call(
            RequestBrokerCall::GetRequest { request_id },
            context("get_request").with_item(request_id),
        )
        .await
    }

    pub async fn create_movie_request(
        &self,
        tmdb_id: i64,
        is_4k: bool,
    ) -> Result<MediaRequest, ApiError> {
        let body = CreateRequestBody {
            media_type: MediaRequestType::Movie,
            media_id: tmdb_id,
            seasons: None,
            is_4k,
        };
        self.request_call(
            RequestBrokerCall::CreateRequest(body),
            context("create_movie_request"),
        )
        .await
    }

    /// Requests a show. `seasons: None` asks for every season.
    pub async fn create_tv_request(
        &self,
        tmdb_id: i64,
        seasons: Option<Vec<i64>>,
        is_4k: bool,
    ) -> Result<MediaRequest, ApiError> {
        let body = CreateRequestBody {
            media_type: MediaRequestType::Tv,
            media_id: tmdb_id,
            seasons,
            is_4k,
        };
        self.request_call(
            RequestBrokerCall::CreateRequest(body),
            context("create_tv_request"),
        )
        .await
    }

    pub async fn approve_request(&self, request_id: i64) -> Result<MediaRequest, ApiError> {
        self.request_call(
            RequestBrokerCall::ApproveRequest { request_id },
            context("approve_request").with_item(request_id),
        )
        .await
    }

    pub async fn decline_request(&self, request_id: i64) -> Result<(), ApiError> {
        self.command(
            RequestBrokerCall::DeclineRequest { request_id },
            context("decline_request").with_item(request_id),
        )
        .await
    }

    pub async fn delete_request(&self, request_id: i64) -> Result<(), ApiError> {
        self.command(
            RequestBrokerCall::DeleteRequest { request_id },
            context("delete_request").with_item(request_id),
        )
        .await
    }

    async fn discover(
        &self,
        category: DiscoverCategory,
        page: u32,
        operation: &str,
    ) -> Result<DiscoverResult, ApiError> {
        let fallback = match category {
            DiscoverCategory::Tv | DiscoverCategory::PopularTv | DiscoverCategory::TvByGenre(_) => {
                MediaRequestType::Tv
            }
            _ => MediaRequestType::Movie,
        };
        let call = RequestBrokerCall::Discover { category, page };
        self.discover_call(call, fallback, context(operation)).await
    }

    async fn discover_call(
        &self,
        call: RequestBrokerCall,
        fallback: MediaRequestType,
        context: ErrorContext,
    ) -> Result<DiscoverResult, ApiError> {
        run(self.is_configured(), context, async move {
            let result = schema::discover_result(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_discover_result(&result, fallback))
        })
        .await
    }

    async fn request_call(
        &self,
        call: RequestBrokerCall,
        context: ErrorContext,
    ) -> Result<MediaRequest, ApiError> {
        run(self.is_configured(), context, async move {
            let request = schema::request(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_request(&request))
        })
        .await
    }

    /// Calls whose response body carries nothing the caller needs.
    async fn command(&self, call: RequestBrokerCall, context: ErrorContext) -> Result<(), ApiError> {
        run(self.is_configured(), context, async move {
            self.client.execute(call).await?;
            Ok::<_, Failure>(())
        })
        .await
    }
}

fn context(operation: &str) -> ErrorContext {
    ErrorContext::new(ProviderId::Jellyseerr, operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{RecordedCall, ReplayClient, TransportError};
    use crate::domain::{MediaAvailability, RequestFilter, RequestStatus};
    use crate::error::ErrorCode;
    use crate::services::test_support::block_on;
    use serde_json::{json, Value};

    fn request_json(status: i64, media_status: i64) -> Value {
        json!({
            "id": 7, "status": status, "type": "movie", "is4k": false,
            "createdAt": "2024-05-01T08:00:00.000Z", "updatedAt": "2024-05-01T09:00:00.000Z",
            "media": {"id": 3, "tmdbId": 603, "status": media_status, "status4k": 1},
            "requestedBy": {"id": 1, "email": "admin@example.com", "permissions": 2}
        })
    }

    #[test]
    fn approve_returns_adapted_request() {
        let client = Arc::new(ReplayClient::returning(request_json(2, 5)));
        let request = block_on(RequestService::new(client.clone()).approve_request(7))
            .expect("approved request");

        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.media.status, MediaAvailability::Available);
        assert_eq!(client.operations(), vec!["approve_request"]);
    }

    #[test]
    fn requests_query_is_translated() {
        let client = Arc::new(ReplayClient::returning(json!({
            "pageInfo": {"page": 1, "pages": 1, "results": 1, "pageSize": 10},
            "results": [request_json(99, 99)]
        })));
        let query = RequestsQuery {
            take: Some(10),
            filter: Some(RequestFilter::Pending),
            ..RequestsQuery::default()
        };
        let result =
            block_on(RequestService::new(client.clone()).get_requests(&query)).expect("page");

        assert_eq!(result.items[0].status, RequestStatus::Pending);
        assert_eq!(result.items[0].media.status, MediaAvailability::Unknown);
        assert_eq!(
            client.calls(),
            vec![RecordedCall::RequestBroker(RequestBrokerCall::GetRequests {
                take: Some(10),
                skip: None,
                filter: Some("pending".to_owned()),
                sort: None,
                requested_by: None,
            })]
        );
    }

    #[test]
    fn tv_discovery_falls_back_to_tv() {
        let client = Arc::new(ReplayClient::returning(json!({
            "page": 2, "totalPages": 5, "totalResults": 100,
            "results": [{"id": 1, "name": "Dark", "firstAirDate": "2017-12-01"}]
        })));
        let result =
            block_on(RequestService::new(client).get_discover_tv(2)).expect("discover page");

        assert_eq!(result.page, 2);
        assert_eq!(result.items[0].media_type, MediaRequestType::Tv);
        assert_eq!(result.items[0].title, "Dark");
    }

    #[test]
    fn decline_ignores_body() {
        let client = Arc::new(ReplayClient::returning(Value::Null));
        block_on(RequestService::new(client.clone()).decline_request(4)).expect("declined");
        assert_eq!(client.operations(), vec!["decline_request"]);
    }

    #[test]
    fn forbidden_is_not_retryable() {
        let client = Arc::new(ReplayClient::failing(TransportError::http(
            403,
            Some(json!({"message": "no permission"})),
        )));
        let error =
            block_on(RequestService::new(client).create_movie_request(603, true)).expect_err("denied");

        assert_eq!(error.code(), ErrorCode::Forbidden);
        assert_eq!(error.http_status(), Some(403));
        assert!(!error.is_retryable());
    }
}
