//! Collaborator seam between services and the low-level provider clients.
//!
//! Each provider has one client trait with a single `execute` method taking
//! a call envelope and returning the raw JSON body. Real HTTP transports live
//! outside this crate; [`ReplayClient`] is the deterministic offline
//! implementation used by tests and the CLI.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

use crate::error::NetworkCode;
use crate::{AddMovieOptions, AddSeriesOptions, MediaRequestType};

/// Boxed future returned by every client call.
pub type ClientFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;

/// HTTP response attached to a failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpFailure {
    pub status: u16,
    pub body: Option<Value>,
}

/// Transport-level failure reported by a client.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    network_code: Option<NetworkCode>,
    response: Option<HttpFailure>,
}

impl TransportError {
    /// The request was sent but no response arrived.
    pub fn no_response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            network_code: None,
            response: None,
        }
    }

    /// Socket-level failure with a code such as `ECONNREFUSED`.
    pub fn network(code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            network_code: Some(NetworkCode::from_code(code)),
            response: None,
        }
    }

    /// The provider answered with a non-success status.
    pub fn http(status: u16, body: Option<Value>) -> Self {
        Self {
            message: format!("request failed with status {status}"),
            network_code: None,
            response: Some(HttpFailure { status, body }),
        }
    }

    pub fn with_network_code(mut self, code: &str) -> Self {
        self.network_code = Some(NetworkCode::from_code(code));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn network_code(&self) -> Option<&NetworkCode> {
        self.network_code.as_ref()
    }

    pub fn response(&self) -> Option<&HttpFailure> {
        self.response.as_ref()
    }
}

/// Item listing parameters in the media server's own vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsRequest {
    pub parent_id: Option<String>,
    pub include_item_types: Vec<String>,
    pub genres: Vec<String>,
    pub sort_by: Vec<String>,
    pub sort_order: Option<String>,
    pub start_index: Option<u32>,
    pub limit: Option<u32>,
    pub recursive: bool,
    pub search_term: Option<String>,
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaServerCall {
    GetItem {
        user_id: String,
        item_id: String,
    },
    GetItems {
        user_id: String,
        request: ItemsRequest,
    },
    GetResumeItems {
        user_id: String,
        limit: u32,
    },
    GetLatestMedia {
        user_id: String,
        parent_id: Option<String>,
        limit: u32,
    },
    GetNextUp {
        user_id: String,
        limit: u32,
    },
    GetSimilarItems {
        user_id: String,
        item_id: String,
        limit: u32,
    },
    GetSeasons {
        user_id: String,
        series_id: String,
    },
    GetEpisodes {
        user_id: String,
        series_id: String,
        season_id: Option<String>,
    },
    Search {
        user_id: String,
        term: String,
        limit: Option<u32>,
        include_item_types: Vec<String>,
    },
    GetFavorites {
        user_id: String,
        include_item_types: Vec<String>,
        limit: u32,
    },
}

impl MediaServerCall {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetItem { .. } => "get_item",
            Self::GetItems { .. } => "get_items",
            Self::GetResumeItems { .. } => "get_resume_items",
            Self::GetLatestMedia { .. } => "get_latest_media",
            Self::GetNextUp { .. } => "get_next_up",
            Self::GetSimilarItems { .. } => "get_similar",
            Self::GetSeasons { .. } => "get_seasons",
            Self::GetEpisodes { .. } => "get_episodes",
            Self::Search { .. } => "search",
            Self::GetFavorites { .. } => "get_favorites",
        }
    }
}

/// Discovery listing offered by the request broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverCategory {
    Movies,
    Tv,
    Trending,
    PopularMovies,
    PopularTv,
    UpcomingMovies,
    MoviesByGenre(i64),
    TvByGenre(i64),
}

/// Body of a request-creation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequestBody {
    pub media_type: MediaRequestType,
    pub media_id: i64,
    pub seasons: Option<Vec<i64>>,
    pub is_4k: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBrokerCall {
    Discover {
        category: DiscoverCategory,
        page: u32,
    },
    Search {
        query: String,
        page: u32,
    },
    GetRequests {
        take: Option<u32>,
        skip: Option<u32>,
        filter: Option<String>,
        sort: Option<String>,
        requested_by: Option<i64>,
    },
    GetRequest {
        request_id: i64,
    },
    CreateRequest(CreateRequestBody),
    ApproveRequest {
        request_id: i64,
    },
    DeclineRequest {
        request_id: i64,
    },
    DeleteRequest {
        request_id: i64,
    },
}

impl RequestBrokerCall {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Discover { .. } => "discover",
            Self::Search { .. } => "search",
            Self::GetRequests { .. } => "get_requests",
            Self::GetRequest { .. } => "get_request",
            Self::CreateRequest(_) => "create_request",
            Self::ApproveRequest { .. } => "approve_request",
            Self::DeclineRequest { .. } => "decline_request",
            Self::DeleteRequest { .. } => "delete_request",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieManagerCall {
    GetMovies,
    LookupByTmdbId { tmdb_id: i64 },
    GetMovie { movie_id: i64 },
    GetQueue { page: u32, page_size: u32 },
    GetRootFolders,
    GetQualityProfiles,
    AddMovie(AddMovieOptions),
    SetMonitored { movie_id: i64, monitored: bool },
    DeleteMovie { movie_id: i64, delete_files: bool },
    SearchMovie { movie_id: i64 },
    RemoveFromQueue {
        queue_id: i64,
        remove_from_client: bool,
        blocklist: bool,
    },
}

impl MovieManagerCall {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetMovies => "get_movies",
            Self::LookupByTmdbId { .. } => "get_movie_by_tmdb_id",
            Self::GetMovie { .. } => "get_movie_details",
            Self::GetQueue { .. } => "get_queue",
            Self::GetRootFolders => "get_root_folders",
            Self::GetQualityProfiles => "get_quality_profiles",
            Self::AddMovie(_) => "add_movie",
            Self::SetMonitored { .. } => "toggle_monitored",
            Self::DeleteMovie { .. } => "delete_movie",
            Self::SearchMovie { .. } => "trigger_search",
            Self::RemoveFromQueue { .. } => "remove_from_queue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesManagerCall {
    GetSeries,
    LookupByTvdbId { tvdb_id: i64 },
    GetSeriesById { series_id: i64 },
    GetQueue { page: u32, page_size: u32 },
    GetRootFolders,
    GetQualityProfiles,
    AddSeries(AddSeriesOptions),
    SetMonitored { series_id: i64, monitored: bool },
    DeleteSeries { series_id: i64, delete_files: bool },
    SearchSeries { series_id: i64 },
    RemoveFromQueue {
        queue_id: i64,
        remove_from_client: bool,
        blocklist: bool,
    },
}

impl SeriesManagerCall {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetSeries => "get_series",
            Self::LookupByTvdbId { .. } => "get_series_by_tvdb_id",
            Self::GetSeriesById { .. } => "get_series_details",
            Self::GetQueue { .. } => "get_queue",
            Self::GetRootFolders => "get_root_folders",
            Self::GetQualityProfiles => "get_quality_profiles",
            Self::AddSeries(_) => "add_series",
            Self::SetMonitored { .. } => "toggle_monitored",
            Self::DeleteSeries { .. } => "delete_series",
            Self::SearchSeries { .. } => "trigger_search",
            Self::RemoveFromQueue { .. } => "remove_from_queue",
        }
    }
}

/// Media-server transport.
pub trait MediaServerClient: Send + Sync {
    fn is_configured(&self) -> bool;

    fn execute<'a>(&'a self, call: MediaServerCall) -> ClientFuture<'a>;
}

/// Request-broker transport.
pub trait RequestBrokerClient: Send + Sync {
    fn is_configured(&self) -> bool;

    fn execute<'a>(&'a self, call: RequestBrokerCall) -> ClientFuture<'a>;
}

/// Movie-manager transport.
pub trait MovieManagerClient: Send + Sync {
    fn is_configured(&self) -> bool;

    fn execute<'a>(&'a self, call: MovieManagerCall) -> ClientFuture<'a>;
}

/// Series-manager transport.
pub trait SeriesManagerClient: Send + Sync {
    fn is_configured(&self) -> bool;

    fn execute<'a>(&'a self, call: SeriesManagerCall) -> ClientFuture<'a>;
}

/// A call observed by [`ReplayClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    MediaServer(MediaServerCall),
    RequestBroker(RequestBrokerCall),
    MovieManager(MovieManagerCall),
    SeriesManager(SeriesManagerCall),
}

impl RecordedCall {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::MediaServer(call) => call.operation(),
            Self::RequestBroker(call) => call.operation(),
            Self::MovieManager(call) => call.operation(),
            Self::SeriesManager(call) => call.operation(),
        }
    }
}

/// Offline client that answers every call with the same canned outcome.
#[derive(Debug)]
pub struct ReplayClient {
    outcome: Result<Value, TransportError>,
    configured: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ReplayClient {
    pub fn returning(payload: Value) -> Self {
        Self::with_outcome(Ok(payload))
    }

    pub fn failing(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Client that reports itself unconfigured.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::returning(Value::Null)
        }
    }

    fn with_outcome(outcome: Result<Value, TransportError>) -> Self {
        Self {
            outcome,
            configured: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn operations(&self) -> Vec<&'static str> {
        self.calls().iter().map(RecordedCall::operation).collect()
    }

    fn replay(&self, call: RecordedCall) -> ClientFuture<'_> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(poisoned) => poisoned.into_inner().push(call),
        }
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

impl MediaServerClient for ReplayClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn execute<'a>(&'a self, call: MediaServerCall) -> ClientFuture<'a> {
        self.replay(RecordedCall::MediaServer(call))
    }
}

impl RequestBrokerClient for ReplayClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn execute<'a>(&'a self, call: RequestBrokerCall) -> ClientFuture<'a> {
        self.replay(RecordedCall::RequestBroker(call))
    }
}

impl MovieManagerClient for ReplayClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn execute<'a>(&'a self, call: MovieManagerCall) -> ClientFuture<'a> {
        self.replay(RecordedCall::MovieManager(call))
    }
}

impl SeriesManagerClient for ReplayClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn execute<'a>(&'a self, call: SeriesManagerCall) -> ClientFuture<'a> {
        self.replay(RecordedCall::SeriesManager(call))
    }
}
