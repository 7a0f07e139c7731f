use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Lifecycle of a user's acquisition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Declined,
    Available,
    PartiallyAvailable,
}

/// Whether a requested title exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaAvailability {
    Unknown,
    Pending,
    Processing,
    PartiallyAvailable,
    Available,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaRequestType {
    Movie,
    Tv,
}

impl MediaRequestType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUser {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub permissions: i64,
}

/// Availability snapshot of a requested title. Artwork URLs are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedMedia {
    pub id: i64,
    pub tmdb_id: i64,
    pub tvdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub status: MediaAvailability,
    pub status_4k: MediaAvailability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRequest {
    pub id: i64,
    pub season_number: i64,
    pub status: RequestStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRequest {
    pub id: i64,
    pub status: RequestStatus,
    pub request_type: MediaRequestType,
    pub is_4k: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub media: RequestedMedia,
    pub requested_by: RequestUser,
    pub modified_by: Option<RequestUser>,
    pub seasons: Vec<SeasonRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestsResult {
    pub items: Vec<MediaRequest>,
    pub page: i64,
    pub total_pages: i64,
    pub total_results: i64,
}

/// A title surfaced by the request broker's discovery endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverItem {
    pub id: i64,
    pub media_type: MediaRequestType,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub release_date: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub vote_count: Option<i64>,
    pub genre_ids: Vec<i64>,
    pub popularity: Option<f64>,
    pub media_info: Option<RequestedMedia>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverResult {
    pub items: Vec<DiscoverItem>,
    pub page: i64,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestFilter {
    All,
    Approved,
    Pending,
    Available,
    Processing,
    Unavailable,
    Failed,
}

impl RequestFilter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Available => "available",
            Self::Processing => "processing",
            Self::Unavailable => "unavailable",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSort {
    Added,
    Modified,
}

impl RequestSort {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
        }
    }
}

/// Request listing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestsQuery {
    pub take: Option<u32>,
    pub skip: Option<u32>,
    pub filter: Option<RequestFilter>,
    pub sort: Option<RequestSort>,
    pub requested_by: Option<i64>,
}
