//! Request-broker (Jellyseerr v1) wire shapes.

use serde_json::Value;

use super::{validate, Issues, Object, Passthrough};
use crate::error::ValidationError;
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct User {
    pub id: i64,
    pub email: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub permissions: i64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Media {
    pub id: i64,
    pub tmdb_id: i64,
    pub tvdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub status: i64,
    pub status_4k: i64,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeasonRequest {
    pub id: i64,
    pub season_number: i64,
    pub status: i64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MediaRequest {
    pub id: i64,
    pub status: i64,
    pub request_type: String,
    pub is_4k: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub media: Media,
    pub requested_by: User,
    pub modified_by: Option<User>,
    pub seasons: Option<Vec<SeasonRequest>>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageInfo {
    pub page: i64,
    pub pages: i64,
    pub results: i64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestsResponse {
    pub page_info: PageInfo,
    pub results: Vec<MediaRequest>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiscoverItem {
    pub id: i64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub genre_ids: Option<Vec<i64>>,
    pub popularity: Option<f64>,
    pub media_info: Option<Media>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiscoverResult {
    pub page: i64,
    pub total_pages: i64,
    pub total_results: i64,
    pub results: Vec<DiscoverItem>,
    pub extra: Passthrough,
}

pub(crate) const REQUEST_TYPES: [&str; 2] = ["movie", "tv"];

pub(crate) fn request(value: Value) -> Result<MediaRequest, ValidationError> {
    validate(value, parse_request)
}

pub(crate) fn requests_response(value: Value) -> Result<RequestsResponse, ValidationError> {
    validate(value, parse_requests_response)
}

pub(crate) fn discover_result(value: Value) -> Result<DiscoverResult, ValidationError> {
    validate(value, parse_discover_result)
}

fn parse_user(value: Value, path: &str, issues: &mut Issues) -> Option<User> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_i64("id", issues);
    let email = object.required_str("email", issues);
    let username = object.optional_str("username", issues);
    let display_name = object.optional_str("displayName", issues);
    let avatar = object.optional_str("avatar", issues);
    let permissions = object.required_i64("permissions", issues);
    Some(User {
        id: id?,
        email: email?,
        username,
        display_name,
        avatar,
        permissions: permissions?,
        extra: object.into_passthrough(),
    })
}

fn parse_media(value: Value, path: &str, issues: &mut Issues) -> Option<Media> {
    let mut object = Object::open(value, path, issues)?;
    object.check_str("mediaType", false, issues);
    let id = object.required_i64("id", issues);
    let tmdb_id = object.required_i64("tmdbId", issues);
    let tvdb_id = object.optional_i64("tvdbId", issues);
    let imdb_id = object.optional_str("imdbId", issues);
    let status = object.required_i64("status", issues);
    let status_4k = object.required_i64("status4k", issues);
    let title = object.optional_str("title", issues);
    let poster_path = object.optional_str("posterPath", issues);
    let backdrop_path = object.optional_str("backdropPath", issues);
    let overview = object.optional_str("overview", issues);
    let release_date = object.optional_str("releaseDate", issues);
    let first_air_date = object.optional_str("firstAirDate", issues);
    Some(Media {
        id: id?,
        tmdb_id: tmdb_id?,
        tvdb_id,
        imdb_id,
        status: status?,
        status_4k: status_4k?,
        title,
        poster_path,
        backdrop_path,
        overview,
        release_date,
        first_air_date,
        extra: object.into_passthrough(),
    })
}

fn parse_season_request(value: Value, path: &str, issues: &mut Issues) -> Option<SeasonRequest> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_i64("id", issues);
    let season_number = object.required_i64("seasonNumber", issues);
    let status = object.required_i64("status", issues);
    Some(SeasonRequest {
        id: id?,
        season_number: season_number?,
        status: status?,
        extra: object.into_passthrough(),
    })
}

fn parse_request(value: Value, path: &str, issues: &mut Issues) -> Option<MediaRequest> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_i64("id", issues);
    let status = object.required_i64("status", issues);
    let request_type = object.required_one_of("type", &REQUEST_TYPES, issues);
    let is_4k = object.required_bool("is4k", issues);
    let created_at = object.required_timestamp("createdAt", issues);
    let updated_at = object.required_timestamp("updatedAt", issues);
    let media = object.required_object("media", issues, parse_media);
    let requested_by = object.required_object("requestedBy", issues, parse_user);
    let modified_by = object.optional_object("modifiedBy", issues, parse_user);
    let seasons = object.optional_array("seasons", issues, parse_season_request);
    Some(MediaRequest {
        id: id?,
        status: status?,
        request_type: request_type?,
        is_4k: is_4k?,
        created_at: created_at?,
        updated_at: updated_at?,
        media: media?,
        requested_by: requested_by?,
        modified_by,
        seasons,
        extra: object.into_passthrough(),
    })
}

fn parse_page_info(value: Value, path: &str, issues: &mut Issues) -> Option<PageInfo> {
    let mut object = Object::open(value, path, issues)?;
    object.check_number("pageSize", false, issues);
    let page = object.required_i64("page", issues);
    let pages = object.required_i64("pages", issues);
    let results = object.required_i64("results", issues);
    Some(PageInfo {
        page: page?,
        pages: pages?,
        results: results?,
        extra: object.into_passthrough(),
    })
}

fn parse_requests_response(value: Value, path: &str, issues: &mut Issues) -> Option<RequestsResponse> {
    let mut object = Object::open(value, path, issues)?;
    let page_info = object.required_object("pageInfo", issues, parse_page_info);
    let results = object.required_array("results", issues, parse_request);
    Some(RequestsResponse {
        page_info: page_info?,
        results: results?,
        extra: object.into_passthrough(),
    })
}

fn parse_discover_item(value: Value, path: &str, issues: &mut Issues) -> Option<DiscoverItem> {
    let mut object = Object::open(value, path, issues)?;
    object.check_bool("adult", false, issues);
    object.check_str("originalLanguage", false, issues);
    let id = object.required_i64("id", issues);
    let media_type = object.optional_str("mediaType", issues);
    let title = object.optional_str("title", issues);
    let original_title = object.optional_str("originalTitle", issues);
    let name = object.optional_str("name", issues);
    let original_name = object.optional_str("originalName", issues);
    let overview = object.optional_str("overview", issues);
    let poster_path = object.optional_str("posterPath", issues);
    let backdrop_path = object.optional_str("backdropPath", issues);
    let release_date = object.optional_str("releaseDate", issues);
    let first_air_date = object.optional_str("firstAirDate", issues);
    let vote_average = object.optional_f64("voteAverage", issues);
    let vote_count = object.optional_i64("voteCount", issues);
    let genre_ids = object.optional_i64_list("genreIds", issues);
    let popularity = object.optional_f64("popularity", issues);
    let media_info = object.optional_object("mediaInfo", issues, parse_media);
    Some(DiscoverItem {
        id: id?,
        media_type,
        title,
        original_title,
        name,
        original_name,
        overview,
        poster_path,
        backdrop_path,
        release_date,
        first_air_date,
        vote_average,
        vote_count,
        genre_ids,
        popularity,
        media_info,
        extra: object.into_passthrough(),
    })
}

fn parse_discover_result(value: Value, path: &str, issues: &mut Issues) -> Option<DiscoverResult> {
    let mut object = Object::open(value, path, issues)?;
    let page = object.required_i64("page", issues);
    let total_pages = object.required_i64("totalPages", issues);
    let total_results = object.required_i64("totalResults", issues);
    let results = object.required_array("results", issues, parse_discover_item);
    Some(DiscoverResult {
        page: page?,
        total_pages: total_pages?,
        total_results: total_results?,
        results: results?,
        extra: object.into_passthrough(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueCode;
    use serde_json::json;

    #[test]
    fn request_type_is_closed() {
        let error = request(json!({
            "id": 1, "status": 1, "type": "music", "is4k": false,
            "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "2024-01-01T00:00:00.000Z",
            "media": {"id": 2, "tmdbId": 3, "status": 1, "status4k": 1},
            "requestedBy": {"id": 1, "email": "a@b.c", "permissions": 2}
        }))
        .expect_err("music is not a request type");
        assert_eq!(error.issues().len(), 1);
        assert_eq!(error.issues()[0].code, IssueCode::InvalidEnumValue);
    }

    #[test]
    fn null_modified_by_is_absent() {
        let parsed = request(json!({
            "id": 1, "status": 2, "type": "tv", "is4k": false,
            "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "2024-01-02T00:00:00.000Z",
            "media": {"id": 2, "tmdbId": 3, "status": 3, "status4k": 1},
            "requestedBy": {"id": 1, "email": "a@b.c", "permissions": 2},
            "modifiedBy": null
        }))
        .expect("valid request");
        assert!(parsed.modified_by.is_none());
    }

    #[test]
    fn request_timestamps_are_strict() {
        let error = request(json!({
            "id": 1, "status": 2, "type": "movie", "is4k": false,
            "createdAt": "2024-01-01", "updatedAt": "2024-01-02T00:00:00.000Z",
            "media": {"id": 2, "tmdbId": 3, "status": 3, "status4k": 1},
            "requestedBy": {"id": 1, "email": "a@b.c", "permissions": 2}
        }))
        .expect_err("date-only createdAt");
        assert_eq!(error.issues().len(), 1);
        assert_eq!(error.issues()[0].path, "createdAt");
        assert_eq!(error.issues()[0].code, IssueCode::InvalidTimestamp);
    }

    #[test]
    fn discover_items_need_an_id() {
        let error = discover_result(json!({
            "page": 1, "totalPages": 1, "totalResults": 1,
            "results": [{"title": "x"}]
        }))
        .expect_err("missing id");
        assert_eq!(error.issues()[0].path, "results[0].id");
    }
}
