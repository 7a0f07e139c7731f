//! Request-broker payloads to domain requests and discovery results.
//!
//! Integer status codes are translated with explicit fallbacks:
//!
//! | Code | Request status | Media availability |
//! |------|----------------|--------------------|
//! | 1 | pending | unknown |
//! | 2 | approved | pending |
//! | 3 | declined | processing |
//! | 4 | available | partially available |
//! | 5 | partially available | available |
//! | other | pending | unknown |

use crate::domain::{
    DiscoverItem, DiscoverResult, MediaAvailability, MediaRequest, MediaRequestType,
    RequestStatus, RequestUser, RequestedMedia, RequestsResult, SeasonRequest,
};
use crate::schema::jellyseerr as raw;

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";

pub(crate) fn request_status(code: i64) -> RequestStatus {
    match code {
        1 => RequestStatus::Pending,
        2 => RequestStatus::Approved,
        3 => RequestStatus::Declined,
        4 => RequestStatus::Available,
        5 => RequestStatus::PartiallyAvailable,
        _ => RequestStatus::Pending,
    }
}

pub(crate) fn media_availability(code: i64) -> MediaAvailability {
    match code {
        1 => MediaAvailability::Unknown,
        2 => MediaAvailability::Pending,
        3 => MediaAvailability::Processing,
        4 => MediaAvailability::PartiallyAvailable,
        5 => MediaAvailability::Available,
        _ => MediaAvailability::Unknown,
    }
}

fn request_type(value: &str) -> MediaRequestType {
    match value {
        "tv" => MediaRequestType::Tv,
        _ => MediaRequestType::Movie,
    }
}

fn poster_url(path: Option<&str>) -> Option<String> {
    path.map(|path| format!("{POSTER_BASE}{path}"))
}

fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.map(|path| format!("{BACKDROP_BASE}{path}"))
}

/// Leading `YYYY` of a release date.
fn year_of(date: Option<&str>) -> Option<i32> {
    date?.split('-').next()?.trim().parse().ok()
}

fn adapt_user(user: &raw::User) -> RequestUser {
    RequestUser {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        avatar: user.avatar.clone(),
        permissions: user.permissions,
    }
}

pub(crate) fn adapt_media(media: &raw::Media) -> RequestedMedia {
    RequestedMedia {
        id: media.id,
        tmdb_id: media.tmdb_id,
        tvdb_id: media.tvdb_id,
        imdb_id: media.imdb_id.clone(),
        title: media.title.clone(),
        poster_url: poster_url(media.poster_path.as_deref()),
        backdrop_url: backdrop_url(media.backdrop_path.as_deref()),
        overview: media.overview.clone(),
        release_date: media
            .release_date
            .clone()
            .or_else(|| media.first_air_date.clone()),
        status: media_availability(media.status),
        status_4k: media_availability(media.status_4k),
    }
}

pub(crate) fn adapt_request(request: &raw::MediaRequest) -> MediaRequest {
    MediaRequest {
        id: request.id,
        status: request_status(request.status),
        request_type: request_type(&request.request_type),
        is_4k: request.is_4k,
        created_at: request.created_at,
        updated_at: request.updated_at,
        media: adapt_media(&request.media),
        requested_by: adapt_user(&request.requested_by),
        modified_by: request.modified_by.as_ref().map(adapt_user),
        seasons: request
            .seasons
            .iter()
            .flatten()
            .map(|season| SeasonRequest {
                id: season.id,
                season_number: season.season_number,
                status: request_status(season.status),
            })
            .collect(),
    }
}

pub(crate) fn adapt_requests(response: &raw::RequestsResponse) -> RequestsResult {
    RequestsResult {
        items: response.results.iter().map(adapt_request).collect(),
        page: response.page_info.page,
        total_pages: response.page_info.pages,
        total_results: response.page_info.results,
    }
}

/// Adapts one discovery entry. Entries whose `mediaType` is neither `movie`
/// nor `tv` (people, collections) yield `None`; entries without a type take
/// `fallback`.
pub(crate) fn adapt_discover_item(
    item: &raw::DiscoverItem,
    fallback: MediaRequestType,
) -> Option<DiscoverItem> {
    let media_type = match item.media_type.as_deref() {
        None => fallback,
        Some("movie") => MediaRequestType::Movie,
        Some("tv") => MediaRequestType::Tv,
        Some(_) => return None,
    };

    let (title, original_title, release_date) = match media_type {
        MediaRequestType::Movie => (&item.title, &item.original_title, &item.release_date),
        MediaRequestType::Tv => (&item.name, &item.original_name, &item.first_air_date),
    };
    let title = title
        .clone()
        .or_else(|| item.title.clone())
        .or_else(|| item.name.clone())
        .unwrap_or_default();

    Some(DiscoverItem {
        id: item.id,
        media_type,
        title,
        original_title: original_title.clone(),
        overview: item.overview.clone(),
        poster_url: poster_url(item.poster_path.as_deref()),
        backdrop_url: backdrop_url(item.backdrop_path.as_deref()),
        year: year_of(release_date.as_deref()),
        release_date: release_date.clone(),
        rating: item.vote_average,
        vote_count: item.vote_count,
        genre_ids: item.genre_ids.clone().unwrap_or_default(),
        popularity: item.popularity,
        media_info: item.media_info.as_ref().map(adapt_media),
    })
}

pub(crate) fn adapt_discover_result(
    result: &raw::DiscoverResult,
    fallback: MediaRequestType,
) -> DiscoverResult {
    DiscoverResult {
        items: result
            .results
            .iter()
            .filter_map(|item| adapt_discover_item(item, fallback))
            .collect(),
        page: result.page,
        total_pages: result.total_pages,
        total_results: result.total_results,
    }
}
