//! Movie-manager (Radarr v3) wire shapes.

use serde_json::Value;

use super::arr::{self, Image, QualityProfile, QueuePage, QueueRecord, RootFolder};
use super::{array_of, validate, validate_optional, Issues, Object, Passthrough};
use crate::error::ValidationError;
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Movie {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub sort_title: String,
    pub size_on_disk: f64,
    pub status: String,
    pub overview: Option<String>,
    pub images: Vec<Image>,
    pub year: i64,
    pub has_file: bool,
    pub path: Option<String>,
    pub quality_profile_id: i64,
    pub monitored: bool,
    pub is_available: bool,
    pub runtime: i64,
    pub imdb_id: Option<String>,
    pub tmdb_id: i64,
    pub genres: Vec<String>,
    pub added: Option<Timestamp>,
    pub extra: Passthrough,
}

/// Movie summary embedded in queue records when `includeMovie` is set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueueMovie {
    pub title: Option<String>,
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueueItem {
    pub record: QueueRecord,
    pub movie_id: i64,
    pub movie: Option<QueueMovie>,
    pub extra: Passthrough,
}

pub(crate) fn movie(value: Value) -> Result<Movie, ValidationError> {
    validate(value, parse_movie)
}

pub(crate) fn movie_list(value: Value) -> Result<Vec<Movie>, ValidationError> {
    validate(value, |value, path, issues| array_of(value, path, issues, parse_movie))
}

pub(crate) fn movie_lookup(value: Value) -> Result<Option<Movie>, ValidationError> {
    validate_optional(value, parse_movie)
}

pub(crate) fn queue(value: Value) -> Result<QueuePage<QueueItem>, ValidationError> {
    validate(value, |value, path, issues| {
        arr::parse_queue_page(value, path, issues, parse_queue_item)
    })
}

pub(crate) fn root_folders(value: Value) -> Result<Vec<RootFolder>, ValidationError> {
    validate(value, |value, path, issues| {
        array_of(value, path, issues, arr::parse_root_folder)
    })
}

pub(crate) fn quality_profiles(value: Value) -> Result<Vec<QualityProfile>, ValidationError> {
    validate(value, |value, path, issues| {
        array_of(value, path, issues, arr::parse_quality_profile)
    })
}

fn parse_movie(value: Value, path: &str, issues: &mut Issues) -> Option<Movie> {
    let mut object = Object::open(value, path, issues)?;

    object.check_str("inCinemas", false, issues);
    object.check_str("physicalRelease", false, issues);
    object.check_str("digitalRelease", false, issues);
    object.check_str("website", false, issues);
    object.check_str("studio", false, issues);
    object.check_str("minimumAvailability", false, issues);
    object.check_str("titleSlug", false, issues);
    object.check_array("tags", false, issues);
    object.check_object("ratings", false, issues);

    let id = object.required_i64("id", issues);
    let title = object.required_str("title", issues);
    let original_title = object.optional_str("originalTitle", issues);
    let sort_title = object.required_str("sortTitle", issues);
    let size_on_disk = object.required_f64("sizeOnDisk", issues);
    let status = object.required_str("status", issues);
    let overview = object.optional_str("overview", issues);
    let images = object.required_array("images", issues, arr::parse_image);
    let year = object.required_i64("year", issues);
    let has_file = object.required_bool("hasFile", issues);
    let movie_path = object.optional_str("path", issues);
    let quality_profile_id = object.required_i64("qualityProfileId", issues);
    let monitored = object.required_bool("monitored", issues);
    let is_available = object.required_bool("isAvailable", issues);
    let runtime = object.required_i64("runtime", issues);
    let imdb_id = object.optional_str("imdbId", issues);
    let tmdb_id = object.required_i64("tmdbId", issues);
    let genres = object.required_str_list("genres", issues);
    let added = object.optional_timestamp("added", issues);

    Some(Movie {
        id: id?,
        title: title?,
        original_title,
        sort_title: sort_title?,
        size_on_disk: size_on_disk?,
        status: status?,
        overview,
        images: images?,
        year: year?,
        has_file: has_file?,
        path: movie_path,
        quality_profile_id: quality_profile_id?,
        monitored: monitored?,
        is_available: is_available?,
        runtime: runtime?,
        imdb_id,
        tmdb_id: tmdb_id?,
        genres: genres?,
        added,
        extra: object.into_passthrough(),
    })
}

fn parse_queue_movie(value: Value, path: &str, issues: &mut Issues) -> Option<QueueMovie> {
    let mut object = Object::open(value, path, issues)?;
    Some(QueueMovie {
        title: object.optional_str("title", issues),
        tmdb_id: object.optional_i64("tmdbId", issues),
        imdb_id: object.optional_str("imdbId", issues),
        extra: object.into_passthrough(),
    })
}

fn parse_queue_item(value: Value, path: &str, issues: &mut Issues) -> Option<QueueItem> {
    let mut object = Object::open(value, path, issues)?;
    let record = arr::read_queue_record(&mut object, issues);
    let movie_id = object.required_i64("movieId", issues);
    let movie = object.optional_object("movie", issues, parse_queue_movie);
    Some(QueueItem {
        record: record?,
        movie_id: movie_id?,
        movie,
        extra: object.into_passthrough(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie_json() -> Value {
        json!({
            "id": 1,
            "title": "Arrival",
            "sortTitle": "arrival",
            "sizeOnDisk": 0,
            "status": "released",
            "images": [{"coverType": "poster", "url": "/MediaCover/1/poster.jpg"}],
            "year": 2016,
            "hasFile": false,
            "qualityProfileId": 4,
            "monitored": true,
            "isAvailable": true,
            "runtime": 116,
            "tmdbId": 329865,
            "genres": ["Drama"],
            "studio": "Paramount"
        })
    }

    #[test]
    fn parses_movie_and_keeps_checked_fields() {
        let parsed = movie(movie_json()).expect("valid movie");
        assert_eq!(parsed.tmdb_id, 329865);
        assert_eq!(parsed.extra.get("studio"), Some(&json!("Paramount")));
    }

    #[test]
    fn lookup_accepts_empty_and_single_arrays() {
        assert_eq!(movie_lookup(json!([])).expect("empty is valid"), None);
        assert_eq!(movie_lookup(Value::Null).expect("null is valid"), None);
        let found = movie_lookup(json!([movie_json()])).expect("valid");
        assert_eq!(found.map(|movie| movie.id), Some(1));
    }

    #[test]
    fn lookup_reports_first_element_path() {
        let error = movie_lookup(json!([{"id": "x"}])).expect_err("invalid");
        assert!(error.issues().iter().any(|issue| issue.path == "[0].id"));
    }
}
