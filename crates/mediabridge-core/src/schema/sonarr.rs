//! Series-manager (Sonarr v3) wire shapes.

use serde_json::Value;

use super::arr::{self, Image, QualityProfile, QueuePage, QueueRecord, RootFolder};
use super::{array_of, validate, validate_optional, Issues, Object, Passthrough};
use crate::error::ValidationError;
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeasonStatistics {
    pub episode_file_count: i64,
    pub episode_count: i64,
    pub size_on_disk: f64,
    pub percent_of_episodes: f64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Season {
    pub season_number: i64,
    pub monitored: bool,
    pub statistics: Option<SeasonStatistics>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statistics {
    pub season_count: i64,
    pub episode_file_count: i64,
    pub episode_count: i64,
    pub size_on_disk: f64,
    pub percent_of_episodes: f64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Series {
    pub id: i64,
    pub title: String,
    pub sort_title: String,
    pub status: String,
    pub ended: bool,
    pub overview: String,
    pub network: Option<String>,
    pub air_time: Option<String>,
    pub year: i64,
    pub path: Option<String>,
    pub quality_profile_id: i64,
    pub monitored: bool,
    pub tvdb_id: i64,
    pub imdb_id: Option<String>,
    pub genres: Vec<String>,
    pub added: Option<Timestamp>,
    pub statistics: Statistics,
    pub seasons: Vec<Season>,
    pub images: Vec<Image>,
    pub series_type: String,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueueEpisode {
    pub title: String,
    pub season_number: i64,
    pub episode_number: i64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueueItem {
    pub record: QueueRecord,
    pub series_id: i64,
    pub episode_id: i64,
    /// Present when the queue is requested with `includeSeries`.
    pub series: Option<Series>,
    pub episode: Option<QueueEpisode>,
    pub extra: Passthrough,
}

pub(crate) const SERIES_TYPES: [&str; 3] = ["standard", "daily", "anime"];

pub(crate) fn series(value: Value) -> Result<Series, ValidationError> {
    validate(value, parse_series)
}

pub(crate) fn series_list(value: Value) -> Result<Vec<Series>, ValidationError> {
    validate(value, |value, path, issues| array_of(value, path, issues, parse_series))
}

pub(crate) fn series_lookup(value: Value) -> Result<Option<Series>, ValidationError> {
    validate_optional(value, parse_series)
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

fn parse_season_statistics(value: Value, path: &str, issues: &mut Issues) -> Option<SeasonStatistics> {
    let mut object = Object::open(value, path, issues)?;
    object.check_number("totalEpisodeCount", true, issues);
    let episode_file_count = object.required_i64("episodeFileCount", issues);
    let episode_count = object.required_i64("episodeCount", issues);
    let size_on_disk = object.required_f64("sizeOnDisk", issues);
    let percent_of_episodes = object.required_f64("percentOfEpisodes", issues);
    Some(SeasonStatistics {
        episode_file_count: episode_file_count?,
        episode_count: episode_count?,
        size_on_disk: size_on_disk?,
        percent_of_episodes: percent_of_episodes?,
        extra: object.into_passthrough(),
    })
}

fn parse_season(value: Value, path: &str, issues: &mut Issues) -> Option<Season> {
    let mut object = Object::open(value, path, issues)?;
    let season_number = object.required_i64("seasonNumber", issues);
    let monitored = object.required_bool("monitored", issues);
    let statistics = object.optional_object("statistics", issues, parse_season_statistics);
    Some(Season {
        season_number: season_number?,
        monitored: monitored?,
        statistics,
        extra: object.into_passthrough(),
    })
}

fn parse_statistics(value: Value, path: &str, issues: &mut Issues) -> Option<Statistics> {
    let mut object = Object::open(value, path, issues)?;
    object.check_number("totalEpisodeCount", true, issues);
    let season_count = object.required_i64("seasonCount", issues);
    let episode_file_count = object.required_i64("episodeFileCount", issues);
    let episode_count = object.required_i64("episodeCount", issues);
    let size_on_disk = object.required_f64("sizeOnDisk", issues);
    let percent_of_episodes = object.required_f64("percentOfEpisodes", issues);
    Some(Statistics {
        season_count: season_count?,
        episode_file_count: episode_file_count?,
        episode_count: episode_count?,
        size_on_disk: size_on_disk?,
        percent_of_episodes: percent_of_episodes?,
        extra: object.into_passthrough(),
    })
}

fn parse_series(value: Value, path: &str, issues: &mut Issues) -> Option<Series> {
    let mut object = Object::open(value, path, issues)?;

    object.check_bool("seasonFolder", true, issues);
    object.check_number("tvRageId", false, issues);
    object.check_number("tvMazeId", false, issues);
    object.check_array("tags", true, issues);
    object.check_object_with("ratings", true, issues, check_ratings);

    let id = object.required_i64("id", issues);
    let title = object.required_str("title", issues);
    let sort_title = object.required_str("sortTitle", issues);
    let status = object.required_str("status", issues);
    let ended = object.required_bool("ended", issues);
    let overview = object.required_str("overview", issues);
    let network = object.optional_str("network", issues);
    let air_time = object.optional_str("airTime", issues);
    let year = object.required_i64("year", issues);
    let series_path = object.optional_str("path", issues);
    let quality_profile_id = object.required_i64("qualityProfileId", issues);
    let monitored = object.required_bool("monitored", issues);
    let tvdb_id = object.required_i64("tvdbId", issues);
    let imdb_id = object.optional_str("imdbId", issues);
    let genres = object.required_str_list("genres", issues);
    let added = object.required_str("added", issues);
    let statistics = object.required_object("statistics", issues, parse_statistics);
    let seasons = object.required_array("seasons", issues, parse_season);
    let images = object.required_array("images", issues, arr::parse_image);
    let series_type = object.required_one_of("seriesType", &SERIES_TYPES, issues);

    Some(Series {
        id: id?,
        title: title?,
        sort_title: sort_title?,
        status: status?,
        ended: ended?,
        overview: overview?,
        network,
        air_time,
        year: year?,
        path: series_path,
        quality_profile_id: quality_profile_id?,
        monitored: monitored?,
        tvdb_id: tvdb_id?,
        imdb_id,
        genres: genres?,
        added: Timestamp::parse_lenient(&added?),
        statistics: statistics?,
        seasons: seasons?,
        images: images?,
        series_type: series_type?,
        extra: object.into_passthrough(),
    })
}

fn check_ratings(value: Value, path: &str, issues: &mut Issues) -> Option<()> {
    let mut object = Object::open(value, path, issues)?;
    let votes = object.required_f64("votes", issues);
    let score = object.required_f64("value", issues);
    votes.zip(score).map(|_| ())
}

fn parse_queue_episode(value: Value, path: &str, issues: &mut Issues) -> Option<QueueEpisode> {
    let mut object = Object::open(value, path, issues)?;
    object.check_number("id", true, issues);
    object.check_number("seriesId", true, issues);
    object.check_number("tvdbId", true, issues);
    object.check_str("airDate", false, issues);
    object.check_str("overview", false, issues);
    let episode_number = object.required_i64("episodeNumber", issues);
    let season_number = object.required_i64("seasonNumber", issues);
    let title = object.required_str("title", issues);
    Some(QueueEpisode {
        title: title?,
        season_number: season_number?,
        episode_number: episode_number?,
        extra: object.into_passthrough(),
    })
}

fn parse_queue_item(value: Value, path: &str, issues: &mut Issues) -> Option<QueueItem> {
    let mut object = Object::open(value, path, issues)?;
    let record = arr::read_queue_record(&mut object, issues);
    let series_id = object.required_i64("seriesId", issues);
    let episode_id = object.required_i64("episodeId", issues);
    let series = object.optional_object("series", issues, parse_series);
    let episode = object.optional_object("episode", issues, parse_queue_episode);
    Some(QueueItem {
        record: record?,
        series_id: series_id?,
        episode_id: episode_id?,
        series,
        episode,
        extra: object.into_passthrough(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorCode, IssueCode};
    use serde_json::json;

    fn series_json(series_type: &str) -> Value {
        json!({
            "id": 3,
            "title": "Severance",
            "sortTitle": "severance",
            "status": "continuing",
            "ended": false,
            "overview": "Work-life balance, surgically.",
            "year": 2022,
            "qualityProfileId": 1,
            "seasonFolder": true,
            "monitored": true,
            "tvdbId": 371980,
            "genres": ["Drama"],
            "tags": [],
            "added": "2022-02-18T10:00:00Z",
            "ratings": {"votes": 10, "value": 8.7},
            "statistics": {
                "seasonCount": 2, "episodeFileCount": 0, "episodeCount": 19,
                "totalEpisodeCount": 19, "sizeOnDisk": 0, "percentOfEpisodes": 0
            },
            "seasons": [{"seasonNumber": 1, "monitored": true}],
            "images": [],
            "seriesType": series_type
        })
    }

    #[test]
    fn parses_series_with_optional_season_statistics() {
        let parsed = series(series_json("standard")).expect("valid series");
        assert_eq!(parsed.seasons.len(), 1);
        assert!(parsed.seasons[0].statistics.is_none());
        assert_eq!(parsed.overview, "Work-life balance, surgically.");
        assert_eq!(parsed.extra.get("ratings"), Some(&json!({"votes": 10, "value": 8.7})));
    }

    #[test]
    fn series_type_is_closed() {
        let error = series(series_json("soap")).expect_err("unknown series type");
        assert_eq!(error.issues().len(), 1);
        assert_eq!(error.issues()[0].code, IssueCode::InvalidEnumValue);
        assert_eq!(error.issues()[0].path, "seriesType");
    }

    #[test]
    fn missing_overview_and_bare_ratings_are_rejected() {
        let mut payload = series_json("standard");
        if let Some(fields) = payload.as_object_mut() {
            fields.remove("overview");
        }
        payload["ratings"] = json!({});

        let error = series(payload).expect_err("incomplete series");
        let paths: Vec<&str> = error.issues().iter().map(|issue| issue.path.as_str()).collect();
        assert_eq!(paths, vec!["ratings.votes", "ratings.value", "overview"]);
        assert!(error.issues().iter().all(|issue| issue.code == IssueCode::Required));
        assert_eq!(ApiError::from(error).code(), ErrorCode::Validation);
    }

    #[test]
    fn ratings_values_must_be_numbers() {
        let mut payload = series_json("daily");
        payload["ratings"] = json!({"votes": "many", "value": 8.7});
        let error = series(payload).expect_err("invalid ratings");
        assert_eq!(error.issues()[0].path, "ratings.votes");
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
    }

    #[test]
    fn unreadable_added_date_is_not_fatal() {
        let mut payload = series_json("anime");
        payload["added"] = json!("yesterday");
        assert_eq!(series(payload).expect("string date is valid").added, None);

        let mut payload = series_json("anime");
        payload["added"] = json!("2022-02-18");
        let added = series(payload).expect("date-only is valid").added;
        assert_eq!(added.map(|added| added.format_rfc3339()).as_deref(), Some("2022-02-18T00:00:00Z"));

        let mut payload = series_json("anime");
        payload["added"] = json!(20220218);
        let error = series(payload).expect_err("non-string date");
        assert_eq!(error.issues()[0].path, "added");
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
    }

    #[test]
    fn queue_series_embed_uses_the_full_series_shape() {
        let record = |embed: Value| {
            json!({
                "page": 1, "pageSize": 10, "sortKey": "timeleft", "sortDirection": "ascending",
                "totalRecords": 1,
                "records": [{
                    "id": 21, "seriesId": 3, "episodeId": 77, "title": "Severance.S02E01",
                    "status": "queued", "protocol": "usenet",
                    "quality": {"quality": {"id": 4, "name": "HDTV-720p"}, "revision": {"version": 1, "real": 0}},
                    "size": 10, "sizeleft": 5,
                    "series": embed
                }]
            })
        };

        let page = queue(record(series_json("standard"))).expect("full embed");
        assert_eq!(page.records[0].series.as_ref().map(|series| series.tvdb_id), Some(371980));

        let error = queue(record(json!({"title": "Severance", "tvdbId": 371980})))
            .expect_err("partial embed");
        assert!(error
            .issues()
            .iter()
            .any(|issue| issue.path == "records[0].series.overview"));
    }
}
