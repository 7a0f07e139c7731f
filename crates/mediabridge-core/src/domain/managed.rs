use serde::{Deserialize, Serialize};

use crate::{SourceStamp, Timestamp};

/// Release state of a managed movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovieStatus {
    Announced,
    InCinemas,
    Released,
    Deleted,
}

/// Airing state of a managed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    Continuing,
    Ended,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesType {
    Standard,
    Daily,
    Anime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagedImageType {
    Poster,
    Fanart,
    Banner,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedMediaImage {
    pub image_type: ManagedImageType,
    pub url: String,
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedExternalIds {
    pub tmdb_id: Option<i64>,
    pub tvdb_id: Option<i64>,
    pub imdb_id: Option<String>,
}

/// A movie tracked on disk by the movie manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedMovie {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub sort_title: String,
    pub year: i64,
    pub overview: Option<String>,
    pub monitored: bool,
    pub has_file: bool,
    pub size_on_disk: f64,
    pub path: Option<String>,
    pub quality_profile_id: i64,
    pub images: Vec<ManagedMediaImage>,
    pub genres: Vec<String>,
    pub external_ids: ManagedExternalIds,
    pub source: SourceStamp,
    pub runtime: i64,
    pub status: MovieStatus,
    pub is_available: bool,
    pub added: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedSeason {
    pub season_number: i64,
    pub monitored: bool,
    pub episode_count: i64,
    pub episode_file_count: i64,
    pub percent_complete: f64,
    pub size_on_disk: f64,
}

/// A series tracked on disk by the series manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedSeries {
    pub id: i64,
    pub title: String,
    pub sort_title: String,
    pub year: i64,
    pub overview: Option<String>,
    pub monitored: bool,
    pub has_file: bool,
    pub size_on_disk: f64,
    pub path: Option<String>,
    pub quality_profile_id: i64,
    pub images: Vec<ManagedMediaImage>,
    pub genres: Vec<String>,
    pub external_ids: ManagedExternalIds,
    pub source: SourceStamp,
    pub status: SeriesStatus,
    pub network: Option<String>,
    pub air_time: Option<String>,
    pub series_type: SeriesType,
    pub season_count: i64,
    pub episode_count: i64,
    pub episode_file_count: i64,
    pub percent_complete: f64,
    pub seasons: Vec<ManagedSeason>,
    pub added: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootFolder {
    pub id: i64,
    pub path: String,
    pub free_space: f64,
    pub accessible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
    pub upgrade_allowed: bool,
}

/// Earliest release stage at which the movie manager grabs a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinimumAvailability {
    Announced,
    InCinemas,
    Released,
    Tba,
}

impl MinimumAvailability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Announced => "announced",
            Self::InCinemas => "inCinemas",
            Self::Released => "released",
            Self::Tba => "tba",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMovieOptions {
    pub tmdb_id: i64,
    pub title: String,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub search_for_movie: bool,
    pub minimum_availability: Option<MinimumAvailability>,
}

impl AddMovieOptions {
    pub fn new(
        tmdb_id: i64,
        title: impl Into<String>,
        quality_profile_id: i64,
        root_folder_path: impl Into<String>,
    ) -> Self {
        Self {
            tmdb_id,
            title: title.into(),
            quality_profile_id,
            root_folder_path: root_folder_path.into(),
            monitored: true,
            search_for_movie: true,
            minimum_availability: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSeriesOptions {
    pub tvdb_id: i64,
    pub title: String,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub season_folder: bool,
    pub series_type: SeriesType,
    pub search_for_missing_episodes: bool,
}

impl AddSeriesOptions {
    pub fn new(
        tvdb_id: i64,
        title: impl Into<String>,
        quality_profile_id: i64,
        root_folder_path: impl Into<String>,
    ) -> Self {
        Self {
            tvdb_id,
            title: title.into(),
            quality_profile_id,
            root_folder_path: root_folder_path.into(),
            monitored: true,
            season_folder: true,
            series_type: SeriesType::Standard,
            search_for_missing_episodes: true,
        }
    }
}
