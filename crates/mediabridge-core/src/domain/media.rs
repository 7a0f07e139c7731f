use serde::{Deserialize, Serialize};

use crate::{ProviderId, Timestamp};

/// Closed set of browsable/playable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
    Season,
    Episode,
    Album,
    Track,
    Artist,
    Book,
    Audiobook,
    Playlist,
    Collection,
    Channel,
    Program,
}

impl MediaType {
    pub const ALL: [Self; 13] = [
        Self::Movie,
        Self::Series,
        Self::Season,
        Self::Episode,
        Self::Album,
        Self::Track,
        Self::Artist,
        Self::Book,
        Self::Audiobook,
        Self::Playlist,
        Self::Collection,
        Self::Channel,
        Self::Program,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Season => "season",
            Self::Episode => "episode",
            Self::Album => "album",
            Self::Track => "track",
            Self::Artist => "artist",
            Self::Book => "book",
            Self::Audiobook => "audiobook",
            Self::Playlist => "playlist",
            Self::Collection => "collection",
            Self::Channel => "channel",
            Self::Program => "program",
        }
    }
}

/// Where a domain value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    pub provider: ProviderId,
    pub server_id: Option<String>,
    pub original_id: String,
}

impl SourceStamp {
    pub fn new(provider: ProviderId, server_id: Option<String>, original_id: impl Into<String>) -> Self {
        Self {
            provider,
            server_id,
            original_id: original_id.into(),
        }
    }
}

/// Absolute image URLs for an item. Missing artwork stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImages {
    pub primary: Option<String>,
    pub backdrop: Option<String>,
    pub thumb: Option<String>,
    pub logo: Option<String>,
    pub banner: Option<String>,
}

/// Per-user playback state.
///
/// Always present on a [`MediaItem`]; [`UserMediaStatus::default`] is used
/// when the provider sends no playback data: not favorite, not played, zero
/// plays, position zero, zero percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMediaStatus {
    pub is_favorite: bool,
    pub is_played: bool,
    pub play_count: i64,
    pub playback_position_ms: i64,
    pub playback_percent: f64,
    pub last_played_at: Option<Timestamp>,
    pub unplayed_count: Option<i64>,
}

/// Cross-provider identifiers for a media-server item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIds {
    pub jellyfin: Option<String>,
    pub tmdb: Option<String>,
    pub imdb: Option<String>,
    pub tvdb: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    Actor,
    Director,
    Writer,
    Producer,
    Composer,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub person_type: PersonType,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub name: Option<String>,
    pub start_ms: i64,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaStreamInfo {
    /// Stream kind as reported upstream (`Video`, `Audio`, `Subtitle`, ...).
    pub kind: String,
    pub index: i64,
    pub codec: Option<String>,
    pub language: Option<String>,
    pub display_title: Option<String>,
    pub is_default: bool,
    pub is_forced: bool,
    pub is_external: bool,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub channels: Option<i64>,
    pub bit_rate: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSourceInfo {
    pub id: String,
    pub name: Option<String>,
    pub container: Option<String>,
    pub size: Option<i64>,
    pub bitrate: Option<i64>,
    pub supports_direct_play: bool,
    pub supports_direct_stream: bool,
    pub supports_transcoding: bool,
    pub default_audio_stream_index: Option<i64>,
    pub default_subtitle_stream_index: Option<i64>,
    pub streams: Vec<MediaStreamInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    Continuing,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub series_id: String,
    pub series_name: String,
    pub season_count: Option<i64>,
    pub status: Option<AiringStatus>,
    pub air_days: Vec<String>,
    pub air_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub series_id: String,
    pub series_name: String,
    pub season_number: i64,
    pub episode_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub series_id: String,
    pub series_name: String,
    pub season_id: String,
    pub season_number: i64,
    pub episode_number: i64,
    pub air_date: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicInfo {
    pub album_id: Option<String>,
    pub album_name: Option<String>,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    pub track_number: Option<i64>,
    pub disc_number: Option<i64>,
}

/// Kind-specific detail block. An item carries at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaDetails {
    Series(SeriesInfo),
    Season(SeasonInfo),
    Episode(EpisodeInfo),
    Music(MusicInfo),
}

/// Universal browsable/playable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    pub sort_title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub critic_rating: Option<f64>,
    pub official_rating: Option<String>,
    pub duration_ms: Option<i64>,
    pub premiere_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub images: MediaImages,
    pub user_status: UserMediaStatus,
    pub details: Option<MediaDetails>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub studios: Vec<String>,
    pub people: Vec<Person>,
    pub chapters: Vec<ChapterInfo>,
    pub media_sources: Vec<MediaSourceInfo>,
    pub external_ids: ExternalIds,
    pub source: SourceStamp,
    pub parent_id: Option<String>,
    pub child_count: Option<i64>,
    pub recursive_child_count: Option<i64>,
    pub container: Option<String>,
}

impl MediaItem {
    pub fn series_info(&self) -> Option<&SeriesInfo> {
        match &self.details {
            Some(MediaDetails::Series(info)) => Some(info),
            _ => None,
        }
    }

    pub fn season_info(&self) -> Option<&SeasonInfo> {
        match &self.details {
            Some(MediaDetails::Season(info)) => Some(info),
            _ => None,
        }
    }

    pub fn episode_info(&self) -> Option<&EpisodeInfo> {
        match &self.details {
            Some(MediaDetails::Episode(info)) => Some(info),
            _ => None,
        }
    }

    pub fn music_info(&self) -> Option<&MusicInfo> {
        match &self.details {
            Some(MediaDetails::Music(info)) => Some(info),
            _ => None,
        }
    }
}

/// One page of media-server items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItemsResult {
    pub items: Vec<MediaItem>,
    pub total: i64,
    pub start_index: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Library browse parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    pub parent_id: Option<String>,
    pub include_item_types: Vec<MediaType>,
    pub genres: Vec<String>,
    pub sort_by: Vec<String>,
    pub sort_order: Option<SortOrder>,
    pub start_index: Option<u32>,
    pub limit: Option<u32>,
    pub recursive: bool,
    pub search_term: Option<String>,
    pub is_favorite: Option<bool>,
}

/// Search parameters for the media server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: Option<u32>,
    pub include_item_types: Vec<MediaType>,
}
