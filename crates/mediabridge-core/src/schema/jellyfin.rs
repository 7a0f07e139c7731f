//! Media-server (Jellyfin) wire shapes.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{array_of, validate, Issues, Object, Passthrough};
use crate::error::ValidationError;
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UserData {
    pub playback_position_ticks: Option<i64>,
    pub play_count: Option<i64>,
    pub is_favorite: Option<bool>,
    pub played: Option<bool>,
    pub last_played_date: Option<Timestamp>,
    pub unplayed_item_count: Option<i64>,
    pub played_percentage: Option<f64>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PersonEntry {
    pub id: Option<String>,
    pub name: String,
    pub role: Option<String>,
    pub person_type: Option<String>,
    pub primary_image_tag: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NamedEntry {
    pub id: Option<String>,
    pub name: String,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChapterEntry {
    pub start_position_ticks: i64,
    pub name: Option<String>,
    pub image_tag: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MediaStream {
    pub stream_type: String,
    pub index: i64,
    pub codec: Option<String>,
    pub language: Option<String>,
    pub display_title: Option<String>,
    pub is_default: Option<bool>,
    pub is_forced: Option<bool>,
    pub is_external: Option<bool>,
    pub height: Option<i64>,
    pub width: Option<i64>,
    pub channels: Option<i64>,
    pub bit_rate: Option<i64>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MediaSource {
    pub id: String,
    pub name: Option<String>,
    pub container: Option<String>,
    pub size: Option<i64>,
    pub bitrate: Option<i64>,
    pub media_streams: Option<Vec<MediaStream>>,
    pub supports_direct_play: Option<bool>,
    pub supports_direct_stream: Option<bool>,
    pub supports_transcoding: Option<bool>,
    pub default_audio_stream_index: Option<i64>,
    pub default_subtitle_stream_index: Option<i64>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ProviderIds {
    pub tmdb: Option<String>,
    pub imdb: Option<String>,
    pub tvdb: Option<String>,
    pub extra: Passthrough,
}

/// `BaseItemDto`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BaseItem {
    pub id: String,
    pub name: String,
    pub item_type: String,
    pub server_id: String,
    pub sort_name: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub taglines: Option<Vec<String>>,
    pub production_year: Option<i64>,
    pub community_rating: Option<f64>,
    pub critic_rating: Option<f64>,
    pub official_rating: Option<String>,
    pub run_time_ticks: Option<i64>,
    pub premiere_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub parent_id: Option<String>,
    pub image_tags: Option<BTreeMap<String, String>>,
    pub backdrop_image_tags: Option<Vec<String>>,
    pub user_data: Option<UserData>,
    pub media_sources: Option<Vec<MediaSource>>,
    pub genres: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub people: Option<Vec<PersonEntry>>,
    pub studios: Option<Vec<NamedEntry>>,
    pub series_id: Option<String>,
    pub series_name: Option<String>,
    pub season_id: Option<String>,
    pub index_number: Option<i64>,
    pub parent_index_number: Option<i64>,
    pub chapters: Option<Vec<ChapterEntry>>,
    pub container: Option<String>,
    pub provider_ids: Option<ProviderIds>,
    pub album_id: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    pub artists: Option<Vec<String>>,
    pub artist_items: Option<Vec<NamedEntry>>,
    pub child_count: Option<i64>,
    pub recursive_item_count: Option<i64>,
    pub status: Option<String>,
    pub air_days: Option<Vec<String>>,
    pub air_time: Option<String>,
    pub extra: Passthrough,
}

/// `QueryResult<BaseItemDto>`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ItemsResponse {
    pub items: Vec<BaseItem>,
    pub total_record_count: i64,
    pub start_index: i64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchHint {
    pub id: String,
    pub item_id: Option<String>,
    pub name: String,
    pub item_type: String,
    pub production_year: Option<i64>,
    pub primary_image_tag: Option<String>,
    pub thumb_image_tag: Option<String>,
    pub thumb_image_item_id: Option<String>,
    pub backdrop_image_tag: Option<String>,
    pub backdrop_image_item_id: Option<String>,
    pub run_time_ticks: Option<i64>,
    pub album: Option<String>,
    pub album_id: Option<String>,
    pub album_artist: Option<String>,
    pub artists: Option<Vec<String>>,
    pub series: Option<String>,
    pub series_id: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchHintsResponse {
    pub hints: Vec<SearchHint>,
    pub total_record_count: i64,
    pub extra: Passthrough,
}

pub(crate) fn item(value: Value) -> Result<BaseItem, ValidationError> {
    validate(value, parse_item)
}

pub(crate) fn item_list(value: Value) -> Result<Vec<BaseItem>, ValidationError> {
    validate(value, |value, path, issues| array_of(value, path, issues, parse_item))
}

pub(crate) fn items_response(value: Value) -> Result<ItemsResponse, ValidationError> {
    validate(value, parse_items_response)
}

pub(crate) fn search_hints(value: Value) -> Result<SearchHintsResponse, ValidationError> {
    validate(value, parse_search_hints)
}

fn parse_user_data(value: Value, path: &str, issues: &mut Issues) -> Option<UserData> {
    let mut object = Object::open(value, path, issues)?;
    Some(UserData {
        playback_position_ticks: object.optional_i64("PlaybackPositionTicks", issues),
        play_count: object.optional_i64("PlayCount", issues),
        is_favorite: object.optional_bool("IsFavorite", issues),
        played: object.optional_bool("Played", issues),
        last_played_date: object.optional_timestamp("LastPlayedDate", issues),
        unplayed_item_count: object.optional_i64("UnplayedItemCount", issues),
        played_percentage: object.optional_f64("PlayedPercentage", issues),
        extra: object.into_passthrough(),
    })
}

fn parse_person(value: Value, path: &str, issues: &mut Issues) -> Option<PersonEntry> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.optional_str("Id", issues);
    let name = object.required_str("Name", issues);
    let role = object.optional_str("Role", issues);
    let person_type = object.optional_str("Type", issues);
    let primary_image_tag = object.optional_str("PrimaryImageTag", issues);
    Some(PersonEntry {
        id,
        name: name?,
        role,
        person_type,
        primary_image_tag,
        extra: object.into_passthrough(),
    })
}

fn parse_named(value: Value, path: &str, issues: &mut Issues) -> Option<NamedEntry> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.optional_str("Id", issues);
    let name = object.required_str("Name", issues);
    Some(NamedEntry {
        id,
        name: name?,
        extra: object.into_passthrough(),
    })
}

fn parse_chapter(value: Value, path: &str, issues: &mut Issues) -> Option<ChapterEntry> {
    let mut object = Object::open(value, path, issues)?;
    let start_position_ticks = object.required_i64("StartPositionTicks", issues);
    let name = object.optional_str("Name", issues);
    let image_tag = object.optional_str("ImageTag", issues);
    Some(ChapterEntry {
        start_position_ticks: start_position_ticks?,
        name,
        image_tag,
        extra: object.into_passthrough(),
    })
}

fn parse_stream(value: Value, path: &str, issues: &mut Issues) -> Option<MediaStream> {
    let mut object = Object::open(value, path, issues)?;
    let stream_type = object.required_str("Type", issues);
    let index = object.required_i64("Index", issues);
    let codec = object.optional_str("Codec", issues);
    let language = object.optional_str("Language", issues);
    let display_title = object.optional_str("DisplayTitle", issues);
    let is_default = object.optional_bool("IsDefault", issues);
    let is_forced = object.optional_bool("IsForced", issues);
    let is_external = object.optional_bool("IsExternal", issues);
    let height = object.optional_i64("Height", issues);
    let width = object.optional_i64("Width", issues);
    let channels = object.optional_i64("Channels", issues);
    let bit_rate = object.optional_i64("BitRate", issues);
    Some(MediaStream {
        stream_type: stream_type?,
        index: index?,
        codec,
        language,
        display_title,
        is_default,
        is_forced,
        is_external,
        height,
        width,
        channels,
        bit_rate,
        extra: object.into_passthrough(),
    })
}

fn parse_media_source(value: Value, path: &str, issues: &mut Issues) -> Option<MediaSource> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_str("Id", issues);
    let name = object.optional_str("Name", issues);
    let container = object.optional_str("Container", issues);
    let size = object.optional_i64("Size", issues);
    let bitrate = object.optional_i64("Bitrate", issues);
    let media_streams = object.optional_array("MediaStreams", issues, parse_stream);
    let supports_direct_play = object.optional_bool("SupportsDirectPlay", issues);
    let supports_direct_stream = object.optional_bool("SupportsDirectStream", issues);
    let supports_transcoding = object.optional_bool("SupportsTranscoding", issues);
    let default_audio_stream_index = object.optional_i64("DefaultAudioStreamIndex", issues);
    let default_subtitle_stream_index = object.optional_i64("DefaultSubtitleStreamIndex", issues);
    Some(MediaSource {
        id: id?,
        name,
        container,
        size,
        bitrate,
        media_streams,
        supports_direct_play,
        supports_direct_stream,
        supports_transcoding,
        default_audio_stream_index,
        default_subtitle_stream_index,
        extra: object.into_passthrough(),
    })
}

fn parse_provider_ids(value: Value, path: &str, issues: &mut Issues) -> Option<ProviderIds> {
    let mut object = Object::open(value, path, issues)?;
    Some(ProviderIds {
        tmdb: object.optional_str("Tmdb", issues),
        imdb: object.optional_str("Imdb", issues),
        tvdb: object.optional_str("Tvdb", issues),
        extra: object.into_passthrough(),
    })
}

pub(crate) fn parse_item(value: Value, path: &str, issues: &mut Issues) -> Option<BaseItem> {
    let mut object = Object::open(value, path, issues)?;

    let id = object.required_str("Id", issues);
    let name = object.required_str("Name", issues);
    let item_type = object.required_str("Type", issues);
    let server_id = object.required_str("ServerId", issues);

    object.check_str("ChannelId", false, issues);
    object.check_bool("IsFolder", false, issues);
    object.check_str("SeasonName", false, issues);
    object.check_number("AirsBeforeSeasonNumber", false, issues);
    object.check_number("AirsBeforeEpisodeNumber", false, issues);
    object.check_array("AlbumArtists", false, issues);

    let sort_name = object.optional_str("SortName", issues);
    let original_title = object.optional_str("OriginalTitle", issues);
    let overview = object.optional_str("Overview", issues);
    let taglines = object.optional_str_list("Taglines", issues);
    let production_year = object.optional_i64("ProductionYear", issues);
    let community_rating = object.optional_f64("CommunityRating", issues);
    let critic_rating = object.optional_f64("CriticRating", issues);
    let official_rating = object.optional_str("OfficialRating", issues);
    let run_time_ticks = object.optional_i64("RunTimeTicks", issues);
    let premiere_date = object.optional_timestamp("PremiereDate", issues);
    let end_date = object.optional_timestamp("EndDate", issues);
    let parent_id = object.optional_str("ParentId", issues);
    let image_tags = object.optional_str_map("ImageTags", issues);
    let backdrop_image_tags = object.optional_str_list("BackdropImageTags", issues);
    let user_data = object.optional_object("UserData", issues, parse_user_data);
    let media_sources = object.optional_array("MediaSources", issues, parse_media_source);
    let genres = object.optional_str_list("Genres", issues);
    let tags = object.optional_str_list("Tags", issues);
    let people = object.optional_array("People", issues, parse_person);
    let studios = object.optional_array("Studios", issues, parse_named);
    let series_id = object.optional_str("SeriesId", issues);
    let series_name = object.optional_str("SeriesName", issues);
    let season_id = object.optional_str("SeasonId", issues);
    let index_number = object.optional_i64("IndexNumber", issues);
    let parent_index_number = object.optional_i64("ParentIndexNumber", issues);
    let chapters = object.optional_array("Chapters", issues, parse_chapter);
    let container = object.optional_str("Container", issues);
    let provider_ids = object.optional_object("ProviderIds", issues, parse_provider_ids);
    let album_id = object.optional_str("AlbumId", issues);
    let album = object.optional_str("Album", issues);
    let album_artist = object.optional_str("AlbumArtist", issues);
    let artists = object.optional_str_list("Artists", issues);
    let artist_items = object.optional_array("ArtistItems", issues, parse_named);
    let child_count = object.optional_i64("ChildCount", issues);
    let recursive_item_count = object.optional_i64("RecursiveItemCount", issues);
    let status = object.optional_str("Status", issues);
    let air_days = object.optional_str_list("AirDays", issues);
    let air_time = object.optional_str("AirTime", issues);

    Some(BaseItem {
        id: id?,
        name: name?,
        item_type: item_type?,
        server_id: server_id?,
        sort_name,
        original_title,
        overview,
        taglines,
        production_year,
        community_rating,
        critic_rating,
        official_rating,
        run_time_ticks,
        premiere_date,
        end_date,
        parent_id,
        image_tags,
        backdrop_image_tags,
        user_data,
        media_sources,
        genres,
        tags,
        people,
        studios,
        series_id,
        series_name,
        season_id,
        index_number,
        parent_index_number,
        chapters,
        container,
        provider_ids,
        album_id,
        album,
        album_artist,
        artists,
        artist_items,
        child_count,
        recursive_item_count,
        status,
        air_days,
        air_time,
        extra: object.into_passthrough(),
    })
}

fn parse_items_response(value: Value, path: &str, issues: &mut Issues) -> Option<ItemsResponse> {
    let mut object = Object::open(value, path, issues)?;
    let items = object.required_array("Items", issues, parse_item);
    let total_record_count = object.required_i64("TotalRecordCount", issues);
    let start_index = object.required_i64("StartIndex", issues);
    Some(ItemsResponse {
        items: items?,
        total_record_count: total_record_count?,
        start_index: start_index?,
        extra: object.into_passthrough(),
    })
}

fn parse_search_hint(value: Value, path: &str, issues: &mut Issues) -> Option<SearchHint> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_str("Id", issues);
    let item_id = object.optional_str("ItemId", issues);
    let name = object.required_str("Name", issues);
    let item_type = object.required_str("Type", issues);
    let production_year = object.optional_i64("ProductionYear", issues);
    let primary_image_tag = object.optional_str("PrimaryImageTag", issues);
    let thumb_image_tag = object.optional_str("ThumbImageTag", issues);
    let thumb_image_item_id = object.optional_str("ThumbImageItemId", issues);
    let backdrop_image_tag = object.optional_str("BackdropImageTag", issues);
    let backdrop_image_item_id = object.optional_str("BackdropImageItemId", issues);
    let run_time_ticks = object.optional_i64("RunTimeTicks", issues);
    let album = object.optional_str("Album", issues);
    let album_id = object.optional_str("AlbumId", issues);
    let album_artist = object.optional_str("AlbumArtist", issues);
    let artists = object.optional_str_list("Artists", issues);
    let series = object.optional_str("Series", issues);
    let series_id = object.optional_str("SeriesId", issues);
    Some(SearchHint {
        id: id?,
        item_id,
        name: name?,
        item_type: item_type?,
        production_year,
        primary_image_tag,
        thumb_image_tag,
        thumb_image_item_id,
        backdrop_image_tag,
        backdrop_image_item_id,
        run_time_ticks,
        album,
        album_id,
        album_artist,
        artists,
        series,
        series_id,
        extra: object.into_passthrough(),
    })
}

fn parse_search_hints(value: Value, path: &str, issues: &mut Issues) -> Option<SearchHintsResponse> {
    let mut object = Object::open(value, path, issues)?;
    let hints = object.optional_array("SearchHints", issues, parse_search_hint);
    let total_record_count = object.optional_i64("TotalRecordCount", issues);
    Some(SearchHintsResponse {
        total_record_count: total_record_count.unwrap_or(hints.as_ref().map_or(0, |h| h.len() as i64)),
        hints: hints.unwrap_or_default(),
        extra: object.into_passthrough(),
    })
}
