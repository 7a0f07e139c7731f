//! Media-server items to [`MediaItem`].
//!
//! Image URLs are only materialized when a base URL is known. Type names
//! outside the table below resolve to [`MediaType::Movie`].
//!
//! | Server type | Media type |
//! |-------------|------------|
//! | `Movie`, `Series`, `Season`, `Episode` | same |
//! | `MusicAlbum` / `Audio` / `MusicArtist` | album / track / artist |
//! | `Book`, `AudioBook`, `Playlist` | book / audiobook / playlist |
//! | `BoxSet`, `Folder`, `CollectionFolder` | collection |
//! | `TvChannel`, `LiveTvChannel` | channel |
//! | `Program`, `LiveTvProgram` | program |

use crate::domain::{
    AiringStatus, ChapterInfo, EpisodeInfo, ExternalIds, MediaDetails, MediaImages, MediaItem,
    MediaItemsResult, MediaSourceInfo, MediaStreamInfo, MediaType, MusicInfo, Person, PersonType,
    SeasonInfo, SeriesInfo, UserMediaStatus,
};
use crate::schema::jellyfin::{
    BaseItem, ChapterEntry, ItemsResponse, MediaSource, PersonEntry, SearchHint,
    SearchHintsResponse, UserData,
};
use crate::{ProviderId, SourceStamp};

const TICKS_PER_MS: i64 = 10_000;

/// Server identity and public URL used while adapting items.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ItemContext<'a> {
    pub server_id: &'a str,
    pub base_url: Option<&'a str>,
}

impl ItemContext<'_> {
    fn stamp(&self, id: &str) -> SourceStamp {
        SourceStamp::new(ProviderId::Jellyfin, Some(self.server_id.to_owned()), id)
    }

    fn image(&self, item_id: &str, kind: &str, tag: Option<&str>) -> Option<String> {
        let base = self.base_url?;
        let tag = tag?;
        Some(format!(
            "{base}/Items/{item_id}/Images/{kind}?tag={}&quality=90",
            urlencoding::encode(tag)
        ))
    }

    fn tagged(&self, item_id: &str, kind: &str, tag: Option<&str>) -> Option<String> {
        let base = self.base_url?;
        let tag = tag?;
        Some(format!(
            "{base}/Items/{item_id}/Images/{kind}?tag={}",
            urlencoding::encode(tag)
        ))
    }

    fn untagged_primary(&self, item_id: Option<&str>) -> Option<String> {
        let base = self.base_url?;
        Some(format!("{base}/Items/{}/Images/Primary", item_id?))
    }
}

pub(crate) fn media_type(server_type: &str) -> MediaType {
    match server_type {
        "Movie" => MediaType::Movie,
        "Series" => MediaType::Series,
        "Season" => MediaType::Season,
        "Episode" => MediaType::Episode,
        "MusicAlbum" => MediaType::Album,
        "Audio" => MediaType::Track,
        "MusicArtist" => MediaType::Artist,
        "Book" => MediaType::Book,
        "AudioBook" => MediaType::Audiobook,
        "Playlist" => MediaType::Playlist,
        "BoxSet" | "Folder" | "CollectionFolder" => MediaType::Collection,
        "TvChannel" | "LiveTvChannel" => MediaType::Channel,
        "Program" | "LiveTvProgram" => MediaType::Program,
        _ => MediaType::Movie,
    }
}

/// Inverse of [`media_type`], used when building item filters.
pub(crate) fn server_type(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "Movie",
        MediaType::Series => "Series",
        MediaType::Season => "Season",
        MediaType::Episode => "Episode",
        MediaType::Album => "MusicAlbum",
        MediaType::Track => "Audio",
        MediaType::Artist => "MusicArtist",
        MediaType::Book => "Book",
        MediaType::Audiobook => "AudioBook",
        MediaType::Playlist => "Playlist",
        MediaType::Collection => "BoxSet",
        MediaType::Channel => "TvChannel",
        MediaType::Program => "Program",
    }
}

fn person_type(value: Option<&str>) -> PersonType {
    match value {
        Some("Actor") => PersonType::Actor,
        Some("Director") => PersonType::Director,
        Some("Writer") => PersonType::Writer,
        Some("Producer") => PersonType::Producer,
        Some("Composer") => PersonType::Composer,
        _ => PersonType::Other,
    }
}

fn airing_status(value: Option<&str>) -> Option<AiringStatus> {
    match value {
        Some("Continuing") => Some(AiringStatus::Continuing),
        Some("Ended") => Some(AiringStatus::Ended),
        _ => None,
    }
}

fn ticks_to_ms(ticks: i64) -> i64 {
    ticks / TICKS_PER_MS
}

fn adapt_images(item: &BaseItem, context: &ItemContext<'_>) -> MediaImages {
    let tag = |kind: &str| {
        item.image_tags
            .as_ref()
            .and_then(|tags| tags.get(kind))
            .map(String::as_str)
    };

    let primary = context
        .image(&item.id, "Primary", tag("Primary"))
        .or_else(|| context.untagged_primary(item.series_id.as_deref()))
        .or_else(|| context.untagged_primary(item.album_id.as_deref()));
    let backdrop_tag = item
        .backdrop_image_tags
        .as_ref()
        .and_then(|tags| tags.first())
        .map(String::as_str);

    MediaImages {
        primary,
        backdrop: context.image(&item.id, "Backdrop", backdrop_tag),
        thumb: context.image(&item.id, "Thumb", tag("Thumb")),
        logo: context.image(&item.id, "Logo", tag("Logo")),
        banner: context.image(&item.id, "Banner", tag("Banner")),
    }
}

fn adapt_user_status(user_data: Option<&UserData>) -> UserMediaStatus {
    let Some(data) = user_data else {
        return UserMediaStatus::default();
    };
    UserMediaStatus {
        is_favorite: data.is_favorite.unwrap_or(false),
        is_played: data.played.unwrap_or(false),
        play_count: data.play_count.unwrap_or(0),
        playback_position_ms: data.playback_position_ticks.map_or(0, ticks_to_ms),
        playback_percent: data.played_percentage.unwrap_or(0.0),
        last_played_at: data.last_played_date,
        unplayed_count: data.unplayed_item_count,
    }
}

fn adapt_person(person: &PersonEntry, context: &ItemContext<'_>) -> Person {
    let image_url = person.id.as_deref().and_then(|id| {
        context.tagged(id, "Primary", person.primary_image_tag.as_deref())
    });
    Person {
        id: person.id.clone().unwrap_or_default(),
        name: person.name.clone(),
        role: person.role.clone(),
        person_type: person_type(person.person_type.as_deref()),
        image_url,
    }
}

fn adapt_chapter(
    index: usize,
    chapter: &ChapterEntry,
    item_id: &str,
    context: &ItemContext<'_>,
) -> ChapterInfo {
    ChapterInfo {
        name: chapter.name.clone(),
        start_ms: ticks_to_ms(chapter.start_position_ticks),
        image_url: context.tagged(
            item_id,
            &format!("Chapter/{index}"),
            chapter.image_tag.as_deref(),
        ),
    }
}

fn adapt_media_source(source: &MediaSource) -> MediaSourceInfo {
    let streams = source
        .media_streams
        .iter()
        .flatten()
        .map(|stream| MediaStreamInfo {
            kind: stream.stream_type.clone(),
            index: stream.index,
            codec: stream.codec.clone(),
            language: stream.language.clone(),
            display_title: stream.display_title.clone(),
            is_default: stream.is_default.unwrap_or(false),
            is_forced: stream.is_forced.unwrap_or(false),
            is_external: stream.is_external.unwrap_or(false),
            width: stream.width,
            height: stream.height,
            channels: stream.channels,
            bit_rate: stream.bit_rate,
        })
        .collect();

    MediaSourceInfo {
        id: source.id.clone(),
        name: source.name.clone(),
        container: source.container.clone(),
        size: source.size,
        bitrate: source.bitrate,
        supports_direct_play: source.supports_direct_play.unwrap_or(false),
        supports_direct_stream: source.supports_direct_stream.unwrap_or(false),
        supports_transcoding: source.supports_transcoding.unwrap_or(false),
        default_audio_stream_index: source.default_audio_stream_index,
        default_subtitle_stream_index: source.default_subtitle_stream_index,
        streams,
    }
}

/// Kind-specific block, chosen by the server type.
fn adapt_details(item: &BaseItem) -> Option<MediaDetails> {
    let series_id = || item.series_id.clone().unwrap_or_default();
    let series_name = || item.series_name.clone().unwrap_or_default();

    match item.item_type.as_str() {
        "Series" => Some(MediaDetails::Series(SeriesInfo {
            series_id: item.id.clone(),
            series_name: item.name.clone(),
            season_count: item.child_count,
            status: airing_status(item.status.as_deref()),
            air_days: item.air_days.clone().unwrap_or_default(),
            air_time: item.air_time.clone(),
        })),
        "Season" => Some(MediaDetails::Season(SeasonInfo {
            series_id: series_id(),
            series_name: series_name(),
            season_number: item.index_number.unwrap_or(0),
            episode_count: item.child_count,
        })),
        "Episode" => Some(MediaDetails::Episode(EpisodeInfo {
            series_id: series_id(),
            series_name: series_name(),
            season_id: item.season_id.clone().unwrap_or_default(),
            season_number: item.parent_index_number.unwrap_or(0),
            episode_number: item.index_number.unwrap_or(0),
            air_date: item.premiere_date,
        })),
        "Audio" | "MusicAlbum" => {
            let artist_items = item.artist_items.as_deref().unwrap_or_default();
            let artist_names = match &item.artists {
                Some(artists) => artists.clone(),
                None => artist_items.iter().map(|artist| artist.name.clone()).collect(),
            };
            Some(MediaDetails::Music(MusicInfo {
                album_id: item.album_id.clone(),
                album_name: item.album.clone().or_else(|| item.album_artist.clone()),
                artist_ids: artist_items
                    .iter()
                    .filter_map(|artist| artist.id.clone())
                    .collect(),
                artist_names,
                track_number: item.index_number,
                disc_number: item.parent_index_number,
            }))
        }
        _ => None,
    }
}

pub(crate) fn adapt_item(item: &BaseItem, context: &ItemContext<'_>) -> MediaItem {
    let provider_ids = item.provider_ids.as_ref();

    MediaItem {
        id: item.id.clone(),
        media_type: media_type(&item.item_type),
        title: item.name.clone(),
        sort_title: item.sort_name.clone(),
        original_title: item.original_title.clone(),
        overview: item.overview.clone(),
        tagline: item.taglines.as_ref().and_then(|lines| lines.first().cloned()),
        year: item.production_year,
        rating: item.community_rating,
        critic_rating: item.critic_rating,
        official_rating: item.official_rating.clone(),
        duration_ms: item.run_time_ticks.map(ticks_to_ms),
        premiere_date: item.premiere_date,
        end_date: item.end_date,
        images: adapt_images(item, context),
        user_status: adapt_user_status(item.user_data.as_ref()),
        details: adapt_details(item),
        genres: item.genres.clone().unwrap_or_default(),
        tags: item.tags.clone().unwrap_or_default(),
        studios: item
            .studios
            .iter()
            .flatten()
            .map(|studio| studio.name.clone())
            .collect(),
        people: item
            .people
            .iter()
            .flatten()
            .map(|person| adapt_person(person, context))
            .collect(),
        chapters: item
            .chapters
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, chapter)| adapt_chapter(index, chapter, &item.id, context))
            .collect(),
        media_sources: item
            .media_sources
            .iter()
            .flatten()
            .map(adapt_media_source)
            .collect(),
        external_ids: ExternalIds {
            jellyfin: Some(item.id.clone()),
            tmdb: provider_ids.and_then(|ids| ids.tmdb.clone()),
            imdb: provider_ids.and_then(|ids| ids.imdb.clone()),
            tvdb: provider_ids.and_then(|ids| ids.tvdb.clone()),
        },
        source: context.stamp(&item.id),
        parent_id: item.parent_id.clone(),
        child_count: item.child_count,
        recursive_child_count: item.recursive_item_count,
        container: item.container.clone(),
    }
}

pub(crate) fn adapt_items(items: &[BaseItem], context: &ItemContext<'_>) -> Vec<MediaItem> {
    items.iter().map(|item| adapt_item(item, context)).collect()
}

pub(crate) fn adapt_items_response(
    response: &ItemsResponse,
    context: &ItemContext<'_>,
) -> MediaItemsResult {
    MediaItemsResult {
        items: adapt_items(&response.items, context),
        total: response.total_record_count,
        start_index: response.start_index,
    }
}

/// Search hints carry far less than a full item; the rest is defaulted.
pub(crate) fn adapt_search_hint(hint: &SearchHint, context: &ItemContext<'_>) -> MediaItem {
    let id = hint.item_id.clone().unwrap_or_else(|| hint.id.clone());
    let media_type = media_type(&hint.item_type);

    let primary = context
        .image(&id, "Primary", hint.primary_image_tag.as_deref())
        .or_else(|| context.untagged_primary(hint.album_id.as_deref()));
    let backdrop = hint.backdrop_image_item_id.as_deref().and_then(|owner| {
        context.tagged(owner, "Backdrop", hint.backdrop_image_tag.as_deref())
    });
    let thumb = hint
        .thumb_image_item_id
        .as_deref()
        .and_then(|owner| context.tagged(owner, "Thumb", hint.thumb_image_tag.as_deref()));

    let details = match (&hint.series_id, &hint.album_id) {
        (Some(series_id), _) if media_type == MediaType::Episode => {
            Some(MediaDetails::Episode(EpisodeInfo {
                series_id: series_id.clone(),
                series_name: hint.series.clone().unwrap_or_default(),
                season_id: String::new(),
                season_number: 0,
                episode_number: 0,
                air_date: None,
            }))
        }
        (_, Some(album_id)) => Some(MediaDetails::Music(MusicInfo {
            album_id: Some(album_id.clone()),
            album_name: hint.album.clone(),
            artist_ids: Vec::new(),
            artist_names: match (&hint.artists, &hint.album_artist) {
                (Some(artists), _) => artists.clone(),
                (None, Some(artist)) => vec![artist.clone()],
                (None, None) => Vec::new(),
            },
            track_number: None,
            disc_number: None,
        })),
        _ => None,
    };

    MediaItem {
        id: id.clone(),
        media_type,
        title: hint.name.clone(),
        sort_title: None,
        original_title: None,
        overview: None,
        tagline: None,
        year: hint.production_year,
        rating: None,
        critic_rating: None,
        official_rating: None,
        duration_ms: hint.run_time_ticks.map(ticks_to_ms),
        premiere_date: None,
        end_date: None,
        images: MediaImages {
            primary,
            backdrop,
            thumb,
            ..MediaImages::default()
        },
        user_status: UserMediaStatus::default(),
        details,
        genres: Vec::new(),
        tags: Vec::new(),
        studios: Vec::new(),
        people: Vec::new(),
        chapters: Vec::new(),
        media_sources: Vec::new(),
        external_ids: ExternalIds {
            jellyfin: Some(id.clone()),
            ..ExternalIds::default()
        },
        source: context.stamp(&id),
        parent_id: None,
        child_count: None,
        recursive_child_count: None,
        container: None,
    }
}

pub(crate) fn adapt_search_hints(
    response: &SearchHintsResponse,
    context: &ItemContext<'_>,
) -> MediaItemsResult {
    MediaItemsResult {
        items: response
            .hints
            .iter()
            .map(|hint| adapt_search_hint(hint, context))
            .collect(),
        total: response.total_record_count,
        start_index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::jellyfin;
    use serde_json::json;

    const CONTEXT: ItemContext<'static> = ItemContext {
        server_id: "srv-1",
        base_url: Some("http://jf:8096"),
    };

    #[test]
    fn episode_item_is_fully_adapted() {
        let raw = jellyfin::item(json!({
            "Id": "ep1", "Name": "Pilot", "Type": "Episode", "ServerId": "other",
            "SeriesId": "s1", "SeriesName": "Lost", "SeasonId": "se1",
            "IndexNumber": 1, "ParentIndexNumber": 1,
            "RunTimeTicks": 25_000_000_000_i64,
            "PremiereDate": "2004-09-22T00:00:00.0000000Z",
            "UserData": {"PlaybackPositionTicks": 600_000_000, "Played": false, "PlayCount": 2},
            "People": [{"Id": "p1", "Name": "Matthew Fox", "Type": "Actor", "PrimaryImageTag": "a b"}],
            "Chapters": [{"StartPositionTicks": 0, "Name": "Intro", "ImageTag": "c1"}],
            "ProviderIds": {"Tvdb": "127131"}
        }))
        .expect("valid item");

        let item = adapt_item(&raw, &CONTEXT);
        assert_eq!(item.media_type, MediaType::Episode);
        assert_eq!(item.duration_ms, Some(2_500_000));
        assert_eq!(item.user_status.playback_position_ms, 60_000);
        assert_eq!(item.user_status.play_count, 2);
        assert_eq!(
            item.images.primary.as_deref(),
            Some("http://jf:8096/Items/s1/Images/Primary")
        );
        assert_eq!(
            item.people[0].image_url.as_deref(),
            Some("http://jf:8096/Items/p1/Images/Primary?tag=a%20b")
        );
        assert_eq!(
            item.chapters[0].image_url.as_deref(),
            Some("http://jf:8096/Items/ep1/Images/Chapter/0?tag=c1")
        );
        let episode = item.episode_info().expect("episode details");
        assert_eq!(episode.series_name, "Lost");
        assert_eq!(episode.episode_number, 1);
        assert_eq!(item.source.server_id.as_deref(), Some("srv-1"));
        assert_eq!(item.external_ids.tvdb.as_deref(), Some("127131"));
    }

    #[test]
    fn missing_user_data_uses_default_status() {
        let raw = jellyfin::item(json!({
            "Id": "m1", "Name": "Heat", "Type": "Movie", "ServerId": "s",
            "ImageTags": {"Primary": "t1", "Logo": "t2"}, "BackdropImageTags": ["b1"]
        }))
        .expect("valid item");

        let item = adapt_item(&raw, &CONTEXT);
        assert_eq!(item.user_status, UserMediaStatus::default());
        assert!(item.details.is_none());
        assert_eq!(
            item.images.primary.as_deref(),
            Some("http://jf:8096/Items/m1/Images/Primary?tag=t1&quality=90")
        );
        assert_eq!(
            item.images.backdrop.as_deref(),
            Some("http://jf:8096/Items/m1/Images/Backdrop?tag=b1&quality=90")
        );
        assert!(item.images.thumb.is_none());
    }

    #[test]
    fn no_base_url_means_no_images() {
        let context = ItemContext {
            server_id: "s",
            base_url: None,
        };
        let raw = jellyfin::item(json!({
            "Id": "m1", "Name": "Heat", "Type": "Movie", "ServerId": "s",
            "ImageTags": {"Primary": "t1"}, "SeriesId": "x"
        }))
        .expect("valid item");
        assert_eq!(adapt_item(&raw, &context).images, MediaImages::default());
    }

    #[test]
    fn unknown_type_is_movie_and_types_round_trip() {
        assert_eq!(media_type("TvRecording"), MediaType::Movie);
        for kind in MediaType::ALL {
            assert_eq!(media_type(server_type(kind)), kind);
        }
    }

    #[test]
    fn music_details_prefer_artist_list() {
        let raw = jellyfin::item(json!({
            "Id": "t1", "Name": "Song", "Type": "Audio", "ServerId": "s",
            "AlbumId": "al1", "Album": "Record", "AlbumArtist": "Band",
            "ArtistItems": [{"Id": "ar1", "Name": "Band"}],
            "IndexNumber": 3, "ParentIndexNumber": 1
        }))
        .expect("valid item");

        let item = adapt_item(&raw, &CONTEXT);
        let music = item.music_info().expect("music details");
        assert_eq!(music.album_name.as_deref(), Some("Record"));
        assert_eq!(music.artist_ids, vec!["ar1".to_owned()]);
        assert_eq!(music.artist_names, vec!["Band".to_owned()]);
        assert_eq!(music.track_number, Some(3));
        assert_eq!(
            item.images.primary.as_deref(),
            Some("http://jf:8096/Items/al1/Images/Primary")
        );
    }

    #[test]
    fn search_hint_prefers_item_id() {
        let raw = jellyfin::search_hints(json!({
            "SearchHints": [{
                "Id": "h1", "ItemId": "i1", "Name": "Pilot", "Type": "Episode",
                "SeriesId": "s1", "Series": "Lost",
                "BackdropImageTag": "bd", "BackdropImageItemId": "s1"
            }],
            "TotalRecordCount": 1
        }))
        .expect("valid hints");

        let result = adapt_search_hints(&raw, &CONTEXT);
        let item = &result.items[0];
        assert_eq!(item.id, "i1");
        assert_eq!(item.external_ids.jellyfin.as_deref(), Some("i1"));
        assert_eq!(
            item.images.backdrop.as_deref(),
            Some("http://jf:8096/Items/s1/Images/Backdrop?tag=bd")
        );
        assert_eq!(
            item.episode_info().map(|info| info.series_name.as_str()),
            Some("Lost")
        );
        assert_eq!(result.total, 1);
    }
}
