//! Provider-agnostic domain models.
//!
//! Every value here is produced by an adapter and is immutable afterwards.
//! Callers that need fresher data call the owning service again.

mod managed;
mod media;
mod queue;
mod request;
mod timestamp;

pub use managed::{
    AddMovieOptions, AddSeriesOptions, ManagedExternalIds, ManagedImageType, ManagedMediaImage,
    ManagedMovie, ManagedSeason, ManagedSeries, MinimumAvailability, MovieStatus, QualityProfile,
    RootFolder, SeriesStatus, SeriesType,
};
pub use media::{
    AiringStatus, ChapterInfo, EpisodeInfo, ExternalIds, LibraryQuery, MediaDetails, MediaImages,
    MediaItem, MediaItemsResult, MediaSourceInfo, MediaStreamInfo, MediaType, MusicInfo, Person,
    PersonType, SearchOptions, SeasonInfo, SeriesInfo, SortOrder, SourceStamp, UserMediaStatus,
};
pub use queue::{
    DownloadProtocol, DownloadQueueItem, DownloadQueueResult, DownloadStatus, QueueMediaInfo,
};
pub use request::{
    DiscoverItem, DiscoverResult, MediaAvailability, MediaRequest, MediaRequestType,
    RequestFilter, RequestSort, RequestStatus, RequestUser, RequestedMedia, RequestsQuery,
    RequestsResult, SeasonRequest,
};
pub use timestamp::Timestamp;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderId;

    #[test]
    fn movie_status_keeps_camel_case_wire_value() {
        let encoded = serde_json::to_string(&MovieStatus::InCinemas).expect("serializes");
        assert_eq!(encoded, "\"inCinemas\"");
    }

    #[test]
    fn closed_enums_serialize_snake_case() {
        let encoded =
            serde_json::to_string(&RequestStatus::PartiallyAvailable).expect("serializes");
        assert_eq!(encoded, "\"partially_available\"");

        let encoded = serde_json::to_string(&MediaType::Audiobook).expect("serializes");
        assert_eq!(encoded, "\"audiobook\"");
    }

    #[test]
    fn default_user_status_is_unplayed() {
        let status = UserMediaStatus::default();
        assert!(!status.is_favorite);
        assert!(!status.is_played);
        assert_eq!(status.play_count, 0);
        assert_eq!(status.playback_position_ms, 0);
        assert_eq!(status.playback_percent, 0.0);
    }

    #[test]
    fn source_stamp_serializes_provider_id() {
        let stamp = SourceStamp::new(ProviderId::Radarr, None, "42");
        let value = serde_json::to_value(&stamp).expect("serializes");
        assert_eq!(value["provider"], "radarr");
        assert_eq!(value["original_id"], "42");
    }
}
