//! Behavior-driven tests for payload normalization
//!
//! These tests verify WHAT callers receive when provider payloads pass
//! through a service: adapted domain values with closed enums, derived
//! fields and stable defaults.

use std::sync::Arc;

use mediabridge_core::domain::{MovieStatus, SeriesStatus};
use mediabridge_core::{
    collect_downloads, DownloadStatus, MediaAvailability, MediaRequestType, MediaService,
    MediaServiceOptions, MediaType, MovieService, QueueMediaInfo, ReplayClient, RequestService,
    RequestStatus, RequestsQuery, SeriesService,
};
use serde_json::{json, Value};

fn queue_page(records: Value) -> Value {
    json!({
        "page": 1, "pageSize": 20, "sortKey": "timeleft", "sortDirection": "ascending",
        "totalRecords": records.as_array().map_or(0, Vec::len),
        "records": records
    })
}

fn queue_record(id: i64, size: f64, sizeleft: f64) -> Value {
    json!({
        "id": id, "movieId": 4, "title": "Arrival.2016.1080p.BluRay",
        "status": "downloading", "trackedDownloadState": "downloading",
        "protocol": "torrent",
        "quality": {"quality": {"id": 7, "name": "Bluray-1080p"}, "revision": {"version": 1, "real": 0}},
        "size": size, "sizeleft": sizeleft, "timeleft": "00:05:00"
    })
}

fn request(status: i64, media_status: i64) -> Value {
    json!({
        "id": 12, "status": status, "type": "tv", "is4k": false,
        "createdAt": "2024-05-01T08:00:00.000Z", "updatedAt": "2024-05-02T08:00:00.000Z",
        "media": {
            "id": 30, "tmdbId": 1399, "tvdbId": 121361, "status": media_status, "status4k": 1,
            "mediaType": "tv", "posterPath": "/poster.jpg"
        },
        "requestedBy": {"id": 1, "email": "admin@example.com", "permissions": 2},
        "modifiedBy": null,
        "seasons": [{"id": 1, "seasonNumber": 1, "status": 2}]
    })
}

// =============================================================================
// Download queue
// =============================================================================

#[tokio::test]
async fn downloading_item_reports_progress_from_remaining_size() {
    // Given: The movie manager reports 250 of 1000 bytes left
    let client = Arc::new(ReplayClient::returning(queue_page(json!([queue_record(
        9, 1000.0, 250.0
    )]))));

    // When: The queue is read
    let queue = MovieService::new(client)
        .get_queue(None, None)
        .await
        .expect("queue should normalize");

    // Then: The item is downloading and 75% complete
    let item = &queue.items[0];
    assert_eq!(item.status, DownloadStatus::Downloading);
    assert_eq!(item.progress, 75.0);
    assert_eq!(item.quality, "Bluray-1080p");
    assert_eq!(item.time_remaining.as_deref(), Some("00:05:00"));
    assert_eq!(item.source.original_id, "9");
}

#[tokio::test]
async fn empty_download_reports_zero_progress() {
    // Given: A queue item whose size is not known yet
    let client = Arc::new(ReplayClient::returning(queue_page(json!([
        queue_record(1, 0.0, 0.0),
        queue_record(2, 0.0, 512.0)
    ]))));

    // When: The queue is read
    let queue = MovieService::new(client)
        .get_queue(Some(1), Some(20))
        .await
        .expect("queue should normalize");

    // Then: Progress is exactly zero, never NaN
    for item in &queue.items {
        assert_eq!(item.progress, 0.0);
        assert!(item.progress.is_finite());
    }
}

#[tokio::test]
async fn combined_queue_merges_both_managers() {
    // Given: One movie download and one episode download
    let movies = MovieService::new(Arc::new(ReplayClient::returning(queue_page(json!([
        queue_record(9, 1000.0, 500.0)
    ])))));
    let series = SeriesService::new(Arc::new(ReplayClient::returning(queue_page(json!([{
        "id": 21, "seriesId": 3, "episodeId": 77, "title": "Severance.S02E01",
        "status": "completed", "trackedDownloadState": "importPending", "protocol": "usenet",
        "quality": {"quality": {"id": 4, "name": "WEBDL-1080p"}, "revision": {"version": 1, "real": 0}},
        "size": 100, "sizeleft": 0
    }])))));

    // When: The combined overview is collected
    let combined = collect_downloads(Some(&movies), Some(&series), None, None).await;

    // Then: Both items are present, each with its own media info variant
    assert!(combined.is_complete());
    assert_eq!(combined.items.len(), 2);
    assert!(matches!(combined.items[0].media_info, QueueMediaInfo::Movie { .. }));
    assert!(matches!(
        combined.items[1].media_info,
        QueueMediaInfo::Episode { series_id: 3, media_id: 77, .. }
    ));
    assert_eq!(combined.items[1].status, DownloadStatus::Completed);
    assert_eq!(combined.items[1].progress, 100.0);
}

// =============================================================================
// Requests
// =============================================================================

#[tokio::test]
async fn available_media_status_maps_to_available() {
    // Given: A request whose media reports status 5
    let client = Arc::new(ReplayClient::returning(request(2, 5)));

    // When: The request is fetched
    let request = RequestService::new(client)
        .get_request(12)
        .await
        .expect("request should normalize");

    // Then: Availability and request status use the closed enums
    assert_eq!(request.media.status, MediaAvailability::Available);
    assert_eq!(request.status, RequestStatus::Approved);
    assert_eq!(request.request_type, MediaRequestType::Tv);
    assert_eq!(
        request.media.poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/poster.jpg")
    );
    assert_eq!(request.modified_by, None);
    assert_eq!(request.seasons[0].status, RequestStatus::Approved);
}

#[tokio::test]
async fn unknown_status_codes_fall_back_to_documented_defaults() {
    // Given: A request page with status codes outside the known range
    let client = Arc::new(ReplayClient::returning(json!({
        "pageInfo": {"page": 1, "pages": 1, "results": 1, "pageSize": 10},
        "results": [request(99, 99)]
    })));

    // When: Requests are listed
    let page = RequestService::new(client)
        .get_requests(&RequestsQuery::default())
        .await
        .expect("page should normalize");

    // Then: Request status defaults to pending, availability to unknown
    assert_eq!(page.items[0].status, RequestStatus::Pending);
    assert_eq!(page.items[0].media.status, MediaAvailability::Unknown);
    assert_eq!(page.total_results, 1);
}

#[tokio::test]
async fn discover_results_drop_people_and_read_tv_names() {
    // Given: A multi-search page mixing a movie, a show and a person
    let client = Arc::new(ReplayClient::returning(json!({
        "page": 1, "totalPages": 1, "totalResults": 3,
        "results": [
            {"id": 1, "mediaType": "movie", "title": "Arrival", "releaseDate": "2016-11-11",
             "genreIds": [18, 878]},
            {"id": 2, "mediaType": "tv", "name": "Dark", "firstAirDate": "2017-12-01"},
            {"id": 3, "mediaType": "person", "name": "Amy Adams"}
        ]
    })));

    // When: The search runs
    let result = RequestService::new(client)
        .search("a", 1)
        .await
        .expect("search should normalize");

    // Then: Only titles remain, with year derived from the date
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].year, Some(2016));
    assert_eq!(result.items[0].genre_ids, vec![18, 878]);
    assert_eq!(result.items[1].media_type, MediaRequestType::Tv);
    assert_eq!(result.items[1].title, "Dark");
    assert_eq!(result.items[1].year, Some(2017));
}

// =============================================================================
// Libraries
// =============================================================================

#[tokio::test]
async fn unknown_movie_manager_status_reads_as_released() {
    // Given: A movie with a status string the layer does not know
    let client = Arc::new(ReplayClient::returning(json!([{
        "id": 4, "title": "Arrival", "sortTitle": "arrival", "sizeOnDisk": 1.5e10,
        "status": "weird", "images": [{"coverType": "clearlogo", "url": "/l.png"}],
        "year": 2016, "hasFile": true, "qualityProfileId": 1, "monitored": true,
        "isAvailable": true, "runtime": 116, "tmdbId": 329865, "genres": []
    }])));

    // When: Movies are listed
    let movies = MovieService::new(client).get_movies().await.expect("movies");

    // Then: Status and image type fall back to their defaults
    assert_eq!(movies[0].status, MovieStatus::Released);
    assert_eq!(movies[0].external_ids.tmdb_id, Some(329865));
    assert_eq!(movies[0].images.len(), 1);
}

#[tokio::test]
async fn series_lookup_of_untracked_show_is_none() {
    // Given: The series manager knows nothing about the tvdb id
    let client = Arc::new(ReplayClient::returning(json!([])));

    // When: The lookup runs
    let series = SeriesService::new(client)
        .get_series_by_tvdb_id(121361)
        .await
        .expect("lookup should succeed");

    // Then: The caller gets None rather than an error
    assert!(series.is_none());
}

#[tokio::test]
async fn ended_series_flag_wins_over_status() {
    let client = Arc::new(ReplayClient::returning(json!({
        "id": 3, "title": "Dark", "sortTitle": "dark", "status": "continuing",
        "ended": true, "overview": "A missing child sets four families on a hunt.", "year": 2017,
        "qualityProfileId": 1, "seasonFolder": true, "monitored": false, "tvdbId": 334824,
        "genres": [], "tags": [], "added": "2020-01-01T00:00:00Z",
        "ratings": {"votes": 1200, "value": 8.8},
        "statistics": {
            "seasonCount": 3, "episodeFileCount": 26, "episodeCount": 26,
            "totalEpisodeCount": 26, "sizeOnDisk": 9.0e10, "percentOfEpisodes": 100
        },
        "seasons": [], "images": [], "seriesType": "standard"
    })));

    let series = SeriesService::new(client)
        .get_series_details(3)
        .await
        .expect("series");

    assert_eq!(series.status, SeriesStatus::Ended);
    assert!(series.has_file);
}

#[tokio::test]
async fn media_items_are_stamped_with_the_configured_server() {
    // Given: An episode from a server reporting a different ServerId
    let client = Arc::new(ReplayClient::returning(json!({
        "Id": "ep-1", "Name": "Pilot", "Type": "Episode", "ServerId": "remote",
        "SeriesId": "series-1", "SeriesName": "Dark", "ParentIndexNumber": 1, "IndexNumber": 1,
        "RunTimeTicks": 36_000_000_000_i64,
        "UserData": {"PlaybackPositionTicks": 0, "PlayCount": 2, "IsFavorite": true, "Played": true}
    })));
    let options = MediaServiceOptions::new("srv-1")
        .with_user_id("user-1")
        .with_base_url("http://jf:8096/");

    // When: The item is fetched twice
    let service = MediaService::new(client, options);
    let first = service.get_item("ep-1").await.expect("item");
    let second = service.get_item("ep-1").await.expect("item");

    // Then: The source stamp names the configured server and output is stable
    assert_eq!(first.media_type, MediaType::Episode);
    assert_eq!(first.duration_ms, Some(3_600_000));
    assert_eq!(first.source.server_id.as_deref(), Some("srv-1"));
    assert!(first.user_status.is_favorite);
    assert_eq!(first.user_status.play_count, 2);
    assert_eq!(first, second);
}
