use super::arr;
use crate::domain::{
    DownloadQueueItem, DownloadQueueResult, ManagedExternalIds, ManagedSeason, ManagedSeries,
    QueueMediaInfo, SeriesStatus, SeriesType,
};
use crate::schema::arr::QueuePage;
use crate::schema::sonarr::{QueueItem, Season, Series};
use crate::ProviderId;

/// The `ended` flag takes precedence over the status string.
pub(crate) fn series_status(ended: bool, status: &str) -> SeriesStatus {
    if ended {
        return SeriesStatus::Ended;
    }
    match status {
        "continuing" => SeriesStatus::Continuing,
        "upcoming" => SeriesStatus::Upcoming,
        "ended" => SeriesStatus::Ended,
        _ => SeriesStatus::Continuing,
    }
}

pub(crate) fn series_type(series_type: &str) -> SeriesType {
    match series_type {
        "daily" => SeriesType::Daily,
        "anime" => SeriesType::Anime,
        _ => SeriesType::Standard,
    }
}

fn adapt_season(season: &Season) -> ManagedSeason {
    let stats = season.statistics.as_ref();
    ManagedSeason {
        season_number: season.season_number,
        monitored: season.monitored,
        episode_count: stats.map_or(0, |stats| stats.episode_count),
        episode_file_count: stats.map_or(0, |stats| stats.episode_file_count),
        percent_complete: stats.map_or(0.0, |stats| stats.percent_of_episodes),
        size_on_disk: stats.map_or(0.0, |stats| stats.size_on_disk),
    }
}

pub(crate) fn adapt_series(series: &Series) -> ManagedSeries {
    let stats = &series.statistics;
    ManagedSeries {
        id: series.id,
        title: series.title.clone(),
        sort_title: series.sort_title.clone(),
        year: series.year,
        overview: Some(series.overview.clone()),
        monitored: series.monitored,
        has_file: stats.episode_file_count > 0,
        size_on_disk: stats.size_on_disk,
        path: series.path.clone(),
        quality_profile_id: series.quality_profile_id,
        images: arr::adapt_images(&series.images),
        genres: series.genres.clone(),
        external_ids: ManagedExternalIds {
            tmdb_id: None,
            tvdb_id: Some(series.tvdb_id),
            imdb_id: series.imdb_id.clone(),
        },
        source: arr::stamp(ProviderId::Sonarr, series.id),
        status: series_status(series.ended, &series.status),
        network: series.network.clone(),
        air_time: series.air_time.clone(),
        series_type: series_type(&series.series_type),
        season_count: stats.season_count,
        episode_count: stats.episode_count,
        episode_file_count: stats.episode_file_count,
        percent_complete: stats.percent_of_episodes,
        seasons: series.seasons.iter().map(adapt_season).collect(),
        added: series.added,
    }
}

pub(crate) fn adapt_series_list(series: &[Series]) -> Vec<ManagedSeries> {
    series.iter().map(adapt_series).collect()
}

pub(crate) fn adapt_queue_item(item: &QueueItem) -> DownloadQueueItem {
    let series = item.series.as_ref();
    let episode = item.episode.as_ref();
    let media_info = QueueMediaInfo::Episode {
        media_id: item.episode_id,
        title: episode
            .map(|episode| episode.title.clone())
            .unwrap_or_else(|| item.record.title.clone()),
        series_id: item.series_id,
        series_title: series.map(|series| series.title.clone()),
        season_number: episode.map(|episode| episode.season_number),
        episode_number: episode.map(|episode| episode.episode_number),
        tvdb_id: series.map(|series| series.tvdb_id),
        imdb_id: series.and_then(|series| series.imdb_id.clone()),
    };
    arr::adapt_queue_record(&item.record, media_info, ProviderId::Sonarr)
}

pub(crate) fn adapt_queue(page: &QueuePage<QueueItem>) -> DownloadQueueResult {
    arr::adapt_queue_page(page, adapt_queue_item)
}
