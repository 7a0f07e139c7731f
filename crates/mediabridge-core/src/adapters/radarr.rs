use super::arr;
use crate::domain::{
    DownloadQueueItem, DownloadQueueResult, ManagedExternalIds, ManagedMovie, MovieStatus,
    QueueMediaInfo,
};
use crate::schema::arr::QueuePage;
use crate::schema::radarr::{Movie, QueueItem};
use crate::ProviderId;

pub(crate) fn movie_status(status: &str) -> MovieStatus {
    match status {
        "announced" => MovieStatus::Announced,
        "inCinemas" => MovieStatus::InCinemas,
        "released" => MovieStatus::Released,
        "deleted" => MovieStatus::Deleted,
        _ => MovieStatus::Released,
    }
}

pub(crate) fn adapt_movie(movie: &Movie) -> ManagedMovie {
    ManagedMovie {
        id: movie.id,
        title: movie.title.clone(),
        original_title: movie.original_title.clone(),
        sort_title: movie.sort_title.clone(),
        year: movie.year,
        overview: movie.overview.clone(),
        monitored: movie.monitored,
        has_file: movie.has_file,
        size_on_disk: movie.size_on_disk,
        path: movie.path.clone(),
        quality_profile_id: movie.quality_profile_id,
        images: arr::adapt_images(&movie.images),
        genres: movie.genres.clone(),
        external_ids: ManagedExternalIds {
            tmdb_id: Some(movie.tmdb_id),
            tvdb_id: None,
            imdb_id: movie.imdb_id.clone(),
        },
        source: arr::stamp(ProviderId::Radarr, movie.id),
        runtime: movie.runtime,
        status: movie_status(&movie.status),
        is_available: movie.is_available,
        added: movie.added,
    }
}

pub(crate) fn adapt_movies(movies: &[Movie]) -> Vec<ManagedMovie> {
    movies.iter().map(adapt_movie).collect()
}

pub(crate) fn adapt_queue_item(item: &QueueItem) -> DownloadQueueItem {
    let movie = item.movie.as_ref();
    let media_info = QueueMediaInfo::Movie {
        media_id: item.movie_id,
        title: movie
            .and_then(|movie| movie.title.clone())
            .unwrap_or_else(|| item.record.title.clone()),
        tmdb_id: movie.and_then(|movie| movie.tmdb_id),
        imdb_id: movie.and_then(|movie| movie.imdb_id.clone()),
    };
    arr::adapt_queue_record(&item.record, media_info, ProviderId::Radarr)
}

pub(crate) fn adapt_queue(page: &QueuePage<QueueItem>) -> DownloadQueueResult {
    arr::adapt_queue_page(page, adapt_queue_item)
}
