use serde::{Deserialize, Serialize};

use crate::{SourceStamp, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    Queued,
    Downloading,
    Warning,
    Failed,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadProtocol {
    Usenet,
    Torrent,
}

/// What a queue item is downloading. Built from the manager that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueMediaInfo {
    Movie {
        media_id: i64,
        title: String,
        tmdb_id: Option<i64>,
        imdb_id: Option<String>,
    },
    Episode {
        media_id: i64,
        title: String,
        series_id: i64,
        series_title: Option<String>,
        season_number: Option<i64>,
        episode_number: Option<i64>,
        tvdb_id: Option<i64>,
        imdb_id: Option<String>,
    },
}

/// One in-flight acquisition job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadQueueItem {
    pub id: i64,
    pub title: String,
    pub status: DownloadStatus,
    pub protocol: DownloadProtocol,
    pub size: f64,
    pub size_remaining: f64,
    /// Percent complete, always within `0.0..=100.0`.
    pub progress: f64,
    pub time_remaining: Option<String>,
    pub estimated_completion_time: Option<Timestamp>,
    pub quality: String,
    pub indexer: Option<String>,
    pub download_client: Option<String>,
    pub error_message: Option<String>,
    pub warnings: Vec<String>,
    pub media_info: QueueMediaInfo,
    pub source: SourceStamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadQueueResult {
    pub items: Vec<DownloadQueueItem>,
    pub page: i64,
    pub page_size: i64,
    pub total_records: i64,
}
