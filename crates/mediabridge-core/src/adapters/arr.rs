//! Mappings shared by the movie and series managers.

use crate::domain::{
    DownloadProtocol, DownloadQueueItem, DownloadQueueResult, DownloadStatus, ManagedImageType,
    ManagedMediaImage, QualityProfile, QueueMediaInfo, RootFolder,
};
use crate::schema::arr::{self as raw, QueuePage, QueueRecord};
use crate::{ProviderId, SourceStamp};

/// Percent complete for a queue entry.
///
/// Zero-sized entries report `0`. The result is clamped into `0.0..=100.0`
/// and never `NaN`.
pub(crate) fn progress_percent(size: f64, size_remaining: f64) -> f64 {
    if size.is_nan() || size <= 0.0 {
        return 0.0;
    }
    let percent = (size - size_remaining) / size * 100.0;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub(crate) fn download_status(tracked_state: Option<&str>, status: &str) -> DownloadStatus {
    match tracked_state {
        Some("importPending") => return DownloadStatus::Completed,
        Some("downloading") => return DownloadStatus::Downloading,
        _ => {}
    }
    match status {
        "warning" => DownloadStatus::Warning,
        "failed" => DownloadStatus::Failed,
        "paused" => DownloadStatus::Paused,
        "completed" => DownloadStatus::Completed,
        _ => DownloadStatus::Queued,
    }
}

pub(crate) fn download_protocol(protocol: &str) -> DownloadProtocol {
    match protocol {
        "usenet" => DownloadProtocol::Usenet,
        _ => DownloadProtocol::Torrent,
    }
}

pub(crate) fn image_type(cover_type: &str) -> ManagedImageType {
    match cover_type {
        "fanart" => ManagedImageType::Fanart,
        "banner" => ManagedImageType::Banner,
        _ => ManagedImageType::Poster,
    }
}

pub(crate) fn adapt_images(images: &[raw::Image]) -> Vec<ManagedMediaImage> {
    images
        .iter()
        .map(|image| ManagedMediaImage {
            image_type: image_type(&image.cover_type),
            url: image.url.clone(),
            remote_url: image.remote_url.clone(),
        })
        .collect()
}

pub(crate) fn adapt_root_folders(folders: &[raw::RootFolder]) -> Vec<RootFolder> {
    folders
        .iter()
        .map(|folder| RootFolder {
            id: folder.id,
            path: folder.path.clone(),
            free_space: folder.free_space,
            accessible: folder.accessible,
        })
        .collect()
}

pub(crate) fn adapt_quality_profiles(profiles: &[raw::QualityProfile]) -> Vec<QualityProfile> {
    profiles
        .iter()
        .map(|profile| QualityProfile {
            id: profile.id,
            name: profile.name.clone(),
            upgrade_allowed: profile.upgrade_allowed,
        })
        .collect()
}

pub(crate) fn stamp(provider: ProviderId, id: i64) -> SourceStamp {
    SourceStamp::new(provider, None, id.to_string())
}

/// Builds a queue item from the shared record and the owner-specific media info.
pub(crate) fn adapt_queue_record(
    record: &QueueRecord,
    media_info: QueueMediaInfo,
    provider: ProviderId,
) -> DownloadQueueItem {
    let warnings = record
        .status_messages
        .iter()
        .flatten()
        .flat_map(|message| message.messages.iter().cloned())
        .collect();

    DownloadQueueItem {
        id: record.id,
        title: record.title.clone(),
        status: download_status(record.tracked_download_state.as_deref(), &record.status),
        protocol: download_protocol(&record.protocol),
        size: record.size,
        size_remaining: record.sizeleft,
        progress: progress_percent(record.size, record.sizeleft),
        time_remaining: record.timeleft.clone(),
        estimated_completion_time: record.estimated_completion_time,
        quality: record.quality.quality.name.clone(),
        indexer: record.indexer.clone(),
        download_client: record.download_client.clone(),
        error_message: record.error_message.clone(),
        warnings,
        media_info,
        source: stamp(provider, record.id),
    }
}

pub(crate) fn adapt_queue_page<T, F>(page: &QueuePage<T>, adapt: F) -> DownloadQueueResult
where
    F: FnMut(&T) -> DownloadQueueItem,
{
    DownloadQueueResult {
        items: page.records.iter().map(adapt).collect(),
        page: page.page,
        page_size: page.page_size,
        total_records: page.total_records,
    }
}
