//! Wire shapes shared by the movie and series managers (Radarr, Sonarr).

use serde_json::Value;

use super::{Issues, Object, Passthrough};
use crate::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Image {
    pub cover_type: String,
    pub url: String,
    pub remote_url: Option<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatusMessage {
    pub title: String,
    pub messages: Vec<String>,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RootFolder {
    pub id: i64,
    pub path: String,
    pub accessible: bool,
    pub free_space: f64,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QualityProfile {
    pub id: i64,
    pub name: String,
    pub upgrade_allowed: bool,
    pub extra: Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QualityRef {
    pub name: String,
    pub extra: Passthrough,
}

/// `{ quality: { id, name }, revision }` block on queue records.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QualityBlock {
    pub quality: QualityRef,
    pub extra: Passthrough,
}

/// Queue record fields both managers share.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueueRecord {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub tracked_download_state: Option<String>,
    pub status_messages: Option<Vec<StatusMessage>>,
    pub error_message: Option<String>,
    pub protocol: String,
    pub download_client: Option<String>,
    pub indexer: Option<String>,
    pub quality: QualityBlock,
    pub size: f64,
    pub sizeleft: f64,
    pub timeleft: Option<String>,
    pub estimated_completion_time: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueuePage<T> {
    pub page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub records: Vec<T>,
    pub extra: Passthrough,
}

pub(crate) fn parse_image(value: Value, path: &str, issues: &mut Issues) -> Option<Image> {
    let mut object = Object::open(value, path, issues)?;
    let cover_type = object.required_str("coverType", issues);
    let url = object.required_str("url", issues);
    let remote_url = object.optional_str("remoteUrl", issues);
    Some(Image {
        cover_type: cover_type?,
        url: url?,
        remote_url,
        extra: object.into_passthrough(),
    })
}

fn parse_status_message(value: Value, path: &str, issues: &mut Issues) -> Option<StatusMessage> {
    let mut object = Object::open(value, path, issues)?;
    let title = object.required_str("title", issues);
    let messages = object.required_str_list("messages", issues);
    Some(StatusMessage {
        title: title?,
        messages: messages?,
        extra: object.into_passthrough(),
    })
}

pub(crate) fn parse_root_folder(value: Value, path: &str, issues: &mut Issues) -> Option<RootFolder> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_i64("id", issues);
    let folder_path = object.required_str("path", issues);
    let accessible = object.required_bool("accessible", issues);
    let free_space = object.required_f64("freeSpace", issues);
    Some(RootFolder {
        id: id?,
        path: folder_path?,
        accessible: accessible?,
        free_space: free_space?,
        extra: object.into_passthrough(),
    })
}

pub(crate) fn parse_quality_profile(
    value: Value,
    path: &str,
    issues: &mut Issues,
) -> Option<QualityProfile> {
    let mut object = Object::open(value, path, issues)?;
    let id = object.required_i64("id", issues);
    let name = object.required_str("name", issues);
    let upgrade_allowed = object.required_bool("upgradeAllowed", issues);
    Some(QualityProfile {
        id: id?,
        name: name?,
        upgrade_allowed: upgrade_allowed?,
        extra: object.into_passthrough(),
    })
}

fn parse_quality_ref(value: Value, path: &str, issues: &mut Issues) -> Option<QualityRef> {
    let mut object = Object::open(value, path, issues)?;
    object.check_number("id", true, issues);
    let name = object.required_str("name", issues);
    Some(QualityRef {
        name: name?,
        extra: object.into_passthrough(),
    })
}

fn parse_quality_block(value: Value, path: &str, issues: &mut Issues) -> Option<QualityBlock> {
    let mut object = Object::open(value, path, issues)?;
    object.check_object("revision", true, issues);
    let quality = object.required_object("quality", issues, parse_quality_ref);
    Some(QualityBlock {
        quality: quality?,
        extra: object.into_passthrough(),
    })
}

/// Reads the shared queue fields out of a provider queue item.
pub(crate) fn read_queue_record(object: &mut Object, issues: &mut Issues) -> Option<QueueRecord> {
    object.check_str("trackedDownloadStatus", false, issues);
    object.check_str("downloadId", false, issues);
    object.check_str("outputPath", false, issues);

    let id = object.required_i64("id", issues);
    let title = object.required_str("title", issues);
    let status = object.required_str("status", issues);
    let tracked_download_state = object.optional_str("trackedDownloadState", issues);
    let status_messages = object.optional_array("statusMessages", issues, parse_status_message);
    let error_message = object.optional_str("errorMessage", issues);
    let protocol = object.required_str("protocol", issues);
    let download_client = object.optional_str("downloadClient", issues);
    let indexer = object.optional_str("indexer", issues);
    let quality = object.required_object("quality", issues, parse_quality_block);
    let size = object.required_f64("size", issues);
    let sizeleft = object.required_f64("sizeleft", issues);
    let timeleft = object.optional_str("timeleft", issues);
    let estimated_completion_time = object.optional_timestamp("estimatedCompletionTime", issues);

    Some(QueueRecord {
        id: id?,
        title: title?,
        status: status?,
        tracked_download_state,
        status_messages,
        error_message,
        protocol: protocol?,
        download_client,
        indexer,
        quality: quality?,
        size: size?,
        sizeleft: sizeleft?,
        timeleft,
        estimated_completion_time,
    })
}

pub(crate) fn parse_queue_page<T, F>(
    value: Value,
    path: &str,
    issues: &mut Issues,
    parse_record: F,
) -> Option<QueuePage<T>>
where
    F: FnMut(Value, &str, &mut Issues) -> Option<T>,
{
    let mut object = Object::open(value, path, issues)?;
    object.check_str("sortKey", true, issues);
    object.check_str("sortDirection", true, issues);
    let page = object.required_i64("page", issues);
    let page_size = object.required_i64("pageSize", issues);
    let total_records = object.required_i64("totalRecords", issues);
    let records = object.required_array("records", issues, parse_record);
    Some(QueuePage {
        page: page?,
        page_size: page_size?,
        total_records: total_records?,
        records: records?,
        extra: object.into_passthrough(),
    })
}
