use std::fs;
use std::path::Path;
use std::sync::Arc;

use mediabridge_core::{
    ApiError, LibraryQuery, MediaRequestType, MediaService, MediaServiceOptions, MovieService,
    ProviderId, ReplayClient, RequestService, RequestsQuery, SearchOptions, SeriesService,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::NormalizeArgs;
use crate::error::CliError;
use crate::output::Report;

type Outcome = Result<Value, ApiError>;

pub async fn run(args: &NormalizeArgs) -> Result<Report, CliError> {
    let payload = read_json(&args.file)?;
    let client = Arc::new(ReplayClient::returning(payload));
    tracing::debug!(
        provider = %args.provider,
        operation = %args.operation,
        file = %args.file.display(),
        "replaying captured payload"
    );

    let outcome = match args.provider {
        ProviderId::Jellyfin => {
            let options = MediaServiceOptions::new(args.server_id.as_str()).with_user_id("replay");
            let options = match &args.base_url {
                Some(base_url) => options.with_base_url(base_url.as_str()),
                None => options,
            };
            media(&MediaService::new(client, options), args).await?
        }
        ProviderId::Jellyseerr => requests(&RequestService::new(client), args).await?,
        ProviderId::Radarr => movies(&MovieService::new(client), args).await?,
        ProviderId::Sonarr => series(&SeriesService::new(client), args).await?,
    };

    Ok(match outcome {
        Ok(data) => Report::data(Some(args.provider), Some(&args.operation), data),
        Err(error) => Report::failure(args.provider, &args.operation, &error),
    })
}

pub fn read_json(path: &Path) -> Result<Value, CliError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

async fn media(service: &MediaService, args: &NormalizeArgs) -> Result<Outcome, CliError> {
    match args.operation.as_str() {
        "get_item" => encode(service.get_item(text_id(args)?).await),
        "get_items" => encode(service.get_items(&LibraryQuery::default()).await),
        "get_resume_items" => encode(service.get_resume_items(None).await),
        "get_latest_media" => encode(service.get_latest_media(None, None).await),
        "get_next_up" => encode(service.get_next_up(None).await),
        "get_similar" => encode(service.get_similar(text_id(args)?, None).await),
        "get_seasons" => encode(service.get_seasons(text_id(args)?).await),
        "get_episodes" => encode(service.get_episodes(text_id(args)?, None).await),
        "search" => encode(service.search(text_id(args)?, &SearchOptions::default()).await),
        "get_favorites" => encode(service.get_favorites(None, None).await),
        _ => Err(unknown(args)),
    }
}

async fn requests(service: &RequestService, args: &NormalizeArgs) -> Result<Outcome, CliError> {
    match args.operation.as_str() {
        "get_discover_movies" => encode(service.get_discover_movies(1).await),
        "get_discover_tv" => encode(service.get_discover_tv(1).await),
        "get_trending" => encode(service.get_trending(1).await),
        "get_popular_movies" => encode(service.get_popular_movies(1).await),
        "get_popular_tv" => encode(service.get_popular_tv(1).await),
        "get_upcoming_movies" => encode(service.get_upcoming_movies(1).await),
        "discover_by_genre" => {
            encode(service.discover_by_genre(MediaRequestType::Movie, numeric_id(args)?, 1).await)
        }
        "search" => encode(service.search(text_id(args)?, 1).await),
        "get_requests" => encode(service.get_requests(&RequestsQuery::default()).await),
        "get_request" => encode(service.get_request(numeric_id(args)?).await),
        "approve_request" => encode(service.approve_request(numeric_id(args)?).await),
        "create_movie_request" => encode(service.create_movie_request(numeric_id(args)?, false).await),
        "create_tv_request" => {
            encode(service.create_tv_request(numeric_id(args)?, None, false).await)
        }
        _ => Err(unknown(args)),
    }
}

async fn movies(service: &MovieService, args: &NormalizeArgs) -> Result<Outcome, CliError> {
    match args.operation.as_str() {
        "get_movies" => encode(service.get_movies().await),
        "get_movie_by_tmdb_id" => encode(service.get_movie_by_tmdb_id(numeric_id(args)?).await),
        "get_movie_details" => encode(service.get_movie_details(numeric_id(args)?).await),
        "get_queue" => encode(service.get_queue(None, None).await),
        "get_root_folders" => encode(service.get_root_folders().await),
        "get_quality_profiles" => encode(service.get_quality_profiles().await),
        _ => Err(unknown(args)),
    }
}

async fn series(service: &SeriesService, args: &NormalizeArgs) -> Result<Outcome, CliError> {
    match args.operation.as_str() {
        "get_series" => encode(service.get_series().await),
        "get_series_by_tvdb_id" => encode(service.get_series_by_tvdb_id(numeric_id(args)?).await),
        "get_series_details" => encode(service.get_series_details(numeric_id(args)?).await),
        "get_queue" => encode(service.get_queue(None, None).await),
        "get_root_folders" => encode(service.get_root_folders().await),
        "get_quality_profiles" => encode(service.get_quality_profiles().await),
        _ => Err(unknown(args)),
    }
}

fn encode<T: Serialize>(outcome: Result<T, ApiError>) -> Result<Outcome, CliError> {
    match outcome {
        Ok(value) => Ok(Ok(serde_json::to_value(value)?)),
        Err(error) => Ok(Err(error)),
    }
}

/// `--item-id` for operations that target one item or take a query.
fn text_id(args: &NormalizeArgs) -> Result<&str, CliError> {
    args.item_id.as_deref().ok_or_else(|| {
        CliError::Argument(format!("{} requires --item-id", args.operation))
    })
}

fn numeric_id(args: &NormalizeArgs) -> Result<i64, CliError> {
    let raw = text_id(args)?;
    raw.parse()
        .map_err(|_| CliError::Argument(format!("'{raw}' is not a numeric id")))
}

fn unknown(args: &NormalizeArgs) -> CliError {
    CliError::UnknownOperation {
        provider: args.provider,
        operation: args.operation.clone(),
    }
}
