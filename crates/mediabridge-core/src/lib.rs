//! # Mediabridge Core
//!
//! Normalization layer between a media stack's provider APIs and the
//! applications that consume them.
//!
//! ## Overview
//!
//! Four providers are covered: the Jellyfin media server, the Jellyseerr
//! request broker and the Radarr / Sonarr acquisition managers. For each one
//! this crate provides:
//!
//! - **Schema validators** that check raw JSON against the provider's wire
//!   shape and report every mismatch with a field path
//! - **Adapters** that map validated shapes onto one provider-agnostic model
//! - **Services** that tie a client call, validation and adaptation together
//! - **Error classification** into a closed taxonomy with a retry predicate
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client traits per provider and the offline [`ReplayClient`] |
//! | [`config`] | Provider settings from `MEDIABRIDGE_*` variables |
//! | [`domain`] | Provider-agnostic models |
//! | [`downloads`] | Combined download queue across both managers |
//! | [`error`] | Error taxonomy, [`classify`] and [`is_retryable_error`] |
//! | [`services`] | One service per provider |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mediabridge_core::{MovieService, ReplayClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let payload = serde_json::from_str(&std::fs::read_to_string("queue.json")?)?;
//!     let movies = MovieService::new(Arc::new(ReplayClient::returning(payload)));
//!
//!     let queue = movies.get_queue(None, None).await?;
//!     for item in &queue.items {
//!         println!("{} {:.0}%", item.title, item.progress);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every service operation returns `Result<_, ApiError>`. Failures are
//! classified exactly once, at the service boundary:
//!
//! ```rust
//! use mediabridge_core::{ApiError, ErrorCode};
//!
//! fn describe(error: &ApiError) -> &'static str {
//!     match error.code() {
//!         ErrorCode::Network | ErrorCode::ServerError => "try again later",
//!         ErrorCode::Unauthorized | ErrorCode::Forbidden => "check credentials",
//!         ErrorCode::Validation => "provider returned an unexpected payload",
//!         _ => "request failed",
//!     }
//! }
//! ```

pub(crate) mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod downloads;
pub mod error;
pub(crate) mod schema;
pub mod services;
pub mod source;

// Client seam
pub use client::{
    ClientFuture, MediaServerClient, MovieManagerClient, RecordedCall, ReplayClient,
    RequestBrokerClient, SeriesManagerClient, TransportError,
};

// Configuration
pub use config::{BridgeConfig, ConfigError, MediaServerSettings, ProviderEndpoint};

// Domain models
pub use domain::{
    AddMovieOptions, AddSeriesOptions, DiscoverItem, DiscoverResult, DownloadProtocol,
    DownloadQueueItem, DownloadQueueResult, DownloadStatus, LibraryQuery, ManagedMovie,
    ManagedSeries, MediaAvailability, MediaItem, MediaItemsResult, MediaRequest, MediaRequestType,
    MediaType, QueueMediaInfo, RequestStatus, RequestsQuery, RequestsResult, SearchOptions,
    SourceStamp, Timestamp,
};

// Download fan-out
pub use downloads::{collect_downloads, CombinedQueue, ProviderFailure};

// Errors
pub use error::{
    classify, is_retryable_error, ApiError, ErrorCode, ErrorContext, Failure, NetworkCode,
    NetworkError, ValidationError, ValidationIssue,
};

// Services
pub use services::{MediaService, MediaServiceOptions, MovieService, RequestService, SeriesService};

// Provider identifiers
pub use source::ProviderId;
