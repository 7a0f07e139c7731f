use std::sync::Arc;

use super::run;
use crate::adapters::jellyfin::{self as adapt, ItemContext};
use crate::client::{ItemsRequest, MediaServerCall, MediaServerClient};
use crate::config::MediaServerSettings;
use crate::domain::{LibraryQuery, MediaItem, MediaItemsResult, MediaType, SearchOptions, SortOrder};
use crate::error::{ApiError, ErrorContext, Failure};
use crate::schema::jellyfin as schema;
use crate::ProviderId;

const DEFAULT_RESUME_LIMIT: u32 = 20;
const DEFAULT_LATEST_LIMIT: u32 = 20;
const DEFAULT_NEXT_UP_LIMIT: u32 = 20;
const DEFAULT_SIMILAR_LIMIT: u32 = 12;
const DEFAULT_FAVORITES_LIMIT: u32 = 50;
const DEFAULT_FAVORITE_TYPES: [MediaType; 4] = [
    MediaType::Movie,
    MediaType::Series,
    MediaType::Album,
    MediaType::Track,
];

/// Identity and addressing for the media server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaServiceOptions {
    pub server_id: String,
    /// User whose library and playback state is read. Required for every call.
    pub user_id: Option<String>,
    /// Public base URL used to materialize image links.
    pub base_url: Option<String>,
}

impl MediaServiceOptions {
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            user_id: None,
            base_url: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_owned());
        self
    }

    pub fn from_settings(settings: &MediaServerSettings) -> Self {
        Self {
            server_id: settings.server_id.clone(),
            user_id: settings.user_id.clone(),
            base_url: Some(settings.base_url.clone()),
        }
    }
}

/// Library browsing and playback state from the media server.
pub struct MediaService {
    client: Arc<dyn MediaServerClient>,
    options: MediaServiceOptions,
}

impl MediaService {
    pub fn new(client: Arc<dyn MediaServerClient>, options: MediaServiceOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &MediaServiceOptions {
        &self.options
    }

    /// True when the client is configured and a user id is known.
    pub fn is_configured(&self) -> bool {
        self.client.is_configured() && self.options.user_id.is_some()
    }

    pub async fn get_item(&self, item_id: &str) -> Result<MediaItem, ApiError> {
        let call = MediaServerCall::GetItem {
            user_id: self.user_id(),
            item_id: item_id.to_owned(),
        };
        let context = self.context("get_item").with_item(item_id);
        run(self.is_configured(), context, async move {
            let item = schema::item(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_item(&item, &self.item_context()))
        })
        .await
    }

    pub async fn get_items(&self, query: &LibraryQuery) -> Result<MediaItemsResult, ApiError> {
        let call = MediaServerCall::GetItems {
            user_id: self.user_id(),
            request: items_request(query),
        };
        run(self.is_configured(), self.context("get_items"), async move {
            let response = schema::items_response(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_items_response(&response, &self.item_context()))
        })
        .await
    }

    /// Partially watched items. `limit` defaults to 20.
    pub async fn get_resume_items(&self, limit: Option<u32>) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetResumeItems {
            user_id: self.user_id(),
            limit: limit.unwrap_or(DEFAULT_RESUME_LIMIT),
        };
        self.item_page(call, self.context("get_resume_items")).await
    }

    /// Recently added items, optionally under one library. `limit` defaults to 20.
    pub async fn get_latest_media(
        &self,
        parent_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetLatestMedia {
            user_id: self.user_id(),
            parent_id: parent_id.map(str::to_owned),
            limit: limit.unwrap_or(DEFAULT_LATEST_LIMIT),
        };
        run(self.is_configured(), self.context("get_latest_media"), async move {
            let items = schema::item_list(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_items(&items, &self.item_context()))
        })
        .await
    }

    pub async fn get_next_up(&self, limit: Option<u32>) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetNextUp {
            user_id: self.user_id(),
            limit: limit.unwrap_or(DEFAULT_NEXT_UP_LIMIT),
        };
        self.item_page(call, self.context("get_next_up")).await
    }

    /// Items similar to `item_id`. `limit` defaults to 12.
    pub async fn get_similar(
        &self,
        item_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetSimilarItems {
            user_id: self.user_id(),
            item_id: item_id.to_owned(),
            limit: limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
        };
        self.item_page(call, self.context("get_similar").with_item(item_id))
            .await
    }

    pub async fn get_seasons(&self, series_id: &str) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetSeasons {
            user_id: self.user_id(),
            series_id: series_id.to_owned(),
        };
        self.item_page(call, self.context("get_seasons").with_item(series_id))
            .await
    }

    pub async fn get_episodes(
        &self,
        series_id: &str,
        season_id: Option<&str>,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::GetEpisodes {
            user_id: self.user_id(),
            series_id: series_id.to_owned(),
            season_id: season_id.map(str::to_owned),
        };
        self.item_page(call, self.context("get_episodes").with_item(series_id))
            .await
    }

    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let call = MediaServerCall::Search {
            user_id: self.user_id(),
            term: query.to_owned(),
            limit: options.limit,
            include_item_types: server_types(&options.include_item_types),
        };
        run(self.is_configured(), self.context("search"), async move {
            let response = schema::search_hints(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_search_hints(&response, &self.item_context()).items)
        })
        .await
    }

    /// Favorites of one kind, or of movies, series, albums and tracks when
    /// `media_type` is `None`. `limit` defaults to 50.
    pub async fn get_favorites(
        &self,
        media_type: Option<MediaType>,
        limit: Option<u32>,
    ) -> Result<Vec<MediaItem>, ApiError> {
        let include_item_types = match media_type {
            Some(kind) => server_types(&[kind]),
            None => server_types(&DEFAULT_FAVORITE_TYPES),
        };
        let call = MediaServerCall::GetFavorites {
            user_id: self.user_id(),
            include_item_types,
            limit: limit.unwrap_or(DEFAULT_FAVORITES_LIMIT),
        };
        self.item_page(call, self.context("get_favorites")).await
    }

    /// Calls returning `QueryResult<BaseItemDto>` whose items are all the caller needs.
    async fn item_page(
        &self,
        call: MediaServerCall,
        context: ErrorContext,
    ) -> Result<Vec<MediaItem>, ApiError> {
        run(self.is_configured(), context, async move {
            let response = schema::items_response(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_items(&response.items, &self.item_context()))
        })
        .await
    }

    fn context(&self, operation: &str) -> ErrorContext {
        ErrorContext::new(ProviderId::Jellyfin, operation)
    }

    fn item_context(&self) -> ItemContext<'_> {
        ItemContext {
            server_id: &self.options.server_id,
            base_url: self.options.base_url.as_deref(),
        }
    }

    fn user_id(&self) -> String {
        self.options.user_id.clone().unwrap_or_default()
    }
}

fn server_types(types: &[MediaType]) -> Vec<String> {
    types
        .iter()
        .map(|kind| adapt::server_type(*kind).to_owned())
        .collect()
}

fn items_request(query: &LibraryQuery) -> ItemsRequest {
    ItemsRequest {
        parent_id: query.parent_id.clone(),
        include_item_types: server_types(&query.include_item_types),
        genres: query.genres.clone(),
        sort_by: query.sort_by.clone(),
        sort_order: query.sort_order.map(|order| {
            match order {
                SortOrder::Ascending => "Ascending",
                SortOrder::Descending => "Descending",
            }
            .to_owned()
        }),
        start_index: query.start_index,
        limit: query.limit,
        recursive: query.recursive,
        search_term: query.search_term.clone(),
        is_favorite: query.is_favorite,
    }
}
