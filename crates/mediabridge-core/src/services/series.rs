use std::sync::Arc;

use super::movies::{DEFAULT_QUEUE_PAGE, DEFAULT_QUEUE_PAGE_SIZE};
use super::run;
use crate::adapters::{arr, sonarr as adapt};
use crate::client::{SeriesManagerCall, SeriesManagerClient};
use crate::domain::{DownloadQueueResult, ManagedSeries, QualityProfile, RootFolder};
use crate::error::{ApiError, ErrorContext, Failure};
use crate::schema::sonarr as schema;
use crate::{AddSeriesOptions, ProviderId};

/// Library and download management through the series manager.
pub struct SeriesService {
    client: Arc<dyn SeriesManagerClient>,
}

impl SeriesService {
    pub fn new(client: Arc<dyn SeriesManagerClient>) -> Self {
        Self { client }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub async fn get_series(&self) -> Result<Vec<ManagedSeries>, ApiError> {
        let call = SeriesManagerCall::GetSeries;
        run(self.is_configured(), context("get_series"), async move {
            let series = schema::series_list(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_series_list(&series))
        })
        .await
    }

    pub async fn get_series_by_tvdb_id(&self, tvdb_id: i64) -> Result<Option<ManagedSeries>, ApiError> {
        let call = SeriesManagerCall::LookupByTvdbId { tvdb_id };
        let context = context("get_series_by_tvdb_id").with_item(tvdb_id);
        run(self.is_configured(), context, async move {
            let series = schema::series_lookup(self.client.execute(call).await?)?;
            Ok::<_, Failure>(series.as_ref().map(adapt::adapt_series))
        })
        .await
    }

    pub async fn get_series_details(&self, series_id: i64) -> Result<ManagedSeries, ApiError> {
        self.series_call(
            SeriesManagerCall::GetSeriesById { series_id },
            context("get_series_details").with_item(series_id),
        )
        .await
    }

    pub async fn get_queue(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<DownloadQueueResult, ApiError> {
        let call = SeriesManagerCall::GetQueue {
            page: page.unwrap_or(DEFAULT_QUEUE_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_QUEUE_PAGE_SIZE),
        };
        run(self.is_configured(), context("get_queue"), async move {
            let queue = schema::queue(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_queue(&queue))
        })
        .await
    }

    pub async fn get_root_folders(&self) -> Result<Vec<RootFolder>, ApiError> {
        let call = SeriesManagerCall::GetRootFolders;
        run(self.is_configured(), context("get_root_folders"), async move {
            let folders = schema::root_folders(self.client.execute(call).await?)?;
            Ok::<_, Failure>(arr::adapt_root_folders(&folders))
        })
        .await
    }

    pub async fn get_quality_profiles(&self) -> Result<Vec<QualityProfile>, ApiError> {
        let call = SeriesManagerCall::GetQualityProfiles;
        run(self.is_configured(), context("get_quality_profiles"), async move {
            let profiles = schema::quality_profiles(self.client.execute(call).await?)?;
            Ok::<_, Failure>(arr::adapt_quality_profiles(&profiles))
        })
        .await
    }

    pub async fn add_series(&self, options: &AddSeriesOptions) -> Result<ManagedSeries, ApiError> {
        self.series_call(
            SeriesManagerCall::AddSeries(options.clone()),
            context("add_series").with_item(options.tvdb_id),
        )
        .await
    }

    pub async fn toggle_monitored(
        &self,
        series_id: i64,
        monitored: bool,
    ) -> Result<ManagedSeries, ApiError> {
        self.series_call(
            SeriesManagerCall::SetMonitored {
                series_id,
                monitored,
            },
            context("toggle_monitored").with_item(series_id),
        )
        .await
    }

    pub async fn delete_series(&self, series_id: i64, delete_files: bool) -> Result<(), ApiError> {
        self.command(
            SeriesManagerCall::DeleteSeries {
                series_id,
                delete_files,
            },
            context("delete_series").with_item(series_id),
        )
        .await
    }

    /// Searches for every missing episode of the series.
    pub async fn trigger_search(&self, series_id: i64) -> Result<(), ApiError> {
        self.command(
            SeriesManagerCall::SearchSeries { series_id },
            context("trigger_search").with_item(series_id),
        )
        .await
    }

    pub async fn remove_from_queue(
        &self,
        queue_id: i64,
        remove_from_client: bool,
        blocklist: bool,
    ) -> Result<(), ApiError> {
        self.command(
            SeriesManagerCall::RemoveFromQueue {
                queue_id,
                remove_from_client,
                blocklist,
            },
            context("remove_from_queue").with_item(queue_id),
        )
        .await
    }

    async fn series_call(
        &self,
        call: SeriesManagerCall,
        context: ErrorContext,
    ) -> Result<ManagedSeries, ApiError> {
        run(self.is_configured(), context, async move {
            let series = schema::series(self.client.execute(call).await?)?;
            Ok::<_, Failure>(adapt::adapt_series(&series))
        })
        .await
    }

    async fn command(&self, call: SeriesManagerCall, context: ErrorContext) -> Result<(), ApiError> {
        run(self.is_configured(), context, async move {
            self.client.execute(call).await?;
            Ok::<_, Failure>(())
        })
        .await
    }
}

fn context(operation: &str) -> ErrorContext {
    ErrorContext::new(ProviderId::Sonarr, operation)
}
