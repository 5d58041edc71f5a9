use crate::shared::api::{ApiClient, ApiError, CancelToken};
use contracts::dashboards::d100_fiscal_overview::{
    ActiveSession, ActiveSessionsResponse, ActivityResponse, CategoryCount, CfopCount,
    DashboardSnapshot, DayActivity, DocumentsByCategoryResponse, NcmCount, NfeErrorAnalysis,
    NfeSnapshot, NfeStatistics, NfeTimelinePoint, NfeValuesSummary, RecentChat,
    RecentChatsResponse, SystemStats,
};
use contracts::shared::Single;
use serde::de::DeserializeOwned;
use serde::Serialize;

const API_BASE: &str = "/dashboard";

/// Timeline window used by the NFe section
pub const NFE_TIMELINE_DAYS: u32 = 30;
pub const NCM_TOP_LIMIT: u32 = 10;
pub const ACTIVE_SESSIONS_LIMIT: u32 = 5;

#[derive(Serialize)]
struct Limit {
    limit: u32,
}

#[derive(Serialize)]
struct Days {
    days: u32,
}

/// Read-only statistics for the dashboard page
#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str, cancel: &CancelToken) -> Result<T, ApiError> {
        let resp: Single<T> = self.api.get(&format!("{API_BASE}{path}"), cancel).await?;
        Ok(resp.into_inner())
    }

    async fn fetch_query<T, Q>(&self, path: &str, query: &Q, cancel: &CancelToken) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let resp: Single<T> = self
            .api
            .get_query(&format!("{API_BASE}{path}"), query, cancel)
            .await?;
        Ok(resp.into_inner())
    }

    pub async fn stats(&self, cancel: &CancelToken) -> Result<SystemStats, ApiError> {
        self.fetch("/stats", cancel).await
    }

    pub async fn recent_chats(&self, limit: u32, cancel: &CancelToken) -> Result<Vec<RecentChat>, ApiError> {
        let resp: RecentChatsResponse = self.fetch_query("/recent_chats", &Limit { limit }, cancel).await?;
        Ok(resp.recent_chats)
    }

    pub async fn documents_by_category(&self, cancel: &CancelToken) -> Result<Vec<CategoryCount>, ApiError> {
        let resp: DocumentsByCategoryResponse = self.fetch("/documents_by_category", cancel).await?;
        Ok(resp.documents_by_category)
    }

    pub async fn activity_by_day(&self, days: u32, cancel: &CancelToken) -> Result<Vec<DayActivity>, ApiError> {
        let resp: ActivityResponse = self.fetch_query("/activity_by_day", &Days { days }, cancel).await?;
        Ok(resp.activity)
    }

    pub async fn most_active_sessions(
        &self,
        limit: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<ActiveSession>, ApiError> {
        let resp: ActiveSessionsResponse = self
            .fetch_query("/most_active_sessions", &Limit { limit }, cancel)
            .await?;
        Ok(resp.active_sessions)
    }

    pub async fn nfe_statistics(&self, cancel: &CancelToken) -> Result<NfeStatistics, ApiError> {
        self.fetch("/nfe/statistics", cancel).await
    }

    pub async fn nfe_cfop_distribution(&self, cancel: &CancelToken) -> Result<Vec<CfopCount>, ApiError> {
        self.fetch("/nfe/cfop_distribution", cancel).await
    }

    pub async fn nfe_ncm_top(&self, limit: u32, cancel: &CancelToken) -> Result<Vec<NcmCount>, ApiError> {
        self.fetch_query("/nfe/ncm_top", &Limit { limit }, cancel).await
    }

    pub async fn nfe_values_summary(&self, cancel: &CancelToken) -> Result<NfeValuesSummary, ApiError> {
        self.fetch("/nfe/values_summary", cancel).await
    }

    pub async fn nfe_processing_timeline(
        &self,
        days: u32,
        cancel: &CancelToken,
    ) -> Result<Vec<NfeTimelinePoint>, ApiError> {
        self.fetch_query("/nfe/processing_timeline", &Days { days }, cancel).await
    }

    pub async fn nfe_error_analysis(&self, cancel: &CancelToken) -> Result<NfeErrorAnalysis, ApiError> {
        self.fetch("/nfe/error_analysis", cancel).await
    }

    /// Overview cards; the four calls run concurrently, the first failure wins
    pub async fn snapshot(
        &self,
        recent_limit: u32,
        activity_days: u32,
        cancel: &CancelToken,
    ) -> Result<DashboardSnapshot, ApiError> {
        let (stats, recent_chats, documents_by_category, activity) = futures::try_join!(
            self.stats(cancel),
            self.recent_chats(recent_limit, cancel),
            self.documents_by_category(cancel),
            self.activity_by_day(activity_days, cancel),
        )?;
        Ok(DashboardSnapshot {
            stats,
            recent_chats,
            documents_by_category,
            activity,
        })
    }

    pub async fn nfe_snapshot(&self, cancel: &CancelToken) -> Result<NfeSnapshot, ApiError> {
        let (statistics, cfop_distribution, ncm_top, values, timeline, errors) = futures::try_join!(
            self.nfe_statistics(cancel),
            self.nfe_cfop_distribution(cancel),
            self.nfe_ncm_top(NCM_TOP_LIMIT, cancel),
            self.nfe_values_summary(cancel),
            self.nfe_processing_timeline(NFE_TIMELINE_DAYS, cancel),
            self.nfe_error_analysis(cancel),
        )?;
        Ok(NfeSnapshot {
            statistics,
            cfop_distribution,
            ncm_top,
            values,
            timeline,
            errors,
        })
    }
}
