//! UserAnalyticsRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::UserAnalyticsRepository;
use crate::data::types::{ObservationStatsRow, ScoreRow, TraceStatsRow, UserScoreRow};

use super::SqliteService;
use super::repositories::user_analytics;

#[async_trait]
impl UserAnalyticsRepository for Arc<SqliteService> {
    // ==================== User Set ====================

    async fn list_user_ids(&self, project_id: &str) -> Result<Vec<String>, DataError> {
        user_analytics::list_user_ids(self.pool(), project_id)
            .await
            .map_err(Into::into)
    }

    // ==================== Multi-User Aggregation ====================

    async fn trace_stats_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<TraceStatsRow>, DataError> {
        user_analytics::trace_stats_for_users(self.pool(), project_id, user_ids)
            .await
            .map_err(Into::into)
    }

    async fn observation_stats_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<ObservationStatsRow>, DataError> {
        user_analytics::observation_stats_for_users(self.pool(), project_id, user_ids)
            .await
            .map_err(Into::into)
    }

    async fn latest_scores_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<UserScoreRow>, DataError> {
        user_analytics::latest_scores_for_users(self.pool(), project_id, user_ids)
            .await
            .map_err(Into::into)
    }

    // ==================== Single-User Aggregation ====================

    async fn trace_stats_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<TraceStatsRow, DataError> {
        user_analytics::trace_stats_for_user(self.pool(), project_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn observation_stats_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<ObservationStatsRow, DataError> {
        user_analytics::observation_stats_for_user(self.pool(), project_id, user_id)
            .await
            .map_err(Into::into)
    }

    async fn latest_score_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<ScoreRow>, DataError> {
        user_analytics::latest_score_for_user(self.pool(), project_id, user_id)
            .await
            .map_err(Into::into)
    }
}
