//! Repository traits for the analytics store
//!
//! The domain layer only sees these traits, so aggregators can run against
//! SQLite in production and in-process fakes in tests.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{ObservationStatsRow, ScoreRow, TraceStatsRow, UserScoreRow};

// ============================================================================
// User Analytics Repository Trait
// ============================================================================

/// Raw sub-queries behind the per-user analytics endpoints
///
/// All methods are scoped to one project. Multi-user methods return at most
/// one row per requested user, in no particular order.
#[async_trait]
pub trait UserAnalyticsRepository: Send + Sync {
    // ==================== User Set ====================

    /// Distinct user ids with at least one trace, ordered by first trace then id
    async fn list_user_ids(&self, project_id: &str) -> Result<Vec<String>, DataError>;

    // ==================== Multi-User Aggregation ====================

    async fn trace_stats_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<TraceStatsRow>, DataError>;

    /// One row for every requested user that has a trace, even without observations
    async fn observation_stats_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<ObservationStatsRow>, DataError>;

    async fn latest_scores_for_users(
        &self,
        project_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<UserScoreRow>, DataError>;

    // ==================== Single-User Aggregation ====================

    /// Always one row; zero count and no timestamps for an unknown user
    async fn trace_stats_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<TraceStatsRow, DataError>;

    /// Always one row
    async fn observation_stats_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<ObservationStatsRow, DataError>;

    async fn latest_score_for_user(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<ScoreRow>, DataError>;
}
