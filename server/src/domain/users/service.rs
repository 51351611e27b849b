//! User analytics service
//!
//! ```text
//! list:   validate ─▶ resolve users ─┬─(empty)──────────────────────────▶ []
//!                                    └─▶ trace ┐
//!                                        obs   ├─ try_join ─▶ merge_many
//!                                        score ┘
//! single: validate ─▶ trace/obs/score ── try_join ─▶ merge_summary
//! ```
//!
//! Each call is bounded by the configured query timeout. Sub-queries of one
//! call run concurrently; the first failure drops the others.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::error::{IdField, UserAnalyticsError};
use super::merge::{UserAnalyticsSummary, merge_many, merge_summary};
use crate::core::constants::MAX_ID_LENGTH;
use crate::data::{DataError, UserAnalyticsRepository};

/// Name reported by timeout errors
const TIMEOUT_SOURCE: &str = "user_analytics";

#[derive(Clone)]
pub struct UserAnalyticsService {
    repo: Arc<dyn UserAnalyticsRepository>,
    query_timeout: Duration,
}

impl UserAnalyticsService {
    pub fn new(repo: Arc<dyn UserAnalyticsRepository>, query_timeout: Duration) -> Self {
        Self {
            repo,
            query_timeout,
        }
    }

    /// One summary per user with at least one trace in the project
    ///
    /// Users come back ordered by their first trace, then by user id. Only
    /// ids accepted by [`validate_id`] are listed, so every listed user can be
    /// fetched with [`Self::get_user_analytics`].
    pub async fn list_users_with_analytics(
        &self,
        project_id: &str,
    ) -> Result<Vec<UserAnalyticsSummary>, UserAnalyticsError> {
        validate_id(IdField::ProjectId, project_id)?;

        self.bounded(async {
            let mut user_ids = self.repo.list_user_ids(project_id).await?;
            let resolved = user_ids.len();
            user_ids.retain(|id| validate_id(IdField::UserId, id).is_ok());
            if user_ids.len() < resolved {
                tracing::debug!(
                    project_id,
                    skipped = resolved - user_ids.len(),
                    "Skipped user ids that cannot be fetched individually"
                );
            }
            if user_ids.is_empty() {
                tracing::debug!(project_id, "No users with traces");
                return Ok(Vec::new());
            }

            let (traces, observations, scores) = tokio::try_join!(
                self.repo.trace_stats_for_users(project_id, &user_ids),
                self.repo.observation_stats_for_users(project_id, &user_ids),
                self.repo.latest_scores_for_users(project_id, &user_ids),
            )?;

            tracing::debug!(
                project_id,
                users = user_ids.len(),
                trace_rows = traces.len(),
                observation_rows = observations.len(),
                score_rows = scores.len(),
                "Aggregated user analytics"
            );
            merge_many(&user_ids, traces, observations, scores)
        })
        .await
    }

    /// Summary for one user; all-zero for a user without traces
    pub async fn get_user_analytics(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<UserAnalyticsSummary, UserAnalyticsError> {
        validate_id(IdField::ProjectId, project_id)?;
        validate_id(IdField::UserId, user_id)?;

        self.bounded(async {
            let (traces, observations, score) = tokio::try_join!(
                self.repo.trace_stats_for_user(project_id, user_id),
                self.repo.observation_stats_for_user(project_id, user_id),
                self.repo.latest_score_for_user(project_id, user_id),
            )?;

            Ok::<_, UserAnalyticsError>(merge_summary(traces, Some(observations), score))
        })
        .await
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, UserAnalyticsError>
    where
        F: Future<Output = Result<T, UserAnalyticsError>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "User analytics aggregation timed out"
                );
                Err(DataError::timeout(TIMEOUT_SOURCE, self.query_timeout).into())
            }
        }
    }
}

/// Reject blank and oversized identifiers
pub fn validate_id(field: IdField, value: &str) -> Result<(), UserAnalyticsError> {
    if value.trim().is_empty() {
        return Err(UserAnalyticsError::validation(field, "must not be empty"));
    }
    if value.chars().count() > MAX_ID_LENGTH {
        return Err(UserAnalyticsError::validation(
            field,
            format!("must be at most {} characters", MAX_ID_LENGTH),
        ));
    }
    Ok(())
}
