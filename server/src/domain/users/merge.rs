//! Record merger
//!
//! Reconciles the three sub-query result sets into one summary per user.
//! Token sums and counts coalesce to 0; timestamps stay `None` when there
//! are no underlying rows. The output shape is the same for both
//! aggregators.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::error::UserAnalyticsError;
use crate::data::types::{ObservationStatsRow, ScoreRow, TraceStatsRow, UserScoreRow};

/// Per-user rollup (derived, never persisted)
#[derive(Debug, Clone, PartialEq)]
pub struct UserAnalyticsSummary {
    pub user_id: String,
    pub first_trace: Option<DateTime<Utc>>,
    pub last_trace: Option<DateTime<Utc>>,
    pub total_traces: i64,
    pub first_observation: Option<DateTime<Utc>>,
    pub last_observation: Option<DateTime<Utc>>,
    pub total_observations: i64,
    pub total_prompt_tokens: i64,
    pub total_completion_tokens: i64,
    pub total_tokens: i64,
    pub last_score: Option<ScoreRow>,
}

/// Merge one user's rows
pub fn merge_summary(
    traces: TraceStatsRow,
    observations: Option<ObservationStatsRow>,
    last_score: Option<ScoreRow>,
) -> UserAnalyticsSummary {
    let observations = observations.unwrap_or_else(|| ObservationStatsRow {
        user_id: traces.user_id.clone(),
        total_observations: 0,
        first_observation: None,
        last_observation: None,
        prompt_tokens: None,
        completion_tokens: None,
        total_tokens: None,
    });

    UserAnalyticsSummary {
        user_id: traces.user_id,
        first_trace: traces.first_trace,
        last_trace: traces.last_trace,
        total_traces: traces.total_traces,
        first_observation: observations.first_observation,
        last_observation: observations.last_observation,
        total_observations: observations.total_observations,
        total_prompt_tokens: observations.prompt_tokens.unwrap_or(0),
        total_completion_tokens: observations.completion_tokens.unwrap_or(0),
        total_tokens: observations.total_tokens.unwrap_or(0),
        last_score,
    }
}

/// Merge the multi-user result sets, one summary per `user_ids` entry in order
///
/// Every resolved user must appear in both the trace and observation stats.
/// A missing row fails the whole batch. A missing score is just `None`.
pub fn merge_many(
    user_ids: &[String],
    traces: Vec<TraceStatsRow>,
    observations: Vec<ObservationStatsRow>,
    scores: Vec<UserScoreRow>,
) -> Result<Vec<UserAnalyticsSummary>, UserAnalyticsError> {
    let mut traces_by_user: HashMap<String, TraceStatsRow> = traces
        .into_iter()
        .map(|row| (row.user_id.clone(), row))
        .collect();
    let mut observations_by_user: HashMap<String, ObservationStatsRow> = observations
        .into_iter()
        .map(|row| (row.user_id.clone(), row))
        .collect();
    let mut scores_by_user: HashMap<String, ScoreRow> = scores
        .into_iter()
        .map(|row| (row.user_id, row.score))
        .collect();

    user_ids
        .iter()
        .map(|user_id| {
            let trace_row = traces_by_user
                .remove(user_id)
                .ok_or_else(|| missing(user_id, "trace_stats"))?;
            let observation_row = observations_by_user
                .remove(user_id)
                .ok_or_else(|| missing(user_id, "observation_stats"))?;
            let score = scores_by_user.remove(user_id);
            Ok(merge_summary(trace_row, Some(observation_row), score))
        })
        .collect()
}

fn missing(user_id: &str, source_set: &'static str) -> UserAnalyticsError {
    tracing::error!(user_id, source_set, "Resolved user missing from aggregated results");
    UserAnalyticsError::Consistency {
        user_id: user_id.to_string(),
        source_set,
    }
}
