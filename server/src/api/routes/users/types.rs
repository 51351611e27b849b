//! User analytics API types

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::ScoreRow;
use crate::domain::UserAnalyticsSummary;

/// Most recent score of a user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDto {
    pub id: String,
    pub trace_id: String,
    pub name: String,
    pub value: f64,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<ScoreRow> for ScoreDto {
    fn from(row: ScoreRow) -> Self {
        Self {
            id: row.id,
            trace_id: row.trace_id,
            name: row.name,
            value: row.value,
            comment: row.comment,
            timestamp: row.timestamp,
        }
    }
}

/// Per-user rollup of traces, observations and scores
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalyticsDto {
    pub user_id: String,
    pub first_trace: Option<DateTime<Utc>>,
    pub last_trace: Option<DateTime<Utc>>,
    pub total_traces: i64,
    pub total_prompt_tokens: i64,
    pub total_completion_tokens: i64,
    pub total_tokens: i64,
    pub first_observation: Option<DateTime<Utc>>,
    pub last_observation: Option<DateTime<Utc>>,
    pub total_observations: i64,
    pub last_score: Option<ScoreDto>,
}

impl From<UserAnalyticsSummary> for UserAnalyticsDto {
    fn from(summary: UserAnalyticsSummary) -> Self {
        Self {
            user_id: summary.user_id,
            first_trace: summary.first_trace,
            last_trace: summary.last_trace,
            total_traces: summary.total_traces,
            total_prompt_tokens: summary.total_prompt_tokens,
            total_completion_tokens: summary.total_completion_tokens,
            total_tokens: summary.total_tokens,
            first_observation: summary.first_observation,
            last_observation: summary.last_observation,
            total_observations: summary.total_observations,
            last_score: summary.last_score.map(ScoreDto::from),
        }
    }
}
