//! Row types returned by the per-user analytics queries

use chrono::{DateTime, Utc};

/// Trace count and time range for one user
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStatsRow {
    pub user_id: String,
    pub total_traces: i64,
    pub first_trace: Option<DateTime<Utc>>,
    pub last_trace: Option<DateTime<Utc>>,
}

/// Observation count, time range and token sums for one user
///
/// Token sums are `None` when the user has no observation carrying that
/// counter. The merger coalesces them to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationStatsRow {
    pub user_id: String,
    pub total_observations: i64,
    pub first_observation: Option<DateTime<Utc>>,
    pub last_observation: Option<DateTime<Utc>>,
    pub prompt_tokens: Option<i64>,
    pub completion_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub id: String,
    pub trace_id: String,
    pub name: String,
    pub value: f64,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Latest score of a user (multi-user lookup)
#[derive(Debug, Clone, PartialEq)]
pub struct UserScoreRow {
    pub user_id: String,
    pub score: ScoreRow,
}
