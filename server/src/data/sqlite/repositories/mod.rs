//! SQLite repositories
//!
//! Row types (TraceStatsRow, ScoreRow, etc.) live in `crate::data::types`.

pub mod user_analytics;

pub use user_analytics::{
    latest_score_for_user, latest_scores_for_users, list_user_ids, observation_stats_for_user,
    observation_stats_for_users, trace_stats_for_user, trace_stats_for_users,
};
