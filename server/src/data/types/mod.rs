//! Shared data types returned by the repositories

mod user_analytics;

pub use user_analytics::{ObservationStatsRow, ScoreRow, TraceStatsRow, UserScoreRow};
