//! Per-user analytics
//!
//! - `service` - Resolves users and fans out the three sub-queries
//! - `merge` - Pure record merger producing [`UserAnalyticsSummary`]
//! - `error` - Validation, consistency and upstream failures

mod error;
mod merge;
mod service;

pub use error::{IdField, UserAnalyticsError};
pub use merge::{UserAnalyticsSummary, merge_many, merge_summary};
pub use service::{UserAnalyticsService, validate_id};
