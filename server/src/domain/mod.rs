pub mod users;

pub use users::{UserAnalyticsError, UserAnalyticsService, UserAnalyticsSummary};
