//! Data storage layer
//!
//! - `sqlite` - Embedded store for traces, observations and scores
//! - `types` - Row types returned by the repositories
//! - `traits` - Repository traits consumed by the domain layer
//! - `error` - Unified error type

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteService;

pub use error::DataError;

pub use traits::UserAnalyticsRepository;
