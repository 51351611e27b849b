// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "TraceLens";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "tracelens";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".tracelens";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tracelens.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "TRACELENS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "TRACELENS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "TRACELENS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TRACELENS_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default request body limit (the API is read-only, bodies are never large)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "TRACELENS_DATA_DIR";

/// Environment variable to point at an existing SQLite database file
pub const ENV_DATABASE_PATH: &str = "TRACELENS_DATABASE_PATH";

/// Environment variable for SQLite pool size
pub const ENV_DATABASE_MAX_CONNECTIONS: &str = "TRACELENS_DATABASE_MAX_CONNECTIONS";

/// Environment variable for the per-request aggregation timeout
pub const ENV_QUERY_TIMEOUT_SECS: &str = "TRACELENS_QUERY_TIMEOUT_SECS";

// =============================================================================
// SQLite
// =============================================================================

/// SQLite database file name (inside the `sqlite` data subdirectory)
pub const SQLITE_DB_FILENAME: &str = "tracelens.db";

/// Default maximum pool connections
///
/// Each aggregation fans out three concurrent reads, so a handful of
/// in-flight requests already needs more than the sqlx default.
pub const SQLITE_MAX_CONNECTIONS: u32 = 16;

/// Busy timeout before a locked database returns SQLITE_BUSY
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// Page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// WAL auto-checkpoint threshold in pages
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval of the background WAL checkpoint task
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

/// Maximum ids bound into a single `IN (...)` list
pub const SQLITE_MAX_BIND_IDS: usize = 500;

// =============================================================================
// Queries
// =============================================================================

/// Default upper bound for one aggregation (all sub-queries together)
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Maximum length of project and user ids accepted by the API
pub const MAX_ID_LENGTH: usize = 256;
