//! SQLite schema definitions
//!
//! Timestamps are INTEGER unix milliseconds (UTC). Token counters are
//! nullable: NULL means "not recorded" and is summed as 0 by the analytics
//! queries.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Initial schema (version 1)
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Traces (one unit of work, optionally attributed to a user)
-- =============================================================================
CREATE TABLE IF NOT EXISTS traces (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL CHECK(length(project_id) >= 1),
    user_id TEXT,
    name TEXT,
    timestamp INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_traces_project_user ON traces(project_id, user_id);
CREATE INDEX IF NOT EXISTS idx_traces_project_timestamp ON traces(project_id, timestamp);

-- =============================================================================
-- 2. Observations (sub-steps of a trace carrying token usage)
-- =============================================================================
CREATE TABLE IF NOT EXISTS observations (
    id TEXT PRIMARY KEY,
    trace_id TEXT NOT NULL REFERENCES traces(id) ON DELETE CASCADE,
    name TEXT,
    start_time INTEGER NOT NULL,
    end_time INTEGER,
    prompt_tokens INTEGER CHECK(prompt_tokens IS NULL OR prompt_tokens >= 0),
    completion_tokens INTEGER CHECK(completion_tokens IS NULL OR completion_tokens >= 0),
    total_tokens INTEGER CHECK(total_tokens IS NULL OR total_tokens >= 0)
);

CREATE INDEX IF NOT EXISTS idx_observations_trace ON observations(trace_id);

-- =============================================================================
-- 3. Scores (evaluation values attached to a trace)
-- =============================================================================
CREATE TABLE IF NOT EXISTS scores (
    id TEXT PRIMARY KEY,
    trace_id TEXT NOT NULL REFERENCES traces(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    value REAL NOT NULL,
    comment TEXT,
    timestamp INTEGER NOT NULL
);
"#;

/// Version 2: index backing the latest-score lookups
pub const MIGRATION_V2: &str =
    "CREATE INDEX IF NOT EXISTS idx_scores_trace_timestamp ON scores(trace_id, timestamp DESC)";
