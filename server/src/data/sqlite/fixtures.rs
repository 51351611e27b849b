//! Test helpers: in-memory store and row inserts

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use super::migrations::run_migrations;

/// Fresh migrated in-memory database
///
/// Single connection: every `:memory:` connection is a separate database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn insert_trace(
    pool: &SqlitePool,
    id: &str,
    project_id: &str,
    user_id: Option<&str>,
    timestamp: i64,
) {
    sqlx::query("INSERT INTO traces (id, project_id, user_id, name, timestamp) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(project_id)
        .bind(user_id)
        .bind(format!("trace {id}"))
        .bind(timestamp)
        .execute(pool)
        .await
        .unwrap();
}

/// Insert an observation; `tokens` is (prompt, completion, total)
pub async fn insert_observation(
    pool: &SqlitePool,
    id: &str,
    trace_id: &str,
    start_time: i64,
    tokens: (Option<i64>, Option<i64>, Option<i64>),
) {
    let (prompt, completion, total) = tokens;
    sqlx::query(
        r#"
        INSERT INTO observations
            (id, trace_id, name, start_time, end_time, prompt_tokens, completion_tokens, total_tokens)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(trace_id)
    .bind("generation")
    .bind(start_time)
    .bind(start_time + 100)
    .bind(prompt)
    .bind(completion)
    .bind(total)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_score(
    pool: &SqlitePool,
    id: &str,
    trace_id: &str,
    name: &str,
    value: f64,
    timestamp: i64,
) {
    sqlx::query(
        "INSERT INTO scores (id, trace_id, name, value, comment, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(trace_id)
    .bind(name)
    .bind(value)
    .bind(Option::<String>::None)
    .bind(timestamp)
    .execute(pool)
    .await
    .unwrap();
}
