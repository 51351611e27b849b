//! Per-user analytics queries for SQLite
//!
//! Every statement is scoped by `project_id`. User id sets are bound as `?`
//! placeholders in chunks of [`SQLITE_MAX_BIND_IDS`]; each user id lands in
//! exactly one chunk, so per-user groups never straddle two statements.

use sqlx::SqlitePool;

use crate::core::constants::SQLITE_MAX_BIND_IDS;
use crate::data::sqlite::SqliteError;
use crate::data::types::{ObservationStatsRow, ScoreRow, TraceStatsRow, UserScoreRow};
use crate::utils::time::{millis_to_datetime, opt_millis_to_datetime};

type TraceStatsTuple = (String, i64, Option<i64>, Option<i64>);
type ObservationStatsTuple = (
    String,
    i64,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
);
type ScoreTuple = (String, String, String, f64, Option<String>, i64);
type UserScoreTuple = (String, String, String, String, f64, Option<String>, i64);

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn trace_stats_from(row: TraceStatsTuple) -> TraceStatsRow {
    let (user_id, total_traces, first, last) = row;
    TraceStatsRow {
        user_id,
        total_traces,
        first_trace: opt_millis_to_datetime(first),
        last_trace: opt_millis_to_datetime(last),
    }
}

fn observation_stats_from(row: ObservationStatsTuple) -> ObservationStatsRow {
    let (user_id, total_observations, first, last, prompt, completion, total) = row;
    ObservationStatsRow {
        user_id,
        total_observations,
        first_observation: opt_millis_to_datetime(first),
        last_observation: opt_millis_to_datetime(last),
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: total,
    }
}

fn score_from(row: ScoreTuple) -> ScoreRow {
    let (id, trace_id, name, value, comment, timestamp) = row;
    ScoreRow {
        id,
        trace_id,
        name,
        value,
        comment,
        timestamp: millis_to_datetime(timestamp),
    }
}

/// Distinct user ids with at least one trace in the project
///
/// Ordered by each user's earliest trace, then by user id. Traces without a
/// user (NULL or empty string) are excluded.
pub async fn list_user_ids(pool: &SqlitePool, project_id: &str) -> Result<Vec<String>, SqliteError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT user_id
        FROM traces
        WHERE project_id = ? AND user_id IS NOT NULL AND user_id <> ''
        GROUP BY user_id
        ORDER BY MIN(timestamp), user_id
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Trace count and first/last trace timestamp for each user in the set
pub async fn trace_stats_for_users(
    pool: &SqlitePool,
    project_id: &str,
    user_ids: &[String],
) -> Result<Vec<TraceStatsRow>, SqliteError> {
    let mut stats = Vec::with_capacity(user_ids.len());

    for chunk in user_ids.chunks(SQLITE_MAX_BIND_IDS) {
        let query = format!(
            r#"
            SELECT user_id, COUNT(*), MIN(timestamp), MAX(timestamp)
            FROM traces
            WHERE project_id = ? AND user_id IN ({})
            GROUP BY user_id
            "#,
            placeholders(chunk.len())
        );

        let mut query_builder = sqlx::query_as::<_, TraceStatsTuple>(&query).bind(project_id);
        for id in chunk {
            query_builder = query_builder.bind(id.as_str());
        }

        let rows = query_builder.fetch_all(pool).await?;
        stats.extend(rows.into_iter().map(trace_stats_from));
    }

    Ok(stats)
}

/// Observation count, time range and token sums for each user in the set
///
/// Traces LEFT JOIN observations: a user with traces but no observations
/// still gets a row (count 0, NULL sums and timestamps).
pub async fn observation_stats_for_users(
    pool: &SqlitePool,
    project_id: &str,
    user_ids: &[String],
) -> Result<Vec<ObservationStatsRow>, SqliteError> {
    let mut stats = Vec::with_capacity(user_ids.len());

    for chunk in user_ids.chunks(SQLITE_MAX_BIND_IDS) {
        let query = format!(
            r#"
            SELECT
                t.user_id,
                COUNT(o.id),
                MIN(o.start_time),
                MAX(o.start_time),
                SUM(o.prompt_tokens),
                SUM(o.completion_tokens),
                SUM(o.total_tokens)
            FROM traces t
            LEFT JOIN observations o ON o.trace_id = t.id
            WHERE t.project_id = ? AND t.user_id IN ({})
            GROUP BY t.user_id
            "#,
            placeholders(chunk.len())
        );

        let mut query_builder = sqlx::query_as::<_, ObservationStatsTuple>(&query).bind(project_id);
        for id in chunk {
            query_builder = query_builder.bind(id.as_str());
        }

        let rows = query_builder.fetch_all(pool).await?;
        stats.extend(rows.into_iter().map(observation_stats_from));
    }

    Ok(stats)
}

/// Most recent score of each user in the set (at most one row per user)
///
/// Ties on timestamp are broken by score id descending.
pub async fn latest_scores_for_users(
    pool: &SqlitePool,
    project_id: &str,
    user_ids: &[String],
) -> Result<Vec<UserScoreRow>, SqliteError> {
    let mut scores = Vec::new();

    for chunk in user_ids.chunks(SQLITE_MAX_BIND_IDS) {
        let query = format!(
            r#"
            SELECT user_id, id, trace_id, name, value, comment, timestamp
            FROM (
                SELECT
                    t.user_id, s.id, s.trace_id, s.name, s.value, s.comment, s.timestamp,
                    ROW_NUMBER() OVER (
                        PARTITION BY t.user_id
                        ORDER BY s.timestamp DESC, s.id DESC
                    ) AS rn
                FROM scores s
                JOIN traces t ON t.id = s.trace_id
                WHERE t.project_id = ? AND t.user_id IN ({})
            )
            WHERE rn = 1
            "#,
            placeholders(chunk.len())
        );

        let mut query_builder = sqlx::query_as::<_, UserScoreTuple>(&query).bind(project_id);
        for id in chunk {
            query_builder = query_builder.bind(id.as_str());
        }

        let rows = query_builder.fetch_all(pool).await?;
        scores.extend(rows.into_iter().map(
            |(user_id, id, trace_id, name, value, comment, timestamp)| UserScoreRow {
                user_id,
                score: score_from((id, trace_id, name, value, comment, timestamp)),
            },
        ));
    }

    Ok(scores)
}

/// Trace stats for one user; always one row (count 0 for unknown users)
pub async fn trace_stats_for_user(
    pool: &SqlitePool,
    project_id: &str,
    user_id: &str,
) -> Result<TraceStatsRow, SqliteError> {
    let (total, first, last): (i64, Option<i64>, Option<i64>) = sqlx::query_as(
        r#"
        SELECT COUNT(*), MIN(timestamp), MAX(timestamp)
        FROM traces
        WHERE project_id = ? AND user_id = ?
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(trace_stats_from((user_id.to_string(), total, first, last)))
}

/// Observation stats for one user; always one row
pub async fn observation_stats_for_user(
    pool: &SqlitePool,
    project_id: &str,
    user_id: &str,
) -> Result<ObservationStatsRow, SqliteError> {
    let (total, first, last, prompt, completion, tokens): (
        i64,
        Option<i64>,
        Option<i64>,
        Option<i64>,
        Option<i64>,
        Option<i64>,
    ) = sqlx::query_as(
        r#"
        SELECT
            COUNT(o.id),
            MIN(o.start_time),
            MAX(o.start_time),
            SUM(o.prompt_tokens),
            SUM(o.completion_tokens),
            SUM(o.total_tokens)
        FROM observations o
        JOIN traces t ON t.id = o.trace_id
        WHERE t.project_id = ? AND t.user_id = ?
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(observation_stats_from((
        user_id.to_string(),
        total,
        first,
        last,
        prompt,
        completion,
        tokens,
    )))
}

/// Most recent score across all of the user's traces in the project
pub async fn latest_score_for_user(
    pool: &SqlitePool,
    project_id: &str,
    user_id: &str,
) -> Result<Option<ScoreRow>, SqliteError> {
    let row: Option<ScoreTuple> = sqlx::query_as(
        r#"
        SELECT s.id, s.trace_id, s.name, s.value, s.comment, s.timestamp
        FROM scores s
        JOIN traces t ON t.id = s.trace_id
        WHERE t.project_id = ? AND t.user_id = ?
        ORDER BY s.timestamp DESC, s.id DESC
        LIMIT 1
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(score_from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::fixtures::{insert_observation, insert_score, insert_trace, test_pool};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_list_user_ids_orders_by_first_trace() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("bob"), 200).await;
        insert_trace(&pool, "t2", "p1", Some("alice"), 100).await;
        insert_trace(&pool, "t3", "p1", Some("bob"), 50).await;
        insert_trace(&pool, "t4", "p1", Some("carol"), 100).await;
        insert_trace(&pool, "t5", "p1", None, 10).await;
        insert_trace(&pool, "t6", "p1", Some(""), 10).await;
        insert_trace(&pool, "t7", "p2", Some("dave"), 1).await;

        let users = list_user_ids(&pool, "p1").await.unwrap();
        assert_eq!(users, ids(&["bob", "alice", "carol"]));
    }

    #[tokio::test]
    async fn test_list_user_ids_empty_project() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", None, 1).await;

        assert!(list_user_ids(&pool, "p1").await.unwrap().is_empty());
        assert!(list_user_ids(&pool, "missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trace_stats_for_users_scoped_to_project() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 100).await;
        insert_trace(&pool, "t2", "p1", Some("u1"), 300).await;
        insert_trace(&pool, "t3", "p1", Some("u2"), 200).await;
        insert_trace(&pool, "t4", "p2", Some("u1"), 999).await;

        let mut rows = trace_stats_for_users(&pool, "p1", &ids(&["u1", "u2"]))
            .await
            .unwrap();
        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "u1");
        assert_eq!(rows[0].total_traces, 2);
        assert_eq!(rows[0].first_trace, Some(millis_to_datetime(100)));
        assert_eq!(rows[0].last_trace, Some(millis_to_datetime(300)));
        assert_eq!(rows[1].total_traces, 1);
    }

    #[tokio::test]
    async fn test_trace_stats_for_users_spans_chunks() {
        let pool = test_pool().await;
        let users: Vec<String> = (0..SQLITE_MAX_BIND_IDS + 3)
            .map(|i| format!("user-{i:04}"))
            .collect();
        for (i, user) in users.iter().enumerate() {
            insert_trace(&pool, &format!("t{i}"), "p1", Some(user), i as i64).await;
        }

        let rows = trace_stats_for_users(&pool, "p1", &users).await.unwrap();
        assert_eq!(rows.len(), users.len());
        assert!(rows.iter().all(|r| r.total_traces == 1));
    }

    #[tokio::test]
    async fn test_observation_stats_for_users_left_join() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 100).await;
        insert_trace(&pool, "t2", "p1", Some("u2"), 100).await;
        insert_observation(&pool, "o1", "t1", 150, (Some(10), Some(20), Some(30))).await;
        insert_observation(&pool, "o2", "t1", 120, (Some(5), None, Some(5))).await;

        let mut rows = observation_stats_for_users(&pool, "p1", &ids(&["u1", "u2"]))
            .await
            .unwrap();
        rows.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        assert_eq!(rows.len(), 2);
        let u1 = &rows[0];
        assert_eq!(u1.total_observations, 2);
        assert_eq!(u1.first_observation, Some(millis_to_datetime(120)));
        assert_eq!(u1.last_observation, Some(millis_to_datetime(150)));
        assert_eq!(u1.prompt_tokens, Some(15));
        assert_eq!(u1.completion_tokens, Some(20));
        assert_eq!(u1.total_tokens, Some(35));

        let u2 = &rows[1];
        assert_eq!(u2.user_id, "u2");
        assert_eq!(u2.total_observations, 0);
        assert_eq!(u2.first_observation, None);
        assert_eq!(u2.prompt_tokens, None);
    }

    #[tokio::test]
    async fn test_latest_scores_for_users_picks_most_recent_across_traces() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 100).await;
        insert_trace(&pool, "t2", "p1", Some("u1"), 200).await;
        insert_trace(&pool, "t3", "p1", Some("u2"), 100).await;
        // Newest score sits on the older trace
        insert_score(&pool, "s1", "t1", "quality", 0.9, 500).await;
        insert_score(&pool, "s2", "t2", "quality", 0.1, 300).await;

        let rows = latest_scores_for_users(&pool, "p1", &ids(&["u1", "u2"]))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, "u1");
        assert_eq!(rows[0].score.id, "s1");
        assert_eq!(rows[0].score.trace_id, "t1");
        assert_eq!(rows[0].score.value, 0.9);
        assert_eq!(rows[0].score.timestamp, millis_to_datetime(500));
    }

    #[tokio::test]
    async fn test_latest_score_tie_breaks_on_id() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 100).await;
        insert_score(&pool, "s-a", "t1", "quality", 0.2, 500).await;
        insert_score(&pool, "s-b", "t1", "quality", 0.3, 500).await;

        let many = latest_scores_for_users(&pool, "p1", &ids(&["u1"]))
            .await
            .unwrap();
        let single = latest_score_for_user(&pool, "p1", "u1").await.unwrap();

        assert_eq!(many[0].score.id, "s-b");
        assert_eq!(single.map(|s| s.id), Some("s-b".to_string()));
    }

    #[tokio::test]
    async fn test_single_user_scenario() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 1_000).await;
        insert_trace(&pool, "t2", "p1", Some("u1"), 2_000).await;
        insert_observation(&pool, "o1", "t1", 1_100, (Some(10), Some(20), Some(5))).await;
        insert_observation(&pool, "o2", "t2", 2_100, (Some(15), Some(5), Some(3))).await;
        insert_observation(&pool, "o3", "t2", 2_200, (Some(0), Some(0), Some(0))).await;
        insert_score(&pool, "s1", "t2", "quality", 1.0, 2_500).await;

        let traces = trace_stats_for_user(&pool, "p1", "u1").await.unwrap();
        assert_eq!(traces.total_traces, 2);
        assert_eq!(traces.first_trace, Some(millis_to_datetime(1_000)));
        assert_eq!(traces.last_trace, Some(millis_to_datetime(2_000)));

        let observations = observation_stats_for_user(&pool, "p1", "u1").await.unwrap();
        assert_eq!(observations.total_observations, 3);
        assert_eq!(observations.prompt_tokens, Some(25));
        assert_eq!(observations.completion_tokens, Some(25));
        assert_eq!(observations.total_tokens, Some(8));
        assert_eq!(observations.first_observation, Some(millis_to_datetime(1_100)));
        assert_eq!(observations.last_observation, Some(millis_to_datetime(2_200)));

        let score = latest_score_for_user(&pool, "p1", "u1").await.unwrap().unwrap();
        assert_eq!(score.timestamp, millis_to_datetime(2_500));
    }

    #[tokio::test]
    async fn test_single_user_unknown_returns_empty_aggregates() {
        let pool = test_pool().await;
        insert_trace(&pool, "t1", "p1", Some("u1"), 1_000).await;

        let traces = trace_stats_for_user(&pool, "p1", "nobody").await.unwrap();
        assert_eq!(traces.user_id, "nobody");
        assert_eq!(traces.total_traces, 0);
        assert_eq!(traces.first_trace, None);

        let observations = observation_stats_for_user(&pool, "p1", "nobody").await.unwrap();
        assert_eq!(observations.total_observations, 0);
        assert_eq!(observations.total_tokens, None);

        assert!(latest_score_for_user(&pool, "p1", "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_id_with_quotes_is_bound_not_interpolated() {
        let pool = test_pool().await;
        let tricky = "o'brien\") OR 1=1 --";
        insert_trace(&pool, "t1", "p1", Some(tricky), 1).await;
        insert_trace(&pool, "t2", "p1", Some("other"), 1).await;

        let rows = trace_stats_for_users(&pool, "p1", &ids(&[tricky])).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, tricky);
    }
}
