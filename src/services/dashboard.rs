//! Dashboard metric queries for a single account.
//!
//! Queries run one after another on the request's own connection. Every
//! aggregate groups by `account_id`, so an account without matching rows
//! produces an empty table rather than a row of zeros. Day and month
//! boundaries come from the database clock in its session time zone.

use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::FromRow;

use crate::db;
use crate::errors::AppError;
use crate::models::metrics::{
    self, ActiveContacts, AssigneeActivity, DashboardMetrics, DayComparison, EntityTotals,
    HourBucket, RecentActivity, StatusCount, TeamActivity,
};

/// All-time count plus the previous calendar month, for any table that
/// carries `account_id` and a timestamp column.
fn entity_totals_sql(table: &str, timestamp: &str) -> String {
    format!(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (
                WHERE {timestamp} >= date_trunc('month', NOW()) - INTERVAL '1 month'
                  AND {timestamp} <  date_trunc('month', NOW())
            ) AS previous_month
        FROM {table}
        WHERE account_id = $1
        GROUP BY account_id
        "#
    )
}

const CONVERSATIONS_BY_DAY: &str = r#"
    SELECT
        COUNT(*) FILTER (WHERE created_at >= date_trunc('day', NOW())) AS today,
        COUNT(*) FILTER (WHERE created_at < date_trunc('day', NOW())) AS yesterday
    FROM conversations
    WHERE account_id = $1
      AND created_at >= date_trunc('day', NOW()) - INTERVAL '1 day'
    GROUP BY account_id
"#;

const STATUS_TODAY: &str = r#"
    SELECT status, COUNT(*) AS total_conversations
    FROM conversations
    WHERE account_id = $1
      AND created_at >= date_trunc('day', NOW())
    GROUP BY status
"#;

const HOURLY_TODAY: &str = r#"
    SELECT EXTRACT(HOUR FROM created_at)::int AS hour, COUNT(*) AS total_conversations
    FROM conversations
    WHERE account_id = $1
      AND created_at >= date_trunc('day', NOW())
      AND created_at >= NOW() - INTERVAL '10 hours'
    GROUP BY 1
    ORDER BY 1
"#;

const RECENT_ACTIVITY: &str = r#"
    SELECT
        COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '1 hour') AS last_hour,
        COUNT(*) AS today
    FROM conversations
    WHERE account_id = $1
      AND created_at >= date_trunc('day', NOW())
    GROUP BY account_id
"#;

const ACTIVE_CONTACTS: &str = r#"
    SELECT COUNT(DISTINCT contact_id) AS active_contacts
    FROM conversations
    WHERE account_id = $1
      AND last_activity_at >= date_trunc('day', NOW())
    GROUP BY account_id
"#;

const TEAMS_TODAY: &str = r#"
    SELECT
        COALESCE(c.team_id, 0)::bigint AS team_id,
        t.name AS team_name,
        COUNT(*) AS total_conversations
    FROM conversations c
    LEFT JOIN teams t ON t.id = c.team_id
    WHERE c.account_id = $1
      AND c.created_at >= date_trunc('day', NOW())
    GROUP BY c.team_id, t.name
    ORDER BY 3 DESC, 1
"#;

const ASSIGNEES_TODAY: &str = r#"
    SELECT
        COALESCE(c.assignee_id, 0)::bigint AS assignee_id,
        u.name AS assignee_name,
        COUNT(*) AS total_conversations
    FROM conversations c
    LEFT JOIN users u ON u.id = c.assignee_id
    WHERE c.account_id = $1
      AND c.created_at >= date_trunc('day', NOW())
    GROUP BY c.assignee_id, u.name
    ORDER BY 3 DESC, 1
    LIMIT 11
"#;

/// Run one metric query and tag any failure with its response key.
async fn fetch_rows<T>(
    conn: &mut PgConnection,
    metric: &'static str,
    sql: &str,
    account_id: i64,
) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let rows = sqlx::query_as::<_, T>(sql)
        .bind(account_id)
        .fetch_all(conn)
        .await
        .map_err(|source| AppError::Query { metric, source })?;
    tracing::debug!(metric, account_id, rows = rows.len(), "Metric query complete");
    Ok(rows)
}

/// Run the full query battery in order. The first failing query aborts the
/// rest and nothing collected so far is returned.
pub async fn fetch_metrics(
    conn: &mut PgConnection,
    account_id: i64,
) -> Result<DashboardMetrics, AppError> {
    let contacts: Vec<EntityTotals> = fetch_rows(
        conn,
        "tabela1",
        &entity_totals_sql("contacts", "created_at"),
        account_id,
    )
    .await?;
    let teams: Vec<EntityTotals> = fetch_rows(
        conn,
        "tabela2",
        &entity_totals_sql("teams", "created_at"),
        account_id,
    )
    .await?;
    let users: Vec<EntityTotals> = fetch_rows(
        conn,
        "tabela3",
        &entity_totals_sql("account_users", "created_at"),
        account_id,
    )
    .await?;
    let conversations: Vec<EntityTotals> = fetch_rows(
        conn,
        "tabela4",
        &entity_totals_sql("conversations", "last_activity_at"),
        account_id,
    )
    .await?;
    let messages: Vec<EntityTotals> = fetch_rows(
        conn,
        "tabela5",
        &entity_totals_sql("messages", "created_at"),
        account_id,
    )
    .await?;
    let conversations_by_day: Vec<DayComparison> =
        fetch_rows(conn, "tabela6", CONVERSATIONS_BY_DAY, account_id).await?;
    let status_counts: Vec<StatusCount> =
        fetch_rows(conn, "tabela7", STATUS_TODAY, account_id).await?;
    let hour_buckets: Vec<HourBucket> =
        fetch_rows(conn, "tabela8", HOURLY_TODAY, account_id).await?;
    let recent_activity: Vec<RecentActivity> =
        fetch_rows(conn, "tabela9", RECENT_ACTIVITY, account_id).await?;
    let active_contacts: Vec<ActiveContacts> =
        fetch_rows(conn, "tabela10", ACTIVE_CONTACTS, account_id).await?;
    let teams_today: Vec<TeamActivity> =
        fetch_rows(conn, "tabela11", TEAMS_TODAY, account_id).await?;
    let assignees_today: Vec<AssigneeActivity> =
        fetch_rows(conn, "tabela12", ASSIGNEES_TODAY, account_id).await?;

    Ok(DashboardMetrics {
        contacts,
        teams,
        users,
        conversations,
        messages,
        conversations_by_day,
        status_breakdown: metrics::status_breakdown(status_counts),
        hourly: metrics::hourly_histogram(hour_buckets),
        recent_activity,
        active_contacts,
        teams_today,
        assignees_today,
    })
}

/// Open a connection, collect every metric, and close the connection
/// whether or not the queries succeeded.
pub async fn collect_for_account(
    options: &PgConnectOptions,
    account_id: i64,
) -> Result<DashboardMetrics, AppError> {
    let mut conn = db::connect(options).await?;
    let result = fetch_metrics(&mut conn, account_id).await;
    db::close(conn).await;
    result
}
