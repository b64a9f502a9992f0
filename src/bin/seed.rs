//! Seed script for development — creates the dashboard tables and fills one
//! account with sample conversations spread over the last day.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads the same `DB_*` environment variables as the server (and `.env`).

use chrono::{DateTime, Duration, Utc};
use dashboard_metrics::config::AppConfig;
use sqlx::{ConnectOptions, Connection, PgConnection};

const ACCOUNT_ID: i64 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let mut conn = config.connect_options().connect().await?;

    sqlx::raw_sql(include_str!("../../sql/schema.sql"))
        .execute(&mut conn)
        .await?;

    println!("=== Dashboard Seed Script ===");

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM conversations WHERE account_id = $1)")
            .bind(ACCOUNT_ID)
            .fetch_one(&mut conn)
            .await?;

    if exists {
        println!("[skip] Account {ACCOUNT_ID} already has conversations");
    } else {
        let now = Utc::now();
        let user_ids = seed_users(&mut conn, now).await?;
        let team_ids = seed_teams(&mut conn, now).await?;
        let contact_ids = seed_contacts(&mut conn, now).await?;
        seed_conversations(&mut conn, now, &user_ids, &team_ids, &contact_ids).await?;
        println!("\n=== Seed complete! ===");
    }

    println!("Try: curl 'http://localhost:{}/fetch-data?account_id={ACCOUNT_ID}'", config.port);
    conn.close().await?;
    Ok(())
}

async fn seed_users(conn: &mut PgConnection, now: DateTime<Utc>) -> anyhow::Result<Vec<i32>> {
    let names = ["Ana Souza", "Bruno Lima", "Carla Dias", "Diego Rocha"];
    let mut ids = Vec::with_capacity(names.len());

    for (i, name) in names.into_iter().enumerate() {
        let id: i32 = sqlx::query_scalar("INSERT INTO users (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;

        // Half of the agents joined last month.
        let joined = if i % 2 == 0 { now - Duration::days(35) } else { now };
        sqlx::query("INSERT INTO account_users (account_id, user_id, created_at) VALUES ($1, $2, $3)")
            .bind(ACCOUNT_ID)
            .bind(id)
            .bind(joined)
            .execute(&mut *conn)
            .await?;
        ids.push(id);
    }

    println!("[done] Created {} agents", ids.len());
    Ok(ids)
}

async fn seed_teams(conn: &mut PgConnection, now: DateTime<Utc>) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::new();
    for name in ["Support", "Sales", "Billing"] {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO teams (name, account_id, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(ACCOUNT_ID)
        .bind(now - Duration::days(40))
        .fetch_one(&mut *conn)
        .await?;
        ids.push(id);
    }

    println!("[done] Created {} teams", ids.len());
    Ok(ids)
}

async fn seed_contacts(conn: &mut PgConnection, now: DateTime<Utc>) -> anyhow::Result<Vec<i32>> {
    let mut ids = Vec::new();
    for i in 0..12 {
        let created_at = now - Duration::days(i * 4);
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO contacts (name, account_id, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(format!("Contact {}", i + 1))
        .bind(ACCOUNT_ID)
        .bind(created_at)
        .fetch_one(&mut *conn)
        .await?;
        ids.push(id);
    }

    println!("[done] Created {} contacts", ids.len());
    Ok(ids)
}

/// One conversation per hour over the past day, cycling through statuses,
/// teams, assignees and contacts. Every fourth one is unassigned and every
/// third one has no team, so the grouping queries see null keys.
async fn seed_conversations(
    conn: &mut PgConnection,
    now: DateTime<Utc>,
    user_ids: &[i32],
    team_ids: &[i64],
    contact_ids: &[i32],
) -> anyhow::Result<()> {
    let mut messages = 0;

    for i in 0..24usize {
        let created_at = now - Duration::hours(i as i64);
        let status = (i % 5) as i32;
        let assignee = (i % 4 != 0).then(|| user_ids[i % user_ids.len()]);
        let team = (i % 3 != 0).then(|| team_ids[i % team_ids.len()]);
        let contact = contact_ids[i % contact_ids.len()];

        let conversation_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO conversations
                (account_id, status, assignee_id, team_id, contact_id, created_at, last_activity_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(ACCOUNT_ID)
        .bind(status)
        .bind(assignee)
        .bind(team)
        .bind(contact)
        .bind(created_at)
        .bind(created_at + Duration::minutes(10))
        .fetch_one(&mut *conn)
        .await?;

        for (offset, content) in [(0, "Hello, I need help"), (5, "Sure, let me check")] {
            sqlx::query(
                "INSERT INTO messages (account_id, conversation_id, content, created_at)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(ACCOUNT_ID)
            .bind(conversation_id)
            .bind(content)
            .bind(created_at + Duration::minutes(offset))
            .execute(&mut *conn)
            .await?;
            messages += 1;
        }
    }

    println!("[done] Created 24 conversations with {messages} messages");
    Ok(())
}
