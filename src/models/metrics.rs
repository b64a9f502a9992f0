//! Metric rows and the dashboard response envelope.

use serde::Serialize;
use sqlx::FromRow;

// -- Conversation status --

/// Conversation status as stored in `conversations.status`.
///
/// Codes outside the known set are reported as `closed`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Resolved,
    Pending,
    Snoozed,
    Closed,
}

impl ConversationStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Open,
            1 => Self::Resolved,
            2 => Self::Pending,
            3 => Self::Snoozed,
            _ => Self::Closed,
        }
    }
}

/// Share of `part` in `total` as a percentage rounded to 2 decimals.
///
/// Returns `None` for an empty (or negative) denominator.
pub fn percentage(part: i64, total: i64) -> Option<f64> {
    if total <= 0 {
        return None;
    }
    let raw = part as f64 * 100.0 / total as f64;
    Some((raw * 100.0).round() / 100.0)
}

/// Two-digit hour-of-day label, `None` outside `0..=23`.
pub fn hour_label(hour: i32) -> Option<String> {
    (0..=23).contains(&hour).then(|| format!("{hour:02}"))
}

// -- Rows --

/// All-time total and previous-calendar-month count for one entity.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct EntityTotals {
    pub total: i64,
    pub previous_month: i64,
}

/// Conversations opened today vs. yesterday.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct DayComparison {
    pub today: i64,
    pub yesterday: i64,
}

/// Raw per-code count, before labels and percentages are applied.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: i32,
    pub total_conversations: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusBreakdown {
    pub status: ConversationStatus,
    pub total_conversations: i64,
    pub percentage: Option<f64>,
}

/// Label raw status counts, merge codes sharing a label, and attach each
/// label's share of the day's total.
pub fn status_breakdown(counts: Vec<StatusCount>) -> Vec<StatusBreakdown> {
    let mut merged: Vec<(ConversationStatus, i64)> = Vec::with_capacity(counts.len());
    for row in counts {
        let status = ConversationStatus::from_code(row.status);
        match merged.iter_mut().find(|(s, _)| *s == status) {
            Some((_, n)) => *n += row.total_conversations,
            None => merged.push((status, row.total_conversations)),
        }
    }
    merged.sort_by_key(|(status, _)| *status);

    let total: i64 = merged.iter().map(|(_, n)| n).sum();
    merged
        .into_iter()
        .map(|(status, n)| StatusBreakdown {
            status,
            total_conversations: n,
            percentage: percentage(n, total),
        })
        .collect()
}

#[derive(Debug, Clone, FromRow)]
pub struct HourBucket {
    pub hour: i32,
    pub total_conversations: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourlyConversations {
    pub hour: String,
    pub total_conversations: i64,
}

/// Turn raw hour buckets into labelled rows, ordered by hour. Buckets with
/// an hour outside the day are dropped.
pub fn hourly_histogram(mut buckets: Vec<HourBucket>) -> Vec<HourlyConversations> {
    buckets.sort_by_key(|b| b.hour);
    buckets
        .into_iter()
        .filter_map(|b| {
            hour_label(b.hour).map(|hour| HourlyConversations {
                hour,
                total_conversations: b.total_conversations,
            })
        })
        .collect()
}

/// Conversations in the trailing hour vs. the whole day.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct RecentActivity {
    pub last_hour: i64,
    pub today: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct ActiveContacts {
    pub active_contacts: i64,
}

/// Today's conversations for one team; unassigned ones surface as team 0.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct TeamActivity {
    pub team_id: i64,
    pub team_name: Option<String>,
    pub total_conversations: i64,
}

/// Today's conversations for one assignee; unassigned ones surface as 0.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct AssigneeActivity {
    pub assignee_id: i64,
    pub assignee_name: Option<String>,
    pub total_conversations: i64,
}

// -- Envelope --

/// Every metric for one account. Field order is query order; the JSON keys
/// stay positional for existing dashboard consumers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardMetrics {
    #[serde(rename = "tabela1")]
    pub contacts: Vec<EntityTotals>,
    #[serde(rename = "tabela2")]
    pub teams: Vec<EntityTotals>,
    #[serde(rename = "tabela3")]
    pub users: Vec<EntityTotals>,
    #[serde(rename = "tabela4")]
    pub conversations: Vec<EntityTotals>,
    #[serde(rename = "tabela5")]
    pub messages: Vec<EntityTotals>,
    #[serde(rename = "tabela6")]
    pub conversations_by_day: Vec<DayComparison>,
    #[serde(rename = "tabela7")]
    pub status_breakdown: Vec<StatusBreakdown>,
    #[serde(rename = "tabela8")]
    pub hourly: Vec<HourlyConversations>,
    #[serde(rename = "tabela9")]
    pub recent_activity: Vec<RecentActivity>,
    #[serde(rename = "tabela10")]
    pub active_contacts: Vec<ActiveContacts>,
    #[serde(rename = "tabela11")]
    pub teams_today: Vec<TeamActivity>,
    #[serde(rename = "tabela12")]
    pub assignees_today: Vec<AssigneeActivity>,
}
