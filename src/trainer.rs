//! Trainer feature records: clients and the figures derived from them.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Paused,
    Prospect,
}

impl ClientStatus {
    /// Cycles Active -> Paused -> Prospect -> Active.
    pub fn next(self) -> Self {
        match self {
            ClientStatus::Active => ClientStatus::Paused,
            ClientStatus::Paused => ClientStatus::Prospect,
            ClientStatus::Prospect => ClientStatus::Active,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClientStatus::Active => "Active",
            ClientStatus::Paused => "Paused",
            ClientStatus::Prospect => "Prospect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub goal: String,
    pub status: ClientStatus,
    pub sessions_completed: u32,
    pub last_session: Option<NaiveDate>,
}

/// A single tile on the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub label: String,
    pub value: String,
    /// Change against the previous period, when the stat has one.
    pub trend: Option<i64>,
}

impl DashboardStat {
    fn new(label: &str, value: impl ToString, trend: Option<i64>) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentClient {
    pub client_id: Uuid,
    pub name: String,
    pub last_session: NaiveDate,
}

/// Builds the overview tiles for a client list.
///
/// "Trained this week" counts clients whose last session falls in the seven
/// days ending at `today`; its trend compares against the seven days before.
pub fn compute_stats(clients: &[Client], today: NaiveDate) -> Vec<DashboardStat> {
    let count = |status: ClientStatus| clients.iter().filter(|c| c.status == status).count();
    let sessions: u64 = clients.iter().map(|c| c.sessions_completed as u64).sum();

    let week_start = today - Duration::days(6);
    let prev_start = week_start - Duration::days(7);
    let in_range = |from: NaiveDate, to: NaiveDate| {
        clients
            .iter()
            .filter_map(|c| c.last_session)
            .filter(|d| *d >= from && *d <= to)
            .count() as i64
    };
    let this_week = in_range(week_start, today);
    let last_week = in_range(prev_start, week_start - Duration::days(1));

    vec![
        DashboardStat::new("Clients", clients.len(), None),
        DashboardStat::new("Active", count(ClientStatus::Active), None),
        DashboardStat::new("Sessions", sessions, None),
        DashboardStat::new("Trained this week", this_week, Some(this_week - last_week)),
        DashboardStat::new("Prospects", count(ClientStatus::Prospect), None),
    ]
}

/// Clients with a recorded session, most recent first.
pub fn recent_clients(clients: &[Client], limit: usize) -> Vec<RecentClient> {
    let mut recent: Vec<RecentClient> = clients
        .iter()
        .filter_map(|c| {
            c.last_session.map(|last_session| RecentClient {
                client_id: c.id,
                name: c.name.clone(),
                last_session,
            })
        })
        .collect();
    recent.sort_by(|a, b| {
        b.last_session
            .cmp(&a.last_session)
            .then_with(|| a.name.cmp(&b.name))
    });
    recent.truncate(limit);
    recent
}
