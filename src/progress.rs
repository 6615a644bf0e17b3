//! Read-side rollup of the session history over a rolling time window.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::SessionStore;

/// Minutes credited per completed set.
const MINUTES_PER_SET: i64 = 3;
/// Experience points credited per completed set.
const XP_PER_SET: i64 = 10;

/// Rolling window for a progress query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

/// Summary metrics over one window. Field names follow the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub workouts: i64,
    #[serde(rename = "totalTime")]
    pub total_time: i64,
    #[serde(rename = "xpGained")]
    pub xp_gained: i64,
    pub streak: i64,
}

#[derive(Clone)]
pub struct ProgressAggregator {
    store: SessionStore,
}

impl ProgressAggregator {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Folds every session started inside the window, regardless of status,
    /// into the four summary metrics. `streak` counts distinct UTC dates with
    /// at least one session start, not consecutive days.
    pub async fn summarize(&self, period: Period) -> Result<ProgressSummary> {
        self.summarize_at(period, Utc::now()).await
    }

    async fn summarize_at(&self, period: Period, now: DateTime<Utc>) -> Result<ProgressSummary> {
        let since = now - Duration::days(period.days());
        let sessions = self.store.sessions_started_since(since).await?;

        let mut active_days = HashSet::new();
        let mut completed_sets = 0i64;
        for session in &sessions {
            completed_sets += session.completed_sets;
            active_days.insert(session.start_time.date_naive());
        }

        Ok(ProgressSummary {
            workouts: sessions.len() as i64,
            total_time: completed_sets * MINUTES_PER_SET,
            xp_gained: completed_sets * XP_PER_SET,
            streak: active_days.len() as i64,
        })
    }
}
