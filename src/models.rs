use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};

/// Lifecycle state of a workout session.
/// Moves once, `Active` to `Finished`, never back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Finished,
}

/// One tracked workout attempt with its running set counters.
/// `completed_sets` always equals the sum over this session's exercises.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutSession {
    pub id: i64,
    pub user_id: Option<String>,
    pub title: String,
    pub status: SessionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_sets: i64,
    pub completed_sets: i64,
}

/// One planned movement inside a session. Addressed externally by
/// `(session_id, order_index)`; the row id is storage convenience only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionExercise {
    pub id: i64,
    pub session_id: i64,
    pub order_index: i64,
    pub name: String,
    pub sets: i64,
    pub reps: i64,
    pub rest: i64,
    pub completed_sets: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Finished).unwrap(),
            "\"finished\""
        );
    }

    #[test]
    fn status_round_trips_through_serde() {
        let status: SessionStatus = serde_json::from_str("\"finished\"").unwrap();
        assert_eq!(status, SessionStatus::Finished);
    }
}
