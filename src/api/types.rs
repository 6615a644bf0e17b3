//! API request and response types.
//!
//! Every operation has a typed body; malformed fields are rejected at the
//! boundary instead of coerced. Defaults mirror the documented contract:
//! sets 1, reps 10, rest 60 seconds.

use serde::{Deserialize, Serialize};

use crate::lifecycle::{SessionStarted, SetProgress};
use crate::progress::Period;
use crate::store::ExerciseDraft;

fn default_title() -> String {
    "Workout Session".to_string()
}

fn default_exercise_name() -> String {
    "Exercise".to_string()
}

fn default_sets() -> i64 {
    1
}

fn default_reps() -> i64 {
    10
}

fn default_rest() -> i64 {
    60
}

/// Planned exercise spec as supplied by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseSpec {
    #[serde(default = "default_exercise_name")]
    pub name: String,
    #[serde(default = "default_sets")]
    pub sets: i64,
    #[serde(default = "default_reps")]
    pub reps: i64,
    #[serde(default = "default_rest")]
    pub rest: i64,
}

impl From<ExerciseSpec> for ExerciseDraft {
    fn from(spec: ExerciseSpec) -> Self {
        Self {
            name: spec.name,
            sets: spec.sets,
            reps: spec.reps,
            rest: spec.rest,
        }
    }
}

/// Request to start a session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionRequest {
    #[serde(default = "default_title")]
    pub title: String,
    /// Optional opaque owner identifier; absent means anonymous.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionResponse {
    pub session_id: i64,
    pub total_sets: i64,
}

impl From<SessionStarted> for StartSessionResponse {
    fn from(started: SessionStarted) -> Self {
        Self {
            session_id: started.session_id,
            total_sets: started.total_sets,
        }
    }
}

/// Request to record one set completion, addressed by exercise position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteSetRequest {
    #[serde(default)]
    pub exercise_index: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteSetResponse {
    pub session_id: i64,
    pub exercise_index: i64,
    pub exercise_completed_sets: i64,
    pub session_completed_sets: i64,
    pub session_total_sets: i64,
    pub workout_finished: bool,
}

impl From<SetProgress> for CompleteSetResponse {
    fn from(p: SetProgress) -> Self {
        Self {
            session_id: p.session_id,
            exercise_index: p.exercise_index,
            exercise_completed_sets: p.exercise_completed_sets,
            session_completed_sets: p.session_completed_sets,
            session_total_sets: p.session_total_sets,
            workout_finished: p.workout_finished,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinishSessionResponse {
    pub ok: bool,
}

/// Query string for the progress summary. A missing `period` defaults to
/// week; an unknown value is a 400 from the extractor.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub period: Period,
}
