//! Error taxonomy for the tracker core.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures surfaced by the session lifecycle and progress operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Session id did not resolve.
    #[error("session not found: {0}")]
    SessionNotFound(i64),

    /// Session absent or no longer active. The set-completion path does not
    /// distinguish the two in its response.
    #[error("session not found/active: {0}")]
    SessionNotActive(i64),

    /// No exercise at the given order index within the session.
    #[error("exercise not found: session {session_id}, index {exercise_index}")]
    ExerciseNotFound {
        session_id: i64,
        exercise_index: i64,
    },

    /// Underlying persistence failure. The in-flight transaction is dropped,
    /// so no partial counter updates survive.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl TrackerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_)
            | Self::SessionNotActive(_)
            | Self::ExerciseNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Convenience Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
