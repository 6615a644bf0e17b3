//! REST API handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;

use super::types::{
    CompleteSetRequest, CompleteSetResponse, FinishSessionResponse, StartSessionRequest,
    StartSessionResponse, SummaryQuery,
};
use crate::error::Result;
use crate::lifecycle::LifecycleManager;
use crate::progress::{ProgressAggregator, ProgressSummary};
use crate::store::{ExerciseDraft, SessionStore};

/// Shared application state: both managers over one store.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: LifecycleManager,
    pub progress: ProgressAggregator,
}

impl AppState {
    pub fn new(store: SessionStore) -> Self {
        Self {
            lifecycle: LifecycleManager::new(store.clone()),
            progress: ProgressAggregator::new(store),
        }
    }
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
    }))
}

/// Start a new session from an ordered list of exercise specs.
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>)> {
    let drafts: Vec<ExerciseDraft> = req.exercises.into_iter().map(Into::into).collect();
    let started = state
        .lifecycle
        .start(req.user_id.as_deref(), &req.title, &drafts)
        .await?;
    Ok((StatusCode::CREATED, Json(started.into())))
}

/// Record one set completion against an exercise, addressed by position.
pub async fn complete_set(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
    Json(req): Json<CompleteSetRequest>,
) -> Result<Json<CompleteSetResponse>> {
    let progress = state
        .lifecycle
        .complete_set(session_id, req.exercise_index)
        .await?;
    Ok(Json(progress.into()))
}

/// Mark a session finished.
pub async fn finish_session(
    State(state): State<AppState>,
    Path(session_id): Path<i64>,
) -> Result<Json<FinishSessionResponse>> {
    state.lifecycle.finish(session_id).await?;
    Ok(Json(FinishSessionResponse { ok: true }))
}

/// Rolling-window progress summary.
pub async fn progress_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ProgressSummary>> {
    let summary = state.progress.summarize(query.period).await?;
    Ok(Json(summary))
}
