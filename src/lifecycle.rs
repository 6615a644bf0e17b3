//! Session lifecycle: creation, per-set completion, finish.
//!
//! Every write runs as one transaction against the store, so racing
//! set-completion calls for the same session cannot lose updates.

use chrono::Utc;
use tracing::info;

use crate::error::{Result, TrackerError};
use crate::models::SessionStatus;
use crate::store::{ExerciseDraft, SessionStore};

/// Outcome of creating a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionStarted {
    pub session_id: i64,
    pub total_sets: i64,
}

/// Counter state after a set-completion call.
#[derive(Debug, Clone, Copy)]
pub struct SetProgress {
    pub session_id: i64,
    pub exercise_index: i64,
    pub exercise_completed_sets: i64,
    pub session_completed_sets: i64,
    pub session_total_sets: i64,
    pub workout_finished: bool,
}

/// Drives a session from creation through per-set completion to finish.
#[derive(Clone)]
pub struct LifecycleManager {
    store: SessionStore,
}

impl LifecycleManager {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Persists a new active session together with all its exercises, as one
    /// atomic unit. `total_sets` is fixed here and never recomputed.
    pub async fn start(
        &self,
        user_id: Option<&str>,
        title: &str,
        exercises: &[ExerciseDraft],
    ) -> Result<SessionStarted> {
        let total_sets: i64 = exercises.iter().map(|e| e.sets).sum();

        let mut tx = self.store.begin().await?;
        let session_id = self
            .store
            .insert_session(&mut tx, user_id, title, Utc::now(), total_sets)
            .await?;
        for (i, draft) in exercises.iter().enumerate() {
            self.store
                .insert_exercise(&mut tx, session_id, i as i64, draft)
                .await?;
        }
        tx.commit().await?;

        info!(session_id, total_sets, "session started");
        Ok(SessionStarted {
            session_id,
            total_sets,
        })
    }

    /// Records one set completion against the exercise at `exercise_index`.
    ///
    /// Saturates at the exercise's planned sets: calls past saturation leave
    /// all counters untouched and are not an error. The session must still be
    /// active; absent and inactive sessions get the same answer.
    pub async fn complete_set(&self, session_id: i64, exercise_index: i64) -> Result<SetProgress> {
        let mut tx = self.store.begin().await?;

        let session = self
            .store
            .session(&mut tx, session_id)
            .await?
            .filter(|s| s.status == SessionStatus::Active)
            .ok_or(TrackerError::SessionNotActive(session_id))?;

        let exercise = self
            .store
            .exercise(&mut tx, session_id, exercise_index)
            .await?
            .ok_or(TrackerError::ExerciseNotFound {
                session_id,
                exercise_index,
            })?;

        let (exercise_done, session_done) = if exercise.completed_sets < exercise.sets {
            self.store
                .bump_completed(&mut tx, session_id, exercise.id)
                .await?;
            (exercise.completed_sets + 1, session.completed_sets + 1)
        } else {
            (exercise.completed_sets, session.completed_sets)
        };

        tx.commit().await?;

        Ok(SetProgress {
            session_id,
            exercise_index,
            exercise_completed_sets: exercise_done,
            session_completed_sets: session_done,
            session_total_sets: session.total_sets,
            workout_finished: session_done >= session.total_sets,
        })
    }

    /// Marks the session finished and stamps its end time. Re-finishing an
    /// already-finished session succeeds and overwrites the end time.
    pub async fn finish(&self, session_id: i64) -> Result<()> {
        let mut tx = self.store.begin().await?;

        if self.store.session(&mut tx, session_id).await?.is_none() {
            return Err(TrackerError::SessionNotFound(session_id));
        }
        self.store
            .mark_finished(&mut tx, session_id, Utc::now())
            .await?;

        tx.commit().await?;

        info!(session_id, "session finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn draft(name: &str, sets: i64) -> ExerciseDraft {
        ExerciseDraft {
            name: name.into(),
            sets,
            reps: 12,
            rest: 60,
        }
    }

    async fn manager() -> LifecycleManager {
        LifecycleManager::new(SessionStore::new(db::open_memory().await.unwrap()))
    }

    #[tokio::test]
    async fn start_sums_planned_sets() {
        let mgr = manager().await;
        let started = mgr
            .start(None, "Leg Day", &[draft("squat", 3), draft("lunge", 4)])
            .await
            .unwrap();
        assert_eq!(started.total_sets, 7);

        let session = mgr.store.get_session(started.session_id).await.unwrap().unwrap();
        assert_eq!(session.completed_sets, 0);
        for idx in 0..2 {
            let ex = mgr
                .store
                .get_exercise(started.session_id, idx)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(ex.completed_sets, 0);
            assert_eq!(ex.order_index, idx);
        }
    }

    #[tokio::test]
    async fn start_with_no_exercises() {
        let mgr = manager().await;
        let started = mgr.start(None, "Rest Day", &[]).await.unwrap();
        assert_eq!(started.total_sets, 0);
    }

    #[tokio::test]
    async fn complete_set_saturates() {
        let mgr = manager().await;
        let started = mgr
            .start(None, "Leg Day", &[draft("push-up", 3)])
            .await
            .unwrap();

        for expected in 1..=3i64 {
            let p = mgr.complete_set(started.session_id, 0).await.unwrap();
            assert_eq!(p.exercise_completed_sets, expected);
            assert_eq!(p.session_completed_sets, expected);
            assert_eq!(p.workout_finished, expected == 3);
        }

        // Fourth call: counters stay saturated, still reported finished.
        let p = mgr.complete_set(started.session_id, 0).await.unwrap();
        assert_eq!(p.exercise_completed_sets, 3);
        assert_eq!(p.session_completed_sets, 3);
        assert_eq!(p.session_total_sets, 3);
        assert!(p.workout_finished);
    }

    #[tokio::test]
    async fn session_counter_matches_exercise_sum() {
        let mgr = manager().await;
        let started = mgr
            .start(None, "Full Body", &[draft("squat", 2), draft("row", 2)])
            .await
            .unwrap();

        // Interleave completions across both exercises.
        for idx in [0, 1, 1, 0, 1] {
            mgr.complete_set(started.session_id, idx).await.unwrap();

            let session = mgr.store.get_session(started.session_id).await.unwrap().unwrap();
            let mut sum = 0;
            for i in 0..2 {
                sum += mgr
                    .store
                    .get_exercise(started.session_id, i)
                    .await
                    .unwrap()
                    .unwrap()
                    .completed_sets;
            }
            assert_eq!(session.completed_sets, sum);
        }
    }

    #[tokio::test]
    async fn complete_set_unknown_session() {
        let mgr = manager().await;
        let err = mgr.complete_set(999, 0).await.unwrap_err();
        assert!(matches!(err, TrackerError::SessionNotActive(999)));
    }

    #[tokio::test]
    async fn complete_set_unknown_exercise() {
        let mgr = manager().await;
        let started = mgr.start(None, "Leg Day", &[draft("squat", 3)]).await.unwrap();
        let err = mgr.complete_set(started.session_id, 5).await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::ExerciseNotFound {
                exercise_index: 5,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn finish_stamps_end_time_and_blocks_completions() {
        let mgr = manager().await;
        let started = mgr.start(None, "Leg Day", &[draft("squat", 3)]).await.unwrap();

        mgr.finish(started.session_id).await.unwrap();

        let session = mgr.store.get_session(started.session_id).await.unwrap().unwrap();
        assert_eq!(session.status, SessionStatus::Finished);
        assert!(session.end_time.is_some());

        let err = mgr.complete_set(started.session_id, 0).await.unwrap_err();
        assert!(matches!(err, TrackerError::SessionNotActive(_)));
    }

    #[tokio::test]
    async fn finish_is_idempotent() {
        let mgr = manager().await;
        let started = mgr.start(None, "Leg Day", &[]).await.unwrap();

        mgr.finish(started.session_id).await.unwrap();
        let first_end = mgr
            .store
            .get_session(started.session_id)
            .await
            .unwrap()
            .unwrap()
            .end_time
            .unwrap();

        // Second finish succeeds and re-stamps the end time.
        mgr.finish(started.session_id).await.unwrap();
        let second_end = mgr
            .store
            .get_session(started.session_id)
            .await
            .unwrap()
            .unwrap()
            .end_time
            .unwrap();
        assert!(second_end >= first_end);
    }

    #[tokio::test]
    async fn finish_unknown_session() {
        let mgr = manager().await;
        let err = mgr.finish(12345).await.unwrap_err();
        assert!(matches!(err, TrackerError::SessionNotFound(12345)));
    }
}
