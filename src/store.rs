//! Durable access to sessions and their exercises.
//!
//! All read-modify-write sequences run against a transaction obtained from
//! [`SessionStore::begin`]; dropping the transaction on an error path rolls
//! every mutation back.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::error::Result;
use crate::models::{SessionExercise, SessionStatus, WorkoutSession};

/// Planned exercise spec captured at session creation.
#[derive(Debug, Clone)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: i64,
    pub reps: i64,
    pub rest: i64,
}

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Starts a unit of work.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Inserts a new active session row and returns its assigned id.
    pub async fn insert_session(
        &self,
        conn: &mut SqliteConnection,
        user_id: Option<&str>,
        title: &str,
        start_time: DateTime<Utc>,
        total_sets: i64,
    ) -> Result<i64> {
        let res = sqlx::query(
            r#"
            INSERT INTO workout_sessions (user_id, title, status, start_time, total_sets, completed_sets)
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(SessionStatus::Active)
        .bind(start_time)
        .bind(total_sets)
        .execute(&mut *conn)
        .await?;

        Ok(res.last_insert_rowid())
    }

    /// Inserts one exercise row at the given position within its session.
    pub async fn insert_exercise(
        &self,
        conn: &mut SqliteConnection,
        session_id: i64,
        order_index: i64,
        draft: &ExerciseDraft,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session_exercises (session_id, order_index, name, sets, reps, rest, completed_sets)
            VALUES (?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(session_id)
        .bind(order_index)
        .bind(&draft.name)
        .bind(draft.sets)
        .bind(draft.reps)
        .bind(draft.rest)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Fetches a session row inside the current unit of work.
    pub async fn session(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<WorkoutSession>> {
        let session = sqlx::query_as::<_, WorkoutSession>(
            r#"
            SELECT id, user_id, title, status, start_time, end_time, total_sets, completed_sets
            FROM workout_sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(session)
    }

    /// Fetches an exercise by its position within a session. `order_index` is
    /// the addressing key; the row id never leaves the store layer.
    pub async fn exercise(
        &self,
        conn: &mut SqliteConnection,
        session_id: i64,
        order_index: i64,
    ) -> Result<Option<SessionExercise>> {
        let exercise = sqlx::query_as::<_, SessionExercise>(
            r#"
            SELECT id, session_id, order_index, name, sets, reps, rest, completed_sets
            FROM session_exercises
            WHERE session_id = ? AND order_index = ?
            "#,
        )
        .bind(session_id)
        .bind(order_index)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(exercise)
    }

    /// Increments the exercise counter and its parent session counter by one.
    /// The caller checks saturation first, inside the same transaction.
    pub async fn bump_completed(
        &self,
        conn: &mut SqliteConnection,
        session_id: i64,
        exercise_id: i64,
    ) -> Result<()> {
        sqlx::query("UPDATE session_exercises SET completed_sets = completed_sets + 1 WHERE id = ?")
            .bind(exercise_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("UPDATE workout_sessions SET completed_sets = completed_sets + 1 WHERE id = ?")
            .bind(session_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Flips the session to finished and stamps its end time. Overwrites the
    /// end time if the session was already finished.
    pub async fn mark_finished(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        end_time: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("UPDATE workout_sessions SET status = ?, end_time = ? WHERE id = ?")
            .bind(SessionStatus::Finished)
            .bind(end_time)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Pool-level read of a single session.
    pub async fn get_session(&self, id: i64) -> Result<Option<WorkoutSession>> {
        let mut conn = self.pool.acquire().await?;
        self.session(&mut conn, id).await
    }

    /// Pool-level read of a single exercise by position.
    pub async fn get_exercise(
        &self,
        session_id: i64,
        order_index: i64,
    ) -> Result<Option<SessionExercise>> {
        let mut conn = self.pool.acquire().await?;
        self.exercise(&mut conn, session_id, order_index).await
    }

    /// Every session started at or after `since`, regardless of status.
    /// Snapshot read for the progress rollup.
    pub async fn sessions_started_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<WorkoutSession>> {
        let sessions = sqlx::query_as::<_, WorkoutSession>(
            r#"
            SELECT id, user_id, title, status, start_time, end_time, total_sets, completed_sets
            FROM workout_sessions
            WHERE start_time >= ?
            ORDER BY start_time
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
