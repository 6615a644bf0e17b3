//! # repcount
//!
//! Workout session tracking backend. Records a user's exercise session,
//! tracks per-set completion within each exercise, and aggregates the
//! session history into rolling-window progress statistics.
//!
//! The write path ([`LifecycleManager`]) and the read path
//! ([`ProgressAggregator`]) share one SQLite-backed [`SessionStore`]; the
//! `api` module exposes both over HTTP.

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod progress;
pub mod store;

pub use error::{Result, TrackerError};
pub use lifecycle::{LifecycleManager, SessionStarted, SetProgress};
pub use models::{SessionExercise, SessionStatus, WorkoutSession};
pub use progress::{Period, ProgressAggregator, ProgressSummary};
pub use store::{ExerciseDraft, SessionStore};
