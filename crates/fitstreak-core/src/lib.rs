//! # FitStreak Core Library
//!
//! Core logic for the FitStreak workout tracker: daily workout logs keyed by
//! wallet address, the consecutive-day streak computed from them, and the
//! milestone badges that a streak unlocks.
//!
//! ## Architecture
//!
//! - **Streak engine**: pure functions over UTC calendar dates. The caller
//!   always supplies "today".
//! - **Storage**: SQLite workout log and badge ledger, TOML configuration
//! - **Service**: [`StreakService`] composes a store with the engine
//!
//! ## Key Components
//!
//! - [`compute_streak`]: Streak length and eligible milestone for a date set
//! - [`StreakService`]: Log workouts, query streaks, track badge mints
//! - [`Database`]: Workout and badge persistence
//! - [`Config`]: Connected wallet and chain settings

pub mod badge;
pub mod clock;
pub mod error;
pub mod service;
pub mod storage;
pub mod streak;
pub mod workout;

pub use badge::{BadgeMint, BadgeStatus, MintStep, StepState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use service::{StreakService, StreakStats};
pub use storage::{BadgeLedger, Config, Database, MemoryStore, WorkoutStore};
pub use streak::{compute_streak, LogDate, StreakResult, STREAK_MILESTONES};
pub use workout::{WalletAddress, WorkoutInput, WorkoutLog};
