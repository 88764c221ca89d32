//! # Podium Core Library
//!
//! Core logic for Podium Timer, a countdown timer for competitive-debate
//! speech formats. All operations are available through this library; the
//! `podium-cli` binary is a thin front end over it.
//!
//! ## Architecture
//!
//! - **Countdown**: a wall-clock-based timer that recomputes remaining
//!   time from its start timestamp; the caller invokes `tick()`
//!   periodically
//! - **Session**: owns one countdown per speech segment of the selected
//!   event plus two side-scoped prep budgets
//! - **Catalog**: the static table of debate formats
//! - **Storage**: SQLite kv persistence for the session and TOML settings
//!
//! ## Key Components
//!
//! - [`Countdown`]: the per-segment countdown primitive
//! - [`Session`]: round-level state container
//! - [`Event`]: change notifications returned by every operation
//! - [`Settings`] / [`Store`]: persistence

pub mod catalog;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use catalog::{EventPreset, Segment, SegmentKind, Side, EVENT_NAMES};
pub use error::{CoreError, Result};
pub use events::Event;
pub use session::Session;
pub use storage::{Settings, Store};
pub use timer::{Countdown, PrepTimer};
