use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{SegmentKind, Side};

/// Every state-changing session operation produces an `Event`. The front
/// end polls `Session::snapshot()` for the full state and prints the
/// per-operation events as they happen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    EventSelected {
        name: String,
        segment_count: usize,
        prep_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        segment_index: usize,
        kind: SegmentKind,
        remaining_ms: i64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        segment_index: usize,
        remaining_ms: i64,
        at: DateTime<Utc>,
    },
    TimerReset {
        segment_index: usize,
        at: DateTime<Utc>,
    },
    SegmentChanged {
        from: usize,
        to: usize,
        at: DateTime<Utc>,
    },
    RoundEnded {
        at: DateTime<Utc>,
    },
    PrepStarted {
        side: Side,
        remaining_secs: i64,
        at: DateTime<Utc>,
    },
    PrepStopped {
        side: Side,
        remaining_secs: i64,
        last_run_secs: u32,
        at: DateTime<Utc>,
    },
    PrepReset {
        side: Side,
        baseline_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        event: Option<String>,
        segment_index: usize,
        segment_count: usize,
        title: String,
        kind: SegmentKind,
        speaker: Option<String>,
        running: bool,
        remaining_ms: i64,
        total_ms: i64,
        analog: String,
        progress: f64,
        overtime: bool,
        prep_aff: PrepSnapshot,
        prep_neg: PrepSnapshot,
        at: DateTime<Utc>,
    },
}

/// Observable state of one side's prep budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepSnapshot {
    pub remaining_secs: i64,
    pub baseline_secs: u32,
    pub running: bool,
    pub overtime: bool,
    pub last_run_secs: u32,
}
