//! Wall-clock countdown primitive.
//!
//! One `Countdown` per speech segment. It keeps no internal thread -- the
//! caller invokes `tick()` periodically (anywhere from 10ms to 200ms is
//! fine) or on demand. Remaining time is recomputed from the absolute
//! start timestamp on every tick, never decremented in place, so a process
//! that gets suspended mid-run reads the true remaining time as soon as
//! the next tick fires.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> start() -> Running -> stop() -> Idle
//!                            -> reset() -> Idle (remaining = total)
//! ```
//!
//! Remaining time is signed: a running countdown keeps going into negative
//! values (overtime) until explicitly stopped.

use serde::{Deserialize, Serialize};

/// Remaining time below this threshold counts as overtime.
pub const OVERTIME_EPSILON_MS: i64 = 500;

/// How long `in_reset_transition()` stays raised after a reset. Display
/// hint only -- the view uses it to run its reset animation.
const RESET_FLASH_MS: u64 = 500;

/// Wall-clock countdown for a single timed segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    /// Allotted time in milliseconds. Changes only via `start_with`.
    total_ms: i64,
    /// Signed remaining time; negative once in overtime.
    remaining_ms: i64,
    running: bool,
    /// Wall-clock anchor (ms since epoch) set when the countdown starts.
    #[serde(default)]
    started_at_epoch_ms: Option<u64>,
    /// Remaining time snapshotted at the moment of the last start.
    /// While running: remaining = this - (now - anchor).
    #[serde(default)]
    remaining_at_start_ms: i64,
    #[serde(default)]
    reset_flash_until_ms: Option<u64>,
}

impl Countdown {
    /// Create an idle countdown with the given allotted seconds.
    pub fn new(total_secs: u32) -> Self {
        let total_ms = i64::from(total_secs) * 1000;
        Self {
            total_ms,
            remaining_ms: total_ms,
            running: false,
            started_at_epoch_ms: None,
            remaining_at_start_ms: total_ms,
            reset_flash_until_ms: None,
        }
    }

    /// Zero-duration placeholder, handed out when no real timer exists.
    pub fn zero() -> Self {
        Self::new(0)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn total_ms(&self) -> i64 {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms as f64 / 1000.0
    }

    /// True once remaining time drops under half a second. Pure function
    /// of remaining time -- not a stored transition.
    pub fn is_overtime(&self) -> bool {
        self.remaining_ms < OVERTIME_EPSILON_MS
    }

    /// 0.0 .. 1.0 fraction of the allotted time already consumed.
    /// Overtime clamps to 1.0; a zero-duration placeholder reads 1.0.
    pub fn progress(&self) -> f64 {
        if self.total_ms <= 0 {
            return 1.0;
        }
        1.0 - (self.remaining_ms.max(0) as f64 / self.total_ms as f64)
    }

    /// Remaining time as "MM:SS", prefixed with "-" in overtime.
    pub fn analog(&self) -> String {
        format_analog_secs(self.remaining_ms / 1000)
    }

    /// Whether the short post-reset display window is still open.
    pub fn in_reset_transition(&self) -> bool {
        self.in_reset_transition_at(now_ms())
    }

    pub(crate) fn in_reset_transition_at(&self, now_epoch_ms: u64) -> bool {
        self.reset_flash_until_ms
            .is_some_and(|until| now_epoch_ms < until)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down from the current remaining time. A countdown
    /// that is already running is stopped first, so there is never more
    /// than one live anchor.
    pub fn start(&mut self) {
        self.start_at(now_ms());
    }

    /// Start with a new allotted time, replacing both total and remaining.
    pub fn start_with(&mut self, total_secs: u32) {
        self.start_with_at(total_secs, now_ms());
    }

    /// Freeze remaining time at its current computed value. Idempotent.
    pub fn stop(&mut self) {
        self.stop_at(now_ms());
    }

    /// Stop and restore remaining time to the allotted total.
    pub fn reset(&mut self) {
        self.reset_at(now_ms());
    }

    /// Recompute remaining time from the wall-clock anchor. No-op while
    /// stopped.
    pub fn tick(&mut self) {
        self.tick_at(now_ms());
    }

    // ── Clock-injected variants (driven by tests) ────────────────────

    pub(crate) fn start_at(&mut self, now_epoch_ms: u64) {
        if self.running {
            self.stop_at(now_epoch_ms);
        }
        self.running = true;
        self.started_at_epoch_ms = Some(now_epoch_ms);
        self.remaining_at_start_ms = self.remaining_ms;
    }

    pub(crate) fn start_with_at(&mut self, total_secs: u32, now_epoch_ms: u64) {
        if self.running {
            self.stop_at(now_epoch_ms);
        }
        self.total_ms = i64::from(total_secs) * 1000;
        self.remaining_ms = self.total_ms;
        self.start_at(now_epoch_ms);
    }

    pub(crate) fn stop_at(&mut self, now_epoch_ms: u64) {
        self.tick_at(now_epoch_ms);
        self.running = false;
        self.started_at_epoch_ms = None;
    }

    pub(crate) fn reset_at(&mut self, now_epoch_ms: u64) {
        self.stop_at(now_epoch_ms);
        self.remaining_ms = self.total_ms;
        self.remaining_at_start_ms = self.total_ms;
        self.reset_flash_until_ms = Some(now_epoch_ms + RESET_FLASH_MS);
    }

    pub(crate) fn tick_at(&mut self, now_epoch_ms: u64) {
        if !self.running {
            return;
        }
        if let Some(anchor) = self.started_at_epoch_ms {
            let elapsed = now_epoch_ms.saturating_sub(anchor) as i64;
            self.remaining_ms = self.remaining_at_start_ms - elapsed;
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::zero()
    }
}

/// Format whole seconds as "MM:SS" with a leading "-" when negative.
pub(crate) fn format_analog_secs(secs: i64) -> String {
    let magnitude = secs.abs();
    let base = format!("{:02}:{:02}", magnitude / 60, magnitude % 60);
    if secs < 0 {
        format!("-{base}")
    } else {
        base
    }
}

pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn start_reads_full_duration() {
        let mut c = Countdown::new(360);
        c.start_at(T0);
        c.tick_at(T0);
        assert_eq!(c.remaining_ms(), 360_000);
        assert!(c.running());
    }

    #[test]
    fn remaining_is_wall_clock_delta() {
        let mut c = Countdown::new(180);
        c.start_at(T0);
        c.tick_at(T0 + 42_000);
        assert_eq!(c.remaining_ms(), 138_000);
    }

    #[test]
    fn counts_into_negative_overtime() {
        let mut c = Countdown::new(10);
        c.start_at(T0);
        c.tick_at(T0 + 25_000);
        assert_eq!(c.remaining_ms(), -15_000);
        assert!(c.running(), "overtime does not stop the countdown");
    }

    #[test]
    fn suspended_process_catches_up_on_next_tick() {
        let mut c = Countdown::new(600);
        c.start_at(T0);
        c.tick_at(T0 + 1_000);
        // No ticks for five minutes (screen lock), then one tick.
        c.tick_at(T0 + 301_000);
        assert_eq!(c.remaining_ms(), 299_000);
    }

    #[test]
    fn overtime_boundary_at_half_second() {
        let mut c = Countdown::new(1);
        c.start_at(T0);
        c.tick_at(T0 + 400); // remaining 0.6s
        assert!(!c.is_overtime());
        c.tick_at(T0 + 500); // remaining 0.5s
        assert!(!c.is_overtime());
        c.tick_at(T0 + 600); // remaining 0.4s
        assert!(c.is_overtime());
    }

    #[test]
    fn stop_freezes_and_is_idempotent() {
        let mut c = Countdown::new(60);
        c.start_at(T0);
        c.stop_at(T0 + 10_000);
        assert_eq!(c.remaining_ms(), 50_000);
        assert!(!c.running());
        // Later stops and ticks change nothing.
        c.stop_at(T0 + 20_000);
        c.tick_at(T0 + 30_000);
        assert_eq!(c.remaining_ms(), 50_000);
    }

    #[test]
    fn restart_resumes_from_frozen_remaining() {
        let mut c = Countdown::new(60);
        c.start_at(T0);
        c.stop_at(T0 + 10_000);
        c.start_at(T0 + 60_000);
        c.tick_at(T0 + 65_000);
        assert_eq!(c.remaining_ms(), 45_000);
    }

    #[test]
    fn start_while_running_rebases_the_anchor() {
        let mut c = Countdown::new(60);
        c.start_at(T0);
        c.start_at(T0 + 10_000);
        c.tick_at(T0 + 15_000);
        // The first 10s elapsed under the old anchor, 5s under the new.
        assert_eq!(c.remaining_ms(), 45_000);
        assert!(c.running());
    }

    #[test]
    fn start_with_replaces_total_and_remaining() {
        let mut c = Countdown::new(60);
        c.start_at(T0);
        c.start_with_at(300, T0 + 30_000);
        c.tick_at(T0 + 30_000);
        assert_eq!(c.total_ms(), 300_000);
        assert_eq!(c.remaining_ms(), 300_000);
    }

    #[test]
    fn reset_restores_total_regardless_of_prior_state() {
        let mut c = Countdown::new(240);
        c.start_at(T0);
        c.tick_at(T0 + 250_000); // deep in overtime
        c.reset_at(T0 + 250_000);
        assert_eq!(c.remaining_ms(), 240_000);
        assert!(!c.running());
        assert!(!c.is_overtime());
        // Repeated resets are a fixed point.
        c.reset_at(T0 + 260_000);
        assert_eq!(c.remaining_ms(), 240_000);
    }

    #[test]
    fn reset_transition_window_closes() {
        let mut c = Countdown::new(60);
        c.reset_at(T0);
        assert!(c.in_reset_transition_at(T0 + 100));
        assert!(!c.in_reset_transition_at(T0 + 600));
    }

    #[test]
    fn placeholder_progress_is_complete() {
        let c = Countdown::zero();
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.remaining_ms(), 0);
    }

    #[test]
    fn analog_formatting() {
        let mut c = Countdown::new(360);
        assert_eq!(c.analog(), "06:00");
        c.start_at(T0);
        c.tick_at(T0 + 75_000);
        assert_eq!(c.analog(), "04:45");
        c.tick_at(T0 + 425_000);
        assert_eq!(c.analog(), "-01:05");
    }

    proptest! {
        #[test]
        fn remaining_is_exact_for_any_elapsed(
            total in 1u32..=4 * 3600,
            elapsed_ms in 0u64..=8 * 3600 * 1000,
        ) {
            let mut c = Countdown::new(total);
            c.start_at(T0);
            c.tick_at(T0 + elapsed_ms);
            prop_assert_eq!(
                c.remaining_ms(),
                i64::from(total) * 1000 - elapsed_ms as i64
            );
        }

        #[test]
        fn progress_stays_in_unit_interval(
            total in 1u32..=4 * 3600,
            elapsed_ms in 0u64..=8 * 3600 * 1000,
        ) {
            let mut c = Countdown::new(total);
            c.start_at(T0);
            c.tick_at(T0 + elapsed_ms);
            let p = c.progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
