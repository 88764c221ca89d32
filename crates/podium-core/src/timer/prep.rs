//! Side-scoped prep-time budget.
//!
//! Each debate side gets one `PrepTimer`. It follows the same wall-clock
//! anchor protocol as [`Countdown`](super::Countdown) but is independent
//! of the segment index, survives process restarts (the session serializes
//! it into the kv store), and resets to a captured baseline rather than to
//! a fixed total.

use serde::{Deserialize, Serialize};

use super::countdown::{format_analog_secs, now_ms, OVERTIME_EPSILON_MS};

/// Prep budget for one side. Counts into negative values when the side
/// overdraws its budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepTimer {
    /// Value `reset()` restores. Captured when a preset is selected.
    baseline_secs: u32,
    /// Signed remaining budget in milliseconds.
    remaining_ms: i64,
    running: bool,
    #[serde(default)]
    started_at_epoch_ms: Option<u64>,
    #[serde(default)]
    remaining_at_start_ms: i64,
    /// Length of the most recent continuous run, for display.
    #[serde(default)]
    last_run_secs: u32,
}

impl PrepTimer {
    pub fn new(baseline_secs: u32) -> Self {
        let remaining_ms = i64::from(baseline_secs) * 1000;
        Self {
            baseline_secs,
            remaining_ms,
            running: false,
            started_at_epoch_ms: None,
            remaining_at_start_ms: remaining_ms,
            last_run_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn baseline_secs(&self) -> u32 {
        self.baseline_secs
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_ms / 1000
    }

    pub fn last_run_secs(&self) -> u32 {
        self.last_run_secs
    }

    pub fn is_overtime(&self) -> bool {
        self.remaining_ms < OVERTIME_EPSILON_MS
    }

    /// Remaining budget as "MM:SS", prefixed with "-" once overdrawn.
    pub fn analog(&self) -> String {
        format_analog_secs(self.remaining_ms / 1000)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.start_at(now_ms());
    }

    pub fn stop(&mut self) {
        self.stop_at(now_ms());
    }

    /// Stop and restore the captured baseline.
    pub fn reset(&mut self) {
        self.reset_at(now_ms());
    }

    pub fn tick(&mut self) {
        self.tick_at(now_ms());
    }

    /// Replace the baseline and restore the full budget. Called when a
    /// preset is selected or a round ends.
    pub fn rebase(&mut self, baseline_secs: u32) {
        self.running = false;
        self.started_at_epoch_ms = None;
        self.baseline_secs = baseline_secs;
        self.remaining_ms = i64::from(baseline_secs) * 1000;
        self.remaining_at_start_ms = self.remaining_ms;
        self.last_run_secs = 0;
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

    pub(crate) fn stop_at(&mut self, now_epoch_ms: u64) {
        if let Some(anchor) = self.started_at_epoch_ms {
            let elapsed = now_epoch_ms.saturating_sub(anchor);
            self.remaining_ms = self.remaining_at_start_ms - elapsed as i64;
            self.last_run_secs = (elapsed / 1000) as u32;
        }
        self.running = false;
        self.started_at_epoch_ms = None;
    }

    pub(crate) fn reset_at(&mut self, now_epoch_ms: u64) {
        self.stop_at(now_epoch_ms);
        self.remaining_ms = i64::from(self.baseline_secs) * 1000;
        self.remaining_at_start_ms = self.remaining_ms;
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

impl Default for PrepTimer {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn counts_down_from_baseline() {
        let mut p = PrepTimer::new(180);
        p.start_at(T0);
        p.tick_at(T0 + 30_000);
        assert_eq!(p.remaining_secs(), 150);
    }

    #[test]
    fn overdraw_goes_negative() {
        let mut p = PrepTimer::new(60);
        p.start_at(T0);
        p.tick_at(T0 + 90_000);
        assert_eq!(p.remaining_secs(), -30);
        assert!(p.is_overtime());
        assert_eq!(p.analog(), "-00:30");
    }

    #[test]
    fn stop_records_last_continuous_run() {
        let mut p = PrepTimer::new(300);
        p.start_at(T0);
        p.stop_at(T0 + 47_000);
        assert_eq!(p.last_run_secs(), 47);
        assert_eq!(p.remaining_secs(), 253);
        // A second run replaces, not accumulates.
        p.start_at(T0 + 100_000);
        p.stop_at(T0 + 112_000);
        assert_eq!(p.last_run_secs(), 12);
        assert_eq!(p.remaining_secs(), 241);
    }

    #[test]
    fn reset_restores_baseline_not_nominal() {
        let mut p = PrepTimer::new(300);
        p.rebase(240); // baseline re-captured at a different value
        p.start_at(T0);
        p.tick_at(T0 + 50_000);
        p.reset_at(T0 + 50_000);
        assert_eq!(p.remaining_secs(), 240);
        assert!(!p.running());
    }

    #[test]
    fn rebase_clears_run_state() {
        let mut p = PrepTimer::new(180);
        p.start_at(T0);
        p.stop_at(T0 + 20_000);
        p.rebase(300);
        assert_eq!(p.baseline_secs(), 300);
        assert_eq!(p.remaining_secs(), 300);
        assert_eq!(p.last_run_secs(), 0);
    }
}
