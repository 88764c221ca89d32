//! Session state for one debate round.
//!
//! The session exclusively owns the timer lifecycle: one [`Countdown`] per
//! segment of the selected event, plus the two side-scoped prep budgets.
//! The front end only reads state and invokes operations. Everything here
//! runs on a single thread; the caller drives time by invoking `tick()`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, EventPreset, Segment, SegmentKind, Side};
use crate::error::{CoreError, Result};
use crate::events::{Event, PrepSnapshot};
use crate::timer::{Countdown, PrepTimer};

/// Round-level state container. Serialized whole into the kv store, which
/// is what carries prep remaining/baseline across process restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    event: Option<String>,
    segment_index: usize,
    timers: Vec<Countdown>,
    prep_aff: PrepTimer,
    prep_neg: PrepTimer,
    /// Zero-duration stand-in handed out when the index has no timer.
    #[serde(skip)]
    placeholder: Countdown,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn event(&self) -> Option<&str> {
        self.event.as_deref()
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn segment_count(&self) -> usize {
        self.timers.len()
    }

    /// Preset for the selected event, if one is selected.
    pub fn preset(&self) -> Option<EventPreset> {
        self.event.as_deref().and_then(catalog::preset)
    }

    /// Metadata of the segment under the cursor. `None` when no round is
    /// in progress.
    pub fn current_segment(&self) -> Option<Segment> {
        if self.timers.is_empty() {
            return None;
        }
        self.preset()?.segments.get(self.segment_index).cloned()
    }

    /// Timer under the cursor, or the zero-duration placeholder when the
    /// index is out of bounds. Never panics.
    pub fn current_timer(&self) -> &Countdown {
        self.timers.get(self.segment_index).unwrap_or(&self.placeholder)
    }

    pub fn current_timer_mut(&mut self) -> &mut Countdown {
        if self.segment_index < self.timers.len() {
            &mut self.timers[self.segment_index]
        } else {
            &mut self.placeholder
        }
    }

    pub fn prep(&self, side: Side) -> &PrepTimer {
        match side {
            Side::Aff => &self.prep_aff,
            Side::Neg => &self.prep_neg,
        }
    }

    pub fn prep_mut(&mut self, side: Side) -> &mut PrepTimer {
        match side {
            Side::Aff => &mut self.prep_aff,
            Side::Neg => &mut self.prep_neg,
        }
    }

    /// Full observable state, one poll's worth.
    pub fn snapshot(&self) -> Event {
        let segment = self.current_segment();
        let in_round = segment.is_some();
        let timer = self.current_timer();
        Event::StateSnapshot {
            event: self.event.clone(),
            segment_index: self.segment_index,
            segment_count: self.timers.len(),
            title: segment.as_ref().map(|s| s.title.clone()).unwrap_or_default(),
            kind: segment
                .as_ref()
                .map(|s| s.kind)
                .unwrap_or(SegmentKind::Other),
            speaker: segment.and_then(|s| s.speaker),
            running: timer.running(),
            remaining_ms: timer.remaining_ms(),
            total_ms: timer.total_ms(),
            analog: timer.analog(),
            progress: timer.progress(),
            // The zero-duration placeholder would read as overtime; an
            // idle session is not.
            overtime: in_round && timer.is_overtime(),
            prep_aff: prep_snapshot(&self.prep_aff),
            prep_neg: prep_snapshot(&self.prep_neg),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select an event: cursor to the first segment, one fresh timer per
    /// segment, both prep budgets rebased to the preset's allowance.
    /// Unknown names are a hard error.
    pub fn select_event(&mut self, name: &str) -> Result<Event> {
        let preset =
            catalog::preset(name).ok_or_else(|| CoreError::UnknownEvent(name.to_string()))?;
        self.event = Some(name.to_string());
        self.segment_index = 0;
        self.timers = preset
            .segments
            .iter()
            .map(|s| Countdown::new(s.duration_secs))
            .collect();
        self.prep_aff.rebase(preset.prep_secs);
        self.prep_neg.rebase(preset.prep_secs);
        Ok(Event::EventSelected {
            name: preset.name.to_string(),
            segment_count: preset.segment_count(),
            prep_secs: preset.prep_secs,
            at: Utc::now(),
        })
    }

    /// Move the cursor. Out-of-range or same-index selections are no-ops.
    pub fn select_segment(&mut self, index: usize) -> Option<Event> {
        if index >= self.timers.len() || index == self.segment_index {
            return None;
        }
        let from = self.segment_index;
        self.segment_index = index;
        Some(Event::SegmentChanged {
            from,
            to: index,
            at: Utc::now(),
        })
    }

    pub fn next_segment(&mut self) -> Option<Event> {
        self.select_segment(self.segment_index + 1)
    }

    pub fn prev_segment(&mut self) -> Option<Event> {
        self.segment_index
            .checked_sub(1)
            .and_then(|i| self.select_segment(i))
    }

    /// Start the timer under the cursor. `None` when no round is in
    /// progress (the placeholder is not worth starting).
    pub fn start_current(&mut self) -> Option<Event> {
        self.start_current_inner(None)
    }

    /// Start with a replacement duration, the `start(with:)` form.
    pub fn start_current_with(&mut self, total_secs: u32) -> Option<Event> {
        self.start_current_inner(Some(total_secs))
    }

    fn start_current_inner(&mut self, override_secs: Option<u32>) -> Option<Event> {
        if self.segment_index >= self.timers.len() {
            return None;
        }
        let kind = self
            .current_segment()
            .map(|s| s.kind)
            .unwrap_or(SegmentKind::Other);
        let timer = &mut self.timers[self.segment_index];
        match override_secs {
            Some(secs) => timer.start_with(secs),
            None => timer.start(),
        }
        Some(Event::TimerStarted {
            segment_index: self.segment_index,
            kind,
            remaining_ms: timer.remaining_ms(),
            at: Utc::now(),
        })
    }

    pub fn stop_current(&mut self) -> Option<Event> {
        if self.segment_index >= self.timers.len() {
            return None;
        }
        let timer = &mut self.timers[self.segment_index];
        timer.stop();
        Some(Event::TimerStopped {
            segment_index: self.segment_index,
            remaining_ms: timer.remaining_ms(),
            at: Utc::now(),
        })
    }

    pub fn reset_current(&mut self) -> Option<Event> {
        if self.segment_index >= self.timers.len() {
            return None;
        }
        self.timers[self.segment_index].reset();
        Some(Event::TimerReset {
            segment_index: self.segment_index,
            at: Utc::now(),
        })
    }

    /// End the round: drop all segment timers, cursor back to the start,
    /// prep budgets back to their baselines. The front end navigates back
    /// to event selection on this event.
    pub fn end_round(&mut self) -> Event {
        self.timers.clear();
        self.segment_index = 0;
        self.prep_aff.reset();
        self.prep_neg.reset();
        Event::RoundEnded { at: Utc::now() }
    }

    pub fn prep_start(&mut self, side: Side) -> Event {
        let prep = self.prep_mut(side);
        prep.start();
        Event::PrepStarted {
            side,
            remaining_secs: prep.remaining_secs(),
            at: Utc::now(),
        }
    }

    pub fn prep_stop(&mut self, side: Side) -> Event {
        let prep = self.prep_mut(side);
        prep.stop();
        Event::PrepStopped {
            side,
            remaining_secs: prep.remaining_secs(),
            last_run_secs: prep.last_run_secs(),
            at: Utc::now(),
        }
    }

    pub fn prep_reset(&mut self, side: Side) -> Event {
        let prep = self.prep_mut(side);
        prep.reset();
        Event::PrepReset {
            side,
            baseline_secs: prep.baseline_secs(),
            at: Utc::now(),
        }
    }

    /// Recompute the current timer and both prep budgets from the wall
    /// clock. Called on every poll.
    pub fn tick(&mut self) {
        if let Some(timer) = self.timers.get_mut(self.segment_index) {
            timer.tick();
        }
        self.prep_aff.tick();
        self.prep_neg.tick();
    }
}

fn prep_snapshot(prep: &PrepTimer) -> PrepSnapshot {
    PrepSnapshot {
        remaining_secs: prep.remaining_secs(),
        baseline_secs: prep.baseline_secs(),
        running: prep.running(),
        overtime: prep.is_overtime(),
        last_run_secs: prep.last_run_secs(),
    }
}
