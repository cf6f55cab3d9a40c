//! Per-file tick timeline assembly
//!
//! Places parsed fixes onto a one-tick-per-second timeline anchored at the
//! first valid fix of the file. Sentences arrive at a nominal ~1 Hz cadence
//! with gaps, duplicates and corrupt records; the assembler turns that into
//! a slot sequence where every missing or failed report is an explicit
//! unresolved slot for the reconstructor to fill.

use crate::types::{GpsFix, TelemetrySample};
use chrono::NaiveDateTime;

/// Per-file assembly state. One instance per source file; nothing here
/// outlives the file it was built for.
#[derive(Debug, Default)]
pub struct TimelineAssembler {
    slots: Vec<Option<TelemetrySample>>,
    ticks: usize,
    sentences: usize,
    base: Option<(NaiveDateTime, usize)>,
    last_timestamp: Option<NaiveDateTime>,
}

impl TimelineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sentences pushed so far, including failed ones.
    pub fn sentence_count(&self) -> usize {
        self.sentences
    }

    /// Feed the next parse result for this file. `None` is a decode or parse
    /// failure and consumes one tick as an unresolved slot.
    pub fn push(&mut self, fix: Option<GpsFix>) {
        self.sentences += 1;

        let fix = match fix {
            Some(fix) => fix,
            None => {
                self.ticks += 1;
                self.slots.push(None);
                return;
            }
        };

        let (base_timestamp, base_offset) = *self
            .base
            .get_or_insert((fix.timestamp, self.ticks));

        // whole elapsed seconds since the anchor, plus the anchor's own tick
        let elapsed = (fix.timestamp - base_timestamp).num_seconds();
        let target_tick = elapsed + base_offset as i64;

        while (self.ticks as i64) < target_tick {
            self.ticks += 1;
            self.slots.push(None);
        }

        // a re-report of the same second does not consume a tick
        if self.last_timestamp == Some(fix.timestamp) {
            return;
        }
        self.last_timestamp = Some(fix.timestamp);

        self.ticks += 1;
        self.slots.push(Some(fix.sample()));
    }

    /// Close the file's timeline: pad unresolved slots until the tick count
    /// matches the number of sentences processed.
    pub fn finish(mut self) -> Vec<Option<TelemetrySample>> {
        while self.ticks < self.sentences {
            self.ticks += 1;
            self.slots.push(None);
        }

        self.slots
    }
}
