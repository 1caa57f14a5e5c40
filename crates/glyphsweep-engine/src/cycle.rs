#![forbid(unsafe_code)]

//! Periodic busy-message swaps during long-running phases.
//!
//! While the pipeline sits in `extracting` or `generating`, the engine
//! re-triggers the sweep every 3.5 seconds with the next pair from that
//! phase's message list, so the animation keeps "working" without new
//! external data. Other phases have no list and never cycle.

use std::time::Duration;

use crate::layout::Phase;

/// Wall-clock period between message swaps.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(3500);

/// Busy messages shown while themes are being extracted.
pub const EXTRACTING_CYCLES: [[&str; 2]; 5] = [
    ["SCANNING CUSTOMER SIGNALS", "EXTRACTING THEMES"],
    ["WEIGHTING BY ARR TIER", "CORRELATING PATTERNS"],
    ["ANALYZING FEATURE ADOPTION", "CROSS-REFERENCING SEGMENTS"],
    ["PROCESSING CHURN SIGNALS", "BUILDING THEME MODEL"],
    ["RANKING BY REVENUE IMPACT", "IDENTIFYING TOP THEME"],
];

/// Busy messages shown while the spec is being generated.
pub const GENERATING_CYCLES: [[&str; 2]; 5] = [
    ["DRAFTING SCHEMA CHANGES", "GENERATING SPEC"],
    ["DEFINING API ENDPOINTS", "MAPPING DATA MODELS"],
    ["BUILDING TASK GRAPH", "SCOPING EPICS + STORIES"],
    ["ESTIMATING COMPLEXITY", "WRITING SUBTASKS"],
    ["FINALIZING SPEC", "VALIDATING STRUCTURE"],
];

/// Message table for a phase, if it cycles at all.
#[must_use]
pub fn cycles_for(phase: Phase) -> Option<&'static [[&'static str; 2]; 5]> {
    match phase {
        Phase::Extracting => Some(&EXTRACTING_CYCLES),
        Phase::Generating => Some(&GENERATING_CYCLES),
        _ => None,
    }
}

/// Accumulated-time scheduler for one phase's message list.
///
/// The index advances before a pair is produced, so the first fire after
/// entering a phase shows pair #1 (pair #0 is what the phase layout itself
/// already displayed).
#[derive(Debug, Clone)]
pub struct CycleState {
    table: Option<&'static [[&'static str; 2]; 5]>,
    index: usize,
    elapsed: Duration,
}

impl CycleState {
    /// Scheduler for `phase`, starting at the head of its list. Phases
    /// without a list produce a scheduler that never fires.
    #[must_use]
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            table: cycles_for(phase),
            index: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Whether this phase cycles at all.
    #[must_use]
    pub fn is_cycling(&self) -> bool {
        self.table.is_some()
    }

    /// Accumulate `dt`; returns the next message pair each time a full
    /// period elapses. Carry-over is preserved, so a large `dt` can fire
    /// on consecutive calls but a single call fires at most once.
    pub fn tick(&mut self, dt: Duration) -> Option<[&'static str; 2]> {
        let table = self.table?;
        self.elapsed += dt;
        if self.elapsed < CYCLE_PERIOD {
            return None;
        }
        self.elapsed -= CYCLE_PERIOD;
        self.index = (self.index + 1) % table.len();
        Some(table[self.index])
    }
}
