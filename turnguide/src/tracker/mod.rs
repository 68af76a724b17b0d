//! Instruction progression tracking.
//!
//! This is the stateful core of the crate: it consumes position fixes
//! one at a time against a fixed [`InstructionSequence`] and decides
//! when guidance advances to the next maneuver.
//!
//! # State machine
//!
//! The maneuver pointer is 1-based over the sequence. Position `i`
//! (for `i` in `[1, N-1]`) is the upcoming maneuver being measured;
//! position `N` is the arrival marker, and reaching it completes the
//! route without measuring its point.
//!
//! ```text
//!            distance < threshold              distance < threshold
//!            (maneuvers remain)                (pointer reaches N)
//! Following(i) ────────────────► Following(i+1) ────────────────► Arrived
//!     ▲  │
//!     └──┘ distance ≥ threshold (self-loop, no advancement)
//! ```
//!
//! The pointer advances by exactly one per fix, even when a sparse fix
//! is already within range of several maneuvers. `Arrived` is
//! terminal: further updates are no-ops.
//!
//! The tracker has no clock and performs no I/O; pacing between fixes
//! belongs to the feed. It is not internally synchronized: callers
//! that share a tracker across threads must serialize access.

use serde::Serialize;
use tracing::debug;

use crate::geo::{DistanceCalc, GeoPoint, GreatCircle};
use crate::route::InstructionSequence;

/// Distance below which a maneuver counts as reached, in meters.
///
/// Matches the field calibration of the source guidance loop; strictly
/// less-than, so a fix at exactly this distance does not advance.
pub const DEFAULT_THRESHOLD_M: f64 = 100.0;

/// Tracker tuning knobs.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Maneuver-reached distance in meters.
    pub threshold_meters: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_M,
        }
    }
}

impl TrackerConfig {
    /// Set the maneuver-reached threshold.
    pub fn with_threshold_meters(mut self, threshold_meters: f64) -> Self {
        self.threshold_meters = threshold_meters;
        self
    }
}

/// Whether the tracker is still guiding or the route is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    /// Guidance is in progress.
    Following,
    /// The final maneuver was reached; terminal.
    Arrived,
}

/// Per-fix guidance output.
///
/// Ephemeral: produced for one position update and handed to the
/// caller, never retained by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidanceEvent {
    /// Description of the maneuver the fix was measured against.
    pub instruction: String,
    /// Distance from the fix to that maneuver, in meters.
    pub remaining_meters: f64,
    /// True when this fix reached the maneuver and guidance advanced.
    pub advanced: bool,
}

/// Result of feeding one position fix to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Guidance continues; the event describes the upcoming maneuver.
    Guidance(GuidanceEvent),
    /// This fix reached the last maneuver before the arrival marker.
    /// Carries the closing event; the caller should stop feeding
    /// updates.
    Arrived(GuidanceEvent),
    /// The route was already complete; the fix was ignored.
    AlreadyArrived,
}

/// Stateful progression tracker over a fixed instruction sequence.
///
/// Construction cannot fail: [`InstructionSequence`] is non-empty by
/// construction, which is where the empty-route error lives. A
/// one-instruction sequence (arrival point only) yields a tracker that
/// is already arrived.
pub struct InstructionTracker {
    sequence: InstructionSequence,
    threshold_meters: f64,
    distance: Box<dyn DistanceCalc + Send>,
    current_index: usize,
    last_position: Option<GeoPoint>,
    status: TrackingStatus,
}

impl InstructionTracker {
    /// Create a tracker using the default great-circle proximity.
    pub fn new(sequence: InstructionSequence, config: TrackerConfig) -> Self {
        Self::with_distance_calc(sequence, config, Box::new(GreatCircle))
    }

    /// Create a tracker with an injected proximity function.
    pub fn with_distance_calc(
        sequence: InstructionSequence,
        config: TrackerConfig,
        distance: Box<dyn DistanceCalc + Send>,
    ) -> Self {
        let status = if sequence.len() <= 1 {
            TrackingStatus::Arrived
        } else {
            TrackingStatus::Following
        };

        Self {
            sequence,
            threshold_meters: config.threshold_meters,
            distance,
            // First maneuver after the start point (1-based)
            current_index: 1,
            last_position: None,
            status,
        }
    }

    /// Feed one position fix and decide whether guidance advances.
    ///
    /// Computes the distance from the fix to the current maneuver and
    /// emits a [`GuidanceEvent`] for it. When the distance is strictly
    /// below the threshold the pointer advances by exactly one;
    /// reaching the end of the sequence transitions to
    /// [`TrackingStatus::Arrived`]. Calling after arrival is an
    /// idempotent no-op.
    pub fn on_position_update(&mut self, fix: GeoPoint) -> Progress {
        if self.status == TrackingStatus::Arrived {
            return Progress::AlreadyArrived;
        }

        // Following implies 1 <= current_index < sequence.len()
        let instruction = &self.sequence.instructions()[self.current_index - 1];
        let remaining = self.distance.distance_meters(&fix, &instruction.maneuver);
        let advanced = remaining < self.threshold_meters;

        let event = GuidanceEvent {
            instruction: instruction.description.clone(),
            remaining_meters: remaining,
            advanced,
        };

        self.last_position = Some(fix);

        if advanced {
            // One step per fix, even when the fix is also within range
            // of later maneuvers
            self.current_index += 1;
            debug!(
                index = self.current_index,
                distance_m = remaining,
                "maneuver reached"
            );
            if self.current_index == self.sequence.len() {
                self.status = TrackingStatus::Arrived;
                return Progress::Arrived(event);
            }
        } else {
            debug!(
                index = self.current_index,
                distance_m = remaining,
                "en route to maneuver"
            );
        }

        Progress::Guidance(event)
    }

    /// 1-based position of the maneuver guidance is measured against.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current progression status.
    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// True once the route is complete.
    pub fn is_complete(&self) -> bool {
        self.status == TrackingStatus::Arrived
    }

    /// The most recent fix processed, if any.
    pub fn last_position(&self) -> Option<GeoPoint> {
        self.last_position
    }

    /// The maneuver-reached threshold in meters.
    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    /// The instruction sequence being tracked.
    pub fn sequence(&self) -> &InstructionSequence {
        &self.sequence
    }
}
