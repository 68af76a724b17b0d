//! Turnguide - turn-by-turn guidance progression
//!
//! This library provides the core logic for simulated turn-by-turn
//! guidance: given a precomputed route (an ordered list of maneuver
//! instructions from an external routing engine) and a stream of
//! position fixes, it decides per fix how far the traveler is from the
//! upcoming maneuver and when guidance advances to the next one.
//!
//! # Architecture
//!
//! ```text
//! PositionFeed ─────► InstructionTracker ◄───── InstructionSequence
//! (file replay,       (stateful core)           (static routing output)
//!  live sensor)              │
//!                            ▼
//!                     GuidanceEvent / arrival
//!                     (consumed by a display layer)
//! ```
//!
//! The tracker is synchronous and pacing-agnostic: how fast fixes
//! arrive is the feed's concern. Route computation belongs to an
//! external [`route::RoutingEngine`] implementation.
//!
//! # Example
//!
//! ```ignore
//! use turnguide::{InstructionTracker, Progress, ReplayFeed, TrackerConfig};
//! use turnguide::feed::PositionFeed;
//! use turnguide::route::InstructionSequence;
//!
//! let sequence = InstructionSequence::load("route.txt".as_ref())?;
//! let mut feed = ReplayFeed::from_path("positions.txt")?;
//! let mut tracker = InstructionTracker::new(sequence, TrackerConfig::default());
//!
//! while let Some(fix) = feed.next_fix() {
//!     match tracker.on_position_update(fix) {
//!         Progress::Guidance(event) => {
//!             println!("{} in {:.0} meters", event.instruction, event.remaining_meters);
//!         }
//!         Progress::Arrived(event) => {
//!             println!("{} in {:.0} meters", event.instruction, event.remaining_meters);
//!             break;
//!         }
//!         Progress::AlreadyArrived => break,
//!     }
//! }
//! ```

pub mod config;
pub mod feed;
pub mod geo;
pub mod route;
pub mod tracker;

pub use feed::{PositionFeed, ReplayFeed};
pub use geo::{DistanceCalc, GeoPoint, GreatCircle};
pub use route::{InstructionSequence, RouteInstruction, RoutingEngine};
pub use tracker::{GuidanceEvent, InstructionTracker, Progress, TrackerConfig, TrackingStatus};

/// Crate version, exposed for CLI banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
