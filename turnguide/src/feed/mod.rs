//! Position feeds.
//!
//! A [`PositionFeed`] is any producer of position fixes over time: a
//! mock file replayed by the CLI, a live sensor callback, or a test
//! harness stepping fixes by hand. The tracker is agnostic to the
//! source and to pacing; how fast fixes arrive is entirely the feed's
//! (or the embedding loop's) concern.

mod replay;

pub use replay::{FixParseError, ReplayFeed};

use thiserror::Error;

use crate::geo::GeoPoint;

/// Errors raised while opening or reading a position source.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The position file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A producer of position fixes.
pub trait PositionFeed {
    /// Next fix, or `None` once the feed is exhausted.
    fn next_fix(&mut self) -> Option<GeoPoint>;
}
