//! Route instructions produced by an external routing engine.
//!
//! The library never computes routes. It consumes an
//! [`InstructionSequence`] that some routing engine has already
//! produced, either through the [`RoutingEngine`] trait or loaded from
//! a serialized route file. Instructions are read-only to the tracker.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::geo::{GeoError, GeoPoint};

/// Errors raised while building or loading an instruction sequence.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The sequence contained no instructions. A valid route always has
    /// at least the arrival point.
    #[error("route has no instructions")]
    EmptyRoute,

    /// A route file line did not match `latitude, longitude, description`.
    #[error("route file line {line}: malformed instruction '{text}'")]
    MalformedInstruction { line: usize, text: String },

    /// A route file line carried coordinates outside geodetic bounds.
    #[error("route file line {line}: {source}")]
    OutOfRange { line: usize, source: GeoError },

    /// The route file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by an external routing engine.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The engine found no path between the requested points.
    #[error("no path found from {origin} to {destination}")]
    NoPathFound {
        origin: GeoPoint,
        destination: GeoPoint,
    },

    /// The engine or its map data was unavailable.
    #[error("routing engine unavailable: {0}")]
    Unavailable(String),
}

/// External routing collaborator.
///
/// Given an origin, a destination and a named travel profile (for
/// example `"car"`), produces the ordered maneuver list for the trip.
/// The tracker treats the result as opaque, already-validated input.
pub trait RoutingEngine {
    /// Compute a route, or report that none exists.
    fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: &str,
    ) -> Result<InstructionSequence, RoutingError>;
}

/// One maneuver of a computed route.
///
/// Its order is its index within the [`InstructionSequence`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInstruction {
    /// Coordinate at which the maneuver occurs.
    pub maneuver: GeoPoint,
    /// Human-readable maneuver text, e.g. "Turn left onto MG Road".
    pub description: String,
}

impl RouteInstruction {
    /// Create an instruction at the given maneuver point.
    pub fn new(maneuver: GeoPoint, description: impl Into<String>) -> Self {
        Self {
            maneuver,
            description: description.into(),
        }
    }
}

/// Ordered, non-empty list of route instructions.
///
/// Length 1 denotes a degenerate route with no maneuvers before the
/// arrival point.
#[derive(Debug, Clone)]
pub struct InstructionSequence {
    instructions: Vec<RouteInstruction>,
}

impl InstructionSequence {
    /// Build a sequence, rejecting an empty instruction list.
    pub fn new(instructions: Vec<RouteInstruction>) -> Result<Self, RouteError> {
        if instructions.is_empty() {
            return Err(RouteError::EmptyRoute);
        }
        Ok(Self { instructions })
    }

    /// Load a serialized route file.
    ///
    /// One instruction per line as `latitude, longitude, description`,
    /// optional surrounding whitespace, blank lines ignored. The
    /// description may itself contain commas. Unlike the mock position
    /// feed, a malformed line here is fatal: the route is supposed to
    /// be the already-validated output of a routing run.
    pub fn load(path: &Path) -> Result<Self, RouteError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut instructions = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            instructions.push(parse_instruction(text, index + 1)?);
        }

        Self::new(instructions)
    }

    /// Number of instructions, always ≥ 1.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always false; kept for interface completeness.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `index`, if within bounds.
    pub fn get(&self, index: usize) -> Option<&RouteInstruction> {
        self.instructions.get(index)
    }

    /// All instructions in route order.
    pub fn instructions(&self) -> &[RouteInstruction] {
        &self.instructions
    }
}

/// Parse one `latitude, longitude, description` route file line.
fn parse_instruction(text: &str, line: usize) -> Result<RouteInstruction, RouteError> {
    let malformed = || RouteError::MalformedInstruction {
        line,
        text: text.to_string(),
    };

    let mut parts = text.splitn(3, ',');
    let latitude: f64 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    let longitude: f64 = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .ok_or_else(malformed)?;
    let description = parts.next().map(str::trim).ok_or_else(malformed)?;
    if description.is_empty() {
        return Err(malformed());
    }

    let maneuver =
        GeoPoint::new(latitude, longitude).map_err(|source| RouteError::OutOfRange { line, source })?;

    Ok(RouteInstruction::new(maneuver, description))
}
