//! Simulate command - replay a mock position file against a route.
//!
//! Feeds each fix to the instruction tracker and prints the resulting
//! guidance line, pacing fixes at the configured interval to mimic
//! live GPS events. Ctrl+C interrupts the replay between fixes.
//!
//! With `--json`, stdout carries guidance events as JSON lines and
//! nothing else; banners and closing notes are suppressed so the
//! stream stays machine-readable.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use tracing::debug;
use turnguide::config::ConfigFile;
use turnguide::feed::{PositionFeed, ReplayFeed};
use turnguide::route::InstructionSequence;
use turnguide::tracker::{GuidanceEvent, InstructionTracker, Progress, TrackerConfig};

use crate::error::CliError;

/// Arguments for the simulate command.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Route file: one "latitude, longitude, description" per line
    pub route: PathBuf,

    /// Mock position file: one "latitude, longitude" per line
    pub positions: PathBuf,

    /// Maneuver-reached distance in meters (overrides config file)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Milliseconds between replayed fixes (overrides config file)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Emit guidance events as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// How a replay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayOutcome {
    /// The route was completed.
    Completed,
    /// Ctrl+C stopped the replay.
    Interrupted,
    /// The position file ran out before the route was completed.
    FeedExhausted,
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();

    // Resolve settings: CLI > config file > default
    let threshold = resolve_threshold(args.threshold, config.guidance.threshold_meters)?;
    let interval = Duration::from_millis(
        args.interval_ms
            .unwrap_or(config.feed.update_interval_millis),
    );

    debug!(
        threshold_m = threshold,
        interval_ms = interval.as_millis() as u64,
        "resolved simulation settings"
    );

    let sequence = InstructionSequence::load(&args.route)?;
    let mut feed = ReplayFeed::from_path(&args.positions)?;

    if !args.json {
        println!("Turnguide Simulation v{}", turnguide::VERSION);
        println!("=======================");
        println!();
        println!("Route:      {} ({} instructions)", args.route.display(), sequence.len());
        println!("Positions:  {} ({} fixes)", args.positions.display(), feed.remaining());
        println!("Threshold:  {} m", threshold);
        println!("Interval:   {} ms", interval.as_millis());
        println!();
        println!("Press Ctrl+C to stop the replay");
        println!();
    }

    let mut tracker = InstructionTracker::new(
        sequence,
        TrackerConfig::default().with_threshold_meters(threshold),
    );

    // Degenerate route: arrival point only, nothing to guide
    if tracker.is_complete() {
        finish(ReplayOutcome::Completed, args.json);
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_handler = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_handler.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let mut first = true;
    while let Some(fix) = feed.next_fix() {
        if !first {
            pace(interval, &shutdown);
        }
        first = false;

        if shutdown.load(Ordering::SeqCst) {
            finish(ReplayOutcome::Interrupted, args.json);
            return Ok(());
        }

        match tracker.on_position_update(fix) {
            Progress::Guidance(event) => print_event(&event, args.json)?,
            Progress::Arrived(event) => {
                print_event(&event, args.json)?;
                finish(ReplayOutcome::Completed, args.json);
                return Ok(());
            }
            Progress::AlreadyArrived => break,
        }
    }

    finish(ReplayOutcome::FeedExhausted, args.json);
    Ok(())
}

/// Resolve the maneuver-reached threshold, validating a CLI override
/// the same way the config file loader does.
fn resolve_threshold(cli_override: Option<f64>, from_config: f64) -> Result<f64, CliError> {
    let threshold = cli_override.unwrap_or(from_config);
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(CliError::Config(format!(
            "invalid threshold '{}': must be a positive number of meters",
            threshold
        )));
    }
    Ok(threshold)
}

/// Print one guidance event, plain or as a JSON line.
fn print_event(event: &GuidanceEvent, json: bool) -> Result<(), CliError> {
    if json {
        let line = serde_json::to_string(event).map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", line);
    } else {
        println!("{} in {:.0} meters", event.instruction, event.remaining_meters);
    }
    Ok(())
}

/// Closing note for an outcome; `None` in JSON mode, where stdout
/// must carry only event lines.
fn outcome_note(outcome: ReplayOutcome, json: bool) -> Option<&'static str> {
    if json {
        return None;
    }
    Some(match outcome {
        ReplayOutcome::Completed => "Route complete.",
        ReplayOutcome::Interrupted => "Replay interrupted.",
        ReplayOutcome::FeedExhausted => "Position feed exhausted before the route was completed.",
    })
}

fn finish(outcome: ReplayOutcome, json: bool) {
    if let Some(note) = outcome_note(outcome, json) {
        println!();
        println!("{}", note);
    }
}

/// Sleep for one replay interval, waking early on shutdown.
fn pace(interval: Duration, shutdown: &Arc<AtomicBool>) {
    let deadline = Instant::now() + interval;
    loop {
        if shutdown.load(Ordering::SeqCst) {
            return;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return;
        }
        std::thread::sleep(remaining.min(Duration::from_millis(100)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_keeps_stdout_free_of_notes() {
        // Interrupt and exhaustion must not leak plain text into the
        // JSON-lines stream
        for outcome in [
            ReplayOutcome::Completed,
            ReplayOutcome::Interrupted,
            ReplayOutcome::FeedExhausted,
        ] {
            assert_eq!(outcome_note(outcome, true), None);
        }
    }

    #[test]
    fn test_plain_mode_reports_every_outcome() {
        assert_eq!(
            outcome_note(ReplayOutcome::Completed, false),
            Some("Route complete.")
        );
        assert_eq!(
            outcome_note(ReplayOutcome::Interrupted, false),
            Some("Replay interrupted.")
        );
        assert_eq!(
            outcome_note(ReplayOutcome::FeedExhausted, false),
            Some("Position feed exhausted before the route was completed.")
        );
    }

    #[test]
    fn test_threshold_override_must_be_positive() {
        assert!(resolve_threshold(Some(-5.0), 100.0).is_err());
        assert!(resolve_threshold(Some(0.0), 100.0).is_err());
        assert!(resolve_threshold(Some(f64::NAN), 100.0).is_err());
        assert!(resolve_threshold(Some(f64::INFINITY), 100.0).is_err());
    }

    #[test]
    fn test_threshold_resolution_order() {
        // CLI override wins over the config value
        assert_eq!(resolve_threshold(Some(75.0), 100.0).unwrap(), 75.0);
        // No override falls back to the config value
        assert_eq!(resolve_threshold(None, 250.0).unwrap(), 250.0);
    }
}
