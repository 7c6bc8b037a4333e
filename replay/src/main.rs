//! Replays a recorded pointer trace through the swipe recognizer and prints
//! every notification as a JSON line on stdout.

mod output;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use swipe_core::{ChannelNotifier, GestureTracker, Notification, SurfaceId, TrackerConfig};
use swipe_platform::{AdapterConfig, AdapterStats, SurfaceInput, Trace};
use tracing::info;

use output::OutputLine;

#[derive(Debug, Parser)]
#[command(name = "swipe-replay", about = "Replay a pointer trace through the swipe recognizer")]
struct Args {
    /// Trace file (.yaml, .yml or .json)
    trace: PathBuf,

    /// Config file; defaults to the user config location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the swipe threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the surface the recognizer is attached to
    #[arg(long)]
    surface: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplayConfig {
    tracker: TrackerConfig,
    input: AdapterConfig,
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swipe_replay=info,swipe_core=info,swipe_platform=info".into()),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(args: &Args) -> anyhow::Result<ReplayConfig> {
    let mut config: ReplayConfig = match &args.config {
        Some(path) => swipe_core::load_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => swipe_core::load_or_default(swipe_core::default_config_path()),
    };
    if let Some(threshold) = args.threshold {
        config.tracker.threshold = threshold;
    }
    Ok(config)
}

/// Drive every trace event through a fresh tracker, collecting notifications
/// in emission order.
fn replay(
    trace: &Trace,
    surface: SurfaceId,
    config: ReplayConfig,
) -> anyhow::Result<(Vec<Notification>, AdapterStats)> {
    let (notifier, rx) = ChannelNotifier::bounded(256);
    let mut tracker = GestureTracker::with_config(Some(surface), notifier, config.tracker)?;
    let mut input = SurfaceInput::new(config.input);

    info!(
        %surface,
        events = trace.events.len(),
        duration_ms = trace.duration_ms(),
        threshold = tracker.threshold(),
        "Replaying trace"
    );

    let mut notifications = Vec::new();
    for event in trace.to_device_events(Instant::now()) {
        input.dispatch(&event, &mut tracker);
        notifications.extend(rx.try_iter());
    }

    let stats = input.stats();
    info!(
        delivered = stats.delivered,
        ignored = stats.ignored,
        expired = stats.expired,
        left_open = tracker.is_active(),
        "Replay finished"
    );
    tracker.teardown();
    Ok((notifications, stats))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(&args)?;

    let trace = swipe_platform::load_trace(&args.trace)
        .with_context(|| format!("failed to load trace {}", args.trace.display()))?;
    let surface = args.surface.map(SurfaceId).unwrap_or(trace.surface);

    let (notifications, _) = replay(&trace, surface, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for notification in &notifications {
        serde_json::to_writer(&mut out, &OutputLine::from(notification))?;
        writeln!(out)?;
    }
    Ok(())
}
