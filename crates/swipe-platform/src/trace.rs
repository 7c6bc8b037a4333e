//! Recorded device traces.
//!
//! A trace lists device events with millisecond offsets so a session can be
//! replayed deterministically:
//!
//! ```yaml
//! surface: 1
//! events:
//!   - at_ms: 0
//!     event: { type: mouse_down, x: 100, y: 100 }
//!   - at_ms: 200
//!     outside: true
//!     event: { type: mouse_up, x: 108, y: 90 }
//! ```

use crate::{DeviceEvent, DeviceEventKind, TraceError, TraceResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use swipe_core::SurfaceId;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Surface the recognizer is attached to.
    pub surface: SurfaceId,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Milliseconds since the start of the trace.
    pub at_ms: u64,
    /// Surface the event hit. Defaults to the trace surface.
    #[serde(default)]
    pub target: Option<SurfaceId>,
    /// Event landed outside every surface.
    #[serde(default)]
    pub outside: bool,
    pub event: DeviceEventKind,
}

impl Trace {
    /// Check that offsets never go backwards.
    pub fn validate(&self) -> TraceResult<()> {
        let mut last = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.at_ms < last {
                return Err(TraceError::OutOfOrder { index, at_ms: event.at_ms });
            }
            last = event.at_ms;
        }
        Ok(())
    }

    /// Convert to device events timestamped relative to `base`.
    pub fn to_device_events(&self, base: Instant) -> Vec<DeviceEvent> {
        self.events
            .iter()
            .map(|e| {
                let target = if e.outside { None } else { Some(e.target.unwrap_or(self.surface)) };
                DeviceEvent::new(target, base + Duration::from_millis(e.at_ms), e.event.clone())
            })
            .collect()
    }

    /// Length of the trace in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.events.last().map_or(0, |e| e.at_ms)
    }
}

pub fn parse_trace_yaml(content: &str) -> TraceResult<Trace> {
    let trace: Trace = serde_yaml::from_str(content)?;
    trace.validate()?;
    Ok(trace)
}

pub fn parse_trace_json(content: &str) -> TraceResult<Trace> {
    let trace: Trace = serde_json::from_str(content)?;
    trace.validate()?;
    Ok(trace)
}

/// Load a trace file, picking the format from its extension.
pub fn load_trace(path: impl AsRef<Path>) -> TraceResult<Trace> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let content = fs::read_to_string(path)?;
    let trace = match ext.as_str() {
        "yaml" | "yml" => parse_trace_yaml(&content)?,
        "json" => parse_trace_json(&content)?,
        other => return Err(TraceError::UnsupportedFormat(other.to_string())),
    };

    debug!(?path, events = trace.events.len(), "Loaded trace");
    Ok(trace)
}
