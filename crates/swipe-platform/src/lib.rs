//! swipe-platform: device-facing side of swipe recognition.
//!
//! This crate provides:
//! - A device event model covering mouse and touch input
//! - The input adapter that normalizes those events into pointer samples,
//!   applies listener scope and reports default/propagation handling
//! - Loading of recorded device traces for replay
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `device` - Raw mouse/touch events
//! - `adapter` - Normalization and dispatch to a `PointerSink`
//! - `trace` - Recorded event traces (YAML/JSON)

mod adapter;
mod device;
mod error;
mod trace;

// Re-export error types
pub use error::{TraceError, TraceResult};

// Re-export device model
pub use device::{DeviceEvent, DeviceEventKind, MouseButton, TouchPoint};

// Re-export input adapter
pub use adapter::{AdapterConfig, AdapterStats, Disposition, PointerInput, SurfaceInput};

// Re-export trace loading
pub use trace::{load_trace, parse_trace_json, parse_trace_yaml, Trace, TraceEvent};
