//! Hand-gesture mouse control from a hand-landmark stream.
//!
//! Turns per-frame 21-point hand landmarks from an external vision
//! detector into smoothed cursor movement, debounced clicks, and
//! direction-gated scrolls, applied through a pluggable pointer device.
//!
//! Provides:
//! - `gesture`: the skeleton data model and the per-frame controller
//! - `pointer`: the OS pointer-device seam and backends
//! - `stream`: the NDJSON detector wire format

pub mod gesture;
pub mod pointer;
pub mod stream;
