//! Domain layer: the telemetry contract and the math that turns it into
//! pointer motion.
//!
//! Everything here is pure.  No OS APIs, no locks, no I/O: these modules can be
//! compiled and tested on any platform with no headset attached.

/// Axis/button index tables and per-frame snapshots.
pub mod telemetry;

/// Angle wrapping, smoothing, edge detection, and pointer deltas.
pub mod motion;

/// Supported headset vendors.
pub mod device;
