//! # xr-core
//!
//! Shared library for the XR input bridge containing the telemetry index
//! contract, the pointer-motion math, and the controller binding tables.
//!
//! It has zero dependencies on OS APIs, windowing systems, or the headset
//! runtime, and holds no locks.
//!
//! # Architecture overview
//!
//! A standalone headset reports two hand controllers and its own pose many
//! times per second.  A desktop windowing system knows nothing about that: it
//! wants a pointer position, a handful of pointer buttons, and key presses.
//! This crate defines the pieces of that translation that are pure functions:
//!
//! - **`domain::telemetry`** – The positional contract with the native
//!   telemetry source: which slot of the per-frame axis and button arrays
//!   means what, and the snapshot types that wrap them.
//!
//! - **`domain::motion`** – Angle wrapping, the pointer low-pass filter,
//!   rising-edge detection, and the per-mode pointer delta.
//!
//! - **`keymap`** – X11 keycodes and pointer buttons, plus the fixed tables
//!   binding controller buttons to them.

pub mod domain;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `xr_core::AxisSnapshot` instead of `xr_core::domain::telemetry::AxisSnapshot`.
pub use domain::motion::{
    angle_diff, pointer_delta, rising_edge, smooth_step, MotionMode, PointerDelta,
    SMOOTHING_FACTOR, SNAP_DISTANCE_PX,
};
pub use domain::telemetry::{
    AxisSnapshot, ButtonSnapshot, ControllerAxis, ControllerButton, TelemetryError, AXIS_COUNT,
    BUTTON_COUNT,
};
pub use keymap::{PointerButton, XKeycode};
