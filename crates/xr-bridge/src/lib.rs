//! xr-bridge library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`, the
//! benches, and the binary entry point in `main.rs` share the same module
//! tree.
//!
//! # What does xr-bridge do?
//!
//! It lets a standalone headset drive a desktop session.  Once per rendered
//! frame it:
//!
//! 1. Reads the controller and headset pose plus every controller button from
//!    a `TelemetrySource`.
//! 2. Locks the shared windowing input model (window manager first, then the
//!    input device).
//! 3. Moves the pointer, either following the right hand or the head, with a
//!    low-pass filter and discrete left/right snaps.
//! 4. Writes the five pointer-button levels and eleven key levels.
//! 5. Releases the lock so the window manager can react.

/// Application layer: the translate-input use case and its ports.
pub mod application;

/// Infrastructure layer: windowing model, telemetry, frame driver, config.
pub mod infrastructure;
