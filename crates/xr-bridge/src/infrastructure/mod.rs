//! Infrastructure layer for the bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and `xr_core`,
//! but MUST NOT be imported by the `application` or domain layers.
//!
//! # Sub-modules
//!
//! - **`windowing`** – The shared windowing input model: window-manager and
//!   input-device state behind separate locks, acquired in a fixed order.
//!
//! - **`telemetry`** – A scripted `TelemetrySource` used by the binary's demo
//!   mode, the integration tests, and the benches.
//!
//! - **`frame_driver`** – A headless `FrameDriver` that accepts frames on a
//!   schedule instead of asking a headset runtime.
//!
//! - **`storage`** – TOML configuration persistence.

pub mod frame_driver;
pub mod storage;
pub mod telemetry;
pub mod windowing;
