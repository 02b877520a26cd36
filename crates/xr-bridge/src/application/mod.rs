//! Application layer use cases for the bridge.
//!
//! - **`translate_input`** – Reads one frame of headset telemetry and writes
//!   pointer position, pointer buttons, and key levels into the windowing
//!   input model while holding its exclusive lock.  Also defines the ports
//!   (`TelemetrySource`, `WindowingSystem`, `InputModel`) that the
//!   infrastructure layer implements.
//!
//! - **`frame_loop`** – Brackets each input update with the headset
//!   runtime's begin/end frame calls through the `FrameDriver` port.

pub mod frame_loop;
pub mod translate_input;
