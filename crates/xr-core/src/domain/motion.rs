//! Pure pointer-motion math: angle wrapping, smoothing, edge detection, and
//! the per-mode pointer delta.
//!
//! Nothing in this module holds state or takes a lock.  Every function is a
//! deterministic transform of its arguments, which is what lets the frame
//! update in `xr-bridge` stay a thin orchestration layer.


use super::telemetry::{AxisSnapshot, ButtonSnapshot, ControllerAxis, ControllerButton};

/// Retention weight of the pointer low-pass filter.
///
/// Each frame keeps 75% of the previous smoothed position and moves 25% of the
/// way toward the new target.
pub const SMOOTHING_FACTOR: f32 = 0.75;

/// Hand-relative scale: pixels per meter of controller travel, per pixel of
/// screen width.
pub const HAND_PX_PER_METER_PER_WIDTH: f32 = 10.0;

/// Head-relative scale: pixels per degree of head rotation, per pixel of
/// screen width.
pub const HEAD_PX_PER_DEGREE_PER_WIDTH: f32 = 0.01;

/// Horizontal jump applied by the right-thumbstick snap buttons, in pixels.
pub const SNAP_DISTANCE_PX: f32 = 50.0;

/// Which tracked input drives the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// Pointer follows the right controller's position.
    #[default]
    HandRelative,
    /// Pointer follows the headset's yaw and pitch ("immersive" mode).
    HeadRelative,
}

impl MotionMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::HandRelative => Self::HeadRelative,
            Self::HeadRelative => Self::HandRelative,
        }
    }
}

/// Signed shortest rotation from `previous` to `current`, in degrees.
///
/// The result lies in `(-180, 180]`.  Inputs may be any finite angle; values
/// outside one turn are reduced first.  A non-finite input yields NaN.
///
/// `%` on floats is exact, and the single `± 360` correction that follows
/// operates on operands within a factor of two of each other, so it is exact
/// as well.  That makes the function exactly antisymmetric everywhere except
/// at the half-turn, where both directions resolve to `+180`.
pub fn angle_diff(previous: f32, current: f32) -> f32 {
    let raw = current - previous;
    if !raw.is_finite() {
        return f32::NAN;
    }
    let reduced = raw % 360.0;
    if reduced > 180.0 {
        reduced - 360.0
    } else if reduced <= -180.0 {
        reduced + 360.0
    } else {
        reduced
    }
}

/// One step of the single-pole low-pass filter.
///
/// Equivalent to `smoothed * factor + target * (1 - factor)`, written as an
/// interpolation so that rounding can never carry the result past `target`.
pub fn smooth_step(smoothed: f32, target: f32, factor: f32) -> f32 {
    smoothed + (target - smoothed) * (1.0 - factor)
}

/// Returns `true` only on the frame where `button` goes from released to
/// pressed.
pub fn rising_edge(
    current: &ButtonSnapshot,
    previous: &ButtonSnapshot,
    button: ControllerButton,
) -> bool {
    current.is_pressed(button) && !previous.is_pressed(button)
}

/// Replaces NaN and infinities with zero.
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Pointer displacement computed for one frame, already scaled to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDelta {
    /// Horizontal displacement; positive moves right.
    pub dx: f32,
    /// Vertical displacement in tracking space; positive moves *up* the screen.
    pub dy: f32,
    /// `true` if a non-finite component was replaced with zero.
    pub substituted: bool,
}

/// Computes the pointer delta between two axis snapshots.
///
/// - [`MotionMode::HandRelative`]: change in right-controller X/Y position,
///   scaled by `screen_width * 10` pixels per meter.
/// - [`MotionMode::HeadRelative`]: change in headset yaw/pitch, scaled by
///   `screen_width * 0.01` pixels per degree and divided by
///   [`SMOOTHING_FACTOR`].  Yaw grows counter-clockwise, so the delta is taken
///   as `previous - current` to make a rightward turn move the pointer right.
///
/// Both components are multiplied by `sensitivity`.  Any non-finite component
/// is replaced with zero and flagged in [`PointerDelta::substituted`].
pub fn pointer_delta(
    mode: MotionMode,
    previous: &AxisSnapshot,
    current: &AxisSnapshot,
    screen_width: u32,
    sensitivity: f32,
) -> PointerDelta {
    let width = screen_width as f32;
    let (dx, dy) = match mode {
        MotionMode::HandRelative => {
            let meter_to_px = width * HAND_PX_PER_METER_PER_WIDTH;
            (
                (current.get(ControllerAxis::RX) - previous.get(ControllerAxis::RX)) * meter_to_px,
                (current.get(ControllerAxis::RY) - previous.get(ControllerAxis::RY)) * meter_to_px,
            )
        }
        MotionMode::HeadRelative => {
            let degree_to_px = width * HEAD_PX_PER_DEGREE_PER_WIDTH / SMOOTHING_FACTOR;
            (
                angle_diff(current.get(ControllerAxis::HmdYaw), previous.get(ControllerAxis::HmdYaw))
                    * degree_to_px,
                angle_diff(
                    current.get(ControllerAxis::HmdPitch),
                    previous.get(ControllerAxis::HmdPitch),
                ) * degree_to_px,
            )
        }
    };

    let dx = dx * sensitivity;
    let dy = dy * sensitivity;
    PointerDelta {
        dx: finite_or_zero(dx),
        dy: finite_or_zero(dy),
        substituted: !dx.is_finite() || !dy.is_finite(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
