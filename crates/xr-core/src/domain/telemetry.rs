//! Axis and button index tables shared with the native telemetry source.
//!
//! The native side hands over two flat arrays per frame: one `f32` per axis
//! and one `bool` per button.  Nothing in those arrays carries a name, so both
//! sides depend on positional agreement.  The tables below are the single
//! place where that agreement is written down.
//!
//! # Why explicit indices instead of declaration order?
//!
//! Rust enums *can* be cast to their discriminant, but relying on the order in
//! which variants happen to be declared makes a harmless-looking reorder
//! silently desynchronise the two sides.  Each variant therefore maps to its
//! slot through an explicit `match`, and a `const` assertion below checks at
//! compile time that every slot is used exactly once.
//!
//! # Axis layout
//!
//! | idx | axis            | idx | axis            | idx | axis       |
//! |-----|-----------------|-----|-----------------|-----|------------|
//! | 0   | `LPitch`        | 8   | `RPitch`        | 16  | `HmdPitch` |
//! | 1   | `LYaw`          | 9   | `RYaw`          | 17  | `HmdYaw`   |
//! | 2   | `LRoll`         | 10  | `RRoll`         | 18  | `HmdRoll`  |
//! | 3   | `LThumbstickX`  | 11  | `RThumbstickX`  | 19  | `HmdX`     |
//! | 4   | `LThumbstickY`  | 12  | `RThumbstickY`  | 20  | `HmdY`     |
//! | 5   | `LX`            | 13  | `RX`            | 21  | `HmdZ`     |
//! | 6   | `LY`            | 14  | `RY`            | 22  | `HmdIpd`   |
//! | 7   | `LZ`            | 15  | `RZ`            |     |            |
//!
//! Positions are in meters, angles in degrees.

use thiserror::Error;

/// Number of slots in an axis snapshot.
pub const AXIS_COUNT: usize = 23;

/// Number of slots in a button snapshot.
pub const BUTTON_COUNT: usize = 19;

/// Errors raised when the telemetry source violates the index contract.
///
/// These are contract violations between this crate and the native side, not
/// transient conditions.  Callers treat them as fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("telemetry source reports {actual} axes, index table expects {expected}")]
    AxisCountMismatch { expected: usize, actual: usize },

    #[error("telemetry source reports {actual} buttons, index table expects {expected}")]
    ButtonCountMismatch { expected: usize, actual: usize },
}

/// A named continuous axis reported by the telemetry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerAxis {
    LPitch,
    LYaw,
    LRoll,
    LThumbstickX,
    LThumbstickY,
    LX,
    LY,
    LZ,
    RPitch,
    RYaw,
    RRoll,
    RThumbstickX,
    RThumbstickY,
    RX,
    RY,
    RZ,
    HmdPitch,
    HmdYaw,
    HmdRoll,
    HmdX,
    HmdY,
    HmdZ,
    HmdIpd,
}

impl ControllerAxis {
    /// Every axis, listed in slot order.
    pub const ALL: [ControllerAxis; AXIS_COUNT] = [
        Self::LPitch,
        Self::LYaw,
        Self::LRoll,
        Self::LThumbstickX,
        Self::LThumbstickY,
        Self::LX,
        Self::LY,
        Self::LZ,
        Self::RPitch,
        Self::RYaw,
        Self::RRoll,
        Self::RThumbstickX,
        Self::RThumbstickY,
        Self::RX,
        Self::RY,
        Self::RZ,
        Self::HmdPitch,
        Self::HmdYaw,
        Self::HmdRoll,
        Self::HmdX,
        Self::HmdY,
        Self::HmdZ,
        Self::HmdIpd,
    ];

    /// Returns the slot this axis occupies in an axis snapshot.
    pub const fn index(self) -> usize {
        match self {
            Self::LPitch => 0,
            Self::LYaw => 1,
            Self::LRoll => 2,
            Self::LThumbstickX => 3,
            Self::LThumbstickY => 4,
            Self::LX => 5,
            Self::LY => 6,
            Self::LZ => 7,
            Self::RPitch => 8,
            Self::RYaw => 9,
            Self::RRoll => 10,
            Self::RThumbstickX => 11,
            Self::RThumbstickY => 12,
            Self::RX => 13,
            Self::RY => 14,
            Self::RZ => 15,
            Self::HmdPitch => 16,
            Self::HmdYaw => 17,
            Self::HmdRoll => 18,
            Self::HmdX => 19,
            Self::HmdY => 20,
            Self::HmdZ => 21,
            Self::HmdIpd => 22,
        }
    }
}

/// A named digital button reported by the telemetry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    LGrip,
    LMenu,
    LThumbstickPress,
    LThumbstickLeft,
    LThumbstickRight,
    LThumbstickUp,
    LThumbstickDown,
    LTrigger,
    LX,
    LY,
    RA,
    RB,
    RGrip,
    RThumbstickPress,
    RThumbstickLeft,
    RThumbstickRight,
    RThumbstickUp,
    RThumbstickDown,
    RTrigger,
}

impl ControllerButton {
    /// Every button, listed in slot order.
    pub const ALL: [ControllerButton; BUTTON_COUNT] = [
        Self::LGrip,
        Self::LMenu,
        Self::LThumbstickPress,
        Self::LThumbstickLeft,
        Self::LThumbstickRight,
        Self::LThumbstickUp,
        Self::LThumbstickDown,
        Self::LTrigger,
        Self::LX,
        Self::LY,
        Self::RA,
        Self::RB,
        Self::RGrip,
        Self::RThumbstickPress,
        Self::RThumbstickLeft,
        Self::RThumbstickRight,
        Self::RThumbstickUp,
        Self::RThumbstickDown,
        Self::RTrigger,
    ];

    /// Returns the slot this button occupies in a button snapshot.
    pub const fn index(self) -> usize {
        match self {
            Self::LGrip => 0,
            Self::LMenu => 1,
            Self::LThumbstickPress => 2,
            Self::LThumbstickLeft => 3,
            Self::LThumbstickRight => 4,
            Self::LThumbstickUp => 5,
            Self::LThumbstickDown => 6,
            Self::LTrigger => 7,
            Self::LX => 8,
            Self::LY => 9,
            Self::RA => 10,
            Self::RB => 11,
            Self::RGrip => 12,
            Self::RThumbstickPress => 13,
            Self::RThumbstickLeft => 14,
            Self::RThumbstickRight => 15,
            Self::RThumbstickUp => 16,
            Self::RThumbstickDown => 17,
            Self::RTrigger => 18,
        }
    }
}

// ── Compile-time table checks ─────────────────────────────────────────────────

const fn axis_table_is_dense() -> bool {
    let mut i = 0;
    while i < AXIS_COUNT {
        if ControllerAxis::ALL[i].index() != i {
            return false;
        }
        i += 1;
    }
    true
}

const fn button_table_is_dense() -> bool {
    let mut i = 0;
    while i < BUTTON_COUNT {
        if ControllerButton::ALL[i].index() != i {
            return false;
        }
        i += 1;
    }
    true
}

// `ALL[i].index() == i` for every `i` means the mapping is a bijection onto
// `0..COUNT`: no slot is skipped and no slot is shared.
const _: () = assert!(axis_table_is_dense(), "axis index table has gaps or duplicates");
const _: () = assert!(button_table_is_dense(), "button index table has gaps or duplicates");

// ── Length validation ─────────────────────────────────────────────────────────

/// Checks that a telemetry source's reported lengths match the index tables.
///
/// Called once at session start.
///
/// # Errors
///
/// Returns the first mismatch found, axes before buttons.
pub fn validate_lengths(axis_count: usize, button_count: usize) -> Result<(), TelemetryError> {
    if axis_count != AXIS_COUNT {
        return Err(TelemetryError::AxisCountMismatch {
            expected: AXIS_COUNT,
            actual: axis_count,
        });
    }
    if button_count != BUTTON_COUNT {
        return Err(TelemetryError::ButtonCountMismatch {
            expected: BUTTON_COUNT,
            actual: button_count,
        });
    }
    Ok(())
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

/// One frame's worth of continuous telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSnapshot([f32; AXIS_COUNT]);

impl AxisSnapshot {
    /// Returns the value of `axis`.
    pub fn get(&self, axis: ControllerAxis) -> f32 {
        self.0[axis.index()]
    }

    /// Overwrites the value of `axis`.
    pub fn set(&mut self, axis: ControllerAxis, value: f32) {
        self.0[axis.index()] = value;
    }

    /// Returns the raw slot array.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Copy of `self` where every non-finite slot takes its value from
    /// `fallback` instead.
    pub fn finite_or(&self, fallback: &AxisSnapshot) -> AxisSnapshot {
        let mut merged = *self;
        for (slot, &last) in merged.0.iter_mut().zip(fallback.0.iter()) {
            if !slot.is_finite() {
                *slot = last;
            }
        }
        merged
    }
}

impl Default for AxisSnapshot {
    fn default() -> Self {
        Self([0.0; AXIS_COUNT])
    }
}

impl TryFrom<&[f32]> for AxisSnapshot {
    type Error = TelemetryError;

    fn try_from(raw: &[f32]) -> Result<Self, Self::Error> {
        let slots: [f32; AXIS_COUNT] =
            raw.try_into()
                .map_err(|_| TelemetryError::AxisCountMismatch {
                    expected: AXIS_COUNT,
                    actual: raw.len(),
                })?;
        Ok(Self(slots))
    }
}

/// One frame's worth of digital telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSnapshot([bool; BUTTON_COUNT]);

impl ButtonSnapshot {
    /// Returns `true` if `button` is held in this snapshot.
    pub fn is_pressed(&self, button: ControllerButton) -> bool {
        self.0[button.index()]
    }

    /// Overwrites the state of `button`.
    pub fn set(&mut self, button: ControllerButton, pressed: bool) {
        self.0[button.index()] = pressed;
    }

    /// Builder-style variant of [`set`](Self::set) that presses `button`.
    pub fn with(mut self, button: ControllerButton) -> Self {
        self.set(button, true);
        self
    }

    /// Returns the raw slot array.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl TryFrom<&[bool]> for ButtonSnapshot {
    type Error = TelemetryError;

    fn try_from(raw: &[bool]) -> Result<Self, Self::Error> {
        let slots: [bool; BUTTON_COUNT] =
            raw.try_into()
                .map_err(|_| TelemetryError::ButtonCountMismatch {
                    expected: BUTTON_COUNT,
                    actual: raw.len(),
                })?;
        Ok(Self(slots))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
