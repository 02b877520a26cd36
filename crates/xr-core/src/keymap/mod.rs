//! Fixed controller-button bindings for the pointer and the keyboard.
//!
//! Both tables are level-triggered: the translator walks every entry every
//! frame and writes the current level, so a binding never depends on having
//! seen the previous transition.

pub mod x11;

pub use x11::{PointerButton, XKeycode};

use crate::domain::telemetry::ControllerButton;

/// Right-controller buttons that drive the pointer buttons and wheel.
pub const POINTER_BINDINGS: [(ControllerButton, PointerButton); 5] = [
    (ControllerButton::RTrigger, PointerButton::Left),
    (ControllerButton::RGrip, PointerButton::Right),
    (ControllerButton::RThumbstickPress, PointerButton::Middle),
    (ControllerButton::RThumbstickUp, PointerButton::ScrollUp),
    (ControllerButton::RThumbstickDown, PointerButton::ScrollDown),
];

/// Controller buttons that drive keyboard keys.
pub const KEY_BINDINGS: [(ControllerButton, XKeycode); 11] = [
    (ControllerButton::RA, XKeycode::KeyA),
    (ControllerButton::RB, XKeycode::KeyB),
    (ControllerButton::LX, XKeycode::KeyX),
    (ControllerButton::LY, XKeycode::KeyY),
    (ControllerButton::LGrip, XKeycode::Space),
    (ControllerButton::LMenu, XKeycode::Escape),
    (ControllerButton::LTrigger, XKeycode::Enter),
    (ControllerButton::LThumbstickLeft, XKeycode::ArrowLeft),
    (ControllerButton::LThumbstickRight, XKeycode::ArrowRight),
    (ControllerButton::LThumbstickUp, XKeycode::ArrowUp),
    (ControllerButton::LThumbstickDown, XKeycode::ArrowDown),
];

/// Buttons with a dedicated discrete action rather than a level binding.
pub const MODE_TOGGLE_BUTTON: ControllerButton = ControllerButton::LThumbstickPress;
pub const SNAP_LEFT_BUTTON: ControllerButton = ControllerButton::RThumbstickLeft;
pub const SNAP_RIGHT_BUTTON: ControllerButton = ControllerButton::RThumbstickRight;
