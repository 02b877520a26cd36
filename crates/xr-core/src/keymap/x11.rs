//! X11 keycodes and pointer buttons emitted by the bridge.
//!
//! # Keycodes vs KeySyms
//!
//! X11 distinguishes *KeySyms* (symbolic meanings such as `XK_Return`) from
//! *keycodes* (the byte the server uses to identify a physical key).  The
//! windowing subsystem the bridge feeds works at the keycode level, so every
//! value here is the evdev scan code plus the customary X11 offset of 8.
//!
//! | Key        | evdev | X11 keycode | KeySym       |
//! |------------|-------|-------------|--------------|
//! | Escape     | 1     | 9           | `XK_Escape`  |
//! | Enter      | 28    | 36          | `XK_Return`  |
//! | Space      | 57    | 65          | `XK_space`   |
//! | Up         | 103   | 111         | `XK_Up`      |

/// X11 keycode for a key the bridge can press.
///
/// The numeric value of each variant is the keycode byte sent to the
/// windowing subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum XKeycode {
    Escape = 9,
    KeyY = 29,
    Enter = 36,
    KeyA = 38,
    KeyX = 53,
    KeyB = 56,
    Space = 65,
    ArrowUp = 111,
    ArrowLeft = 113,
    ArrowRight = 114,
    ArrowDown = 116,
}

impl XKeycode {
    /// Returns the keycode byte.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Pointer button, including the two wheel directions X11 models as buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

impl PointerButton {
    /// All pointer buttons, in X11 button-number order.
    pub const ALL: [PointerButton; 5] = [
        Self::Left,
        Self::Middle,
        Self::Right,
        Self::ScrollUp,
        Self::ScrollDown,
    ];

    /// Returns the X11 core-protocol button number (1-based).
    pub const fn x11_button(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::ScrollUp => 4,
            Self::ScrollDown => 5,
        }
    }

    /// Returns the bit this button occupies in a button mask.
    pub const fn mask(self) -> u8 {
        1 << (self.x11_button() - 1)
    }
}
