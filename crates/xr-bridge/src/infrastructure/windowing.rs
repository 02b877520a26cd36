//! In-process windowing input model shared between the translator and a
//! window-manager subsystem.
//!
//! State is split the way a display server splits it: window-manager state
//! (screen geometry, focus) and input-device state (pointer, buttons, keys)
//! each sit behind their own mutex.  Any caller that needs more than one
//! takes them through [`SharedInputModel::acquire`], which always locks in
//! [`Lockable::rank`] order.  Two callers therefore never wait on each other
//! in opposite orders.
//!
//! Poisoned locks are recovered with `PoisonError::into_inner`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};
use xr_core::PointerButton;

use crate::application::translate_input::{InputModel, Lockable, WindowingSystem};

/// Number of equal-width columns the simulated desktop is tiled into.
pub const SIMULATED_WINDOW_COLUMNS: u32 = 4;

// ── State ─────────────────────────────────────────────────────────────────────

/// Window-manager side of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowManagerState {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Column index of the focused window, if any.
    pub focused_window: Option<u32>,
    pub focus_changes: u64,
}

/// Pointer position plus the pressed-button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
}

impl Pointer {
    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// Pressed state for every X11 keycode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pressed: [bool; 256],
}

impl Default for Keyboard {
    fn default() -> Self {
        Self { pressed: [false; 256] }
    }
}

impl Keyboard {
    pub fn is_pressed(&self, code: u8) -> bool {
        self.pressed[usize::from(code)]
    }

    pub fn pressed_codes(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&c| self.is_pressed(c)).collect()
    }

    fn set(&mut self, code: u8, pressed: bool) {
        self.pressed[usize::from(code)] = pressed;
    }
}

/// Input-device side of the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDeviceState {
    pub pointer: Pointer,
    pub keyboard: Keyboard,
}

// ── Shared model ──────────────────────────────────────────────────────────────

/// The shared input model.  Wrap it in an `Arc` to hand it to other threads.
#[derive(Debug)]
pub struct SharedInputModel {
    window_manager: Mutex<WindowManagerState>,
    input_device: Mutex<InputDeviceState>,
}

/// Guard over any subset of the model's locks.
///
/// Fields are `None` for resources that were not requested.  Dropping the
/// guard releases whatever it holds.
pub struct ExclusiveGuard<'a> {
    held: Vec<Lockable>,
    pub window_manager: Option<MutexGuard<'a, WindowManagerState>>,
    pub input_device: Option<MutexGuard<'a, InputDeviceState>>,
}

impl ExclusiveGuard<'_> {
    /// Resources held, in the order they were locked.
    pub fn held(&self) -> &[Lockable] {
        &self.held
    }
}

/// Guard holding both locks, exposing the translator's [`InputModel`].
pub struct InputGuard<'a> {
    window_manager: MutexGuard<'a, WindowManagerState>,
    input_device: MutexGuard<'a, InputDeviceState>,
}

impl SharedInputModel {
    /// Creates a model for a `width` x `height` screen with the pointer at the
    /// centre and nothing pressed.
    pub fn new(width: u32, height: u32) -> Self {
        let pointer = Pointer {
            x: (width / 2) as i32,
            y: (height / 2) as i32,
            buttons: 0,
        };
        Self {
            window_manager: Mutex::new(WindowManagerState {
                screen_width: width,
                screen_height: height,
                focused_window: None,
                focus_changes: 0,
            }),
            input_device: Mutex::new(InputDeviceState {
                pointer,
                keyboard: Keyboard::default(),
            }),
        }
    }

    fn lock_window_manager(&self) -> MutexGuard<'_, WindowManagerState> {
        self.window_manager
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_input_device(&self) -> MutexGuard<'_, InputDeviceState> {
        self.input_device
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks every resource in `resources`, lowest rank first.
    ///
    /// The order of `resources` and any duplicates are ignored.
    pub fn acquire(&self, resources: &[Lockable]) -> ExclusiveGuard<'_> {
        let mut ordered = resources.to_vec();
        ordered.sort_by_key(|r| r.rank());
        ordered.dedup();

        let mut guard = ExclusiveGuard {
            held: Vec::with_capacity(ordered.len()),
            window_manager: None,
            input_device: None,
        };
        for resource in ordered {
            match resource {
                Lockable::WindowManager => guard.window_manager = Some(self.lock_window_manager()),
                Lockable::InputDevice => guard.input_device = Some(self.lock_input_device()),
            }
            guard.held.push(resource);
        }
        guard
    }

    /// Copies the input-device state under its lock.
    pub fn input_snapshot(&self) -> InputDeviceState {
        self.lock_input_device().clone()
    }

    /// Copies the window-manager state under its lock.
    pub fn window_manager_snapshot(&self) -> WindowManagerState {
        self.lock_window_manager().clone()
    }

    /// Simulated window-manager reaction to pointer input: while the left
    /// button is down, the window column under the pointer takes focus.
    ///
    /// Returns the newly focused column when focus changed.
    pub fn click_to_focus(&self) -> Option<u32> {
        let mut guard = self.acquire(&[Lockable::InputDevice, Lockable::WindowManager]);
        let (Some(wm), Some(dev)) = (guard.window_manager.as_mut(), guard.input_device.as_ref())
        else {
            return None;
        };
        if !dev.pointer.is_pressed(PointerButton::Left) {
            return None;
        }

        let column_width = (wm.screen_width / SIMULATED_WINDOW_COLUMNS).max(1);
        let column = (dev.pointer.x.max(0) as u32 / column_width).min(SIMULATED_WINDOW_COLUMNS - 1);
        if wm.focused_window == Some(column) {
            return None;
        }
        wm.focused_window = Some(column);
        wm.focus_changes += 1;
        debug!(column, "focus changed");
        Some(column)
    }
}

fn clamp_axis(value: i32, extent: u32) -> i32 {
    let max = i32::try_from(extent.saturating_sub(1)).unwrap_or(i32::MAX);
    value.clamp(0, max)
}

impl WindowingSystem for SharedInputModel {
    type Guard<'a> = InputGuard<'a>;

    fn acquire_exclusive(&self, resources: &[Lockable]) -> InputGuard<'_> {
        trace!(?resources, "acquiring input model");
        // The input model spans both resources, so both are always taken,
        // window manager first.
        let window_manager = self.lock_window_manager();
        let input_device = self.lock_input_device();
        InputGuard {
            window_manager,
            input_device,
        }
    }
}

impl InputModel for InputGuard<'_> {
    fn screen_width(&self) -> u32 {
        self.window_manager.screen_width
    }

    fn pointer_position(&self) -> (i32, i32) {
        let p = self.input_device.pointer;
        (p.x, p.y)
    }

    fn move_pointer_to(&mut self, x: i32, y: i32) {
        let pointer = &mut self.input_device.pointer;
        pointer.x = clamp_axis(x, self.window_manager.screen_width);
        pointer.y = clamp_axis(y, self.window_manager.screen_height);
    }

    fn set_pointer_button(&mut self, button: PointerButton, pressed: bool) {
        let pointer = &mut self.input_device.pointer;
        if pressed {
            pointer.buttons |= button.mask();
        } else {
            pointer.buttons &= !button.mask();
        }
    }

    fn set_key_pressed(&mut self, code: u8) {
        self.input_device.keyboard.set(code, true);
    }

    fn set_key_released(&mut self, code: u8) {
        self.input_device.keyboard.set(code, false);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
