//! Input translation: turns one frame of headset telemetry into pointer and
//! keyboard state in the shared windowing input model.
//!
//! This use case sits at the application layer.  It reads telemetry through a
//! [`TelemetrySource`] and writes through a [`WindowingSystem`]; both are
//! traits with implementations in the infrastructure layer.  The math itself
//! lives in `xr_core::domain::motion`, so this module only orchestrates it.
//!
//! # Per-frame sequence
//!
//! ```text
//! read axes + buttons            (no lock)
//! acquire {WindowManager, InputDevice}
//!   pointer delta -> sensitivity -> smoothing
//!   snap overrides
//!   pointer position + 5 pointer-button levels
//!   mode-toggle edge
//!   capture keyboard snapshot, commit "previous" snapshots
//!   11 key levels from the keyboard snapshot
//! release (guard drop)
//! ```
//!
//! # Keyboard latency
//!
//! Keys are driven from the *previous* frame's button snapshot, so a key goes
//! down one frame after the physical button does.  The keyboard snapshot is
//! captured under its own name before the commit, so that property does not
//! depend on statement order.  [`KeyboardSource::CurrentFrame`] removes the
//! lag for comparison.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use xr_core::{
    domain::telemetry,
    keymap::{
        KEY_BINDINGS, MODE_TOGGLE_BUTTON, POINTER_BINDINGS, SNAP_LEFT_BUTTON, SNAP_RIGHT_BUTTON,
    },
    pointer_delta, rising_edge, smooth_step, AxisSnapshot, ButtonSnapshot, MotionMode,
    PointerButton, TelemetryError, SMOOTHING_FACTOR, SNAP_DISTANCE_PX,
};

/// Error type for the translate-input use case.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The telemetry source broke the axis/button index contract.
    #[error("telemetry contract violated: {0}")]
    Telemetry(#[from] TelemetryError),

    /// The configured sensitivity cannot produce finite pointer motion.
    #[error("sensitivity must be finite and positive, got {0}")]
    InvalidSensitivity(f32),
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Synchronous per-frame telemetry reads.
///
/// The native implementation returns freshly sampled vectors every call.  The
/// translator reads axes first, then buttons, once per frame.
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySource: Send {
    /// Number of axis slots this source produces.
    fn axis_count(&self) -> usize;

    /// Number of button slots this source produces.
    fn button_count(&self) -> usize;

    /// Samples the current axis values.
    fn read_axes(&mut self) -> Vec<f32>;

    /// Samples the current button states.
    fn read_buttons(&mut self) -> Vec<bool>;
}

/// A lockable part of the windowing subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lockable {
    WindowManager,
    InputDevice,
}

impl Lockable {
    /// Position in the global acquisition order.  Lower ranks lock first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::WindowManager => 0,
            Self::InputDevice => 1,
        }
    }
}

/// Resources the translator holds for the whole frame update.
pub const TRANSLATOR_LOCKS: [Lockable; 2] = [Lockable::WindowManager, Lockable::InputDevice];

/// The four verbs the translator invokes on the windowing input model, plus
/// the two reads it needs to compute motion.
pub trait InputModel {
    /// Current screen width in pixels.
    fn screen_width(&self) -> u32;

    /// Current pointer position, clamped to the screen.
    fn pointer_position(&self) -> (i32, i32);

    /// Moves the pointer.  The model clamps out-of-bounds positions.
    fn move_pointer_to(&mut self, x: i32, y: i32);

    /// Sets the level of one pointer button.
    fn set_pointer_button(&mut self, button: PointerButton, pressed: bool);

    /// Marks the key with X11 keycode `code` as pressed.
    fn set_key_pressed(&mut self, code: u8);

    /// Marks the key with X11 keycode `code` as released.
    fn set_key_released(&mut self, code: u8);
}

/// Access to the windowing subsystem's shared input model.
pub trait WindowingSystem: Send + Sync {
    /// Scoped guard exposing the input model; dropping it releases every
    /// lock it holds.
    type Guard<'a>: InputModel
    where
        Self: 'a;

    /// Acquires `resources` plus whatever the input model itself needs, in
    /// [`Lockable::rank`] order regardless of the order they are listed in.
    fn acquire_exclusive(&self, resources: &[Lockable]) -> Self::Guard<'_>;
}

// ── Session settings ──────────────────────────────────────────────────────────

/// Which button snapshot drives the keyboard bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardSource {
    /// Keys follow the previous frame's buttons (one frame behind).
    #[default]
    PreviousFrame,
    /// Keys follow the buttons read this frame.
    CurrentFrame,
}

/// Per-session settings read once at session start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Multiplier applied to every pointer delta.
    pub sensitivity: f32,
    /// Snapshot used for the keyboard bindings.
    pub keyboard_source: KeyboardSource,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            keyboard_source: KeyboardSource::PreviousFrame,
        }
    }
}

// ── Frame report ──────────────────────────────────────────────────────────────

/// What one frame update wrote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of this frame within the session.
    pub frame: u64,
    /// Pointer position passed to `move_pointer_to` (before model clamping).
    pub pointer: (i32, i32),
    /// Motion mode that will apply to the *next* frame.
    pub mode: MotionMode,
    /// `true` if the mode-toggle button fired this frame.
    pub mode_toggled: bool,
    /// `true` if a snap override replaced the smoothed X position.
    pub snapped: bool,
    /// `true` if a non-finite value was replaced with zero motion.
    pub substituted: bool,
}

// ── Translator state ──────────────────────────────────────────────────────────

/// Cross-frame state of the translator.
///
/// Only [`XrSession::update_frame`] mutates it, always under the windowing
/// lock, so it needs no synchronisation of its own.
#[derive(Debug, Clone, Default)]
struct TranslatorState {
    previous_axes: AxisSnapshot,
    previous_buttons: ButtonSnapshot,
    /// `None` until the first frame seeds it from the live pointer.
    smoothed: Option<[f32; 2]>,
    mode: MotionMode,
    frames: u64,
}

impl TranslatorState {
    fn apply<M: InputModel>(
        &mut self,
        axes: &AxisSnapshot,
        buttons: &ButtonSnapshot,
        input: &mut M,
        settings: &SessionSettings,
    ) -> FrameReport {
        // The first frame has no meaningful previous pose; treat it as still.
        let previous_axes = if self.frames == 0 { *axes } else { self.previous_axes };

        let delta = pointer_delta(
            self.mode,
            &previous_axes,
            axes,
            input.screen_width(),
            settings.sensitivity,
        );

        // Targets sit on the pixel centre.  Screen Y grows downward while
        // tracked Y grows upward, hence the subtraction.
        let (clamped_x, clamped_y) = input.pointer_position();
        let centre = [clamped_x as f32 + 0.5, clamped_y as f32 + 0.5];
        let target = [centre[0] + delta.dx, centre[1] - delta.dy];
        let [sx, sy] = self.smoothed.unwrap_or(centre);
        let mut next = [
            smooth_step(sx, target[0], SMOOTHING_FACTOR),
            smooth_step(sy, target[1], SMOOTHING_FACTOR),
        ];

        let mut snapped = false;
        if rising_edge(buttons, &self.previous_buttons, SNAP_LEFT_BUTTON) {
            next[0] = clamped_x as f32 - SNAP_DISTANCE_PX;
            snapped = true;
        }
        if rising_edge(buttons, &self.previous_buttons, SNAP_RIGHT_BUTTON) {
            next[0] = clamped_x as f32 + SNAP_DISTANCE_PX;
            snapped = true;
        }

        let mut substituted = delta.substituted;
        for (value, fallback) in next.iter_mut().zip(centre) {
            if !value.is_finite() {
                *value = fallback;
                substituted = true;
            }
        }
        self.smoothed = Some(next);

        let pointer = (next[0] as i32, next[1] as i32);
        input.move_pointer_to(pointer.0, pointer.1);
        for (button, pointer_button) in POINTER_BINDINGS {
            input.set_pointer_button(pointer_button, buttons.is_pressed(button));
        }

        let mode_toggled = rising_edge(buttons, &self.previous_buttons, MODE_TOGGLE_BUTTON);
        if mode_toggled {
            self.mode = self.mode.toggled();
        }

        let keyboard = match settings.keyboard_source {
            KeyboardSource::PreviousFrame => self.previous_buttons,
            KeyboardSource::CurrentFrame => *buttons,
        };
        // Non-finite samples never become the reference for the next frame.
        self.previous_axes = axes.finite_or(&self.previous_axes);
        self.previous_buttons = *buttons;
        self.frames += 1;

        for (button, key) in KEY_BINDINGS {
            if keyboard.is_pressed(button) {
                input.set_key_pressed(key.code());
            } else {
                input.set_key_released(key.code());
            }
        }

        FrameReport {
            frame: self.frames,
            pointer,
            mode: self.mode,
            mode_toggled,
            snapped,
            substituted,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Context of the one active headset session.
///
/// Created at session start and passed by reference to every frame update.
/// Owns all translator state; nothing about the session is global.
#[derive(Debug)]
pub struct XrSession {
    id: Uuid,
    settings: SessionSettings,
    state: TranslatorState,
}

impl XrSession {
    /// Starts a session against `telemetry`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Telemetry`] if the source's axis or button
    /// count disagrees with the index tables, and
    /// [`TranslateError::InvalidSensitivity`] for a non-finite or non-positive
    /// sensitivity.
    pub fn start(
        telemetry: &dyn TelemetrySource,
        settings: SessionSettings,
    ) -> Result<Self, TranslateError> {
        telemetry::validate_lengths(telemetry.axis_count(), telemetry.button_count())?;
        if !settings.sensitivity.is_finite() || settings.sensitivity <= 0.0 {
            return Err(TranslateError::InvalidSensitivity(settings.sensitivity));
        }

        let id = Uuid::new_v4();
        info!(
            session = %id,
            sensitivity = settings.sensitivity,
            keyboard_source = ?settings.keyboard_source,
            "XR input session started"
        );
        Ok(Self {
            id,
            settings,
            state: TranslatorState::default(),
        })
    }

    /// Unique id of this session, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns `true` while the pointer follows the headset.
    pub fn is_immersive(&self) -> bool {
        self.state.mode == MotionMode::HeadRelative
    }

    /// Current motion mode.
    pub fn mode(&self) -> MotionMode {
        self.state.mode
    }

    /// Number of frames processed so far.
    pub fn frames(&self) -> u64 {
        self.state.frames
    }

    /// Runs one frame of input translation.
    ///
    /// Reads telemetry, then holds the windowing lock for the entire
    /// read-modify-write of pointer and keyboard state.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Telemetry`] if this frame's vectors have the
    /// wrong length.  No lock is taken and no state changes in that case.
    pub fn update_frame<W: WindowingSystem>(
        &mut self,
        telemetry: &mut dyn TelemetrySource,
        windowing: &W,
    ) -> Result<FrameReport, TranslateError> {
        let axes = AxisSnapshot::try_from(telemetry.read_axes().as_slice())?;
        let buttons = ButtonSnapshot::try_from(telemetry.read_buttons().as_slice())?;

        let report = {
            let mut input = windowing.acquire_exclusive(&TRANSLATOR_LOCKS);
            self.state.apply(&axes, &buttons, &mut input, &self.settings)
        };

        if report.mode_toggled {
            debug!(session = %self.id, mode = ?report.mode, "motion mode toggled");
        }
        if report.snapped {
            debug!(session = %self.id, x = report.pointer.0, "pointer snapped");
        }
        if report.substituted {
            warn!(
                session = %self.id,
                frame = report.frame,
                "non-finite pointer motion replaced with zero"
            );
        }
        Ok(report)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
