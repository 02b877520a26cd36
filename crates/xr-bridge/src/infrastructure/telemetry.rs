//! Telemetry sources that do not need a headset.
//!
//! [`ScriptedTelemetrySource`] replays a fixed list of frames, then keeps
//! returning the last one.  The binary drives it with
//! [`TelemetryFrame::sway`] to produce a slow hand motion with a periodic
//! trigger click; tests and benches build frames directly.

use std::collections::VecDeque;

use xr_core::{AxisSnapshot, ButtonSnapshot, ControllerAxis, ControllerButton, AXIS_COUNT, BUTTON_COUNT};

use crate::application::translate_input::TelemetrySource;

/// One frame of axis and button values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryFrame {
    pub axes: AxisSnapshot,
    pub buttons: ButtonSnapshot,
}

impl TelemetryFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one axis value.
    pub fn axis(mut self, axis: ControllerAxis, value: f32) -> Self {
        self.axes.set(axis, value);
        self
    }

    /// Marks one button as pressed.
    pub fn press(mut self, button: ControllerButton) -> Self {
        self.buttons.set(button, true);
        self
    }

    /// Synthetic frame `n` of a demo session: the right hand sways left and
    /// right by 5 cm, and the right trigger clicks once every 72 frames.
    pub fn sway(n: u64) -> Self {
        let t = n as f32 / 72.0;
        let frame = Self::new()
            .axis(ControllerAxis::RX, 0.05 * (t * std::f32::consts::TAU / 4.0).sin())
            .axis(ControllerAxis::RY, 0.01 * (t * std::f32::consts::TAU / 2.0).sin())
            .axis(ControllerAxis::HmdIpd, 0.063);
        if n % 72 < 3 {
            frame.press(ControllerButton::RTrigger)
        } else {
            frame
        }
    }
}

/// Replays queued frames; once the queue is empty the last frame repeats.
#[derive(Debug, Default)]
pub struct ScriptedTelemetrySource {
    queue: VecDeque<TelemetryFrame>,
    current: TelemetryFrame,
    frames_read: u64,
}

impl ScriptedTelemetrySource {
    pub fn new(frames: impl IntoIterator<Item = TelemetryFrame>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Appends a frame to the end of the script.
    pub fn push(&mut self, frame: TelemetryFrame) {
        self.queue.push_back(frame);
    }

    /// Drops any frames not yet read and queues `frame` as the next one.
    ///
    /// Live feeds use this so frames the runtime skipped are not replayed.
    pub fn replace_pending(&mut self, frame: TelemetryFrame) {
        self.queue.clear();
        self.queue.push_back(frame);
    }

    /// Number of frames consumed so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TelemetrySource for ScriptedTelemetrySource {
    fn axis_count(&self) -> usize {
        AXIS_COUNT
    }

    fn button_count(&self) -> usize {
        BUTTON_COUNT
    }

    /// Advances the script by one frame.
    fn read_axes(&mut self) -> Vec<f32> {
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
        self.frames_read += 1;
        self.current.axes.as_slice().to_vec()
    }

    /// Returns the buttons of the frame selected by the last `read_axes`.
    fn read_buttons(&mut self) -> Vec<bool> {
        self.current.buttons.as_slice().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_frames_then_repeats_last() {
        // Arrange
        let first = TelemetryFrame::new().axis(ControllerAxis::RX, 0.1);
        let second = TelemetryFrame::new().press(ControllerButton::RA);
        let mut source = ScriptedTelemetrySource::new([first, second]);

        // Act
        let a1 = source.read_axes();
        let _ = source.read_buttons();
        let _ = source.read_axes();
        let b2 = source.read_buttons();
        let _ = source.read_axes();
        let b3 = source.read_buttons();

        // Assert
        assert_eq!(a1[ControllerAxis::RX.index()], 0.1);
        assert!(b2[ControllerButton::RA.index()]);
        assert_eq!(b2, b3);
        assert_eq!(source.frames_read(), 3);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_replace_pending_discards_unread_frames() {
        // Arrange: three live frames offered while none was read.
        let mut source = ScriptedTelemetrySource::default();
        for n in 1..=3 {
            source.replace_pending(TelemetryFrame::new().axis(ControllerAxis::RX, n as f32));
        }

        // Act
        let axes = source.read_axes();

        // Assert
        assert_eq!(axes[ControllerAxis::RX.index()], 3.0);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_empty_script_reports_still_frames() {
        let mut source = ScriptedTelemetrySource::default();
        assert_eq!(source.read_axes(), vec![0.0; AXIS_COUNT]);
        assert_eq!(source.read_buttons(), vec![false; BUTTON_COUNT]);
    }

    #[test]
    fn test_sway_clicks_trigger_at_start_of_each_second() {
        assert!(TelemetryFrame::sway(0).buttons.is_pressed(ControllerButton::RTrigger));
        assert!(TelemetryFrame::sway(72).buttons.is_pressed(ControllerButton::RTrigger));
        assert!(!TelemetryFrame::sway(10).buttons.is_pressed(ControllerButton::RTrigger));
    }

    #[test]
    fn test_sway_stays_within_five_centimetres() {
        for n in 0..288 {
            let x = TelemetryFrame::sway(n).axes.get(ControllerAxis::RX);
            assert!(x.abs() <= 0.05 + f32::EPSILON, "frame {n}: {x}");
        }
    }
}
