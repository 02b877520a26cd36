//! Concurrency tests: a window-manager thread observing the shared model while
//! the translator runs must only ever see states the translator committed as
//! a whole.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use xr_bridge::application::translate_input::{Lockable, SessionSettings, XrSession};
use xr_bridge::infrastructure::{
    telemetry::{ScriptedTelemetrySource, TelemetryFrame},
    windowing::SharedInputModel,
};
use xr_core::{ControllerAxis, ControllerButton, PointerButton};

const FRAMES: usize = 120;

/// Hand moves right every frame while the trigger alternates, so pointer
/// position and left-button level change together on every frame.
fn script() -> Vec<TelemetryFrame> {
    (0..FRAMES)
        .map(|n| {
            let frame = TelemetryFrame::new().axis(ControllerAxis::RX, n as f32 * 0.001);
            if n % 2 == 1 {
                frame.press(ControllerButton::RTrigger)
            } else {
                frame
            }
        })
        .collect()
}

fn observe(model: &SharedInputModel) -> (i32, i32, bool) {
    // Listed in the opposite order on purpose; acquisition order is fixed.
    let guard = model.acquire(&[Lockable::InputDevice, Lockable::WindowManager]);
    let pointer = guard
        .input_device
        .as_ref()
        .map(|dev| dev.pointer)
        .unwrap_or_default();
    (pointer.x, pointer.y, pointer.is_pressed(PointerButton::Left))
}

/// Every (x, y, left) state the translator leaves behind, computed on one
/// thread.
fn committed_states() -> HashSet<(i32, i32, bool)> {
    let model = SharedInputModel::new(4000, 1000);
    let mut source = ScriptedTelemetrySource::new(script());
    let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();

    let mut states = HashSet::new();
    states.insert(observe(&model));
    for _ in 0..FRAMES {
        session.update_frame(&mut source, &model).unwrap();
        states.insert(observe(&model));
    }
    states
}

#[test]
fn test_window_manager_never_observes_torn_pointer_state() {
    // Arrange
    let valid = committed_states();
    let model = Arc::new(SharedInputModel::new(4000, 1000));
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let model = Arc::clone(&model);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut seen = Vec::new();
            while !done.load(Ordering::Acquire) {
                seen.push(observe(&model));
                model.click_to_focus();
            }
            seen.push(observe(&model));
            seen
        })
    };

    // Act
    let mut source = ScriptedTelemetrySource::new(script());
    let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();
    for _ in 0..FRAMES {
        session.update_frame(&mut source, model.as_ref()).unwrap();
        thread::yield_now();
    }
    done.store(true, Ordering::Release);
    let seen = observer.join().expect("observer thread panicked");

    // Assert
    assert!(!seen.is_empty());
    for state in &seen {
        assert!(valid.contains(state), "observed torn state {state:?}");
    }
}

#[test]
fn test_translator_and_window_manager_do_not_deadlock() {
    // Arrange: several window-manager threads hammering both locks while the
    // translator runs.
    let model = Arc::new(SharedInputModel::new(1920, 1080));
    let done = Arc::new(AtomicBool::new(false));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    model.click_to_focus();
                    let _ = model.window_manager_snapshot();
                }
            })
        })
        .collect();

    // Act
    let mut source = ScriptedTelemetrySource::default();
    let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();
    for n in 0..500 {
        source.push(TelemetryFrame::sway(n));
        session.update_frame(&mut source, model.as_ref()).unwrap();
    }
    done.store(true, Ordering::Release);

    // Assert
    for worker in workers {
        worker.join().expect("window-manager thread panicked");
    }
    assert_eq!(session.frames(), 500);
}
