//! Per-frame driver: brackets each input update with the headset runtime's
//! begin/end frame calls.
//!
//! The runtime decides whether a frame should be rendered at all.  When it
//! declines (`begin_frame` returns `false`) the input update is skipped so
//! translator state only advances on frames the user actually sees.

use super::translate_input::{
    FrameReport, TelemetrySource, TranslateError, WindowingSystem, XrSession,
};

/// Headset runtime frame lifecycle.
#[cfg_attr(test, mockall::automock)]
pub trait FrameDriver {
    /// Starts a frame.  `immersive` tells the runtime whether the pointer is
    /// currently following the headset.  Returns `false` if the frame should
    /// be skipped.
    fn begin_frame(&mut self, immersive: bool) -> bool;

    /// Finishes the frame started by the last successful `begin_frame`.
    fn end_frame(&mut self);
}

/// Runs one frame: begin, translate input, end.
///
/// Returns `Ok(None)` when the runtime skipped the frame.  `end_frame` is
/// still called if the input update fails, so the runtime never sees an
/// unbalanced begin.
///
/// # Errors
///
/// Propagates [`TranslateError`] from [`XrSession::update_frame`].
pub fn run_frame<W: WindowingSystem>(
    driver: &mut dyn FrameDriver,
    session: &mut XrSession,
    telemetry: &mut dyn TelemetrySource,
    windowing: &W,
) -> Result<Option<FrameReport>, TranslateError> {
    if !driver.begin_frame(session.is_immersive()) {
        return Ok(None);
    }
    let result = session.update_frame(telemetry, windowing);
    driver.end_frame();
    result.map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::translate_input::{MockTelemetrySource, SessionSettings};
    use crate::infrastructure::windowing::SharedInputModel;
    use mockall::predicate::eq;
    use xr_core::{AXIS_COUNT, BUTTON_COUNT};

    fn source_with_frames() -> MockTelemetrySource {
        let mut source = MockTelemetrySource::new();
        source.expect_axis_count().return_const(AXIS_COUNT);
        source.expect_button_count().return_const(BUTTON_COUNT);
        source
    }

    #[test]
    fn test_skipped_frame_does_not_read_telemetry_or_advance_state() {
        // Arrange
        let mut source = source_with_frames();
        source.expect_read_axes().never();
        source.expect_read_buttons().never();
        let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();
        let mut driver = MockFrameDriver::new();
        driver.expect_begin_frame().with(eq(false)).return_const(false);
        driver.expect_end_frame().never();
        let windowing = SharedInputModel::new(1000, 600);

        // Act
        let report = run_frame(&mut driver, &mut session, &mut source, &windowing).unwrap();

        // Assert
        assert_eq!(report, None);
        assert_eq!(session.frames(), 0);
    }

    #[test]
    fn test_accepted_frame_runs_update_between_begin_and_end() {
        // Arrange
        let mut source = source_with_frames();
        source.expect_read_axes().times(1).returning(|| vec![0.0; AXIS_COUNT]);
        source.expect_read_buttons().times(1).returning(|| vec![false; BUTTON_COUNT]);
        let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();
        let mut driver = MockFrameDriver::new();
        let mut seq = mockall::Sequence::new();
        driver
            .expect_begin_frame()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        driver.expect_end_frame().times(1).in_sequence(&mut seq).return_const(());
        let windowing = SharedInputModel::new(1000, 600);

        // Act
        let report = run_frame(&mut driver, &mut session, &mut source, &windowing).unwrap();

        // Assert
        assert_eq!(report.map(|r| r.frame), Some(1));
    }

    #[test]
    fn test_end_frame_called_even_when_update_fails() {
        // Arrange
        let mut source = source_with_frames();
        source.expect_read_axes().returning(|| vec![0.0; 3]);
        let mut session = XrSession::start(&source, SessionSettings::default()).unwrap();
        let mut driver = MockFrameDriver::new();
        driver.expect_begin_frame().return_const(true);
        driver.expect_end_frame().times(1).return_const(());
        let windowing = SharedInputModel::new(1000, 600);

        // Act
        let result = run_frame(&mut driver, &mut session, &mut source, &windowing);

        // Assert
        assert!(matches!(result, Err(TranslateError::Telemetry(_))));
    }
}
