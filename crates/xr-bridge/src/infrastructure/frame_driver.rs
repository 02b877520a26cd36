//! Frame driver for running without a headset runtime.

use tracing::trace;

use crate::application::frame_loop::FrameDriver;

/// Accepts every frame except those in its skip schedule, and counts
/// begin/end calls.
#[derive(Debug, Default)]
pub struct HeadlessFrameDriver {
    /// Skip every `n`th frame when set.  Models the runtime dropping frames.
    skip_every: Option<u64>,
    begun: u64,
    ended: u64,
    last_immersive: bool,
}

impl HeadlessFrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every `n`th frame.  `n == 0` disables skipping.
    pub fn skipping_every(n: u64) -> Self {
        Self {
            skip_every: (n > 0).then_some(n),
            ..Self::default()
        }
    }

    pub fn frames_begun(&self) -> u64 {
        self.begun
    }

    pub fn frames_ended(&self) -> u64 {
        self.ended
    }

    /// Immersive flag passed to the most recent `begin_frame`.
    pub fn last_immersive(&self) -> bool {
        self.last_immersive
    }
}

impl FrameDriver for HeadlessFrameDriver {
    fn begin_frame(&mut self, immersive: bool) -> bool {
        self.begun += 1;
        self.last_immersive = immersive;
        let render = self.skip_every.map_or(true, |n| self.begun % n != 0);
        if !render {
            trace!(frame = self.begun, "frame skipped");
        }
        render
    }

    fn end_frame(&mut self) {
        self.ended += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_driver_renders_every_frame() {
        let mut driver = HeadlessFrameDriver::new();
        assert!((0..10).all(|_| driver.begin_frame(false)));
        assert_eq!(driver.frames_begun(), 10);
    }

    #[test]
    fn test_skipping_driver_drops_every_nth_frame() {
        // Arrange
        let mut driver = HeadlessFrameDriver::skipping_every(3);

        // Act
        let rendered: Vec<bool> = (0..6).map(|_| driver.begin_frame(true)).collect();

        // Assert
        assert_eq!(rendered, vec![true, true, false, true, true, false]);
        assert!(driver.last_immersive());
    }
}
