//! Wall-clock to fixed-step conversion for frame-driven hosts

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and hands out whole simulation ticks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks owed after `dt` seconds of wall time.
    ///
    /// Frames longer than 0.1 s are clamped and a non-finite `dt` is ignored.
    /// Hitting `MAX_SUBSTEPS` drops the remaining backlog.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() {
            return 0;
        }
        self.accumulator += dt.clamp(0.0, 0.1);
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_frame_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(SIM_DT), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.04), 2);
        assert_eq!(clock.advance(0.02), 1);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_non_finite_frame_is_skipped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.01), 0);
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(clock.advance(bad), 0);
        }
        // Still advancing afterwards, with the earlier remainder intact
        assert_eq!(clock.advance(0.01), 1);
    }

    #[test]
    fn test_negative_frame_adds_nothing() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock, FrameClock::new());
    }
}
