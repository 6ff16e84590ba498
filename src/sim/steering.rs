//! Steering signal smoothing
//!
//! Raw head offsets are jittery. The filter desensitizes small deflections
//! with a power curve, then runs a first-order low-pass so a step input
//! reaches ~63% of its target in about five ticks.

use serde::{Deserialize, Serialize};

/// Exponent of the sensitivity curve
const CURVE_EXPONENT: f32 = 0.9;
/// Gain applied after the curve; also the fixed point for full deflection
const CURVE_GAIN: f32 = 0.9;
/// Weight of the previous value in the exponential blend
const RETAIN: f32 = 0.8;
/// Minimum |scalar| for the direction indicator
const INDICATOR_THRESHOLD: f32 = 0.1;

/// Which way the vehicle is being steered, for the on-screen arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteerDirection {
    Left,
    Right,
}

/// Smooths normalized head offsets into a steering scalar in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringFilter {
    value: f32,
}

impl SteeringFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample and return the new scalar.
    ///
    /// `None` (no face in view) recenters immediately instead of decaying.
    pub fn update(&mut self, raw: Option<f32>) -> f32 {
        self.value = match raw {
            None => 0.0,
            Some(raw) => {
                let curved = sensitivity_curve(raw);
                self.value * RETAIN + curved * (1.0 - RETAIN)
            }
        };
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn direction(&self) -> Option<SteerDirection> {
        direction_of(self.value)
    }
}

/// Sign-preserving `|x|^0.9 * 0.9` after clamping to [-1, 1]
pub fn sensitivity_curve(raw: f32) -> f32 {
    // NaN from a broken tracker counts as centered
    let x = if raw.is_nan() { 0.0 } else { raw.clamp(-1.0, 1.0) };
    if x == 0.0 {
        return 0.0;
    }
    x.signum() * x.abs().powf(CURVE_EXPONENT) * CURVE_GAIN
}

/// Arrow direction for a steering scalar, `None` inside the dead zone
pub fn direction_of(scalar: f32) -> Option<SteerDirection> {
    if scalar.abs() <= INDICATOR_THRESHOLD {
        None
    } else if scalar > 0.0 {
        Some(SteerDirection::Right)
    } else {
        Some(SteerDirection::Left)
    }
}
