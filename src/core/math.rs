// Math utilities and helper functions

use serde::{Deserialize, Serialize};

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Sign of a non-zero axis value (-1.0 or 1.0), `None` for zero and NaN
pub fn axis_sign(value: f32) -> Option<f32> {
    if value < 0.0 {
        Some(-1.0)
    } else if value > 0.0 {
        Some(1.0)
    } else {
        None
    }
}

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// How values are rounded to whole units for display and the death check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Banker's rounding: 0.5 -> 0, 1.5 -> 2, 2.5 -> 2
    #[default]
    HalfToEven,
    /// 0.5 -> 1, 1.5 -> 2, 2.5 -> 3
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round to the nearest whole unit
    pub fn round(self, value: f32) -> f32 {
        match self {
            Self::HalfToEven => value.round_ties_even(),
            Self::HalfAwayFromZero => value.round(),
        }
    }
}
