// Sampled input handed to the simulation once per tick

use crate::core::math::{clamp, finite_or_zero};

/// One tick's worth of already-sampled input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Horizontal movement axis (-1 to 1)
    pub horizontal_axis: f32,
    /// Vertical movement axis (-1 to 1), sampled but not used for movement
    pub vertical_axis: f32,
    /// Jump was pressed this tick
    pub jump_pressed: bool,
    /// Normal attack was pressed this tick
    pub attack_pressed: bool,
    /// Heavy attack was pressed this tick
    pub heavy_attack_pressed: bool,
}

impl InputSnapshot {
    /// Snapshot with no input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot holding only a horizontal axis value
    pub fn moving(horizontal_axis: f32) -> Self {
        Self {
            horizontal_axis,
            ..Self::default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    pub fn with_attack(mut self) -> Self {
        self.attack_pressed = true;
        self
    }

    pub fn with_heavy_attack(mut self) -> Self {
        self.heavy_attack_pressed = true;
        self
    }

    /// Copy with both axes forced into [-1, 1] and NaN replaced by 0
    pub fn sanitized(&self) -> Self {
        Self {
            horizontal_axis: clamp(finite_or_zero(self.horizontal_axis), -1.0, 1.0),
            vertical_axis: clamp(finite_or_zero(self.vertical_axis), -1.0, 1.0),
            ..*self
        }
    }
}
