// Per-player action state and snapshot sampling

use super::action::Action;
use super::snapshot::InputSnapshot;
use std::collections::HashSet;

/// Tracks which actions a single player holds, and which were pressed this frame
#[derive(Debug, Default)]
pub struct ActionInput {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,
}

impl ActionInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Roll over to the next frame
    /// Call once per tick after the snapshot was taken
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Raw directional input, each axis one of -1, 0 or 1
    /// Returns (horizontal, vertical)
    pub fn direction(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }

    /// Condense the current state into the snapshot the simulation consumes
    pub fn snapshot(&self) -> InputSnapshot {
        let (horizontal_axis, vertical_axis) = self.direction();
        InputSnapshot {
            horizontal_axis,
            vertical_axis,
            jump_pressed: self.just_pressed(Action::Jump),
            attack_pressed: self.just_pressed(Action::Attack),
            heavy_attack_pressed: self.just_pressed(Action::HeavyAttack),
        }
    }
}
