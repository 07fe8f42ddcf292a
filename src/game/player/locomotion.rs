// Locomotion: facing, horizontal speed, multi-jump and ground contact

use glam::Vec2;

use crate::core::math::axis_sign;

use super::animation::AnimationTrigger;
use super::rejection::Rejection;

/// Horizontal direction the player faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing implied by an axis value, `None` when the axis is neutral
    pub fn from_axis(axis: f32) -> Option<Self> {
        axis_sign(axis).map(|sign| if sign < 0.0 { Self::Left } else { Self::Right })
    }
}

/// A contact-begin report against something tagged as ground
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroundContact {
    /// World-space contact points
    pub points: Vec<Vec2>,
    /// World-space y of the player body
    pub entity_y: f32,
}

impl GroundContact {
    pub fn new(points: Vec<Vec2>, entity_y: f32) -> Self {
        Self { points, entity_y }
    }

    /// True when no contact point lies above the body
    ///
    /// A single point above rules the whole contact out, so walls and
    /// ceilings touching the side of the body never count as ground.
    pub fn is_below_entity(&self) -> bool {
        self.points.iter().all(|point| point.y <= self.entity_y)
    }
}

/// A successful jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    /// Velocity to set on the body
    pub impulse: Vec2,
    /// `Jump` for the first jump, `JumpFlip` for every one after it
    pub trigger: AnimationTrigger,
    /// Jumps spent since last landing, including this one
    pub jump_count: u32,
}

/// Ground/air state and facing for the player
#[derive(Debug, Clone)]
pub struct Locomotion {
    grounded: bool,
    falling: bool,
    jump_count: u32,
    jump_limit: u32,
    facing: Facing,
}

impl Locomotion {
    pub fn new(jump_limit: u32) -> Self {
        Self {
            grounded: false,
            falling: false,
            jump_count: 0,
            jump_limit,
            facing: Facing::Right,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_falling(&self) -> bool {
        self.falling
    }

    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }

    pub fn jump_limit(&self) -> u32 {
        self.jump_limit
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Update facing from the horizontal axis; a neutral axis keeps the old facing
    pub fn set_horizontal_input(&mut self, axis: f32) {
        if let Some(facing) = Facing::from_axis(axis) {
            self.facing = facing;
        }
    }

    /// Horizontal velocity for an axis value
    pub fn horizontal_velocity(&self, axis: f32, speed_multiplier: f32) -> f32 {
        axis.abs() * speed_multiplier * self.facing.sign()
    }

    /// Whether another jump is allowed right now
    pub fn can_jump(&self) -> bool {
        self.grounded || self.jump_count < self.jump_limit
    }

    /// Jump if allowed
    pub fn try_jump(&mut self, jump_multiplier: f32) -> Result<Jump, Rejection> {
        if !self.can_jump() {
            return Err(Rejection::JumpLimitReached {
                used: self.jump_count,
                limit: self.jump_limit,
            });
        }

        self.jump_count = (self.jump_count + 1).min(self.jump_limit);
        self.grounded = false;

        let trigger = if self.jump_count == 1 {
            AnimationTrigger::Jump
        } else {
            AnimationTrigger::JumpFlip
        };

        Ok(Jump {
            impulse: Vec2::new(0.0, jump_multiplier),
            trigger,
            jump_count: self.jump_count,
        })
    }

    /// Handle a contact-begin against ground, returns whether it grounded the player
    pub fn on_ground_contact(&mut self, contact: &GroundContact) -> bool {
        if !contact.is_below_entity() {
            return false;
        }

        self.grounded = true;
        self.jump_count = 0;
        self.falling = true;
        true
    }

    /// Handle a contact-end against ground; always trusted
    pub fn on_ground_contact_end(&mut self) {
        self.grounded = false;
    }
}
