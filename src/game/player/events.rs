// Player output: events for the animation/audio collaborators and the per-tick frame

use glam::Vec2;

use super::animation::AnimationTrigger;
use super::attack::AttackVariant;
use super::energy::EnergyDisplay;

/// Sounds the simulation asks the audio side to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Attack(AttackVariant),
    Death,
}

/// Something the outside world should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerEvent {
    /// Fire a one-shot animation
    Trigger(AnimationTrigger),
    /// Play a sound
    Sound(SoundCue),
    /// Show or hide the debug hitbox marker
    HitboxMarker { visible: bool },
}

/// Which body axes physics must hold still
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionLock {
    /// Normal play, only rotation is locked
    #[default]
    Rotation,
    /// Position and rotation locked (attack windup and active phase)
    Full,
    /// Horizontal position and rotation locked, the body may still fall (dead)
    HorizontalAndRotation,
}

impl MotionLock {
    pub fn locks_horizontal(&self) -> bool {
        !matches!(self, Self::Rotation)
    }

    pub fn locks_vertical(&self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Ordered queue of events raised between two drains
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<PlayerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: PlayerEvent) {
        self.events.push(event);
    }

    pub fn trigger(&mut self, trigger: AnimationTrigger) {
        self.push(PlayerEvent::Trigger(trigger));
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.push(PlayerEvent::Sound(cue));
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Everything the host needs after one simulation tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerFrame {
    /// Rounded energy for the UI
    pub energy: EnergyDisplay,
    /// Moving horizontally while grounded
    pub running: bool,
    /// Horizontal velocity to set on the body
    pub horizontal_velocity: f32,
    /// Velocity to set on the body if a jump happened this tick
    pub jump_impulse: Option<Vec2>,
    pub motion_lock: MotionLock,
    /// Translation to add to the body this tick
    pub entity_shift: Vec2,
    /// Hitbox position relative to the body
    pub hitbox_offset: Vec2,
    /// Camera focus position relative to the body
    pub camera_focus_offset: Vec2,
    /// Whether hits should be checked against the hitbox
    pub hitbox_armed: bool,
    /// Whether the sprite should face left
    pub flip_horizontal: bool,
    /// Events raised since the previous frame, oldest first
    pub events: Vec<PlayerEvent>,
}

impl PlayerFrame {
    /// Animation triggers contained in this frame, in order
    pub fn triggers(&self) -> impl Iterator<Item = AnimationTrigger> + '_ {
        self.events.iter().filter_map(|event| match event {
            PlayerEvent::Trigger(trigger) => Some(*trigger),
            _ => None,
        })
    }

    pub fn has_trigger(&self, trigger: AnimationTrigger) -> bool {
        self.triggers().any(|t| t == trigger)
    }
}
