// Player simulation
//
// Everything the player entity does in a frame:
// - Tunable stats loaded from RON
// - Energy pool that doubles as health
// - Movement, facing and multi-jump
// - Attack sequencing with hitbox and camera offsets
// - Alive/Dead state and the per-tick output frame

pub mod animation;
pub mod attack;
pub mod energy;
pub mod events;
pub mod locomotion;
#[allow(clippy::module_inception)]
pub mod player;
pub mod rejection;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationClock, AnimationPlayer, AnimationTrigger};
pub use attack::{AttackKind, AttackPhase, AttackSequencer, AttackSession, AttackStart, AttackVariant};
pub use energy::{EnergyDisplay, EnergyPool};
pub use events::{EventQueue, MotionLock, PlayerEvent, PlayerFrame, SoundCue};
pub use locomotion::{Facing, GroundContact, Jump, Locomotion};
pub use player::Player;
pub use rejection::Rejection;
pub use state::{PlayerState, PlayerStateMachine};
pub use stats::{ConfigError, DeathAttackPolicy, PlayerStats, BASE_STATS};
