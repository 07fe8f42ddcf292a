// Player stats and tuning
//
// One set of numbers drives every player. The defaults below are the tuned
// values; a RON file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::math::RoundingMode;

/// What happens to an attack that is still running when the player dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeathAttackPolicy {
    /// The attack keeps advancing through its phases, but can no longer
    /// unfreeze the body
    #[default]
    Continue,
    /// The attack is dropped on the spot and its offsets are undone
    Abort,
}

/// Errors raised while loading or validating stats
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse stats: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid stat `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tunable player properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    // Movement
    /// Horizontal speed at full axis deflection (units/second)
    pub speed_multiplier: f32,
    /// Upward velocity set by a jump
    pub jump_multiplier: f32,
    /// Jumps allowed before landing again
    pub jump_limit: u32,

    // Energy
    /// Energy at spawn
    pub energy: f32,
    /// Base energy capacity
    pub max_energy: f32,
    /// Scales every energy gain
    pub energy_gain_multiplier: f32,
    /// Scales the energy capacity
    pub max_energy_multiplier: f32,
    /// Energy lost per second of passive decay
    pub decay_per_second: f32,
    /// Seconds between decay applications
    pub decay_period: f32,

    // Attack
    /// How far the body lunges toward the facing direction while the hitbox is active
    pub lunge_offset: f32,
    /// Horizontal distance of the hitbox from the body at rest
    pub hitbox_reach: f32,
    /// Vertical offset of the hitbox from the body
    pub hitbox_height: f32,
    /// Cooldown that remains after an attack's active phase
    pub recovery_grace: f32,
    pub death_attack_policy: DeathAttackPolicy,

    // Death
    /// Length of the death display window in seconds
    pub death_display_secs: f32,
    /// Rounding used for the energy display and the death threshold
    pub rounding: RoundingMode,
}

/// The tuned defaults
pub const BASE_STATS: PlayerStats = PlayerStats {
    speed_multiplier: 5.0,
    jump_multiplier: 7.0,
    jump_limit: 2,

    energy: 100.0,
    max_energy: 100.0,
    energy_gain_multiplier: 1.0,
    max_energy_multiplier: 1.0,
    decay_per_second: 0.5,
    decay_period: 1.0,

    lunge_offset: 1.25,
    hitbox_reach: 1.5,
    hitbox_height: -0.95,
    recovery_grace: 0.5,
    death_attack_policy: DeathAttackPolicy::Continue,

    death_display_secs: 3.0,
    rounding: RoundingMode::HalfToEven,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    /// Get the standard player stats
    pub fn standard() -> Self {
        BASE_STATS
    }

    /// Parse stats from RON text; missing fields keep their defaults
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let stats: Self = ron::from_str(text)?;
        stats.validate()?;
        Ok(stats)
    }

    /// Load stats from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let stats = Self::from_ron_str(&text)?;
        log::info!("Loaded player stats from {}", path.as_ref().display());
        Ok(stats)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number greater than zero",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number, zero or greater",
                })
            }
        }

        fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite number",
                })
            }
        }

        if self.jump_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "jump_limit",
                reason: "must allow at least one jump",
            });
        }

        non_negative("speed_multiplier", self.speed_multiplier)?;
        finite("jump_multiplier", self.jump_multiplier)?;
        non_negative("energy", self.energy)?;
        positive("max_energy", self.max_energy)?;
        positive("energy_gain_multiplier", self.energy_gain_multiplier)?;
        positive("max_energy_multiplier", self.max_energy_multiplier)?;
        non_negative("decay_per_second", self.decay_per_second)?;
        positive("decay_period", self.decay_period)?;
        finite("lunge_offset", self.lunge_offset)?;
        finite("hitbox_reach", self.hitbox_reach)?;
        finite("hitbox_height", self.hitbox_height)?;
        non_negative("recovery_grace", self.recovery_grace)?;
        non_negative("death_display_secs", self.death_display_secs)?;

        Ok(())
    }

    /// Energy capacity after the max multiplier
    pub fn effective_max_energy(&self) -> f32 {
        self.max_energy * self.max_energy_multiplier
    }
}
