// Energy pool
//
// Energy doubles as health: it drains passively, drops on damage, refills on
// pickups, and the player dies once it rounds down to zero.

use crate::core::math::{clamp, finite_or_zero, RoundingMode};

use super::rejection::Rejection;
use super::stats::PlayerStats;

/// Rounded energy values for display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyDisplay {
    pub energy: f32,
    pub max_energy: f32,
}

impl EnergyDisplay {
    /// "Energy: 87/100" style label
    pub fn label(&self) -> String {
        format!("Energy: {}/{}", self.energy, self.max_energy)
    }
}

/// Energy/health pool with clamped mutation
///
/// `current` always stays within `[0, max * max_multiplier]`. Once frozen
/// (the player died) every mutation is rejected.
#[derive(Debug, Clone)]
pub struct EnergyPool {
    current: f32,
    max: f32,
    gain_multiplier: f32,
    max_multiplier: f32,
    decay_per_second: f32,
    rounding: RoundingMode,
    frozen: bool,
}

impl EnergyPool {
    /// Create a pool from player stats
    pub fn from_stats(stats: &PlayerStats) -> Self {
        let mut pool = Self {
            current: 0.0,
            max: stats.max_energy,
            gain_multiplier: stats.energy_gain_multiplier,
            max_multiplier: stats.max_energy_multiplier,
            decay_per_second: stats.decay_per_second,
            rounding: stats.rounding,
            frozen: false,
        };
        pool.set_current(stats.energy);
        pool
    }

    /// Current raw energy
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Energy capacity after the max multiplier
    pub fn effective_max(&self) -> f32 {
        self.max * self.max_multiplier
    }

    pub fn gain_multiplier(&self) -> f32 {
        self.gain_multiplier
    }

    pub fn set_gain_multiplier(&mut self, multiplier: f32) {
        self.gain_multiplier = finite_or_zero(multiplier).max(0.0);
    }

    /// Change the capacity multiplier, re-clamping the current value
    pub fn set_max_multiplier(&mut self, multiplier: f32) {
        self.max_multiplier = finite_or_zero(multiplier).max(0.0);
        self.set_current(self.current);
    }

    /// Whether the pool rejects mutation
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Current energy rounded to whole units
    pub fn rounded(&self) -> f32 {
        self.rounding.round(self.current)
    }

    /// Whether the rounded energy has reached zero
    ///
    /// A small positive remainder (0.4) counts as empty.
    pub fn is_depleted(&self) -> bool {
        self.rounded() <= 0.0
    }

    /// Rounded values for the UI
    pub fn display(&self) -> EnergyDisplay {
        EnergyDisplay {
            energy: self.rounded(),
            max_energy: self.rounding.round(self.effective_max()),
        }
    }

    /// Subtract passive decay for `elapsed_secs` seconds
    pub fn apply_decay(&mut self, elapsed_secs: f32) -> Result<f32, Rejection> {
        self.ensure_live()?;
        let loss = self.decay_per_second * finite_or_zero(elapsed_secs);
        self.set_current(self.current - loss);
        Ok(self.current)
    }

    /// Add energy, scaled by the gain multiplier
    pub fn gain(&mut self, amount: f32) -> Result<f32, Rejection> {
        self.ensure_live()?;
        self.set_current(self.current + finite_or_zero(amount) * self.gain_multiplier);
        Ok(self.current)
    }

    /// Remove energy
    pub fn damage(&mut self, amount: f32) -> Result<f32, Rejection> {
        self.ensure_live()?;
        self.set_current(self.current - finite_or_zero(amount));
        Ok(self.current)
    }

    /// Empty the pool and reject all further mutation
    pub fn freeze_empty(&mut self) {
        self.current = 0.0;
        self.frozen = true;
    }

    fn ensure_live(&self) -> Result<(), Rejection> {
        if self.frozen {
            Err(Rejection::Dead)
        } else {
            Ok(())
        }
    }

    fn set_current(&mut self, value: f32) {
        self.current = clamp(finite_or_zero(value), 0.0, self.effective_max());
    }
}
