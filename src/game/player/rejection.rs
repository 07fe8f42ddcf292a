// Denied actions
//
// Nothing the player is asked to do is an error in the gameplay sense. Illegal
// jumps, attacks during cooldown and anything attempted while dead are simply
// ignored by the simulation, but callers get to see why.

/// Reason an action was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("jump denied: airborne with {used} of {limit} jumps spent")]
    JumpLimitReached { used: u32, limit: u32 },

    #[error("action denied: movement is frozen by an attack")]
    MovementFrozen,

    #[error("attack denied: previous attack is still on cooldown")]
    AttackOnCooldown,

    #[error("action denied: player is dead")]
    Dead,
}
