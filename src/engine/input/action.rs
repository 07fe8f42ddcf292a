// Game action definitions

/// Represents all actions the player entity reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Jump,

    // Combat
    Attack,
    HeavyAttack,
}
