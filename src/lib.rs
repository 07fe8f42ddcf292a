// Player entity simulation for a 2D platform brawler
//
// The crate is split the same way as the game:
// - `core`: Math helpers shared by everything else
// - `engine`: Fixed-step loop, timers, input sampling and the rapier2d adapter
// - `game`: The player entity itself

pub mod core;
pub mod engine;
pub mod game;

pub use engine::input::InputSnapshot;
pub use game::player::{
    AnimationClock, AnimationPlayer, AttackKind, Player, PlayerEvent, PlayerFrame, PlayerStats,
    Rejection,
};
