// Engine modules: game loop, timers, physics, input

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod timer;
