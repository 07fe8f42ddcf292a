// Input handling
//
// The simulation never polls devices. Hosts translate their own key/button
// events into `Action` presses, and once per tick the sampler condenses them
// into an `InputSnapshot` that the player consumes.
//
// - `action`: Game actions the player understands
// - `player`: Per-player pressed / just-pressed tracking
// - `snapshot`: The per-tick sample handed to the simulation

pub mod action;
pub mod player;
pub mod snapshot;

pub use action::Action;
pub use player::ActionInput;
pub use snapshot::InputSnapshot;
