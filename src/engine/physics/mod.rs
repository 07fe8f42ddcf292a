// Physics using rapier2d
//
// The player simulation never reads the physics state directly. The world
// hands it ground contact changes after each step and takes back one
// `PlayerFrame` per tick to write onto the player body.

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::{locked_axes_for, GroundSignal, PhysicsWorld};
