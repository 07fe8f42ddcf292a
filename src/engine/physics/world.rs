use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashSet;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};
use crate::game::player::{GroundContact, MotionLock, PlayerFrame};

/// Ground contact change for the player, in the order physics reported it
#[derive(Debug, Clone, PartialEq)]
pub enum GroundSignal {
    Begin(GroundContact),
    End,
}

/// Body constraints for a motion lock
pub fn locked_axes_for(lock: MotionLock) -> LockedAxes {
    match lock {
        MotionLock::Rotation => LockedAxes::ROTATION_LOCKED,
        MotionLock::Full => LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED,
        MotionLock::HorizontalAndRotation => {
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_X
        }
    }
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision events from the last step
    collision_event_queue: CollisionEventQueue,

    /// Colliders the player can land on
    ground_colliders: HashSet<ColliderHandle>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            ground_colliders: HashSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Add a collider and register it as ground
    pub fn add_ground(&mut self, collider: Collider, parent_handle: RigidBodyHandle) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.ground_colliders.insert(handle);
        handle
    }

    /// Whether a collider is registered as ground
    pub fn is_ground(&self, handle: ColliderHandle) -> bool {
        self.ground_colliders.contains(&handle)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// World position of a body
    pub fn body_translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Get all collision events from the last step
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Ground contact changes for a player collider during the last step
    ///
    /// Contact points are the world-space solver contacts of the pair; the
    /// reference height is the y of the collider's parent body.
    pub fn ground_contacts(&self, player_collider: ColliderHandle) -> Vec<GroundSignal> {
        let Some(collider) = self.collider_set.get(player_collider) else {
            return Vec::new();
        };
        let entity_y = collider
            .parent()
            .and_then(|parent| self.rigid_body_set.get(parent))
            .map_or(collider.translation().y, |body| body.translation().y);

        self.collision_events()
            .into_iter()
            .filter_map(|event| {
                let other = event.other(player_collider)?;
                if !self.is_ground(other) {
                    return None;
                }

                match event {
                    GameCollisionEvent::Started { .. } => Some(GroundSignal::Begin(
                        GroundContact::new(self.contact_points(player_collider, other), entity_y),
                    )),
                    GameCollisionEvent::Stopped { .. } => Some(GroundSignal::End),
                }
            })
            .collect()
    }

    /// Write one player frame onto its rigid body, returns false if the body is gone
    pub fn apply_motion(&mut self, handle: RigidBodyHandle, frame: &PlayerFrame) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };

        body.set_locked_axes(locked_axes_for(frame.motion_lock), true);

        let mut linvel = *body.linvel();
        linvel.x = frame.horizontal_velocity;
        if let Some(impulse) = frame.jump_impulse {
            linvel.y = impulse.y;
        }
        if frame.motion_lock.locks_horizontal() {
            linvel.x = 0.0;
        }
        if frame.motion_lock.locks_vertical() {
            linvel.y = 0.0;
        }
        body.set_linvel(linvel, true);

        if frame.entity_shift != Vec2::ZERO {
            let translation =
                body.translation() + vector![frame.entity_shift.x, frame.entity_shift.y];
            body.set_translation(translation, true);
        }

        true
    }

    /// Move the hitbox marker to its offset and switch it on or off
    pub fn place_hitbox(&mut self, handle: ColliderHandle, offset: Vec2, enabled: bool) -> bool {
        let Some(collider) = self.collider_set.get_mut(handle) else {
            return false;
        };
        collider.set_translation_wrt_parent(vector![offset.x, offset.y]);
        collider.set_enabled(enabled);
        true
    }

    fn contact_points(&self, collider1: ColliderHandle, collider2: ColliderHandle) -> Vec<Vec2> {
        self.narrow_phase
            .contact_pair(collider1, collider2)
            .map(|pair| {
                pair.manifolds
                    .iter()
                    .flat_map(|manifold| manifold.data.solver_contacts.iter())
                    .map(|contact| Vec2::new(contact.point.x, contact.point.y))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
