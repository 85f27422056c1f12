use rapier2d::prelude::*;

use super::collision::{CollisionCategory, CollisionEvent as GameCollisionEvent, CollisionEventQueue};

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
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision events of the last step
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
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
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

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
            None,
            &(),
            &self.collision_event_queue,
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

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Game category of a collider, read from its collision groups
    pub fn collider_category(&self, handle: ColliderHandle) -> Option<CollisionCategory> {
        self.get_collider(handle)
            .and_then(|collider| CollisionCategory::from_interaction_groups(collider.collision_groups()))
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Categories of everything `body` started touching during the last step
    pub fn contacts_started(&self, body: RigidBodyHandle) -> Vec<CollisionCategory> {
        let Some(rigid_body) = self.get_rigid_body(body) else {
            return Vec::new();
        };
        let own = rigid_body.colliders();

        self.get_collision_events()
            .into_iter()
            .filter(GameCollisionEvent::is_started)
            .filter_map(|event| {
                own.iter()
                    .find_map(|collider| event.other(*collider))
                    .and_then(|other| self.collider_category(other))
            })
            .collect()
    }

    /// Check if `body` is resting against a collider of `category` right now
    ///
    /// Unlike [`Self::contacts_started`] this also sees contacts that never
    /// broke, such as a body sliding along the floor.
    pub fn is_touching(&self, body: RigidBodyHandle, category: CollisionCategory) -> bool {
        let Some(rigid_body) = self.get_rigid_body(body) else {
            return false;
        };

        rigid_body.colliders().iter().any(|own| {
            self.narrow_phase
                .contact_pairs_with(*own)
                .filter(|pair| pair.has_any_active_contact)
                .any(|pair| {
                    let other = if pair.collider1 == *own {
                        pair.collider2
                    } else {
                        pair.collider1
                    };
                    self.collider_category(other) == Some(category)
                })
        })
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
