// Host side of the player: where impulses go and who hears about transitions

use glam::Vec2;
use log::{trace, warn};

use super::state::PlayerState;
use crate::core::math::to_physics;
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};

/// Everything the player controller needs from the outside world
///
/// Only `apply_impulse` is required. The notification hooks default to no-ops
/// so a host can pick the ones it wants to react to (aim indicator,
/// animation, sound).
pub trait PlayerHost {
    /// Apply an instantaneous impulse to the player's body
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Capped drag offset while the player is aiming
    fn drag_preview(&mut self, _state: PlayerState, _offset: Vec2) {}

    /// `state` just became active
    fn state_entered(&mut self, _state: PlayerState, _prev: Option<PlayerState>) {}

    /// `state` is about to be replaced by `next`
    fn state_exited(&mut self, _state: PlayerState, _next: PlayerState) {}
}

/// Player host backed by a rapier2d body
pub struct PhysicsHost {
    world: PhysicsWorld,
    body: RigidBodyHandle,
    aim: Option<Vec2>,
}

impl PhysicsHost {
    pub fn new(world: PhysicsWorld, body: RigidBodyHandle) -> Self {
        Self {
            world,
            body,
            aim: None,
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Handle of the player's rigid body
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Current aim offset, present only while a launch drag is in progress
    pub fn aim(&self) -> Option<Vec2> {
        self.aim
    }
}

impl PlayerHost for PhysicsHost {
    fn apply_impulse(&mut self, impulse: Vec2) {
        self.aim = None;

        let Some(body) = self.world.get_rigid_body_mut(self.body) else {
            warn!("Player body missing, dropping impulse {impulse}");
            return;
        };

        trace!("Applying impulse {impulse} to player body");
        body.apply_impulse(to_physics(impulse), true);
    }

    fn drag_preview(&mut self, _state: PlayerState, offset: Vec2) {
        self.aim = Some(offset);
    }

    fn state_exited(&mut self, _state: PlayerState, _next: PlayerState) {
        self.aim = None;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Everything a [`RecordingHost`] was told, in order
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum HostEvent {
        Impulse(Vec2),
        Preview(PlayerState, Vec2),
        Entered(PlayerState, Option<PlayerState>),
        Exited(PlayerState, PlayerState),
    }

    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub events: Vec<HostEvent>,
    }

    impl RecordingHost {
        pub fn impulses(&self) -> Vec<Vec2> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    HostEvent::Impulse(impulse) => Some(*impulse),
                    _ => None,
                })
                .collect()
        }

        /// Only the enter/exit notifications
        pub fn transitions(&self) -> Vec<HostEvent> {
            self.events
                .iter()
                .copied()
                .filter(|event| matches!(event, HostEvent::Entered(..) | HostEvent::Exited(..)))
                .collect()
        }
    }

    impl PlayerHost for RecordingHost {
        fn apply_impulse(&mut self, impulse: Vec2) {
            self.events.push(HostEvent::Impulse(impulse));
        }

        fn drag_preview(&mut self, state: PlayerState, offset: Vec2) {
            self.events.push(HostEvent::Preview(state, offset));
        }

        fn state_entered(&mut self, state: PlayerState, prev: Option<PlayerState>) {
            self.events.push(HostEvent::Entered(state, prev));
        }

        fn state_exited(&mut self, state: PlayerState, next: PlayerState) {
            self.events.push(HostEvent::Exited(state, next));
        }
    }
}
