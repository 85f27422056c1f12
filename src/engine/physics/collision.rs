use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// What a collider is, as far as game logic cares
///
/// Stored in the collider's interaction group memberships, so the category of
/// any collider can be read back from the physics world without a side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionCategory {
    /// The player character
    Player = 0b0001,

    /// Anything the player can land on
    Ground = 0b0010,

    /// Touching it kills the player
    Hazard = 0b0100,

    /// Trigger zones - detection only
    Sensor = 0b1000,
}

impl CollisionCategory {
    pub const ALL: [CollisionCategory; 4] = [
        CollisionCategory::Player,
        CollisionCategory::Ground,
        CollisionCategory::Hazard,
        CollisionCategory::Sensor,
    ];

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The player touches everything but other players
            CollisionCategory::Player => Group::from_bits_truncate(
                CollisionCategory::Ground as u32
                    | CollisionCategory::Hazard as u32
                    | CollisionCategory::Sensor as u32,
            ),

            CollisionCategory::Ground => Group::from_bits_truncate(CollisionCategory::Player as u32),

            CollisionCategory::Hazard => Group::from_bits_truncate(CollisionCategory::Player as u32),

            CollisionCategory::Sensor => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }

    /// Recover the category from a collider's interaction groups
    pub fn from_interaction_groups(groups: InteractionGroups) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| groups.memberships.contains(Group::from_bits_truncate(*category as u32)))
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// The collider on the other side of `collider`, if it took part in this event
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (a, b) = match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
            } => (collider1, collider2),
        };

        if a == collider {
            Some(b)
        } else if b == collider {
            Some(a)
        } else {
            None
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, CollisionEvent::Started { .. })
    }
}

/// Queue for storing collision events during physics step
///
/// rapier requires event handlers to be `Send + Sync`, hence the mutex even
/// though the game runs on one thread.
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
