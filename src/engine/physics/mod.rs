// Physics system using rapier2d
//
// The player's motion sink and collision source.

pub mod body;
mod collision;
mod world;

pub use body::RigidBodyHandle;
pub use collision::CollisionCategory;
pub use world::PhysicsWorld;
