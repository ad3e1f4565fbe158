// Physics system using rapier3d

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder3D};
pub use collision::CollisionGroups;
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

// Re-export commonly used rapier types for convenience
pub use rapier3d::prelude::{Isometry, Real};
