use super::collision::CollisionGroups;
use crate::core::math::{to_na_point, to_na_vector};
use crate::engine::csg::Csg;
use glam::Vec3;
use rapier3d::prelude::*;

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    translation: Vec3,
    linvel: Vec3,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            translation: Vec3::ZERO,
            linvel: Vec3::ZERO,
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            translation: Vec3::ZERO,
            linvel: Vec3::ZERO,
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the body position
    pub fn translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, linvel: Vec3) -> Self {
        self.linvel = linvel;
        self
    }

    /// Set gravity scale (0.0 = no gravity, 1.0 = normal gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock all rotations (keeps a capsule upright)
    pub fn lock_rotations(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .translation(to_na_vector(self.translation))
            .linvel(to_na_vector(self.linvel))
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder3D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder3D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Terrain,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::with_shape(SharedShape::cuboid(
            half_extents.x,
            half_extents.y,
            half_extents.z,
        ))
    }

    /// Create a capsule standing along the Y axis
    pub fn capsule_y(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule_y(half_height, radius))
    }

    /// Create a triangle mesh collider from the surface of a solid.
    /// An empty solid has no surface to collide with and yields `None`.
    pub fn from_csg(csg: &Csg) -> Option<Self> {
        if csg.is_empty() {
            return None;
        }

        let vertices: Vec<_> = csg
            .triangles()
            .flat_map(|triangle| triangle.positions.map(to_na_point))
            .collect();
        let indices: Vec<[u32; 3]> = (0..vertices.len() as u32 / 3)
            .map(|i| [i * 3, i * 3 + 1, i * 3 + 2])
            .collect();

        Some(Self::with_shape(SharedShape::trimesh(vertices, indices)))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Player capsule body (dynamic, upright, never sleeps)
    pub fn player_body(spawn: Vec3) -> RigidBody {
        BodyBuilder::new_dynamic()
            .translation(spawn)
            .lock_rotations()
            .can_sleep(false)
            .build()
    }

    /// Player capsule collider
    pub fn player_collider(half_height: Real, radius: Real) -> Collider {
        ColliderBuilder3D::capsule_y(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.5)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Terrain body (fixed)
    pub fn terrain_body() -> RigidBody {
        BodyBuilder::new_fixed().build()
    }

    /// Terrain collider built from a solid, `None` when the solid is empty
    pub fn terrain_collider(csg: &Csg) -> Option<Collider> {
        ColliderBuilder3D::from_csg(csg).map(|builder| {
            builder
                .collision_groups(CollisionGroups::Terrain)
                .friction(0.8)
                .build()
        })
    }
}
