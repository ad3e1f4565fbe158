// The player capsule

use glam::{Mat4, Vec3, Vec4};
use parry3d::shape::Capsule;

use super::config::GameConfig;
use crate::core::math::{from_na_vector, iso_to_mat4, to_na_vector};
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::MeshVertex;

/// Tessellation of the rendered capsule
const CAPSULE_SUBDIVISIONS: u32 = 20;

#[derive(Debug)]
pub struct Player {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub half_height: f32,
    pub radius: f32,
}

impl Player {
    /// Create the capsule and add it to the physics world
    pub fn spawn(physics: &mut PhysicsWorld, config: &GameConfig) -> Self {
        let body_handle = physics.add_rigid_body(presets::player_body(config.player_spawn));
        let collider = presets::player_collider(config.player_half_height, config.player_radius);
        let collider_handle = physics.add_collider(collider, body_handle);

        Self {
            body_handle,
            collider_handle,
            half_height: config.player_half_height,
            radius: config.player_radius,
        }
    }

    /// Push the capsule, waking it if it was asleep
    pub fn apply_impulse(&self, physics: &mut PhysicsWorld, impulse: Vec3) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            body.apply_impulse(to_na_vector(impulse), true);
        }
    }

    /// Centre of the capsule
    pub fn translation(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics
            .collider_position(self.collider_handle)
            .map(|position| from_na_vector(&position.translation.vector))
    }

    /// Model matrix for rendering
    pub fn transform(&self, physics: &PhysicsWorld) -> Option<Mat4> {
        physics.collider_position(self.collider_handle).map(iso_to_mat4)
    }

    pub fn linvel(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| from_na_vector(body.linvel()))
    }
}

/// Indexed capsule mesh in model space with smooth normals
pub fn capsule_mesh(half_height: f32, radius: f32, color: Vec4) -> (Vec<MeshVertex>, Vec<u32>) {
    let capsule = Capsule::new_y(half_height, radius);
    let (points, triangles) = capsule.to_trimesh(CAPSULE_SUBDIVISIONS, CAPSULE_SUBDIVISIONS);

    let vertices = points
        .iter()
        .map(|point| {
            let position = Vec3::new(point.x, point.y, point.z);
            // Normal of the closest point on the core segment
            let core = Vec3::new(0.0, position.y.clamp(-half_height, half_height), 0.0);
            let normal = (position - core).normalize_or_zero();
            MeshVertex::new(position, normal, color)
        })
        .collect();
    let indices = triangles.into_iter().flatten().collect();

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spawn() {
        let mut physics = PhysicsWorld::new();
        let player = Player::spawn(&mut physics, &GameConfig::default());

        assert_eq!(player.translation(&physics), Some(Vec3::new(0.0, 4.0, 0.0)));
        assert_eq!(physics.collider_count(), 1);

        let transform = player.transform(&physics).unwrap();
        assert_eq!(transform.w_axis.truncate(), Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut physics = PhysicsWorld::new();
        let player = Player::spawn(&mut physics, &GameConfig::default());
        physics.step();

        player.apply_impulse(&mut physics, Vec3::new(0.0, 5.0, 0.0));
        let velocity = player.linvel(&physics).unwrap();
        assert!(velocity.y > 0.0);
        assert_relative_eq!(velocity.x, 0.0);
    }

    #[test]
    fn test_capsule_mesh() {
        let (vertices, indices) = capsule_mesh(1.0, 0.5, Vec4::ONE);

        assert!(!vertices.is_empty());
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        for vertex in &vertices {
            let [x, y, z] = vertex.position;
            assert!(y.abs() <= 1.5 + 1e-4);
            assert!((x * x + z * z).sqrt() <= 0.5 + 1e-4);

            let normal = Vec3::from(vertex.normal);
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-4);
        }
    }
}
