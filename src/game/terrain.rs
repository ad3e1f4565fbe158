// Sculptable terrain: a CSG solid mirrored into a render mesh and a collider

use glam::{Vec3, Vec4};

use super::config::GameConfig;
use crate::engine::csg::Csg;
use crate::engine::input::Action;
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::renderer::MeshVertex;

/// Terrain edit errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TerrainError {
    #[error("terrain needs {needed} vertices but only {capacity} fit")]
    CapacityExceeded { needed: usize, capacity: usize },
}

/// What a sculpt does with the brush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SculptOp {
    Add,
    Remove,
}

impl SculptOp {
    /// Sculpt operation bound to an action, if any
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::AddMaterial => Some(SculptOp::Add),
            Action::RemoveMaterial => Some(SculptOp::Remove),
            _ => None,
        }
    }
}

/// The starting arena: a 30 unit block with its top at y = 0 and a
/// 28 x 28 pit, 2 units deep, cut into the middle
pub fn arena() -> Csg {
    let block = Csg::cuboid(Vec3::new(0.0, -15.0, 0.0), Vec3::splat(15.0));
    let pit = Csg::cuboid(Vec3::ZERO, Vec3::new(14.0, 2.0, 14.0));
    block.subtract(&pit)
}

/// Flat-shaded triangle list for a solid
pub fn mesh_vertices(csg: &Csg, color: Vec4) -> Vec<MeshVertex> {
    csg.triangles()
        .flat_map(|triangle| {
            triangle
                .positions
                .map(|position| MeshVertex::new(position, triangle.normal, color))
        })
        .collect()
}

pub struct Terrain {
    csg: Csg,
    brush: Csg,
    vertices: Vec<MeshVertex>,
    color: Vec4,
    capacity: usize,
    /// Bumped on every accepted edit so renderers know to re-upload
    revision: u64,
    body: RigidBodyHandle,
    /// `None` while the solid is empty
    collider: Option<ColliderHandle>,
}

impl Terrain {
    /// Build the arena terrain described by `config`
    pub fn new(physics: &mut PhysicsWorld, config: &GameConfig) -> Result<Self, TerrainError> {
        let brush = Csg::sphere(
            Vec3::ZERO,
            config.brush_radius,
            config.brush_slices,
            config.brush_stacks,
        );
        Self::from_csg(
            physics,
            arena(),
            brush,
            config.terrain_color,
            config.vertex_capacity,
        )
    }

    /// Build terrain from any solid
    pub fn from_csg(
        physics: &mut PhysicsWorld,
        csg: Csg,
        brush: Csg,
        color: Vec4,
        capacity: usize,
    ) -> Result<Self, TerrainError> {
        let vertices = mesh_vertices(&csg, color);
        if vertices.len() > capacity {
            return Err(TerrainError::CapacityExceeded {
                needed: vertices.len(),
                capacity,
            });
        }

        let body = physics.add_rigid_body(presets::terrain_body());
        let collider = presets::terrain_collider(&csg)
            .map(|collider| physics.add_collider(collider, body));

        log::info!(
            "Terrain built: {} triangles, {} vertices",
            csg.triangle_count(),
            vertices.len()
        );

        Ok(Self {
            csg,
            brush,
            vertices,
            color,
            capacity,
            revision: 0,
            body,
            collider,
        })
    }

    /// Add or remove the brush centred at `at`. A rejected edit leaves the
    /// terrain untouched.
    pub fn sculpt(
        &mut self,
        physics: &mut PhysicsWorld,
        at: Vec3,
        op: SculptOp,
    ) -> Result<(), TerrainError> {
        let brush = self.brush.clone().translate(at);
        let csg = match op {
            SculptOp::Add => self.csg.union(&brush),
            SculptOp::Remove => self.csg.subtract(&brush),
        };

        let vertices = mesh_vertices(&csg, self.color);
        if vertices.len() > self.capacity {
            return Err(TerrainError::CapacityExceeded {
                needed: vertices.len(),
                capacity: self.capacity,
            });
        }

        if let Some(old) = self.collider.take() {
            physics.remove_collider(old);
        }
        self.collider = presets::terrain_collider(&csg)
            .map(|collider| physics.add_collider(collider, self.body));

        self.csg = csg;
        self.vertices = vertices;
        self.revision += 1;
        Ok(())
    }

    /// Render vertices, three per triangle
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Fraction of the vertex capacity in use
    pub fn usage(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.vertices.len() as f32 / self.capacity as f32
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    pub fn csg(&self) -> &Csg {
        &self.csg
    }
}
