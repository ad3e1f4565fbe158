// Constructive solid geometry
//
// A thin layer over rscsg's BSP solids that speaks glam. Solids are polygon
// soups; boolean operations return new solids and never touch their inputs.

use std::fmt;

use glam::Vec3;

use crate::core::math::{from_csg_vector, to_csg_vector};

/// A triangle of a solid's surface with its face normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normal: Vec3,
}

impl From<rscsg::dim3::Triangle> for Triangle {
    fn from(triangle: rscsg::dim3::Triangle) -> Self {
        Self {
            positions: triangle.positions.map(from_csg_vector),
            normal: from_csg_vector(triangle.normal),
        }
    }
}

/// A closed solid
#[derive(Clone)]
pub struct Csg {
    inner: rscsg::dim3::Csg,
}

impl Csg {
    /// Axis-aligned box around `center`
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        let cube = rscsg::dim3::Csg::cube(to_csg_vector(half_extents * 2.0), true);
        Self {
            inner: cube.translate(to_csg_vector(center)),
        }
    }

    /// UV sphere made of `slices` around the Y axis and `stacks` from pole to pole
    pub fn sphere(center: Vec3, radius: f32, slices: u32, stacks: u32) -> Self {
        Self {
            inner: rscsg::dim3::Csg::sphere(
                to_csg_vector(center),
                radius,
                slices as _,
                stacks as _,
            ),
        }
    }

    /// Everything in either solid
    pub fn union(&self, other: &Csg) -> Csg {
        Self {
            inner: rscsg::dim3::Csg::union(&self.inner, &other.inner),
        }
    }

    /// Everything in this solid but not in `other`
    pub fn subtract(&self, other: &Csg) -> Csg {
        Self {
            inner: rscsg::dim3::Csg::subtract(&self.inner, &other.inner),
        }
    }

    /// Everything in both solids
    pub fn intersect(&self, other: &Csg) -> Csg {
        Self {
            inner: rscsg::dim3::Csg::intersect(&self.inner, &other.inner),
        }
    }

    pub fn translate(self, offset: Vec3) -> Csg {
        Self {
            inner: self.inner.translate(to_csg_vector(offset)),
        }
    }

    /// Surface triangles, each polygon fanned out with its face normal
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.inner.iter_triangles().map(Triangle::from)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles().count()
    }

    /// A solid with no surface left, e.g. after subtracting everything
    pub fn is_empty(&self) -> bool {
        self.triangles().next().is_none()
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty solid
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.triangles().flat_map(|triangle| triangle.positions);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}

impl fmt::Debug for Csg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Csg")
            .field("triangles", &self.triangle_count())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// A solid with nothing left in it
    pub(crate) fn empty_solid() -> Csg {
        Csg::cuboid(Vec3::ZERO, Vec3::ONE).subtract(&Csg::cuboid(Vec3::ZERO, Vec3::splat(3.0)))
    }

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
    }

    #[test]
    fn test_cuboid_shape() {
        let cube = Csg::cuboid(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cube.triangle_count(), 12);

        let (min, max) = cube.bounds().unwrap();
        assert_vec_eq(min, Vec3::ZERO);
        assert_vec_eq(max, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_cuboid_normals_face_outward() {
        let cube = Csg::cuboid(Vec3::ZERO, Vec3::ONE);
        for triangle in cube.triangles() {
            let centroid = (triangle.positions[0] + triangle.positions[1] + triangle.positions[2]) / 3.0;
            assert!(triangle.normal.dot(centroid) > 0.0);

            // Winding agrees with the stored normal
            let [a, b, c] = triangle.positions;
            let winding = (b - a).cross(c - a).normalize();
            assert_vec_eq(winding, triangle.normal);
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let center = Vec3::new(0.0, 1.0, 0.0);
        let sphere = Csg::sphere(center, 2.0, 10, 10);
        assert!(!sphere.is_empty());
        for triangle in sphere.triangles() {
            for p in triangle.positions {
                assert_relative_eq!((p - center).length(), 2.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_union_of_disjoint_solids_keeps_both() {
        let a = Csg::cuboid(Vec3::ZERO, Vec3::ONE);
        let b = Csg::cuboid(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        let u = a.union(&b);
        assert_eq!(u.triangle_count(), 24);

        let (min, max) = u.bounds().unwrap();
        assert_vec_eq(min, Vec3::new(-1.0, -1.0, -1.0));
        assert_vec_eq(max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_subtract_disjoint_is_noop() {
        let a = Csg::cuboid(Vec3::ZERO, Vec3::ONE);
        let b = Csg::cuboid(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(a.subtract(&b).triangle_count(), 12);
    }

    #[test]
    fn test_subtract_everything_leaves_nothing() {
        let empty = empty_solid();
        assert!(empty.is_empty());
        assert!(empty.bounds().is_none());
    }

    #[test]
    fn test_subtract_carves_pit_floor() {
        // Same layout as the game arena: a block with a shallow pit in the top
        let block = Csg::cuboid(Vec3::new(0.0, -15.0, 0.0), Vec3::splat(15.0));
        let pit = Csg::cuboid(Vec3::ZERO, Vec3::new(14.0, 2.0, 14.0));
        let arena = block.subtract(&pit);

        let (min, max) = arena.bounds().unwrap();
        assert_vec_eq(min, Vec3::new(-15.0, -30.0, -15.0));
        assert_vec_eq(max, Vec3::new(15.0, 0.0, 15.0));

        let has_floor = arena.triangles().any(|t| {
            t.normal.y > 0.99 && t.positions.iter().all(|p| (p.y + 2.0).abs() < 1e-4)
        });
        assert!(has_floor, "pit floor should face up at y = -2");

        // Nothing remains strictly inside the carved region
        for t in arena.triangles() {
            for p in t.positions {
                let inside = p.x.abs() < 13.99 && p.z.abs() < 13.99 && p.y > -1.99;
                assert!(!inside, "vertex {:?} left inside the pit", p);
            }
        }
    }

    #[test]
    fn test_intersect_overlap_bounds() {
        let a = Csg::cuboid(Vec3::ZERO, Vec3::ONE);
        let b = Csg::cuboid(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        let (min, max) = a.intersect(&b).bounds().unwrap();
        assert_vec_eq(min, Vec3::new(0.0, -1.0, -1.0));
        assert_vec_eq(max, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_translate_moves_bounds() {
        let cube = Csg::cuboid(Vec3::ZERO, Vec3::ONE).translate(Vec3::new(0.0, 10.0, 0.0));
        let (min, max) = cube.bounds().unwrap();
        assert_vec_eq(min, Vec3::new(-1.0, 9.0, -1.0));
        assert_vec_eq(max, Vec3::new(1.0, 11.0, 1.0));
    }

    #[test]
    fn test_union_with_brush_adds_surface() {
        let ground = Csg::cuboid(Vec3::new(0.0, -1.0, 0.0), Vec3::new(5.0, 1.0, 5.0));
        let brush = Csg::sphere(Vec3::ZERO, 1.0, 10, 10);
        let merged = ground.union(&brush);
        let (_, max) = merged.bounds().unwrap();
        assert_relative_eq!(max.y, 1.0, epsilon = 1e-3);
        assert!(merged.triangle_count() > ground.triangle_count());
    }

    #[test]
    fn test_operations_leave_inputs_alone() {
        let ground = Csg::cuboid(Vec3::ZERO, Vec3::ONE);
        let brush = Csg::sphere(Vec3::Y, 0.5, 10, 10);
        let _ = ground.subtract(&brush);
        assert_eq!(ground.triangle_count(), 12);
    }
}
