// Math utilities and conversions between glam and the vector types of
// rapier (nalgebra) and rscsg

use glam::{Mat4, Quat, Vec3};
use rapier3d::math::{Isometry, Point, Real, Vector};
use rscsg::dim3::Vector as CsgVector;

/// Convert a glam vector into a rapier vector
pub fn to_na_vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// Convert a rapier vector into a glam vector
pub fn from_na_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a glam vector into a rapier point
pub fn to_na_point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

/// Convert a glam vector into an rscsg vector
pub fn to_csg_vector(v: Vec3) -> CsgVector {
    CsgVector(v.x, v.y, v.z)
}

/// Convert an rscsg vector into a glam vector
pub fn from_csg_vector(v: CsgVector) -> Vec3 {
    let CsgVector(x, y, z) = v;
    Vec3::new(x, y, z)
}

/// Rotation part of an isometry as a glam quaternion
pub fn iso_rotation(iso: &Isometry<Real>) -> Quat {
    let q = iso.rotation.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

/// Model matrix for an isometry (rotation then translation)
pub fn iso_to_mat4(iso: &Isometry<Real>) -> Mat4 {
    Mat4::from_rotation_translation(iso_rotation(iso), from_na_vector(&iso.translation.vector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rapier3d::na::{Translation3, UnitQuaternion, Vector3};

    #[test]
    fn test_vector_conversion() {
        let v = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(from_na_vector(&to_na_vector(v)), v);
        assert_eq!(to_na_point(v), Point::new(1.0, -2.0, 3.5));
        assert_eq!(from_csg_vector(to_csg_vector(v)), v);
    }

    #[test]
    fn test_iso_to_mat4_matches_isometry() {
        let iso = Isometry::from_parts(
            Translation3::new(1.0, 2.0, 3.0),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2),
        );
        let m = iso_to_mat4(&iso);

        let p = Point::new(1.0, 0.0, 0.0);
        let expected = iso * p;
        let actual = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));

        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);
    }
}
