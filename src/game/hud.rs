// Debug overlay text

use glam::Vec3;

fn format_vec3(v: Vec3) -> String {
    format!("[{:.3}, {:.3}, {:.3}]", v.x, v.y, v.z)
}

/// Overlay lines, top to bottom
pub fn hud_lines(
    capsule: Option<Vec3>,
    camera: Vec3,
    camera_euler: Vec3,
    vertex_count: usize,
    vertex_usage: f32,
) -> Vec<String> {
    let capsule = capsule
        .map(format_vec3)
        .unwrap_or_else(|| "-".to_string());

    vec![
        format!("capsule: {}", capsule),
        format!("camera: {}", format_vec3(camera)),
        format!("camera: {}", format_vec3(camera_euler)),
        format!("verts: {}. {:.2}% of alloc", vertex_count, vertex_usage * 100.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_lines() {
        let lines = hud_lines(
            Some(Vec3::new(0.0, 4.0, 0.0)),
            Vec3::new(0.0, 6.0, 2.0),
            Vec3::new(-0.785, 0.0, 0.0),
            12_345,
            0.012345,
        );

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "capsule: [0.000, 4.000, 0.000]");
        assert_eq!(lines[1], "camera: [0.000, 6.000, 2.000]");
        assert_eq!(lines[2], "camera: [-0.785, 0.000, 0.000]");
        assert_eq!(lines[3], "verts: 12345. 1.23% of alloc");
    }

    #[test]
    fn test_hud_without_capsule() {
        let lines = hud_lines(None, Vec3::ZERO, Vec3::ZERO, 0, 0.0);
        assert_eq!(lines[0], "capsule: -");
        assert_eq!(lines[3], "verts: 0. 0.00% of alloc");
    }
}
