// Third-person follow camera

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

/// Eye offset from the followed target, before the pivot rotation
const EYE_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 2.0);

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    /// Projection matrix with wgpu's 0..1 depth range
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.near, self.far)
    }
}

/// Camera that trails a target from behind and above, looking down at 45°
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub translation: Vec3,
    /// Camera orientation in world space
    pub rotation: Quat,
    /// Heading around +Y. This is also the player's facing.
    pub pivot: Quat,
    pub projection: Perspective,
    /// Viewport size in pixels
    viewport: Vec2,
}

impl Camera {
    /// Create a new camera for a viewport
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            translation: Vec3::ZERO,
            rotation: Self::tilt(),
            pivot: Quat::IDENTITY,
            projection: Perspective {
                fovy: FRAC_PI_2,
                aspect: 1.0,
                near: 0.01,
                far: 1000.0,
            },
            viewport: Vec2::ONE,
        };
        camera.resize(viewport_width, viewport_height);
        camera
    }

    fn tilt() -> Quat {
        Quat::from_rotation_x(-FRAC_PI_4)
    }

    /// Move behind `target`. Without a target the camera stays put.
    pub fn update(&mut self, target: Option<Vec3>) {
        if let Some(target) = target {
            self.translation = target + self.pivot * EYE_OFFSET;
            self.rotation = self.pivot * Self::tilt();
        }
    }

    /// Turn the heading by `angle` radians around +Y
    pub fn look(&mut self, angle: f32) {
        self.pivot = (self.pivot * Quat::from_rotation_y(angle)).normalize();
    }

    /// Rotate a camera-relative direction onto the ground heading
    pub fn heading(&self, direction: Vec3) -> Vec3 {
        self.pivot * direction
    }

    /// Resize the viewport. Zero sizes are clamped to one pixel.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.projection.aspect = self.viewport.x / self.viewport.y;
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation).inverse()
    }

    /// Get the view-projection matrix
    pub fn view_proj(&self) -> Mat4 {
        self.projection.matrix() * self.view_matrix()
    }

    /// Camera orientation as (x, y, z) euler angles in radians
    pub fn euler(&self) -> Vec3 {
        let (z, y, x) = self.rotation.to_euler(EulerRot::ZYX);
        Vec3::new(x, y, z)
    }

    /// Turn a screen position (pixels, origin top-left) into a world-space ray.
    /// Returns the point on the near plane and the normalized direction.
    pub fn unproject(&self, screen: Vec2) -> (Vec3, Vec3) {
        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        );
        let inverse = self.view_proj().inverse();

        let unproject = |depth: f32| {
            let clip = inverse * Vec4::new(ndc.x, ndc.y, depth, 1.0);
            clip.truncate() / clip.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);

        (near, (far - near).normalize_or_zero())
    }
}
