// Game tuning - one set of values shared by the native and web builds

use glam::{Vec3, Vec4};

/// Everything the simulation needs to know before it starts
#[derive(Debug, Clone)]
pub struct GameConfig {
    // Player
    /// Impulse applied per fixed step while a movement key is held
    pub move_speed: f32,
    /// Upward impulse applied when jump is pressed
    pub jump_impulse: f32,
    /// Capsule half height (cylinder part, excluding the caps)
    pub player_half_height: f32,
    /// Capsule radius
    pub player_radius: f32,
    /// Where the capsule starts
    pub player_spawn: Vec3,
    pub player_color: Vec4,

    // Camera
    /// Radians of yaw per pixel of horizontal cursor movement
    pub look_sensitivity: f32,
    /// Initial viewport size in pixels
    pub viewport_width: f32,
    pub viewport_height: f32,

    // Sculpting
    pub brush_radius: f32,
    pub brush_slices: u32,
    pub brush_stacks: u32,
    /// Upper bound on terrain vertices; edits that exceed it are rejected
    pub vertex_capacity: usize,
    pub terrain_color: Vec4,

    // HUD
    /// Pixel size of the debug font
    pub hud_font_size: f32,
}

pub const DEFAULT_CONFIG: GameConfig = GameConfig {
    move_speed: 1.0,
    jump_impulse: 5.0,
    player_half_height: 1.0,
    player_radius: 0.5,
    player_spawn: Vec3::new(0.0, 4.0, 0.0),
    player_color: Vec4::new(1.0, 1.0, 1.0, 1.0),

    look_sensitivity: 0.01,
    viewport_width: 1280.0,
    viewport_height: 720.0,

    brush_radius: 1.0,
    brush_slices: 10,
    brush_stacks: 10,
    vertex_capacity: 1_000_000,
    terrain_color: Vec4::new(0.82, 0.74, 0.58, 1.0),

    hud_font_size: 16.0,
};

impl Default for GameConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl GameConfig {
    /// Default config for a viewport of the given size
    pub fn with_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..DEFAULT_CONFIG
        }
    }
}
