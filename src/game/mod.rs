// Game simulation
//
// `Game` owns the physics world, the sculptable terrain, the player capsule
// and the follow camera. Hosts feed it raw input edges and elapsed time and
// read back a `Frame` to draw; it never touches the GPU itself.

pub mod config;
pub mod hud;
pub mod player;
pub mod terrain;

pub use config::{GameConfig, DEFAULT_CONFIG};
pub use player::{capsule_mesh, Player};
pub use terrain::{SculptOp, Terrain, TerrainError};

use anyhow::Result;
use glam::{Vec2, Vec3};
use std::time::Duration;

use crate::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use crate::engine::input::{Action, InputManager, Key, MouseButton};
use crate::engine::physics::{CollisionGroups, PhysicsWorld};
use crate::engine::renderer::Camera;
pub use crate::engine::renderer::Frame;

pub struct Game {
    config: GameConfig,
    physics: PhysicsWorld,
    terrain: Terrain,
    player: Player,
    camera: Camera,
    input: InputManager,
    game_loop: GameLoop,
}

impl Game {
    /// Build the arena, spawn the player and place the camera behind it
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(FIXED_TIMESTEP);

        let terrain = Terrain::new(&mut physics, &config)?;
        let player = Player::spawn(&mut physics, &config);

        let mut camera = Camera::new(config.viewport_width, config.viewport_height);
        camera.update(player.translation(&physics));

        log::info!(
            "Game ready: {} terrain vertices, player at {:?}",
            terrain.vertex_count(),
            config.player_spawn
        );

        Ok(Self {
            config,
            physics,
            terrain,
            player,
            camera,
            input: InputManager::new(),
            game_loop: GameLoop::new(),
        })
    }

    /// Advance the simulation by `delta`, returns the number of fixed steps run
    pub fn advance(&mut self, delta: Duration) -> u32 {
        let steps = self.game_loop.advance(delta);
        for _ in 0..steps {
            self.fixed_update();
        }
        self.input.update();
        steps
    }

    fn fixed_update(&mut self) {
        let direction = self.input.player().get_direction();
        if direction != Vec2::ZERO {
            let impulse = self.camera.heading(Vec3::new(direction.x, 0.0, direction.y));
            self.player
                .apply_impulse(&mut self.physics, impulse * self.config.move_speed);
        }

        self.physics.step();
        self.camera.update(self.player.translation(&self.physics));
    }

    pub fn handle_key_down(&mut self, key: Key) {
        if let Some(Action::Jump) = self.input.key_down(key) {
            let impulse = Vec3::new(0.0, self.config.jump_impulse, 0.0);
            self.player.apply_impulse(&mut self.physics, impulse);
        }
    }

    pub fn handle_key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn handle_mouse_down(&mut self, button: MouseButton) {
        let op = self.input.mouse_down(button).and_then(SculptOp::from_action);
        if let Some(op) = op {
            self.sculpt_at_cursor(op);
        }
    }

    pub fn handle_mouse_up(&mut self, button: MouseButton) {
        self.input.mouse_up(button);
    }

    /// Cursor moved to `(x, y)` in viewport pixels; horizontal motion turns the camera
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        let delta = self.input.mouse_move(Vec2::new(x, y));
        if delta.x != 0.0 {
            self.camera.look(delta.x * self.config.look_sensitivity);
        }
    }

    pub fn handle_resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Cast a ray through the cursor and apply the brush where it meets the
    /// terrain. Returns the brush centre when an edit was made.
    fn sculpt_at_cursor(&mut self, op: SculptOp) -> Option<Vec3> {
        let (origin, direction) = self.camera.unproject(self.input.player().cursor());
        let (_, toi) = self.physics.cast_ray(
            origin,
            direction,
            self.camera.projection.far,
            CollisionGroups::Terrain,
        )?;
        let point = origin + direction * toi;

        match self.terrain.sculpt(&mut self.physics, point, op) {
            Ok(()) => {
                log::debug!(
                    "{:?} at {:?}: {} vertices",
                    op,
                    point,
                    self.terrain.vertex_count()
                );
                Some(point)
            }
            Err(e) => {
                log::warn!("Sculpt rejected: {}", e);
                None
            }
        }
    }

    /// Snapshot of the current state for rendering
    pub fn frame(&self) -> Frame<'_> {
        let hud = hud::hud_lines(
            self.player.translation(&self.physics),
            self.camera.translation,
            self.camera.euler(),
            self.terrain.vertex_count(),
            self.terrain.usage(),
        );

        Frame {
            terrain: self.terrain.vertices(),
            terrain_revision: self.terrain.revision(),
            player: self.player.transform(&self.physics),
            view_proj: self.camera.view_proj(),
            viewport: self.camera.viewport(),
            hud,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn terrain_vertex_count(&self) -> usize {
        self.terrain.vertex_count()
    }

    pub fn player_translation(&self) -> Option<Vec3> {
        self.player.translation(&self.physics)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_micros(16_667);

    fn game() -> Game {
        Game::new(GameConfig::default()).unwrap()
    }

    fn run_steps(game: &mut Game, steps: u32) {
        for _ in 0..steps {
            game.advance(STEP);
        }
    }

    fn player_velocity(game: &Game) -> Vec3 {
        game.player.linvel(&game.physics).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert!(game.terrain_vertex_count() > 0);
        assert_eq!(game.player_translation(), Some(Vec3::new(0.0, 4.0, 0.0)));
        assert_eq!(game.camera().translation, Vec3::new(0.0, 6.0, 2.0));
    }

    #[test]
    fn test_new_game_over_capacity() {
        let config = GameConfig {
            vertex_capacity: 3,
            ..GameConfig::default()
        };
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_advance_zero_does_not_step() {
        let mut game = game();
        assert_eq!(game.advance(Duration::ZERO), 0);
        assert_eq!(game.player_translation(), Some(Vec3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn test_advance_caps_steps() {
        let mut game = game();
        assert_eq!(game.advance(Duration::from_secs(10)), 5);
    }

    #[test]
    fn test_player_lands_in_pit() {
        let mut game = game();
        run_steps(&mut game, 240);

        // Pit floor at y = -2, capsule centre 1.5 above it
        let y = game.player_translation().unwrap().y;
        assert!((-0.8..-0.2).contains(&y), "y = {}", y);
    }

    #[test]
    fn test_jump_only_on_fresh_press() {
        let mut game = game();
        run_steps(&mut game, 240);

        game.handle_key_down(Key::Space);
        let once = player_velocity(&game).y;
        assert!(once > 1.0, "vy = {}", once);

        // Key repeat while held
        game.handle_key_down(Key::Space);
        assert_eq!(player_velocity(&game).y, once);

        game.handle_key_up(Key::Space);
        assert_eq!(player_velocity(&game).y, once);
    }

    #[test]
    fn test_forward_moves_along_negative_z() {
        let mut game = game();
        run_steps(&mut game, 1);

        game.handle_key_down(Key::W);
        run_steps(&mut game, 30);
        let position = game.player_translation().unwrap();
        assert!(position.z < -0.1, "z = {}", position.z);
        assert!(position.x.abs() < 1e-3);
    }

    #[test]
    fn test_mouse_move_turns_camera() {
        let mut game = game();
        game.handle_mouse_move(100.0, 100.0);
        assert_eq!(game.camera().pivot, glam::Quat::IDENTITY);

        game.handle_mouse_move(50.0, 120.0);
        run_steps(&mut game, 1);

        // Turned left by 0.5 rad: forward now leans towards -X
        let forward = game.camera().heading(Vec3::NEG_Z);
        assert!(forward.x < -0.4, "forward = {:?}", forward);
    }

    #[test]
    fn test_remove_material_at_cursor() {
        let mut game = game();
        let before = game.frame().terrain_revision;

        // Screen centre looks at the capsule and past it to the pit floor
        game.handle_mouse_move(640.0, 360.0);
        game.handle_mouse_down(MouseButton::Right);

        assert_eq!(game.frame().terrain_revision, before + 1);
        // Held button does not sculpt again
        game.handle_mouse_down(MouseButton::Right);
        assert_eq!(game.frame().terrain_revision, before + 1);

        game.handle_mouse_up(MouseButton::Right);
        game.handle_mouse_down(MouseButton::Left);
        assert_eq!(game.frame().terrain_revision, before + 2);
    }

    #[test]
    fn test_sculpt_over_capacity_is_rejected() {
        let initial = game().terrain_vertex_count();
        let config = GameConfig {
            vertex_capacity: initial,
            ..GameConfig::default()
        };
        let mut game = Game::new(config).unwrap();

        game.handle_mouse_move(640.0, 360.0);
        game.handle_mouse_down(MouseButton::Left);

        assert_eq!(game.frame().terrain_revision, 0);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut game = game();
        game.handle_resize(800.0, 600.0);
        assert_eq!(game.frame().viewport, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_frame_snapshot() {
        let game = game();
        let frame = game.frame();

        assert_eq!(frame.terrain.len(), game.terrain_vertex_count());
        assert!(frame.player.is_some());
        assert_eq!(frame.hud.len(), 4);
        assert!(frame.hud[0].starts_with("capsule: "));
        assert!(frame.hud[3].starts_with("verts: "));
    }

    #[test]
    fn test_hud_reports_terrain_usage() {
        let game = game();
        let expected = format!(
            "verts: {}. {:.2}% of alloc",
            game.terrain.vertex_count(),
            game.terrain.usage() * 100.0
        );
        assert!(game.terrain.usage() > 0.0);
        assert_eq!(game.frame().hud[3], expected);
    }
}
