// Browser bindings
//
// The host page constructs one `Wrapper` per canvas, calls `step` from
// `requestAnimationFrame` and forwards DOM key and mouse events. The GPU side
// comes up asynchronously; until it does, `step` simulates without drawing.

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::engine::assets::DebugFont;
use crate::engine::game_loop::duration_from_millis;
use crate::engine::input::MouseButton;
use crate::engine::renderer::{create_instance, Renderer};
use crate::game::{capsule_mesh, Game, GameConfig};
use crate::host::{validate_viewport, KeyEvent};

fn into_js_value<E: Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One running game bound to one canvas
#[wasm_bindgen]
pub struct Wrapper {
    game: Game,
    renderer: Rc<RefCell<Option<Renderer>>>,
}

#[wasm_bindgen]
impl Wrapper {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, debug_font_data: Vec<u8>) -> Result<Wrapper, JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

        let (width, height) =
            validate_viewport(canvas.width(), canvas.height()).map_err(into_js_value)?;

        let config = GameConfig::with_viewport(width as f32, height as f32);
        let font = DebugFont::from_bytes(debug_font_data).map_err(into_js_value)?;
        let atlas = font.atlas(config.hud_font_size).map_err(into_js_value)?;
        let game = Game::new(config).map_err(into_js_value)?;

        let instance = create_instance();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(into_js_value)?;

        let config = game.config();
        let (vertices, indices) = capsule_mesh(
            config.player_half_height,
            config.player_radius,
            config.player_color,
        );

        let renderer = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&renderer);
        wasm_bindgen_futures::spawn_local(async move {
            match Renderer::new(&instance, surface, width, height, atlas, (&vertices, &indices)).await {
                Ok(ready) => {
                    slot.replace(Some(ready));
                }
                Err(e) => log::error!("Failed to create renderer: {}", e),
            }
        });

        log::info!("Sculptbox created for a {}x{} canvas", width, height);
        Ok(Wrapper { game, renderer })
    }

    /// Advance by `_t_ms` milliseconds since the previous call and draw
    pub fn step(&mut self, _t_ms: f64) {
        self.game.advance(duration_from_millis(_t_ms));

        if let Some(renderer) = self.renderer.borrow_mut().as_mut() {
            if let Err(e) = renderer.render(&self.game.frame()) {
                log::error!("Render error: {}", e);
            }
        }
    }

    pub fn handle_key_down(&mut self, key: KeyEvent) {
        self.game.handle_key_down(key.into());
    }

    pub fn handle_key_up(&mut self, key: KeyEvent) {
        self.game.handle_key_up(key.into());
    }

    /// `is_left` selects the left button, otherwise the right one
    pub fn handle_mouse_down(&mut self, is_left: bool) {
        self.game.handle_mouse_down(MouseButton::from_is_left(is_left));
    }

    pub fn handle_mouse_up(&mut self, is_left: bool) {
        self.game.handle_mouse_up(MouseButton::from_is_left(is_left));
    }

    /// Cursor position in canvas pixels, origin top-left
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.game.handle_mouse_move(x, y);
    }
}

impl Drop for Wrapper {
    fn drop(&mut self) {
        log::info!("Sculptbox released");
    }
}
