#[cfg(not(target_arch = "wasm32"))]
use anyhow::Result;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    native::run()
}

// The browser build is driven through `sculptbox::web` instead
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::Result;
    use log::{error, info};
    use winit::{
        event::{ElementState, Event, WindowEvent},
        event_loop::EventLoop,
        keyboard::PhysicalKey,
        window::WindowBuilder,
    };

    use sculptbox::engine::assets::{AssetLoader, DebugFont};
    use sculptbox::engine::input::{Key, MouseButton};
    use sculptbox::engine::renderer::{create_instance, Renderer};
    use sculptbox::game::{capsule_mesh, Game, GameConfig};
    use sculptbox::host::validate_viewport;

    /// Overrides the bundled HUD font
    const FONT_ENV: &str = "SCULPTBOX_FONT";
    const DEFAULT_FONT: &str = "Inconsolata-Regular.ttf";

    fn load_font() -> Result<Vec<u8>> {
        let bytes = match std::env::var_os(FONT_ENV) {
            Some(path) => AssetLoader::load_bytes(Path::new(&path))?,
            None => AssetLoader::new("assets").load_font(DEFAULT_FONT)?,
        };
        Ok(bytes)
    }

    pub fn run() -> Result<()> {
        // Initialize logger
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        info!("Starting Sculptbox...");

        // Create event loop and window
        let event_loop = EventLoop::new()?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title("Sculptbox")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
                .with_resizable(true)
                .build(&event_loop)?,
        );
        let size = window.inner_size();
        let (width, height) = validate_viewport(size.width, size.height)?;

        info!("Window created successfully");

        let font = DebugFont::from_bytes(load_font()?)?;
        let config = GameConfig::with_viewport(width as f32, height as f32);
        let atlas = font.atlas(config.hud_font_size)?;
        let mut game = Game::new(config)?;

        let (vertices, indices) = {
            let config = game.config();
            capsule_mesh(
                config.player_half_height,
                config.player_radius,
                config.player_color,
            )
        };

        let instance = create_instance();
        let surface = instance.create_surface(Arc::clone(&window))?;
        let mut renderer = pollster::block_on(Renderer::new(
            &instance,
            surface,
            width,
            height,
            atlas,
            (&vertices, &indices),
        ))?;

        let mut last_frame = Instant::now();

        // Main event loop
        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("Close requested, shutting down...");
                        elwt.exit();
                    }
                    WindowEvent::Resized(physical_size) => {
                        renderer.resize(physical_size.width, physical_size.height);
                        game.handle_resize(physical_size.width as f32, physical_size.height as f32);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        // Held keys repeat; the game only wants edges
                        if event.repeat {
                            return;
                        }
                        let PhysicalKey::Code(code) = event.physical_key else {
                            return;
                        };
                        if let Some(key) = Key::from_key_code(code) {
                            match event.state {
                                ElementState::Pressed => game.handle_key_down(key),
                                ElementState::Released => game.handle_key_up(key),
                            }
                        }
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        if let Some(button) = MouseButton::from_winit(button) {
                            match state {
                                ElementState::Pressed => game.handle_mouse_down(button),
                                ElementState::Released => game.handle_mouse_up(button),
                            }
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        game.handle_mouse_move(position.x as f32, position.y as f32);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        game.advance(now - last_frame);
                        last_frame = now;

                        if let Err(e) = renderer.render(&game.frame()) {
                            error!("Render error: {}", e);
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    // Request redraw on next frame
                    window.request_redraw();
                }
                _ => {}
            })
            .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

        Ok(())
    }
}
