// What a host hands the game before any platform code runs
//
// The browser bindings export `KeyEvent` to JavaScript; both hosts check the
// drawing surface size here before building anything on top of it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

use crate::engine::input::Key;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Canvas has no area ({width}x{height})")]
    EmptyViewport { width: u32, height: u32 },
}

/// Keys the page may forward, numbered W = 0 .. Space = 4
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    W = 0,
    A = 1,
    S = 2,
    D = 3,
    Space = 4,
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key {
            KeyEvent::W => Key::W,
            KeyEvent::A => Key::A,
            KeyEvent::S => Key::S,
            KeyEvent::D => Key::D,
            KeyEvent::Space => Key::Space,
        }
    }
}

/// Accept a drawing surface only if it has area
pub fn validate_viewport(width: u32, height: u32) -> Result<(u32, u32), HostError> {
    if width == 0 || height == 0 {
        return Err(HostError::EmptyViewport { width, height });
    }
    Ok((width, height))
}
