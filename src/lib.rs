// Sculptbox: dig and pile terrain around a physics capsule
//
// `game` holds the simulation and never touches the GPU; `engine` holds the
// reusable pieces underneath it. The native binary and the `web` bindings
// are thin hosts that forward input, advance time and draw `Frame`s; `host`
// holds what they share.

mod core;
pub mod engine;
pub mod game;
pub mod host;

#[cfg(target_arch = "wasm32")]
pub mod web;
