// Input handling system
//
// Hosts report raw edges (key down/up, mouse down/up, cursor moves). This
// module turns them into game actions through a binding table and tracks
// which actions are held.
//
// ## Architecture
//
// - `action`: the closed key/button sets, game actions and default bindings
// - `player`: held / just-pressed / just-released state and the cursor
// - `manager`: routes edges through the bindings
//
// ## Usage Example
//
// ```rust
// use sculptbox::engine::input::{Action, InputManager, Key};
//
// let mut input = InputManager::new();
//
// // A fresh press reports its action, key repeats report nothing
// if input.key_down(Key::Space) == Some(Action::Jump) {
//     // jump once
// }
//
// let direction = input.player().get_direction();
//
// // At the end of each frame
// input.update();
// ```

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, InputSource, Key, MouseButton};
pub use manager::InputManager;
pub use player::PlayerInput;
