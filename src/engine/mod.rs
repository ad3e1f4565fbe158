// Engine modules: renderer, physics, solids, input, assets

pub mod assets;
pub mod csg;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
