// Shared helpers that sit below both engine and game code

pub mod math;
