// Expression engine module
// Morph influences keyed by channel name and their per-tick write to the scene.

pub mod influence;

pub use influence::{InfluenceMap, apply_to_scene, reset_all, set_influence, zero_scene};
