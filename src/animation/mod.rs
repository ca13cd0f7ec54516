// Animation engine module
// Clip playback state and its link to the mounted clip players.

pub mod playback;

pub use playback::{bind_runtime_handle, reset_all, set_speed, toggle};
