// Scene module
// Generic node tree plus the live clip players created when a session is mounted.

pub mod action;
pub mod mount;
pub mod node;

pub use action::{ActionHandle, ClipAction};
pub use mount::SceneMount;
pub use node::{MorphTable, NodeKind, SceneNode};
