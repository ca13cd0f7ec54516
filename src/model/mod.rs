// Model module
// Session data and the registry that builds it from ingest output.

pub mod registry;
pub mod session;

pub use registry::{MODEL_ROOT_NAME, build_session, discover_morph_targets, ingest_model, validate_source};
pub use session::{AnimationClip, ModelSession, SessionId};
