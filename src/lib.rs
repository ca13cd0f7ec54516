pub mod animation;
pub mod error;
pub mod export;
pub mod expression;
pub mod ingest;
pub mod model;
pub mod scene;
pub mod settings;
pub mod store;
pub mod transform;

/// Application name used for the confy configuration directory.
pub const CONFY_APP_NAME: &str = "gltf-explorer";

pub use error::{AdapterError, IngestError};
pub use export::ExportLanguage;
pub use ingest::{AssetSource, GltfAdapter, IngestAdapter};
pub use store::ViewerStore;
