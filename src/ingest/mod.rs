// Asset ingest
// The adapter seam between raw asset bytes and the viewer core.

pub mod gltf_adapter;
pub mod remote;
pub mod source;

pub use gltf_adapter::GltfAdapter;
pub use source::{AssetSource, SUPPORTED_EXTENSIONS, has_supported_extension};

use crate::error::AdapterError;
use crate::scene::SceneNode;
use std::future::Future;

/// Clip as reported by an adapter. An empty name means the asset left it unnamed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    pub duration_seconds: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration_seconds: f32) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutput {
    pub scene_root: SceneNode,
    pub clips: Vec<ClipInfo>,
}

/// Turns an [`AssetSource`] into a scene graph plus its animation clips.
pub trait IngestAdapter {
    fn load(
        &self,
        source: &AssetSource,
    ) -> impl Future<Output = Result<IngestOutput, AdapterError>>;
}
