// Model registry
// Turns ingest output into a ModelSession and discovers morph channels.

use super::session::{AnimationClip, ModelSession, SessionId};
use crate::error::IngestError;
use crate::ingest::{AssetSource, IngestAdapter, IngestOutput};
use crate::scene::{NodeKind, SceneNode};
use std::collections::BTreeSet;

/// Name of the group the viewer wraps around every ingested scene.
/// Placement from the transform config is written to this node.
pub const MODEL_ROOT_NAME: &str = "ModelRoot";

/// Reject sources whose file name is not `.glb` / `.gltf` before any adapter work.
pub fn validate_source(source: &AssetSource) -> Result<(), IngestError> {
    if source.has_supported_extension() {
        Ok(())
    } else {
        Err(IngestError::InvalidFormat(source.file_name().to_string()))
    }
}

/// Load `source` through `adapter` and build a session from the result.
pub async fn ingest_model<A: IngestAdapter>(
    adapter: &A,
    source: &AssetSource,
    id: SessionId,
) -> Result<ModelSession, IngestError> {
    validate_source(source)?;
    let output = adapter.load(source).await?;
    Ok(build_session(id, source.display_name(), output))
}

pub fn build_session(id: SessionId, display_name: String, output: IngestOutput) -> ModelSession {
    let IngestOutput { scene_root, clips } = output;

    let animation_clips = clips
        .into_iter()
        .enumerate()
        .map(|(index, clip)| {
            let name = if clip.name.is_empty() {
                format!("Animation {index}")
            } else {
                clip.name
            };
            let duration = if clip.duration_seconds.is_finite() {
                clip.duration_seconds.max(0.0)
            } else {
                0.0
            };
            AnimationClip::new(name, duration)
        })
        .collect::<Vec<_>>();

    let morph_target_names = discover_morph_targets(&scene_root);
    let root = SceneNode::group(MODEL_ROOT_NAME).with_child(scene_root);

    log::info!(
        "Registered model '{}' ({}): {} clip(s), {} morph target(s)",
        display_name,
        id,
        animation_clips.len(),
        morph_target_names.len()
    );

    ModelSession::new(id, display_name, root, animation_clips, morph_target_names)
}

/// Every distinct morph channel name found on any mesh below `root`.
pub fn discover_morph_targets(root: &SceneNode) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    root.visit(|node| match &node.kind {
        NodeKind::MorphMesh(table) => names.extend(table.names().map(str::to_owned)),
        NodeKind::Group | NodeKind::Mesh | NodeKind::Other => {}
    });
    names
}
