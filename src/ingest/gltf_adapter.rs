// glTF / GLB ingest adapter
// Reads only the document structure: node hierarchy, morph channel names and clip lengths.
// Buffers are never decoded.

use super::remote::fetch_bytes;
use super::{AssetSource, ClipInfo, IngestAdapter, IngestOutput};
use crate::error::AdapterError;
use crate::scene::{MorphTable, NodeKind, SceneNode};
use gltf::{Document, Gltf};
use nalgebra_glm as glm;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashSet;

const GLB_MAGIC: &[u8] = b"glTF";
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Mesh extras as written by most exporters (Blender, three.js).
#[derive(Deserialize)]
struct MeshExtras {
    #[serde(rename = "targetNames", default)]
    target_names: Vec<String>,
}

pub struct GltfAdapter {
    client: reqwest::Client,
}

impl GltfAdapter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Parse a GLB container or glTF JSON document already in memory.
    pub fn parse(bytes: &[u8]) -> Result<IngestOutput, AdapterError> {
        check_container(bytes)?;

        let gltf = Gltf::from_slice(bytes)?;
        let scene_root = build_scene(&gltf);
        let clips = gltf
            .animations()
            .map(|animation| {
                ClipInfo::new(animation.name().unwrap_or_default(), clip_duration(&animation))
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Parsed glTF document: {} node(s), {} clip(s)",
            scene_root.node_count(),
            clips.len()
        );

        Ok(IngestOutput { scene_root, clips })
    }
}

impl Default for GltfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestAdapter for GltfAdapter {
    async fn load(&self, source: &AssetSource) -> Result<IngestOutput, AdapterError> {
        let bytes: Cow<'_, [u8]> = match source {
            AssetSource::File { bytes, .. } => Cow::Borrowed(bytes.as_slice()),
            AssetSource::Url { url, .. } => Cow::Owned(fetch_bytes(&self.client, url).await?),
        };
        Self::parse(&bytes)
    }
}

/// Reject content that is neither a GLB container nor a JSON document.
fn check_container(bytes: &[u8]) -> Result<(), AdapterError> {
    if bytes.starts_with(GLB_MAGIC) {
        return Ok(());
    }
    let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match text.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(()),
        _ => Err(AdapterError::UnsupportedFormat(
            "content is neither a GLB container nor glTF JSON".to_string(),
        )),
    }
}

fn build_scene(document: &Document) -> SceneNode {
    let mut visited = HashSet::new();

    match document.default_scene().or_else(|| document.scenes().next()) {
        Some(scene) => {
            let mut root = SceneNode::group(scene.name().unwrap_or("Scene"));
            root.children = scene
                .nodes()
                .filter_map(|node| build_node(&node, &mut visited))
                .collect();
            root
        }
        None => {
            // No scene declared: every node that is nobody's child is a root
            let child_indices: HashSet<usize> = document
                .nodes()
                .flat_map(|node| node.children().map(|child| child.index()))
                .collect();
            let mut root = SceneNode::group("Scene");
            root.children = document
                .nodes()
                .filter(|node| !child_indices.contains(&node.index()))
                .filter_map(|node| build_node(&node, &mut visited))
                .collect();
            root
        }
    }
}

fn build_node(node: &gltf::Node, visited: &mut HashSet<usize>) -> Option<SceneNode> {
    // Guards against malformed hierarchies that reference a node twice
    if !visited.insert(node.index()) {
        return None;
    }

    let name = node
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("node_{}", node.index()));
    let matrix = node.transform().matrix();

    let mut scene_node =
        SceneNode::new(name, node_kind(node)).with_transform(glm::make_mat4(matrix.as_flattened()));
    scene_node.children = node
        .children()
        .filter_map(|child| build_node(&child, visited))
        .collect();
    Some(scene_node)
}

fn node_kind(node: &gltf::Node) -> NodeKind {
    if let Some(mesh) = node.mesh() {
        return match morph_table(&mesh) {
            Some(table) => NodeKind::MorphMesh(table),
            None => NodeKind::Mesh,
        };
    }
    if node.camera().is_some() {
        return NodeKind::Other;
    }
    NodeKind::Group
}

/// Channel names come from `extras.targetNames`; unnamed channels use their index.
/// Slots start at 0. The mesh's default `weights` are not carried over.
fn morph_table(mesh: &gltf::Mesh) -> Option<MorphTable> {
    let target_count = mesh
        .primitives()
        .map(|primitive| primitive.morph_targets().count())
        .max()
        .unwrap_or(0);
    if target_count == 0 {
        return None;
    }

    let mut names = target_names(mesh);
    names.truncate(target_count);
    let named = names.len();
    names.extend((named..target_count).map(|index| index.to_string()));

    Some(MorphTable::new(names))
}

fn target_names(mesh: &gltf::Mesh) -> Vec<String> {
    mesh.extras()
        .as_ref()
        .and_then(|raw| serde_json::from_str::<MeshExtras>(raw.get()).ok())
        .map(|extras| extras.target_names)
        .unwrap_or_default()
}

/// Clip length is the latest keyframe time over all channels.
fn clip_duration(animation: &gltf::Animation) -> f32 {
    animation
        .channels()
        .filter_map(|channel| channel.sampler().input().max())
        .filter_map(|max| {
            max.as_array()
                .and_then(|values| values.first())
                .and_then(serde_json::Value::as_f64)
        })
        .fold(0.0_f64, f64::max) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vec3_accessor() -> serde_json::Value {
        json!({
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 1.0]
        })
    }

    fn time_accessor(end: f64) -> serde_json::Value {
        json!({
            "componentType": 5126,
            "count": 2,
            "type": "SCALAR",
            "min": [0.0],
            "max": [end]
        })
    }

    fn sample_document() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "name": "Root", "nodes": [0, 3] }],
            "nodes": [
                { "name": "Body", "children": [1, 2], "translation": [1.0, 2.0, 3.0] },
                { "name": "Face", "mesh": 0 },
                { "name": "Torso", "mesh": 1 },
                { "camera": 0 }
            ],
            "cameras": [
                { "type": "perspective", "perspective": { "yfov": 0.8, "znear": 0.1 } }
            ],
            "meshes": [
                {
                    "primitives": [{
                        "attributes": { "POSITION": 0 },
                        "targets": [{ "POSITION": 1 }, { "POSITION": 1 }, { "POSITION": 1 }]
                    }],
                    "weights": [0.0, 0.25, 0.5],
                    "extras": { "targetNames": ["Smile", "Frown"] }
                },
                { "primitives": [{ "attributes": { "POSITION": 0 } }] }
            ],
            "accessors": [
                vec3_accessor(),
                vec3_accessor(),
                time_accessor(1.5),
                time_accessor(2.25),
                vec3_accessor()
            ],
            "animations": [
                {
                    "name": "Wave",
                    "channels": [{ "sampler": 0, "target": { "node": 0, "path": "translation" } }],
                    "samplers": [{ "input": 2, "output": 4 }]
                },
                {
                    "channels": [
                        { "sampler": 0, "target": { "node": 0, "path": "translation" } },
                        { "sampler": 1, "target": { "node": 0, "path": "scale" } }
                    ],
                    "samplers": [{ "input": 2, "output": 4 }, { "input": 3, "output": 4 }]
                }
            ]
        }))
        .unwrap()
    }

    /// Wrap a JSON document in a GLB container with a single space-padded JSON chunk.
    fn glb(json: &[u8]) -> Vec<u8> {
        let mut chunk = json.to_vec();
        while chunk.len() % 4 != 0 {
            chunk.push(b' ');
        }
        let total = 12 + 8 + chunk.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&chunk);
        out
    }

    #[test]
    fn builds_tree_from_default_scene() {
        let output = GltfAdapter::parse(&sample_document()).unwrap();
        let root = &output.scene_root;
        assert_eq!(root.name, "Root");

        let mut names = Vec::new();
        root.visit(|node| names.push(node.name.clone()));
        assert_eq!(names, ["Root", "Body", "Face", "Torso", "node_3"]);

        assert_eq!(root.find("Torso").unwrap().kind, NodeKind::Mesh);
        assert_eq!(root.find("node_3").unwrap().kind, NodeKind::Other);
        assert_eq!(root.find("Body").unwrap().kind, NodeKind::Group);
    }

    #[test]
    fn keeps_node_transforms() {
        let output = GltfAdapter::parse(&sample_document()).unwrap();
        let body = output.scene_root.find("Body").unwrap();
        assert_eq!(body.local_transform[(0, 3)], 1.0);
        assert_eq!(body.local_transform[(1, 3)], 2.0);
        assert_eq!(body.local_transform[(2, 3)], 3.0);
    }

    #[test]
    fn morph_channels_named_from_extras_with_index_fallback() {
        let output = GltfAdapter::parse(&sample_document()).unwrap();
        let table = output
            .scene_root
            .find("Face")
            .and_then(SceneNode::morph_table)
            .unwrap();
        assert_eq!(table.index_of("Smile"), Some(0));
        assert_eq!(table.index_of("Frown"), Some(1));
        assert_eq!(table.index_of("2"), Some(2));
        assert_eq!(table.influences(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn clip_duration_is_latest_keyframe() {
        let output = GltfAdapter::parse(&sample_document()).unwrap();
        assert_eq!(
            output.clips,
            vec![ClipInfo::new("Wave", 1.5), ClipInfo::new("", 2.25)]
        );
    }

    #[test]
    fn document_without_scene_uses_parentless_nodes() {
        let bytes = serde_json::to_vec(&json!({
            "asset": { "version": "2.0" },
            "nodes": [
                { "name": "A", "children": [1] },
                { "name": "B" },
                { "name": "C" }
            ]
        }))
        .unwrap();
        let output = GltfAdapter::parse(&bytes).unwrap();
        let top: Vec<_> = output
            .scene_root
            .children
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(top, ["A", "C"]);
        assert!(output.clips.is_empty());
    }

    #[test]
    fn glb_container_matches_json_document() {
        let from_json = GltfAdapter::parse(&sample_document()).unwrap();
        let from_glb = GltfAdapter::parse(&glb(&sample_document())).unwrap();
        assert_eq!(from_glb, from_json);

        let mut names = Vec::new();
        from_glb.scene_root.visit(|node| names.push(node.name.clone()));
        assert_eq!(names, ["Root", "Body", "Face", "Torso", "node_3"]);
        assert_eq!(
            from_glb.clips,
            vec![ClipInfo::new("Wave", 1.5), ClipInfo::new("", 2.25)]
        );
    }

    #[test]
    fn truncated_glb_is_a_decode_error() {
        let mut bytes = glb(&sample_document());
        bytes.truncate(40);
        let err = GltfAdapter::parse(&bytes).unwrap_err();
        assert!(matches!(err, AdapterError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn rejects_non_gltf_content() {
        let err = GltfAdapter::parse(b"\x89PNG\r\n\x1a\n").unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedFormat(_)));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = GltfAdapter::parse(b"{ \"asset\": ").unwrap_err();
        assert!(matches!(err, AdapterError::Decode(_)));
    }

    #[tokio::test]
    async fn file_source_is_parsed_without_network() {
        let adapter = GltfAdapter::new();
        let source = AssetSource::file("robot.gltf", sample_document());
        let output = adapter.load(&source).await.unwrap();
        assert_eq!(output.clips.len(), 2);
    }
}
