use crate::scene::{ActionHandle, ClipAction, SceneNode};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Identity of one ingest attempt and the session it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Playback state of one clip reported by the ingest adapter.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration_seconds: f32,
    pub is_playing: bool,
    pub speed_multiplier: f32,
    runtime_binding: Option<ActionHandle>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration_seconds: f32) -> Self {
        Self {
            name: name.into(),
            duration_seconds,
            is_playing: false,
            speed_multiplier: 1.0,
            runtime_binding: None,
        }
    }

    pub fn runtime_binding(&self) -> Option<&ActionHandle> {
        self.runtime_binding.as_ref()
    }

    /// Live player if one is bound and the mounted scene still exists.
    pub fn live_action(&self) -> Option<Rc<RefCell<ClipAction>>> {
        self.runtime_binding.as_ref().and_then(|handle| handle.upgrade())
    }

    pub fn is_bound(&self) -> bool {
        self.live_action().is_some()
    }

    pub(crate) fn set_runtime_binding(&mut self, handle: ActionHandle) {
        self.runtime_binding = Some(handle);
    }
}

/// Everything known about the currently loaded asset.
#[derive(Debug)]
pub struct ModelSession {
    id: SessionId,
    display_name: String,
    scene_root: SceneNode,
    animation_clips: Vec<AnimationClip>,
    morph_target_names: BTreeSet<String>,
}

impl ModelSession {
    pub fn new(
        id: SessionId,
        display_name: impl Into<String>,
        scene_root: SceneNode,
        animation_clips: Vec<AnimationClip>,
        morph_target_names: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            scene_root,
            animation_clips,
            morph_target_names,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn scene_root(&self) -> &SceneNode {
        &self.scene_root
    }

    pub(crate) fn scene_root_mut(&mut self) -> &mut SceneNode {
        &mut self.scene_root
    }

    pub fn animation_clips(&self) -> &[AnimationClip] {
        &self.animation_clips
    }

    pub(crate) fn animation_clips_mut(&mut self) -> &mut [AnimationClip] {
        &mut self.animation_clips
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.animation_clips.iter().rev().find(|clip| clip.name == name)
    }

    pub fn morph_target_names(&self) -> &BTreeSet<String> {
        &self.morph_target_names
    }

    pub fn has_morph_target(&self, name: &str) -> bool {
        self.morph_target_names.contains(name)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} animation(s), {} morph target(s), {} node(s)",
            self.display_name,
            self.animation_clips.len(),
            self.morph_target_names.len(),
            self.scene_root.node_count()
        )
    }
}
