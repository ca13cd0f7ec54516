// Model placement
// Position / rotation / scale of the loaded model plus the live morph influences.

use crate::scene::SceneNode;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
pub const DEFAULT_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];
pub const DEFAULT_SCALE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformComponent {
    Position,
    Rotation,
    Scale,
}

impl fmt::Display for TransformComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformComponent::Position => "position",
            TransformComponent::Rotation => "rotation",
            TransformComponent::Scale => "scale",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Placement of the model root. Rotation is stored in radians (XYZ Euler order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// Morph channel name -> influence. Missing names mean 0.
    pub morph_influences: BTreeMap<String, f32>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            rotation: DEFAULT_ROTATION,
            scale: DEFAULT_SCALE,
            morph_influences: BTreeMap::new(),
        }
    }
}

impl TransformConfig {
    /// Replace one scalar. No range checks.
    pub fn set_component(&mut self, which: TransformComponent, axis: Axis, value: f32) {
        let tuple = match which {
            TransformComponent::Position => &mut self.position,
            TransformComponent::Rotation => &mut self.rotation,
            TransformComponent::Scale => &mut self.scale,
        };
        tuple[axis.index()] = value;
    }

    pub fn component(&self, which: TransformComponent) -> [f32; 3] {
        match which {
            TransformComponent::Position => self.position,
            TransformComponent::Rotation => self.rotation,
            TransformComponent::Scale => self.scale,
        }
    }

    /// Restore the three tuples. Morph influences are left alone.
    pub fn reset_transforms(&mut self) {
        self.position = DEFAULT_POSITION;
        self.rotation = DEFAULT_ROTATION;
        self.scale = DEFAULT_SCALE;
    }

    /// Defaults for a freshly loaded model, influences included.
    pub fn reset_for_new_model(&mut self) {
        *self = Self::default();
    }

    pub fn rotation_degrees(&self) -> [f32; 3] {
        self.rotation.map(f32::to_degrees)
    }

    pub fn set_rotation_degrees(&mut self, axis: Axis, degrees: f32) {
        self.rotation[axis.index()] = degrees.to_radians();
    }

    /// Local matrix of the model root: translate, then rotate X, Y, Z, then scale.
    pub fn matrix(&self) -> glm::Mat4 {
        let [rx, ry, rz] = self.rotation;
        glm::translation(&glm::Vec3::from(self.position))
            * glm::rotation(rx, &glm::vec3(1.0, 0.0, 0.0))
            * glm::rotation(ry, &glm::vec3(0.0, 1.0, 0.0))
            * glm::rotation(rz, &glm::vec3(0.0, 0.0, 1.0))
            * glm::scaling(&glm::Vec3::from(self.scale))
    }

    /// Recompute `node`'s local transform from the stored tuples.
    pub fn apply_to_node(&self, node: &mut SceneNode) {
        node.local_transform = self.matrix();
    }
}
