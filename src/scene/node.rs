// Generic scene-graph tree
// Nodes own their children; meshes with morph channels carry a name -> slot table.

use nalgebra_glm as glm;
use std::collections::BTreeMap;

/// Named morph channels of one mesh and the live influence value of every slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MorphTable {
    dictionary: BTreeMap<String, usize>,
    influences: Vec<f32>,
}

impl MorphTable {
    /// Build a table whose slot indices follow the order of `names`.
    /// A repeated name points at its last slot.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = BTreeMap::new();
        let mut count = 0;
        for (index, name) in names.into_iter().enumerate() {
            dictionary.insert(name.into(), index);
            count = index + 1;
        }
        Self {
            dictionary,
            influences: vec![0.0; count],
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dictionary.keys().map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.dictionary.get(name).copied()
    }

    pub fn influences(&self) -> &[f32] {
        &self.influences
    }

    pub fn influence(&self, name: &str) -> Option<f32> {
        self.index_of(name).and_then(|i| self.influences.get(i).copied())
    }

    /// Write one slot. Returns false when the mesh has no channel with that name.
    pub fn set_influence(&mut self, name: &str, value: f32) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.influences[index] = value;
                true
            }
            None => false,
        }
    }

    pub fn clear_influences(&mut self) {
        self.influences.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn len(&self) -> usize {
        self.influences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.influences.is_empty()
    }
}

/// What a node is, as far as the viewer core cares.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group,
    MorphMesh(MorphTable),
    Mesh,
    /// Cameras, lights and anything else the core does not drive.
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub local_transform: glm::Mat4,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            local_transform: glm::identity(),
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Mesh)
    }

    pub fn morph_mesh(name: impl Into<String>, table: MorphTable) -> Self {
        Self::new(name, NodeKind::MorphMesh(table))
    }

    pub fn other(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Other)
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_transform(mut self, transform: glm::Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    pub fn morph_table(&self) -> Option<&MorphTable> {
        match &self.kind {
            NodeKind::MorphMesh(table) => Some(table),
            NodeKind::Group | NodeKind::Mesh | NodeKind::Other => None,
        }
    }

    /// Depth-first, pre-order walk over this node and all descendants.
    pub fn visit<F: FnMut(&SceneNode)>(&self, mut f: F) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.children.iter().rev());
        }
    }

    /// Mutable counterpart of [`SceneNode::visit`].
    pub fn visit_mut<F: FnMut(&mut SceneNode)>(&mut self, mut f: F) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(&mut *node);
            stack.extend(node.children.iter_mut().rev());
        }
    }

    /// Mutable walk restricted to meshes exposing a morph table.
    pub fn for_each_morph_table_mut<F: FnMut(&mut MorphTable)>(&mut self, mut f: F) {
        self.visit_mut(|node| match &mut node.kind {
            NodeKind::MorphMesh(table) => f(table),
            NodeKind::Group | NodeKind::Mesh | NodeKind::Other => {}
        });
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.name == name {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }
}
