use crate::scene::SceneNode;
use std::collections::BTreeMap;

pub type InfluenceMap = BTreeMap<String, f32>;

/// Store `value` for `target_name` as given. No clamping.
pub fn set_influence(influences: &mut InfluenceMap, target_name: &str, value: f32) {
    influences.insert(target_name.to_string(), value);
}

/// Drop every stored influence; all channels fall back to 0.
pub fn reset_all(influences: &mut InfluenceMap) {
    influences.clear();
}

/// Write each stored influence into every mesh that has a channel with that name.
/// Meshes lacking a name are skipped. Returns the number of slots written.
pub fn apply_to_scene(root: &mut SceneNode, influences: &InfluenceMap) -> usize {
    if influences.is_empty() {
        return 0;
    }

    let mut written = 0;
    root.for_each_morph_table_mut(|table| {
        for (name, value) in influences {
            if table.set_influence(name, *value) {
                written += 1;
            }
        }
    });
    log::trace!("Applied {} morph influence slot(s)", written);
    written
}

/// Zero every morph slot below `root`.
pub fn zero_scene(root: &mut SceneNode) {
    root.for_each_morph_table_mut(|table| table.clear_influences());
}
