// Identifier derivation for generated code

use crate::model::AnimationClip;
use std::collections::HashMap;

/// Used when a display name sanitises to nothing.
pub const FALLBACK_MODEL_IDENT: &str = "Model";

/// Remove all whitespace: `"Robot Example"` -> `"RobotExample"`.
pub fn compact_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strip whitespace, then everything outside `[A-Za-z0-9_]`.
pub fn sanitize_identifier(name: &str) -> String {
    compact_name(name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Sanitised name that is usable as an identifier: never empty, never led by a digit.
fn usable_identifier(name: &str, fallback: impl FnOnce() -> String) -> String {
    let ident = sanitize_identifier(name);
    match ident.chars().next() {
        None => fallback(),
        Some(first) if first.is_ascii_digit() => format!("_{ident}"),
        Some(_) => ident,
    }
}

/// Prefix for the generated `<Model>Animations` / `<Model>Data` names.
pub fn model_identifier(display_name: &str) -> String {
    usable_identifier(display_name, || FALLBACK_MODEL_IDENT.to_string())
}

/// Constant key of a clip. Names with no identifier characters fall back to `Clip<index>`.
pub fn clip_key(clip_name: &str, index: usize) -> String {
    usable_identifier(clip_name, || format!("Clip{index}"))
}

/// Clip name constants keyed by sanitised name.
/// Colliding keys keep the position of their first clip and take the last clip's value.
#[derive(Debug)]
pub struct ConstantTable<'a> {
    entries: Vec<(String, &'a AnimationClip)>,
}

impl<'a> ConstantTable<'a> {
    pub fn build(clips: &'a [AnimationClip]) -> Self {
        let mut entries: Vec<(String, &'a AnimationClip)> = Vec::with_capacity(clips.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (index, clip) in clips.iter().enumerate() {
            let key = clip_key(&clip.name, index);
            match positions.get(&key) {
                Some(&position) => {
                    log::debug!("Clip '{}' overwrites constant {}", clip.name, key);
                    entries[position].1 = clip;
                }
                None => {
                    positions.insert(key.clone(), entries.len());
                    entries.push((key, clip));
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[(String, &'a AnimationClip)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
