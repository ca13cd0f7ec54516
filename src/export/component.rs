// React Three Fiber component artifact

use super::literal::{fixed2_tuple, number, string_literal};
use super::{ArtifactContext, CodeWriter, DATA_MODULE_PATH};

pub(super) fn render(ctx: &ArtifactContext<'_>) -> String {
    let mut w = CodeWriter::default();
    let animations = ctx.animations_ident();
    let data = ctx.data_ident();
    let typescript = ctx.language.is_typescript();
    let has_clips = !ctx.constants.is_empty();

    // Imports
    w.line(0, "import React, { useRef, useEffect } from 'react';");
    if has_clips {
        w.line(0, "import { useGLTF, useAnimations } from '@react-three/drei';");
    } else {
        w.line(0, "import { useGLTF } from '@react-three/drei';");
    }
    if typescript {
        w.line(0, "import { GroupProps } from '@react-three/fiber';");
    }
    w.line(0, "import * as THREE from 'three';");
    w.line(
        0,
        &format!("import {{ {animations}, {data} }} from '{DATA_MODULE_PATH}';"),
    );
    w.blank();

    if typescript {
        w.line(0, "export function Model(props: GroupProps) {");
        w.line(1, "const group = useRef<THREE.Group>(null);");
    } else {
        w.line(0, "export function Model(props) {");
        w.line(1, "const group = useRef(null);");
    }
    w.line(
        1,
        &format!("const {{ scene, animations }} = useGLTF({data}.modelPath);"),
    );

    if has_clips {
        w.line(1, "const { actions } = useAnimations(animations, group);");
        w.blank();
        write_animation_effect(&mut w, ctx, &animations);
    }

    if ctx.has_morph_targets() {
        w.blank();
        write_expression_effect(&mut w, ctx);
    }

    w.blank();
    w.line(1, "return (");
    w.line(2, "<group");
    w.line(3, "ref={group}");
    w.line(3, &format!("position={{{}}}", fixed2_tuple(ctx.config.position)));
    w.line(3, &format!("rotation={{{}}}", fixed2_tuple(ctx.config.rotation)));
    w.line(3, &format!("scale={{{}}}", fixed2_tuple(ctx.config.scale)));
    w.line(3, "{...props}");
    w.line(3, "dispose={null}");
    w.line(2, ">");
    w.line(3, "<primitive object={scene} />");
    w.line(2, "</group>");
    w.line(1, ");");
    w.line(0, "}");
    w.blank();

    w.line(0, "// Preload the model");
    w.line(0, &format!("useGLTF.preload({data}.modelPath);"));
    w.finish()
}

/// Clips playing at export time start with their current speed; the rest are listed commented out.
fn write_animation_effect(w: &mut CodeWriter, ctx: &ArtifactContext<'_>, animations: &str) {
    let (playing, idle): (Vec<_>, Vec<_>) = ctx
        .constants
        .entries()
        .iter()
        .partition(|(_, clip)| clip.is_playing);

    w.line(1, "useEffect(() => {");
    if !playing.is_empty() {
        w.line(2, "// Playing when exported");
        for (key, clip) in &playing {
            w.line(
                2,
                &format!(
                    "actions[{animations}.{key}]?.reset().setEffectiveTimeScale({}).play();",
                    number(clip.speed_multiplier)
                ),
            );
        }
    }
    if !idle.is_empty() {
        if !playing.is_empty() {
            w.blank();
        }
        w.line(2, "// Available animations:");
        for (key, _) in &idle {
            w.line(2, &format!("// actions[{animations}.{key}]?.reset().play();"));
        }
    }
    w.line(1, "}, [actions]);");
}

/// Traverses the loaded scene and writes each non-zero influence into every matching mesh.
fn write_expression_effect(w: &mut CodeWriter, ctx: &ArtifactContext<'_>) {
    let typescript = ctx.language.is_typescript();

    w.line(1, "// Expressions / morph targets");
    w.line(1, "useEffect(() => {");
    if typescript {
        w.line(2, "const apply = (name: string, value: number) => {");
        w.line(3, "scene.traverse((object) => {");
        w.line(4, "const mesh = object as THREE.Mesh;");
    } else {
        w.line(2, "const apply = (name, value) => {");
        w.line(3, "scene.traverse((object) => {");
        w.line(4, "const mesh = object;");
    }
    w.line(4, "const index = mesh.morphTargetDictionary?.[name];");
    w.line(4, "if (index !== undefined && mesh.morphTargetInfluences) {");
    w.line(5, "mesh.morphTargetInfluences[index] = value;");
    w.line(4, "}");
    w.line(3, "});");
    w.line(2, "};");
    w.blank();

    for (name, value) in ctx.default_expressions() {
        if value != 0.0 {
            w.line(2, &format!("apply({}, {});", string_literal(name), number(value)));
        } else {
            w.line(2, &format!("// apply({}, 0.5); // 0-1 range", string_literal(name)));
        }
    }
    w.line(1, "}, [scene]);");
}

#[cfg(test)]
mod tests {
    use crate::export::{ExportLanguage, generate_integration_artifact};
    use crate::model::{AnimationClip, ModelSession, SessionId};
    use crate::scene::SceneNode;
    use crate::transform::TransformConfig;
    use std::collections::BTreeSet;

    fn session(clips: Vec<AnimationClip>, morphs: &[&str]) -> ModelSession {
        ModelSession::new(
            SessionId::new(1),
            "Robot Example",
            SceneNode::group("ModelRoot"),
            clips,
            morphs.iter().map(|m| m.to_string()).collect::<BTreeSet<_>>(),
        )
    }

    fn clip(name: &str, playing: bool, speed: f32) -> AnimationClip {
        let mut clip = AnimationClip::new(name, 1.0);
        clip.is_playing = playing;
        clip.speed_multiplier = speed;
        clip
    }

    #[test]
    fn only_playing_clips_get_active_statements() {
        let session = session(vec![clip("Idle", false, 1.0), clip("Wave Hello!", true, 1.5)], &[]);
        let text = generate_integration_artifact(
            &session,
            &TransformConfig::default(),
            ExportLanguage::TypeScript,
        );

        assert!(text.contains(
            "    actions[RobotExampleAnimations.WaveHello]?.reset().setEffectiveTimeScale(1.5).play();\n"
        ));
        assert!(text.contains("    // actions[RobotExampleAnimations.Idle]?.reset().play();\n"));
        assert!(!text.contains("actions[RobotExampleAnimations.Idle]?.reset().setEffectiveTimeScale"));
        assert!(text.contains("import { RobotExampleAnimations, RobotExampleData } from './modelData';"));
        assert!(text.contains("const { actions } = useAnimations(animations, group);"));
    }

    #[test]
    fn typescript_and_javascript_differ_in_annotations() {
        let session = session(vec![clip("Idle", false, 1.0)], &["Smile"]);
        let config = TransformConfig::default();

        let ts = generate_integration_artifact(&session, &config, ExportLanguage::TypeScript);
        assert!(ts.contains("export function Model(props: GroupProps) {"));
        assert!(ts.contains("useRef<THREE.Group>(null)"));
        assert!(ts.contains("const mesh = object as THREE.Mesh;"));

        let js = generate_integration_artifact(&session, &config, ExportLanguage::JavaScript);
        assert!(js.contains("export function Model(props) {"));
        assert!(!js.contains("GroupProps"));
        assert!(!js.contains(" as THREE."));
        assert!(js.contains("const apply = (name, value) => {"));
    }

    #[test]
    fn non_zero_influences_are_applied() {
        let session = session(Vec::new(), &["Smile", "Frown"]);
        let mut config = TransformConfig::default();
        config.morph_influences.insert("Smile".to_string(), 0.8);

        let text = generate_integration_artifact(&session, &config, ExportLanguage::TypeScript);
        assert!(text.contains("    apply(\"Smile\", 0.8);\n"));
        assert!(text.contains("    // apply(\"Frown\", 0.5); // 0-1 range\n"));
        assert!(!text.contains("useAnimations"));
        assert!(!text.contains("[actions]"));
    }

    #[test]
    fn model_without_clips_or_morphs_is_minimal() {
        let session = session(Vec::new(), &[]);
        let mut config = TransformConfig::default();
        config.scale = [2.0, 2.0, 2.0];
        let text = generate_integration_artifact(&session, &config, ExportLanguage::JavaScript);
        assert!(!text.contains("useEffect(() =>"));
        assert!(text.contains("      scale={[2.00, 2.00, 2.00]}\n"));
        assert!(text.ends_with("// Preload the model\nuseGLTF.preload(RobotExampleData.modelPath);\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let session = session(vec![clip("Run", true, 0.5)], &["Blink"]);
        let config = TransformConfig::default();
        assert_eq!(
            generate_integration_artifact(&session, &config, ExportLanguage::JavaScript),
            generate_integration_artifact(&session, &config, ExportLanguage::JavaScript)
        );
    }
}
