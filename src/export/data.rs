// Data module artifact

use super::literal::{comment_text, fixed2, fixed2_tuple, number, string_literal};
use super::naming::compact_name;
use super::{ArtifactContext, CodeWriter};

pub(super) fn render(ctx: &ArtifactContext<'_>) -> String {
    let mut w = CodeWriter::default();
    let animations = ctx.animations_ident();
    let data = ctx.data_ident();
    let typescript = ctx.language.is_typescript();

    w.line(
        0,
        &format!(
            "// Animation and model data for {}",
            comment_text(ctx.session.display_name())
        ),
    );
    w.blank();

    if typescript {
        write_interfaces(&mut w, ctx.has_morph_targets());
        w.line(0, "// Enum for animation names");
        w.line(0, &format!("enum {animations} {{"));
        for (key, clip) in ctx.constants.entries() {
            w.line(1, &format!("{key} = {},", string_literal(&clip.name)));
        }
        w.line(0, "}");
    } else {
        w.line(0, "// Animation name constants");
        w.line(0, &format!("const {animations} = {{"));
        for (key, clip) in ctx.constants.entries() {
            w.line(1, &format!("{key}: {},", string_literal(&clip.name)));
        }
        w.line(0, "};");
    }
    w.blank();

    w.line(0, "// Complete model data");
    if typescript {
        w.line(0, &format!("const {data}: ModelData = {{"));
    } else {
        w.line(0, &format!("const {data} = {{"));
    }
    w.line(
        1,
        &format!("name: {},", string_literal(ctx.session.display_name())),
    );
    let model_path = format!("/path/to/{}.glb", compact_name(ctx.session.display_name()));
    w.line(1, &format!("modelPath: {},", string_literal(&model_path)));

    w.line(1, "animations: {");
    for (key, clip) in ctx.constants.entries() {
        w.line(2, &format!("[{animations}.{key}]: {{"));
        w.line(3, &format!("name: {},", string_literal(&clip.name)));
        w.line(3, &format!("duration: {},", fixed2(clip.duration_seconds)));
        w.line(2, "},");
    }
    w.line(1, "},");

    w.line(1, "transform: {");
    w.line(2, &format!("position: {},", fixed2_tuple(ctx.config.position)));
    w.line(2, &format!("rotation: {},", fixed2_tuple(ctx.config.rotation)));
    w.line(2, &format!("scale: {},", fixed2_tuple(ctx.config.scale)));
    w.line(1, "},");

    if ctx.has_morph_targets() {
        w.line(1, "morphTargets: [");
        for name in ctx.session.morph_target_names() {
            w.line(2, &format!("{},", string_literal(name)));
        }
        w.line(1, "],");

        w.line(1, "defaultExpressions: {");
        for (name, value) in ctx.default_expressions() {
            w.line(2, &format!("{}: {},", string_literal(name), number(value)));
        }
        w.line(1, "},");
    }
    w.line(0, "};");
    w.blank();

    w.line(0, &format!("export {{ {animations}, {data} }};"));
    w.finish()
}

fn write_interfaces(w: &mut CodeWriter, with_morphs: bool) {
    w.line(0, "interface Animation {");
    w.line(1, "name: string;");
    w.line(1, "duration: number;");
    w.line(0, "}");
    w.blank();

    w.line(0, "interface ModelTransform {");
    w.line(1, "position: [number, number, number];");
    w.line(1, "rotation: [number, number, number];");
    w.line(1, "scale: [number, number, number];");
    w.line(0, "}");
    w.blank();

    w.line(0, "interface ModelData {");
    w.line(1, "name: string;");
    w.line(1, "modelPath: string;");
    w.line(1, "animations: Record<string, Animation>;");
    w.line(1, "transform: ModelTransform;");
    if with_morphs {
        w.line(1, "morphTargets: string[];");
        w.line(1, "defaultExpressions: Record<string, number>;");
    }
    w.line(0, "}");
    w.blank();
}
