use anyhow::{Context, bail};
use gltf_explorer::settings::ViewerConfig;
use gltf_explorer::{AssetSource, ExportLanguage, GltfAdapter, ViewerStore};
use std::path::PathBuf;

const USAGE: &str = "usage: gltf-explorer [MODEL_PATH] [--lang ts|js] [--play CLIP]...";

struct Args {
    model_path: Option<PathBuf>,
    language: Option<ExportLanguage>,
    play: Vec<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        model_path: None,
        language: None,
        play: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--lang" => {
                let value = iter.next().context("--lang needs a value")?;
                args.language = Some(value.parse()?);
            }
            "--play" => {
                let clip = iter.next().context("--play needs a clip name")?;
                args.play.push(clip);
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
            path => {
                if args.model_path.replace(PathBuf::from(path)).is_some() {
                    bail!("only one model path may be given\n{USAGE}");
                }
            }
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let config = ViewerConfig::load();
    let language = args.language.unwrap_or(config.default_language);

    let rt = tokio::runtime::Runtime::new()?;
    let adapter = GltfAdapter::new();
    let mut store = ViewerStore::new();

    let source = match &args.model_path {
        Some(path) => rt
            .block_on(AssetSource::from_path(path))
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => AssetSource::example(&config),
    };

    if !rt.block_on(store.load_asset(&adapter, source)) {
        bail!(
            "{}",
            store.last_error().unwrap_or("Failed to load model")
        );
    }

    store.mount_scene();
    for clip in &args.play {
        if store.toggle_animation(clip, Some(true)).is_none() {
            log::warn!("No animation named '{clip}'");
        }
    }
    store.tick(0.0);

    if let Some(session) = store.session() {
        println!("{}", session.summary());
    }

    let data = store
        .export_data_artifact(language)
        .context("no model loaded")?;
    let component = store
        .export_integration_artifact(language)
        .context("no model loaded")?;

    println!("\n// ===== modelData.{} =====\n", language.data_extension());
    print!("{data}");
    println!("\n// ===== Model.{} =====\n", language.component_extension());
    print!("{component}");

    Ok(())
}
