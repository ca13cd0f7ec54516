use crate::error::AdapterError;
use crate::settings::ViewerConfig;
use std::path::Path;

pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

/// Where an asset comes from: bytes already in memory or a URL to fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    File {
        file_name: String,
        bytes: Vec<u8>,
    },
    Url {
        url: String,
        display_name: Option<String>,
    },
}

impl AssetSource {
    pub fn file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        AssetSource::File {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        AssetSource::Url {
            url: url.into(),
            display_name: None,
        }
    }

    /// The bundled example asset, fetched through the normal ingest path.
    pub fn example(config: &ViewerConfig) -> Self {
        AssetSource::Url {
            url: config.example_asset_url.clone(),
            display_name: Some(config.example_display_name.clone()),
        }
    }

    /// Read a local file into memory.
    pub async fn from_path(path: &Path) -> Result<Self, AdapterError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(AssetSource::file(file_name, bytes))
    }

    /// File name used for format checks: the file name itself, or the last URL
    /// path segment without query or fragment.
    pub fn file_name(&self) -> &str {
        match self {
            AssetSource::File { file_name, .. } => file_name,
            AssetSource::Url { url, .. } => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit('/').next().unwrap_or(path)
            }
        }
    }

    pub fn has_supported_extension(&self) -> bool {
        has_supported_extension(self.file_name())
    }

    /// User-facing name of the model this source produces.
    pub fn display_name(&self) -> String {
        if let AssetSource::Url {
            display_name: Some(name),
            ..
        } = self
        {
            return name.clone();
        }
        file_stem(self.file_name()).to_string()
    }
}

/// Case-insensitive `.glb` / `.gltf` check.
pub fn has_supported_extension(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => SUPPORTED_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(supported)),
        None => false,
    }
}

/// Strip the final extension: `robot.v2.glb` -> `robot.v2`.
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
