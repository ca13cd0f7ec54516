use std::io;
use thiserror::Error;

/// Failures reported by an asset ingest adapter while fetching or decoding a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("network error: {0}")]
    Network(String),
    /// Local file could not be read.
    #[error("read error: {0}")]
    Io(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Failures of the model registry when turning a source into a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// The file name does not end in `.glb` or `.gltf`. Raised before any adapter call.
    #[error("invalid file type: {0}")]
    InvalidFormat(String),
    #[error("load failure: {0}")]
    LoadFailure(#[from] AdapterError),
}

impl IngestError {
    /// Human readable message shown by the UI in place of the raw failure.
    pub fn user_message(&self) -> String {
        match self {
            IngestError::InvalidFormat(_) => {
                "Invalid file type. Please upload a .glb or .gltf file.".to_string()
            }
            IngestError::LoadFailure(cause) => format!("Failed to load model: {cause}"),
        }
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        AdapterError::Network(err.to_string())
    }
}

impl From<io::Error> for AdapterError {
    fn from(err: io::Error) -> Self {
        AdapterError::Io(err.to_string())
    }
}

impl From<gltf::Error> for AdapterError {
    fn from(err: gltf::Error) -> Self {
        AdapterError::Decode(err.to_string())
    }
}
