// Export engine
// Generates the data module and the React Three Fiber component for the loaded model.
// Output is a pure function of the session, the transform config and the language.

mod component;
mod data;
pub mod literal;
pub mod naming;

use crate::model::ModelSession;
use crate::transform::TransformConfig;
use naming::ConstantTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Module name the generated component imports the data artifact from.
pub const DATA_MODULE_PATH: &str = "./modelData";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportLanguage {
    #[default]
    TypeScript,
    JavaScript,
}

impl ExportLanguage {
    pub fn is_typescript(self) -> bool {
        self == ExportLanguage::TypeScript
    }

    /// Extension for the data module.
    pub fn data_extension(self) -> &'static str {
        match self {
            ExportLanguage::TypeScript => "ts",
            ExportLanguage::JavaScript => "js",
        }
    }

    /// Extension for the component file.
    pub fn component_extension(self) -> &'static str {
        match self {
            ExportLanguage::TypeScript => "tsx",
            ExportLanguage::JavaScript => "jsx",
        }
    }
}

impl fmt::Display for ExportLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportLanguage::TypeScript => f.write_str("TypeScript"),
            ExportLanguage::JavaScript => f.write_str("JavaScript"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export language '{0}' (expected ts or js)")]
pub struct ParseLanguageError(String);

impl FromStr for ExportLanguage {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ts" | "tsx" | "typescript" => Ok(ExportLanguage::TypeScript),
            "js" | "jsx" | "javascript" => Ok(ExportLanguage::JavaScript),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

/// Self-contained data description of the model: clip name constants, clip
/// records, placement and morph defaults.
pub fn generate_data_artifact(
    session: &ModelSession,
    config: &TransformConfig,
    language: ExportLanguage,
) -> String {
    data::render(&ArtifactContext::new(session, config, language))
}

/// Template component that loads the model, starts the clips that are playing
/// and applies the non-zero morph influences.
pub fn generate_integration_artifact(
    session: &ModelSession,
    config: &TransformConfig,
    language: ExportLanguage,
) -> String {
    component::render(&ArtifactContext::new(session, config, language))
}

/// Names and tables shared by both artifacts.
struct ArtifactContext<'a> {
    session: &'a ModelSession,
    config: &'a TransformConfig,
    language: ExportLanguage,
    model_ident: String,
    constants: ConstantTable<'a>,
}

impl<'a> ArtifactContext<'a> {
    fn new(session: &'a ModelSession, config: &'a TransformConfig, language: ExportLanguage) -> Self {
        Self {
            session,
            config,
            language,
            model_ident: naming::model_identifier(session.display_name()),
            constants: ConstantTable::build(session.animation_clips()),
        }
    }

    fn animations_ident(&self) -> String {
        format!("{}Animations", self.model_ident)
    }

    fn data_ident(&self) -> String {
        format!("{}Data", self.model_ident)
    }

    fn has_morph_targets(&self) -> bool {
        !self.session.morph_target_names().is_empty()
    }

    /// Stored influence for every session morph target, 0 when unset.
    fn default_expressions(&self) -> impl Iterator<Item = (&'a str, f32)> {
        let influences = &self.config.morph_influences;
        self.session
            .morph_target_names()
            .iter()
            .map(move |name| (name.as_str(), influences.get(name).copied().unwrap_or(0.0)))
    }
}

/// Line-oriented text builder with two-space indentation.
#[derive(Default)]
struct CodeWriter {
    out: String,
}

impl CodeWriter {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}
