use crate::CONFY_APP_NAME;
use crate::export::ExportLanguage;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#1a1a1a";

pub const EXAMPLE_ASSET_URL: &str =
    "https://threejs.org/examples/models/gltf/RobotExpressive/RobotExpressive.glb";

/// Scene presentation toggles. Process-wide and independent of the loaded model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    pub show_grid: bool,
    pub show_axes: bool,
    pub background_color: String,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_axes: true,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
        }
    }
}

/// Partial update for [`SceneSettings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSettingsUpdate {
    pub show_grid: Option<bool>,
    pub show_axes: Option<bool>,
    pub background_color: Option<String>,
}

impl SceneSettings {
    pub fn apply(&mut self, update: SceneSettingsUpdate) {
        if let Some(show_grid) = update.show_grid {
            self.show_grid = show_grid;
        }
        if let Some(show_axes) = update.show_axes {
            self.show_axes = show_axes;
        }
        if let Some(color) = update.background_color {
            self.background_color = color;
        }
    }
}

/// Application configuration stored with confy. Session state is never written here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub example_asset_url: String,
    pub example_display_name: String,
    pub default_language: ExportLanguage,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            example_asset_url: EXAMPLE_ASSET_URL.to_string(),
            example_display_name: "Robot Example".to_string(),
            default_language: ExportLanguage::TypeScript,
        }
    }
}

impl ViewerConfig {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "viewer").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_defaults() {
        let settings = SceneSettings::default();
        assert!(settings.show_grid);
        assert!(settings.show_axes);
        assert_eq!(settings.background_color, "#1a1a1a");
    }

    #[test]
    fn partial_update_only_touches_given_fields() {
        let mut settings = SceneSettings::default();
        settings.apply(SceneSettingsUpdate {
            show_grid: Some(false),
            ..Default::default()
        });
        assert!(!settings.show_grid);
        assert!(settings.show_axes);
        assert_eq!(settings.background_color, DEFAULT_BACKGROUND_COLOR);

        settings.apply(SceneSettingsUpdate {
            background_color: Some("#ffffff".to_string()),
            ..Default::default()
        });
        assert!(!settings.show_grid);
        assert_eq!(settings.background_color, "#ffffff");
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "default_language": "javascript" }"#).unwrap();
        assert_eq!(config.default_language, ExportLanguage::JavaScript);
        assert_eq!(config.example_asset_url, EXAMPLE_ASSET_URL);
        assert_eq!(config.example_display_name, "Robot Example");
    }
}
