//! Runtime options with TOML file support.
//!
//! Viewport size, camera behavior, initial display settings, network
//! policy and keybindings are consolidated here. Options serialize to and
//! from TOML; a file passed with `--options` may override any subset.

mod camera;
mod display;
mod keybindings;
mod network;
mod viewport;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::{DisplayOptions, GeometryOptions};
pub use keybindings::KeybindingOptions;
pub use network::NetworkOptions;
pub use viewport::ViewportOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[network]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Size and background of the 3D viewport.
    pub viewport: ViewportOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Initial sidebar selections and geometry detail.
    pub display: DisplayOptions,
    /// Download policy for identifier lookups.
    pub network: NetworkOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the options file.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;
    use crate::style::{ColorMode, HexColor, Style};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[display]
style = "stick"
color_mode = "custom"
custom_color = "#00FF00"

[network]
timeout_secs = 5.0
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.display.style, Style::Stick);
        assert_eq!(opts.display.color_mode, ColorMode::Custom);
        assert_eq!(opts.display.custom_color, HexColor::new(0, 255, 0));
        assert_eq!(opts.network.timeout_secs, 5.0);
        // Everything else should be default
        assert_eq!(opts.viewport.width, 800);
        assert_eq!(opts.viewport.height, 600);
        assert_eq!(
            opts.network.url_template,
            "https://files.rcsb.org/download/{ID}.pdb"
        );
    }

    #[test]
    fn invalid_values_are_parse_errors() {
        let err = Options::from_toml("[display]\nstyle = \"ribbon\"\n")
            .unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
        let err = Options::from_toml("[display]\ncustom_color = \"red\"\n")
            .unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
    }

    #[test]
    fn keybindings_survive_a_file_load() {
        let opts =
            Options::from_toml("[keybindings.bindings]\nrecenter_camera = \"KeyC\"\n")
                .unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyC"),
            Some(KeyAction::RecenterCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyQ"), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir().join("pdbview-options-test");
        let path = dir.join("options.toml");
        let mut opts = Options::default();
        opts.display.style = Style::Sphere;
        opts.viewport.background = HexColor::new(0, 0, 0);
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("viewport"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("network"));
        assert!(!props.contains_key("keybindings"));
    }
}
