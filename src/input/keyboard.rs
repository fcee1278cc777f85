use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML files stay readable:
/// ```toml
/// [keybindings.bindings]
/// recenter_camera = "KeyQ"
/// toggle_panel = "Backslash"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Re-frame the camera on the loaded model.
    RecenterCamera,
    /// Show or hide the sidebar panel.
    TogglePanel,
}
