//! Per-session state: the loaded structure, sidebar controls, the active
//! input tab and the last user-visible error.
//!
//! A [`Session`] is an explicit value owned by the
//! [`Shell`](crate::shell::Shell) and lent to each handler; nothing here is
//! global.

use serde::{Deserialize, Serialize};

use crate::options::DisplayOptions;
use crate::source::StructureText;
use crate::style::{ColorMode, HexColor, Style, StyleConfig};

/// The two independent ways of loading a structure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InputTab {
    /// Pick a local `.pdb` file.
    #[default]
    Upload,
    /// Type an identifier and fetch it from RCSB.
    EnterId,
}

impl InputTab {
    /// Both tabs, in display order.
    pub const ALL: [Self; 2] = [Self::Upload, Self::EnterId];

    /// Tab caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload PDB",
            Self::EnterId => "Enter PDB ID",
        }
    }
}

/// Sidebar control values.
///
/// The custom color is kept while the color mode is spectrum so switching
/// back to custom restores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleControls {
    /// Selected style.
    pub style: Style,
    /// Selected color mode.
    pub color_mode: ColorMode,
    /// Color picker value.
    pub custom_color: HexColor,
}

impl Default for StyleControls {
    fn default() -> Self {
        Self {
            style: Style::default(),
            color_mode: ColorMode::default(),
            custom_color: HexColor::RED,
        }
    }
}

impl StyleControls {
    /// Initial controls from the display options.
    #[must_use]
    pub fn from_display(display: &DisplayOptions) -> Self {
        Self {
            style: display.style,
            color_mode: display.color_mode,
            custom_color: display.custom_color,
        }
    }

    /// The color picker is only offered in custom mode.
    #[must_use]
    pub fn color_picker_visible(&self) -> bool {
        self.color_mode == ColorMode::Custom
    }

    /// What the renderer receives, read at render time.
    #[must_use]
    pub fn to_config(&self) -> StyleConfig {
        StyleConfig::new(self.style, self.color_mode, self.custom_color)
    }
}

/// Everything one viewer session remembers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    structure: Option<StructureText>,
    /// Sidebar control values.
    pub controls: StyleControls,
    /// Which input tab is showing.
    pub active_tab: InputTab,
    error: Option<String>,
}

impl Session {
    /// Empty session with the given controls.
    #[must_use]
    pub fn new(controls: StyleControls) -> Self {
        Self {
            controls,
            ..Self::default()
        }
    }

    /// The last loaded structure, if any.
    #[must_use]
    pub fn structure(&self) -> Option<&StructureText> {
        self.structure.as_ref()
    }

    /// Whether a structure has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.structure.is_some()
    }

    /// Replace the loaded structure. The last write wins; there is no way to
    /// unload.
    pub fn set_structure(&mut self, text: StructureText) {
        self.structure = Some(text);
    }

    /// The message shown inline, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show `message` inline.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Hide the inline message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = Session::new(StyleControls::default());
        assert!(!session.is_loaded());
        assert_eq!(session.structure(), None);
        assert_eq!(session.error(), None);
        assert_eq!(session.active_tab, InputTab::Upload);
        assert_eq!(session.controls.custom_color, HexColor::RED);
    }

    #[test]
    fn structure_is_overwritten_not_appended() {
        let mut session = Session::default();
        session.set_structure(StructureText::new("first"));
        session.set_structure(StructureText::new("second"));
        assert_eq!(session.structure().map(StructureText::as_str), Some("second"));
    }

    #[test]
    fn picker_only_in_custom_mode() {
        let mut controls = StyleControls::default();
        assert!(!controls.color_picker_visible());
        controls.color_mode = ColorMode::Custom;
        assert!(controls.color_picker_visible());
    }

    #[test]
    fn controls_follow_display_options() {
        let display = DisplayOptions {
            style: Style::Stick,
            color_mode: ColorMode::Custom,
            custom_color: HexColor::new(0, 0, 255),
            ..DisplayOptions::default()
        };
        let controls = StyleControls::from_display(&display);
        assert_eq!(controls.style, Style::Stick);
        assert_eq!(
            controls.to_config(),
            StyleConfig::new(Style::Stick, ColorMode::Custom, HexColor::new(0, 0, 255))
        );
    }

    #[test]
    fn tabs_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&InputTab::EnterId).unwrap(), "\"enter_id\"");
        assert_eq!(InputTab::ALL.map(InputTab::label), ["Upload PDB", "Enter PDB ID"]);
    }
}
