//! The UI shell: one handler per control, all funnelling into the render
//! step.
//!
//! [`Shell::handle`] applies a [`UiAction`] to the [`Session`] and, when the
//! action changes render-relevant state and a structure is loaded, calls the
//! [`Renderer`] with the current text and a freshly derived
//! [`StyleConfig`](crate::style::StyleConfig). The shell never touches the
//! network or GPU directly; both arrive through trait seams so the whole
//! state machine is testable in memory.

use std::path::Path;

use serde::Serialize;

use crate::render::Renderer;
use crate::session::{InputTab, Session, StyleControls};
use crate::source::{Fetcher, PdbId, SourceError, Upload};
use crate::style::{ColorMode, HexColor, Style};

/// Window title.
pub const TITLE: &str = "🧬 Simple PDB Viewer";

/// Shown when an identifier cannot be fetched.
pub const FETCH_ERROR: &str =
    "Unable to fetch PDB structure. Please check the ID.";

/// Shown when an uploaded file cannot be used.
pub const UPLOAD_ERROR: &str =
    "Unable to read the uploaded file. Please choose a .pdb text file.";

/// Prefix of the message shown when loaded text cannot be drawn.
pub const RENDER_ERROR: &str = "Unable to display PDB structure";

/// Static help text shown under the viewer (Markdown).
pub const INSTRUCTIONS: &str = "## Instructions
1. Upload a PDB file or enter a PDB ID
2. The structure will be displayed automatically
3. Use mouse/touch to interact:
   - Left click/one finger: rotate
   - Right click/pinch: zoom
   - Middle click/two fingers: translate
";

/// A user interaction with one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// A file was chosen in the upload tab.
    Upload(Upload),
    /// Text was submitted in the identifier tab.
    SubmitId(String),
    /// An input tab was selected.
    SelectTab(InputTab),
    /// The style selector changed.
    SelectStyle(Style),
    /// The color-mode radio changed.
    SelectColorMode(ColorMode),
    /// The color picker changed.
    PickColor(HexColor),
}

/// Owns the session and dispatches control handlers.
#[derive(Debug)]
pub struct Shell<F: Fetcher> {
    session: Session,
    fetcher: F,
}

impl<F: Fetcher> Shell<F> {
    /// Empty session with the given initial controls.
    pub fn new(fetcher: F, controls: StyleControls) -> Self {
        Self {
            session: Session::new(controls),
            fetcher,
        }
    }

    /// Current session state.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Apply one action, re-rendering if it changed what is drawn.
    pub fn handle(&mut self, action: UiAction, renderer: &mut dyn Renderer) {
        match action {
            UiAction::Upload(upload) => self.load_upload(&upload, renderer),
            UiAction::SubmitId(input) => self.load_id(&input, renderer),
            UiAction::SelectTab(tab) => self.session.active_tab = tab,
            UiAction::SelectStyle(style) => {
                self.session.controls.style = style;
                self.rerender(renderer);
            }
            UiAction::SelectColorMode(mode) => {
                self.session.controls.color_mode = mode;
                self.rerender(renderer);
            }
            UiAction::PickColor(color) => {
                self.session.controls.custom_color = color;
                self.rerender(renderer);
            }
        }
    }

    /// Report an upload that failed before reaching the shell (bad
    /// extension, unreadable file).
    pub fn reject_upload(&mut self, err: &SourceError) {
        log::warn!("Upload rejected: {err}");
        self.session.set_error(UPLOAD_ERROR);
    }

    /// Read a local `.pdb` file and load it as an upload.
    pub fn upload_file(&mut self, path: &Path, renderer: &mut dyn Renderer) {
        match Upload::from_path(path) {
            Ok(upload) => self.load_upload(&upload, renderer),
            Err(e) => self.reject_upload(&e),
        }
    }

    /// Snapshot for the sidebar.
    pub fn panel_state(&self) -> PanelState {
        PanelState::from_session(&self.session)
    }

    fn load_upload(&mut self, upload: &Upload, renderer: &mut dyn Renderer) {
        match upload.decode() {
            Ok(text) => {
                log::info!(
                    "Loaded {} ({} bytes) from upload",
                    upload.name,
                    text.len()
                );
                self.session.set_structure(text);
                self.rerender(renderer);
            }
            Err(e) => self.reject_upload(&e),
        }
    }

    fn load_id(&mut self, input: &str, renderer: &mut dyn Renderer) {
        let id = match PdbId::parse(input) {
            Ok(Some(id)) => id,
            Ok(None) => return,
            Err(e) => {
                log::warn!("{e}");
                self.session.set_error(FETCH_ERROR);
                return;
            }
        };
        match self.fetcher.fetch(&id) {
            Ok(text) => {
                log::info!("Fetched {id} ({} bytes)", text.len());
                self.session.set_structure(text);
                self.rerender(renderer);
            }
            Err(e) => {
                log::warn!("Fetch of {id} failed: {e}");
                self.session.set_error(FETCH_ERROR);
            }
        }
    }

    /// Draw the loaded structure with the current controls. A no-op while
    /// nothing is loaded.
    fn rerender(&mut self, renderer: &mut dyn Renderer) {
        let Some(text) = self.session.structure() else {
            return;
        };
        let config = self.session.controls.to_config();
        match renderer.render(text, &config) {
            Ok(()) => self.session.clear_error(),
            Err(e) => {
                log::warn!("Render failed: {e}");
                self.session.set_error(format!("{RENDER_ERROR}: {e}"));
            }
        }
    }
}

/// A selectable value and its caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice<T> {
    /// Serialized value sent back with the action.
    pub value: T,
    /// Caption shown in the panel.
    pub label: &'static str,
}

/// Full sidebar state pushed to the panel after every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelState {
    /// Window title.
    pub title: &'static str,
    /// Current control values.
    pub controls: StyleControls,
    /// Which input tab is showing.
    pub active_tab: InputTab,
    /// Inline error, if any.
    pub error: Option<String>,
    /// Whether a structure is loaded.
    pub loaded: bool,
    /// Whether the color picker is shown.
    pub show_color_picker: bool,
    /// Style selector entries.
    pub styles: Vec<Choice<Style>>,
    /// Color-mode radio entries.
    pub color_modes: Vec<Choice<ColorMode>>,
    /// Input tabs.
    pub tabs: Vec<Choice<InputTab>>,
    /// Help text (Markdown).
    pub instructions: &'static str,
}

impl PanelState {
    /// Snapshot `session`.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            title: TITLE,
            controls: session.controls,
            active_tab: session.active_tab,
            error: session.error().map(str::to_owned),
            loaded: session.is_loaded(),
            show_color_picker: session.controls.color_picker_visible(),
            styles: Style::ALL
                .map(|value| Choice {
                    value,
                    label: value.keyword(),
                })
                .to_vec(),
            color_modes: ColorMode::ALL
                .map(|value| Choice {
                    value,
                    label: value.label(),
                })
                .to_vec(),
            tabs: InputTab::ALL
                .map(|value| Choice {
                    value,
                    label: value.label(),
                })
                .to_vec(),
            instructions: INSTRUCTIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::render::RenderError;
    use crate::source::StructureText;
    use crate::structure::StructureError;
    use crate::style::{ColorScheme, StyleConfig};

    const MINIMAL: &str = "ATOM      1  CA  ALA A   1      11.104   6.134  -6.504  1.00  0.00           C\nEND\n";

    /// Serves a fixed set of identifiers; everything else is unavailable.
    #[derive(Default)]
    struct MemoryFetcher {
        entries: HashMap<String, String>,
        calls: std::cell::Cell<usize>,
    }

    impl MemoryFetcher {
        fn with(id: &str, text: &str) -> Self {
            let mut fetcher = Self::default();
            let _ = fetcher.entries.insert(id.to_owned(), text.to_owned());
            fetcher
        }
    }

    impl Fetcher for MemoryFetcher {
        fn fetch(&self, id: &PdbId) -> Result<StructureText, SourceError> {
            self.calls.set(self.calls.get() + 1);
            self.entries
                .get(id.as_str())
                .map(StructureText::new)
                .ok_or_else(|| SourceError::Unavailable {
                    id: id.to_string(),
                })
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<(String, StyleConfig)>,
        fail: bool,
    }

    impl Renderer for RecordingRenderer {
        fn render(
            &mut self,
            structure: &StructureText,
            config: &StyleConfig,
        ) -> Result<(), RenderError> {
            self.calls.push((structure.as_str().to_owned(), *config));
            if self.fail {
                return Err(RenderError::Structure(StructureError::NoAtoms));
            }
            Ok(())
        }
    }

    fn shell(fetcher: MemoryFetcher) -> Shell<MemoryFetcher> {
        Shell::new(fetcher, StyleControls::default())
    }

    fn upload(text: &str) -> UiAction {
        UiAction::Upload(Upload::new("mini.pdb", text.as_bytes().to_vec()).unwrap())
    }

    #[test]
    fn fetch_of_existing_id_loads_and_renders() {
        let mut shell = shell(MemoryFetcher::with("1AKE", MINIMAL));
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId(" 1AKE ".into()), &mut renderer);

        let text = shell.session().structure().unwrap();
        assert!(!text.is_empty());
        assert_eq!(renderer.calls.len(), 1);
        assert_eq!(renderer.calls[0].0, MINIMAL);
        assert_eq!(shell.session().error(), None);
    }

    #[test]
    fn failed_fetch_shows_error_and_keeps_structure() {
        let mut shell = shell(MemoryFetcher::with("1AKE", MINIMAL));
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId("1AKE".into()), &mut renderer);
        shell.handle(UiAction::SubmitId("ZZZZ".into()), &mut renderer);

        assert_eq!(shell.session().error(), Some(FETCH_ERROR));
        assert_eq!(
            shell.session().structure().map(StructureText::as_str),
            Some(MINIMAL)
        );
        assert_eq!(renderer.calls.len(), 1);
    }

    #[test]
    fn failed_fetch_on_empty_session_stays_empty() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId("ZZZZ".into()), &mut renderer);

        assert!(!shell.session().is_loaded());
        assert_eq!(shell.session().error(), Some(FETCH_ERROR));
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn blank_id_is_ignored() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId("   ".into()), &mut renderer);

        assert_eq!(shell.fetcher.calls.get(), 0);
        assert_eq!(shell.session().error(), None);
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn invalid_id_never_reaches_the_fetcher() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId("../etc/passwd".into()), &mut renderer);

        assert_eq!(shell.fetcher.calls.get(), 0);
        assert_eq!(shell.session().error(), Some(FETCH_ERROR));
    }

    #[test]
    fn renderer_receives_every_style_and_mode() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(upload(MINIMAL), &mut renderer);

        let custom = HexColor::new(0x12, 0x34, 0x56);
        shell.handle(UiAction::PickColor(custom), &mut renderer);
        for style in Style::ALL {
            for mode in ColorMode::ALL {
                shell.handle(UiAction::SelectStyle(style), &mut renderer);
                shell.handle(UiAction::SelectColorMode(mode), &mut renderer);
                let (_, config) = renderer.calls.last().unwrap();
                assert_eq!(*config, StyleConfig::new(style, mode, custom));
            }
        }
    }

    #[test]
    fn upload_after_fetch_overwrites() {
        let mut shell = shell(MemoryFetcher::with("1AKE", "fetched\n"));
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SubmitId("1AKE".into()), &mut renderer);
        shell.handle(upload(MINIMAL), &mut renderer);

        assert_eq!(
            shell.session().structure().map(StructureText::as_str),
            Some(MINIMAL)
        );
        assert_eq!(renderer.calls.last().unwrap().0, MINIMAL);
    }

    #[test]
    fn default_mode_hides_picker_and_custom_color() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(upload(MINIMAL), &mut renderer);
        shell.handle(UiAction::PickColor(HexColor::new(0, 0, 255)), &mut renderer);

        assert!(!shell.panel_state().show_color_picker);
        let (_, config) = renderer.calls.last().unwrap();
        assert_eq!(config.color, ColorScheme::Spectrum);

        shell.handle(UiAction::SelectColorMode(ColorMode::Custom), &mut renderer);
        assert!(shell.panel_state().show_color_picker);
        let (_, config) = renderer.calls.last().unwrap();
        assert_eq!(config.color, ColorScheme::Uniform(HexColor::new(0, 0, 255)));
    }

    #[test]
    fn upload_end_to_end_renders_cartoon_spectrum() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(upload(MINIMAL), &mut renderer);

        assert_eq!(
            shell.session().structure().map(StructureText::as_str),
            Some(MINIMAL)
        );
        assert_eq!(renderer.calls.len(), 1);
        let (text, config) = &renderer.calls[0];
        assert_eq!(text, MINIMAL);
        assert_eq!(config.style, Style::Cartoon);
        assert_eq!(config.color, ColorScheme::Spectrum);
    }

    #[test]
    fn controls_change_while_empty_does_not_render() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(UiAction::SelectStyle(Style::Sphere), &mut renderer);
        shell.handle(UiAction::SelectColorMode(ColorMode::Custom), &mut renderer);

        assert!(renderer.calls.is_empty());
        assert_eq!(shell.session().controls.style, Style::Sphere);

        shell.handle(upload(MINIMAL), &mut renderer);
        assert_eq!(
            renderer.calls[0].1,
            StyleConfig::new(Style::Sphere, ColorMode::Custom, HexColor::RED)
        );
    }

    #[test]
    fn tab_switch_keeps_structure_and_skips_render() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.handle(upload(MINIMAL), &mut renderer);
        shell.handle(UiAction::SelectTab(InputTab::EnterId), &mut renderer);

        assert_eq!(shell.session().active_tab, InputTab::EnterId);
        assert!(shell.session().is_loaded());
        assert_eq!(renderer.calls.len(), 1);
    }

    #[test]
    fn undecodable_upload_is_rejected() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        let bad = Upload::new("bad.pdb", vec![0xFF, 0xFE]).unwrap();
        shell.handle(UiAction::Upload(bad), &mut renderer);

        assert!(!shell.session().is_loaded());
        assert_eq!(shell.session().error(), Some(UPLOAD_ERROR));
    }

    #[test]
    fn render_failure_keeps_text_and_success_clears_error() {
        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer {
            fail: true,
            ..RecordingRenderer::default()
        };
        shell.handle(upload("garbage\n"), &mut renderer);
        assert!(shell.session().is_loaded());
        assert!(shell
            .session()
            .error()
            .is_some_and(|e| e.starts_with(RENDER_ERROR)));

        renderer.fail = false;
        shell.handle(UiAction::SelectStyle(Style::Line), &mut renderer);
        assert_eq!(shell.session().error(), None);
    }

    #[test]
    fn upload_file_checks_extension() {
        let dir = std::env::temp_dir().join("pdbview-shell-test");
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("mini.pdb");
        let bad = dir.join("mini.cif");
        std::fs::write(&good, MINIMAL).unwrap();
        std::fs::write(&bad, MINIMAL).unwrap();

        let mut shell = shell(MemoryFetcher::default());
        let mut renderer = RecordingRenderer::default();
        shell.upload_file(&bad, &mut renderer);
        assert!(!shell.session().is_loaded());
        assert_eq!(shell.session().error(), Some(UPLOAD_ERROR));

        shell.upload_file(&good, &mut renderer);
        assert_eq!(
            shell.session().structure().map(StructureText::as_str),
            Some(MINIMAL)
        );
        assert_eq!(shell.session().error(), None);
    }

    #[test]
    fn panel_state_serializes_choices() {
        let shell = shell(MemoryFetcher::default());
        let json = serde_json::to_value(shell.panel_state()).unwrap();

        assert_eq!(json["controls"]["style"], "cartoon");
        assert_eq!(json["controls"]["custom_color"], "#FF0000");
        assert_eq!(json["active_tab"], "upload");
        assert_eq!(json["loaded"], false);
        assert_eq!(json["styles"].as_array().unwrap().len(), 5);
        assert_eq!(json["color_modes"][0]["label"], "Default (Spectrum)");
        assert_eq!(json["tabs"][1]["value"], "enter_id");
        assert!(json["instructions"]
            .as_str()
            .unwrap()
            .contains("Middle click/two fingers: translate"));
    }
}
