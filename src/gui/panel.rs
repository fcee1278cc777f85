//! Sidebar panel controller: owns the wry webview and forwards its
//! messages to the shell.

use std::path::PathBuf;
use std::sync::mpsc;

use winit::window::Window;

use super::webview::{self, PanelMessage};
use crate::render::Renderer;
use crate::shell::Shell;
use crate::source::{Fetcher, Upload};

/// Owns the webview panel and its layout state.
pub(crate) struct PanelController {
    webview: Option<wry::WebView>,
    message_rx: Option<mpsc::Receiver<PanelMessage>>,
    /// Whether the panel is shown.
    visible: bool,
}

impl PanelController {
    /// Create a controller with no webview yet.
    pub(crate) const fn new() -> Self {
        Self {
            webview: None,
            message_rx: None,
            visible: true,
        }
    }

    /// Create the wry webview right of `panel_x` and push the initial state.
    pub(crate) fn init_webview<F: Fetcher>(
        &mut self,
        window: &Window,
        panel_x: u32,
        shell: &Shell<F>,
    ) {
        let bounds = self.bounds(window, panel_x);
        match webview::create_webview(window, bounds) {
            Ok((wv, rx)) => {
                webview::push_state(&wv, &shell.panel_state());
                self.webview = Some(wv);
                self.message_rx = Some(rx);
            }
            Err(e) => {
                log::error!("Failed to create webview: {e}");
            }
        }
    }

    /// Show or hide the panel.
    pub(crate) fn toggle(&mut self, window: &Window, panel_x: u32) {
        self.visible = !self.visible;
        self.apply_layout(window, panel_x);
    }

    /// Position the webview right of the viewport, or park it off-screen
    /// when hidden.
    pub(crate) fn apply_layout(&self, window: &Window, panel_x: u32) {
        if let Some(ref wv) = self.webview {
            let _ = wv.set_bounds(self.bounds(window, panel_x));
        }
    }

    /// Drain webview messages, apply them to the shell, and push the new
    /// state back if anything arrived.
    pub(crate) fn drain_and_apply<F: Fetcher>(
        &mut self,
        shell: &mut Shell<F>,
        renderer: &mut dyn Renderer,
    ) {
        let Some(ref rx) = self.message_rx else {
            return;
        };

        let mut changed = false;
        while let Ok(message) = rx.try_recv() {
            changed = true;
            match message {
                PanelMessage::OpenFile => {
                    if let Some(path) = pick_pdb_file() {
                        shell.upload_file(&path, renderer);
                    }
                }
                PanelMessage::Action(action) => shell.handle(action, renderer),
            }
        }

        if changed {
            self.push_state(shell);
        }
    }

    /// Push the shell's panel state to the webview.
    pub(crate) fn push_state<F: Fetcher>(&self, shell: &Shell<F>) {
        if let Some(ref wv) = self.webview {
            webview::push_state(wv, &shell.panel_state());
        }
    }

    fn bounds(&self, window: &Window, panel_x: u32) -> wry::Rect {
        let inner = window.inner_size();
        let width = inner.width.saturating_sub(panel_x);
        if self.visible {
            webview::panel_bounds(panel_x, width, inner.height)
        } else {
            webview::panel_bounds(inner.width, width, inner.height)
        }
    }
}

/// Native open dialog restricted to `.pdb` files.
fn pick_pdb_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Upload a PDB file")
        .add_filter("PDB", &[Upload::EXTENSION])
        .pick_file()
}
