//! Standalone viewer window backed by winit.
//!
//! The window holds the fixed-size 3D viewport at its top-left corner. When
//! the `gui` feature is enabled, the wry sidebar panel fills the area to the
//! right of the viewport.
//!
//! ```no_run
//! # use pdbview::Viewer;
//! Viewer::builder()
//!     .with_structure("1AKE")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::ViewerError,
    input::KeyAction,
    options::Options,
    session::StyleControls,
    shell::{Shell, UiAction, TITLE},
    source::RcsbClient,
    InputEvent, MouseButton, ViewerEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    structure: Option<String>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            structure: None,
            options: None,
            title: TITLE.into(),
        }
    }

    /// Load a structure at startup: a path to a `.pdb` file or a PDB ID.
    #[must_use]
    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            structure: self.structure,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that loads and displays PDB structures.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    structure: Option<String>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`ViewerError::Viewer`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(self) -> Result<(), ViewerError> {
        #[cfg(all(feature = "gui", target_os = "linux"))]
        gtk::init().map_err(|e| ViewerError::Viewer(e.to_string()))?;

        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let controls = StyleControls::from_display(&self.options.display);
        let fetcher = RcsbClient::new(&self.options.network);
        let mut app = ViewerApp {
            window: None,
            engine: None,
            shell: Shell::new(fetcher, controls),
            startup: self.structure,
            options: self.options,
            title: self.title,
            fatal: None,
            #[cfg(feature = "gui")]
            panel: crate::gui::panel::PanelController::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;
        app.fatal.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    shell: Shell<RcsbClient>,
    startup: Option<String>,
    options: Options,
    title: String,
    /// Startup failure reported once the loop exits.
    fatal: Option<ViewerError>,
    #[cfg(feature = "gui")]
    panel: crate::gui::panel::PanelController,
}

/// Logical window size: the viewport plus the sidebar when present.
fn window_size(options: &Options) -> LogicalSize<u32> {
    #[cfg(feature = "gui")]
    let panel = crate::gui::webview::PANEL_WIDTH;
    #[cfg(not(feature = "gui"))]
    let panel = 0;
    LogicalSize::new(
        options.viewport.width + panel,
        options.viewport.height.max(MIN_WINDOW_HEIGHT),
    )
}

/// Tall enough for the sidebar controls and instructions.
const MIN_WINDOW_HEIGHT: u32 = 640;

/// Feed the startup argument through the same handlers as the panel: an
/// existing file path is uploaded, anything else is treated as an ID.
fn load_startup(
    shell: &mut Shell<RcsbClient>,
    engine: &mut ViewerEngine,
    input: &str,
) {
    let path = Path::new(input);
    if path.is_file() {
        shell.upload_file(path, engine);
    } else {
        shell.handle(UiAction::SubmitId(input.to_owned()), engine);
    }
    if let Some(error) = shell.session().error() {
        log::error!("{input}: {error}");
    }
}

impl ViewerApp {
    fn request_redraw(&self) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn handle_key(&mut self, key: &str) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        if engine.handle_key(key) == Some(KeyAction::TogglePanel) {
            #[cfg(feature = "gui")]
            if let Some(window) = &self.window {
                self.panel.toggle(window, engine.viewport().width);
            }
        }
    }

    /// Drain panel messages into the shell (gui feature only).
    #[cfg(feature = "gui")]
    fn apply_panel_messages(&mut self) {
        if let Some(engine) = &mut self.engine {
            self.panel.drain_and_apply(&mut self.shell, engine);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(window_size(&self.options));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.fatal = Some(ViewerError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let scale = window.scale_factor();
        let mut engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            scale,
            self.options.clone(),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                self.fatal = Some(e);
                event_loop.exit();
                return;
            }
        };

        if let Some(input) = self.startup.take() {
            load_startup(&mut self.shell, &mut engine, &input);
        }

        #[cfg(feature = "gui")]
        self.panel.init_webview(
            window.as_ref(),
            engine.viewport().width,
            &self.shell,
        );

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                    #[cfg(feature = "gui")]
                    if let Some(window) = &self.window {
                        self.panel.apply_layout(window, engine.viewport().width);
                    }
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.set_scale_factor(scale_factor);
                    #[cfg(feature = "gui")]
                    if let Some(window) = &self.window {
                        self.panel.apply_layout(window, engine.viewport().width);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                #[cfg(all(feature = "gui", target_os = "linux"))]
                while gtk::events_pending() {
                    let _ = gtk::main_iteration_do(false);
                }

                #[cfg(feature = "gui")]
                self.apply_panel_messages();

                if let Some(engine) = &mut self.engine {
                    match engine.render_frame() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                engine.resize(inner.width, inner.height);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                self.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    #[allow(clippy::cast_possible_truncation)]
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                self.request_redraw();
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.release_mouse_state();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::Scroll {
                        delta: scroll_delta,
                    });
                }
                self.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::ModifiersChanged {
                        shift: modifiers.state().shift_key(),
                    });
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.handle_key(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
