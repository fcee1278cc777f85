//! Input handling methods for ViewerEngine

use super::{ViewCommand, ViewerEngine};
use crate::input::{InputEvent, KeyAction};

impl ViewerEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Presses outside the viewport are ignored so drags that start over
    /// the background margin never move the camera.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::MouseButton { pressed: true, .. } = event {
            let inside = self
                .input
                .mouse_pos()
                .is_some_and(|(x, y)| self.viewport.contains(x, y));
            if !inside {
                return;
            }
        }
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Resolve a physical key string (e.g. `"KeyQ"`) through the
    /// keybindings. Camera actions run immediately; the rest are returned
    /// to the caller.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.options.keybindings.lookup(key)?;
        match action {
            KeyAction::RecenterCamera => {
                self.execute(ViewCommand::RecenterCamera);
                None
            }
            KeyAction::TogglePanel => Some(action),
        }
    }

    /// Execute a camera command.
    pub fn execute(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::RecenterCamera => self.camera_controller.recenter(),
            ViewCommand::RotateCamera { delta } => {
                self.camera_controller.rotate(delta);
            }
            ViewCommand::PanCamera { delta } => {
                self.camera_controller.pan(delta);
            }
            ViewCommand::Zoom { delta } => self.camera_controller.zoom(delta),
        }
    }

    /// Release held mouse buttons, e.g. when the cursor leaves the window.
    pub fn release_mouse_state(&mut self) {
        self.input.release_all();
    }
}
