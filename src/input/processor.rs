//! Converts raw platform events into camera commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, modifier keys). Gesture mapping:
//!
//! | Gesture                    | Command        |
//! |----------------------------|----------------|
//! | left drag                  | rotate         |
//! | shift + left drag          | translate      |
//! | middle drag                | translate      |
//! | right drag (vertical)      | zoom           |
//! | scroll wheel               | zoom           |

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::ViewCommand;

/// Default scroll-step equivalent of one pixel of right-button drag.
const DEFAULT_DRAG_ZOOM_FACTOR: f32 = 0.05;

/// Converts raw window events into [`ViewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last cursor position in physical pixels, once known.
    mouse_pos: Option<Vec2>,
    left: bool,
    right: bool,
    middle: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Scroll steps per pixel of vertical right-button drag.
    drag_zoom_factor: f32,
}

impl InputProcessor {
    /// Create a new processor with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mouse_pos: None,
            left: false,
            right: false,
            middle: false,
            shift_pressed: false,
            drag_zoom_factor: DEFAULT_DRAG_ZOOM_FACTOR,
        }
    }

    /// Override how strongly right-button drags zoom.
    #[must_use]
    pub fn with_drag_zoom_factor(mut self, factor: f32) -> Self {
        self.drag_zoom_factor = factor;
        self
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.mouse_pos.map(|p| (p.x, p.y))
    }

    /// Whether any mouse button is held.
    #[must_use]
    pub fn any_button_pressed(&self) -> bool {
        self.left || self.right || self.middle
    }

    /// Release every button, e.g. when the cursor leaves the window.
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.middle = false;
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left = pressed,
                    MouseButton::Right => self.right = pressed,
                    MouseButton::Middle => self.middle = pressed,
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(ViewCommand::Zoom { delta })
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved: compute the delta and maybe a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewCommand> {
        let pos = Vec2::new(x, y);
        let previous = self.mouse_pos.replace(pos)?;
        let delta = pos - previous;
        if delta == Vec2::ZERO {
            return None;
        }

        if self.middle || (self.left && self.shift_pressed) {
            return Some(ViewCommand::PanCamera { delta });
        }
        if self.left {
            return Some(ViewCommand::RotateCamera { delta });
        }
        if self.right {
            // Dragging up zooms in.
            return Some(ViewCommand::Zoom {
                delta: -delta.y * self.drag_zoom_factor,
            });
        }
        None
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputProcessor, button: MouseButton) {
        assert_eq!(
            input.handle_event(InputEvent::MouseButton {
                button,
                pressed: true
            }),
            None
        );
    }

    fn move_to(input: &mut InputProcessor, x: f32, y: f32) -> Option<ViewCommand> {
        input.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn hover_without_buttons_does_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(move_to(&mut input, 10.0, 10.0), None);
        assert_eq!(move_to(&mut input, 20.0, 15.0), None);
        assert_eq!(input.mouse_pos(), Some((20.0, 15.0)));
    }

    #[test]
    fn left_drag_rotates() {
        let mut input = InputProcessor::new();
        let _ = move_to(&mut input, 10.0, 10.0);
        press(&mut input, MouseButton::Left);
        assert_eq!(
            move_to(&mut input, 13.0, 6.0),
            Some(ViewCommand::RotateCamera {
                delta: Vec2::new(3.0, -4.0)
            })
        );
    }

    #[test]
    fn middle_and_shift_left_drag_pan() {
        let mut input = InputProcessor::new();
        let _ = move_to(&mut input, 0.0, 0.0);
        press(&mut input, MouseButton::Middle);
        assert_eq!(
            move_to(&mut input, 5.0, 0.0),
            Some(ViewCommand::PanCamera {
                delta: Vec2::new(5.0, 0.0)
            })
        );

        let mut input = InputProcessor::new();
        let _ = move_to(&mut input, 0.0, 0.0);
        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: true });
        press(&mut input, MouseButton::Left);
        assert!(matches!(
            move_to(&mut input, 0.0, 2.0),
            Some(ViewCommand::PanCamera { .. })
        ));
    }

    #[test]
    fn right_drag_up_zooms_in() {
        let mut input = InputProcessor::new().with_drag_zoom_factor(0.5);
        let _ = move_to(&mut input, 0.0, 100.0);
        press(&mut input, MouseButton::Right);
        assert_eq!(
            move_to(&mut input, 0.0, 90.0),
            Some(ViewCommand::Zoom { delta: 5.0 })
        );
    }

    #[test]
    fn scroll_zooms_and_release_stops_drag() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(ViewCommand::Zoom { delta: 1.5 })
        );
        assert_eq!(input.handle_event(InputEvent::Scroll { delta: 0.0 }), None);

        let _ = move_to(&mut input, 0.0, 0.0);
        press(&mut input, MouseButton::Left);
        assert!(input.any_button_pressed());
        input.release_all();
        assert!(!input.any_button_pressed());
        assert_eq!(move_to(&mut input, 4.0, 4.0), None);
    }
}
