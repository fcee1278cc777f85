//! The engine's interactive vocabulary.
//!
//! Every camera operation, whether triggered by a key press, a mouse
//! gesture or a programmatic call, is a [`ViewCommand`] passed to
//! [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

/// A discrete or parameterized camera operation.
///
/// ```ignore
/// engine.execute(ViewCommand::RecenterCamera);
/// engine.execute(ViewCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Frame the loaded model again (zoom-to-fit).
    RecenterCamera,

    /// Rotate the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}
