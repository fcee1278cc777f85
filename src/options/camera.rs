use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 10.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05))]
    pub rotate_speed: f32,
    /// Pan distance per pixel of drag, as a fraction of the view distance.
    #[schemars(title = "Pan Speed", range(min = 0.0001, max = 0.01))]
    pub pan_speed: f32,
    /// Fractional zoom per scroll step or per pixel of right drag
    /// (scaled by `drag_zoom_factor`).
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Scroll steps equivalent to one pixel of right-button drag.
    #[schemars(skip)]
    pub drag_zoom_factor: f32,
    /// Extra room around the model when framing it.
    #[schemars(title = "Fit Padding", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub fit_padding: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 30.0,
            rotate_speed: 0.01,
            pan_speed: 0.0015,
            zoom_speed: 0.1,
            drag_zoom_factor: 0.05,
            fit_padding: 1.15,
        }
    }
}
