use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::HexColor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewport", inline)]
#[serde(default)]
/// The fixed-size area the structure is drawn into.
pub struct ViewportOptions {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Clear color behind the model.
    #[schemars(with = "String")]
    pub background: HexColor,
}

impl ViewportOptions {
    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: HexColor::new(0xFF, 0xFF, 0xFF),
        }
    }
}
