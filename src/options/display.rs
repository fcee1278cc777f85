use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::style::{ColorMode, HexColor, Style};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Initial sidebar selections and geometry detail.
pub struct DisplayOptions {
    /// Style selected when the viewer opens.
    #[schemars(title = "Style")]
    pub style: Style,
    /// Color mode selected when the viewer opens.
    #[schemars(title = "Color Mode")]
    pub color_mode: ColorMode,
    /// Initial value of the custom color picker.
    #[schemars(title = "Custom Color", with = "String")]
    pub custom_color: HexColor,
    /// Primitive sizes and tessellation.
    pub geometry: GeometryOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Geometry detail options for the five styles.
pub struct GeometryOptions {
    /// Cartoon tube radius in angstroms.
    pub cartoon_radius: f32,
    /// Spline samples between consecutive trace atoms.
    pub cartoon_segments: u32,
    /// Stick cylinder and cap radius in angstroms.
    pub stick_radius: f32,
    /// Half-length of each cross arm in angstroms.
    pub cross_half_length: f32,
    /// Scale applied to van der Waals radii in sphere style.
    pub sphere_scale: f32,
    /// Icosphere subdivision level for atom spheres.
    #[schemars(range(min = 0, max = 4))]
    pub sphere_subdivisions: u32,
    /// Radial segments around tubes and cylinders.
    pub radial_segments: u32,
    /// Tolerance added to covalent radii when inferring bonds.
    pub bond_tolerance: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            cartoon_radius: 0.4,
            cartoon_segments: 6,
            stick_radius: 0.25,
            cross_half_length: 0.4,
            sphere_scale: 1.0,
            sphere_subdivisions: 2,
            radial_segments: 10,
            bond_tolerance: 0.45,
        }
    }
}
