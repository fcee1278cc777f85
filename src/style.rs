//! Style configuration: the rendering style, the color mode and the custom
//! color the sidebar exposes, and the [`StyleConfig`] handed to a renderer.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rendering style applied to the whole model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Smooth tube through the backbone trace.
    #[default]
    Cartoon,
    /// Thin lines along bonds.
    Line,
    /// A small three-axis cross on every atom.
    Cross,
    /// Cylinders along bonds with rounded atom caps.
    Stick,
    /// Van der Waals spheres.
    Sphere,
}

impl Style {
    /// Every style, in selector order.
    pub const ALL: [Self; 5] = [
        Self::Cartoon,
        Self::Line,
        Self::Cross,
        Self::Stick,
        Self::Sphere,
    ];

    /// The lowercase keyword shown in the selector.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Cartoon => "cartoon",
            Self::Line => "line",
            Self::Cross => "cross",
            Self::Stick => "stick",
            Self::Sphere => "sphere",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Returned when a string names no known [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style '{}'", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.keyword().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStyle(s.to_owned()))
    }
}

/// How atoms are colored.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Rainbow gradient along residue order.
    #[default]
    Spectrum,
    /// One flat color picked by the user.
    Custom,
}

impl ColorMode {
    /// Both modes, in radio-button order.
    pub const ALL: [Self; 2] = [Self::Spectrum, Self::Custom];

    /// Label shown next to the radio button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spectrum => "Default (Spectrum)",
            Self::Custom => "Custom",
        }
    }
}

/// A 24-bit RGB color written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HexColor {
    /// Pure red, the color picker's initial value.
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);

    /// Color from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or the short form `#RGB`. The leading `#` is
    /// optional and hex digits are case-insensitive.
    pub fn parse(text: &str) -> Result<Self, InvalidColor> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidColor(text.to_owned()));
        }
        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| InvalidColor(text.to_owned()))
        };
        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(InvalidColor(text.to_owned())),
        }
    }

    /// Channels as sRGB floats in `[0, 1]`.
    #[must_use]
    pub fn to_srgb(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Channels converted to linear light for shading.
    #[must_use]
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Returned when a string is not a hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl fmt::Display for InvalidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a #RRGGBB color", self.0)
    }
}

impl std::error::Error for InvalidColor {}

/// Standard sRGB transfer function inverse.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Color rule the renderer applies to every atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Rainbow gradient along residue order.
    Spectrum,
    /// Flat color.
    Uniform(HexColor),
}

/// Everything a renderer needs besides the structure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleConfig {
    /// Geometry style.
    pub style: Style,
    /// Color rule.
    pub color: ColorScheme,
}

impl StyleConfig {
    /// Combine a style with a color mode. The custom color only reaches the
    /// config in [`ColorMode::Custom`].
    #[must_use]
    pub fn new(style: Style, mode: ColorMode, custom: HexColor) -> Self {
        let color = match mode {
            ColorMode::Spectrum => ColorScheme::Spectrum,
            ColorMode::Custom => ColorScheme::Uniform(custom),
        };
        Self { style, color }
    }

    /// The color mode this config was derived from.
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        match self.color {
            ColorScheme::Spectrum => ColorMode::Spectrum,
            ColorScheme::Uniform(_) => ColorMode::Custom,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(Style::default(), ColorMode::default(), HexColor::RED)
    }
}
