//! Scene building and the render seam.
//!
//! The [`Renderer`] trait is what the shell calls after every state change.
//! [`ViewerEngine`](crate::engine::ViewerEngine) implements it on the GPU;
//! everything in this module below the trait is CPU-only geometry.

pub(crate) mod cartoon;
pub mod mesh;
pub mod scene;
pub mod spectrum;

use std::fmt;

use crate::source::StructureText;
use crate::structure::StructureError;
use crate::style::StyleConfig;

/// Something that can draw structure text in a given style.
pub trait Renderer {
    /// Replace whatever is displayed with `structure` drawn per `config`.
    ///
    /// # Errors
    ///
    /// [`RenderError`] when the text cannot be turned into a scene. The
    /// previously displayed scene must be left untouched in that case.
    fn render(
        &mut self,
        structure: &StructureText,
        config: &StyleConfig,
    ) -> Result<(), RenderError>;
}

/// Errors building a scene from structure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The text is not a drawable structure.
    Structure(StructureError),
    /// The scene needs a GPU buffer larger than the device allows.
    TooLarge {
        /// Bytes the largest buffer would need.
        bytes: u64,
        /// Device buffer size limit.
        limit: u64,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(e) => write!(f, "cannot render structure: {e}"),
            Self::TooLarge { bytes, limit } => write!(
                f,
                "structure is too large to draw in this style \
                 ({bytes} bytes needed, device limit is {limit})"
            ),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Structure(e) => Some(e),
            Self::TooLarge { .. } => None,
        }
    }
}

impl From<StructureError> for RenderError {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}
