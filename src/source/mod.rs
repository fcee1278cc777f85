//! Structure sources: local uploads and the RCSB download service.
//!
//! Both paths yield a [`StructureText`], the raw PDB text passed unchanged
//! to the renderer. Nothing here looks inside the text.

mod rcsb;
mod upload;

use std::fmt;

pub use rcsb::{structure_url, RcsbClient, DEFAULT_URL_TEMPLATE};
pub use upload::{load_from_upload, Upload};

/// Raw structure text in PDB format. Opaque to the source layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureText(String);

impl StructureText {
    /// Wrap already-decoded text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text itself.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for StructureText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A structure identifier as typed by the user, trimmed and checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PdbId(String);

impl PdbId {
    /// Longest accepted identifier (covers extended `pdb_0000xxxx` ids).
    pub const MAX_LEN: usize = 16;

    /// Parse user input.
    ///
    /// Returns `Ok(None)` when the input is blank, since an empty text
    /// field means nothing was entered. Otherwise the trimmed text must be
    /// ASCII letters, digits or `_`. Case is preserved.
    pub fn parse(input: &str) -> Result<Option<Self>, SourceError> {
        let id = input.trim();
        if id.is_empty() {
            return Ok(None);
        }
        let valid = id.len() <= Self::MAX_LEN
            && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !valid {
            return Err(SourceError::InvalidIdentifier(id.to_owned()));
        }
        Ok(Some(Self(id.to_owned())))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fetches structure text by identifier.
pub trait Fetcher {
    /// Fetch the structure for `id`.
    ///
    /// # Errors
    ///
    /// Every failure (non-200 status, transport error, timeout, unreadable
    /// body) is reported as [`SourceError::Unavailable`].
    fn fetch(&self, id: &PdbId) -> Result<StructureText, SourceError>;
}

/// Errors from the structure sources.
#[derive(Debug)]
pub enum SourceError {
    /// Identifier text contains characters outside `[A-Za-z0-9_]` or is
    /// too long.
    InvalidIdentifier(String),
    /// The structure could not be fetched: not found or service
    /// unavailable.
    Unavailable {
        /// Identifier that was requested.
        id: String,
    },
    /// Upload is not a `.pdb` file.
    UnsupportedFile(String),
    /// Upload bytes are not valid UTF-8.
    Decode(std::str::Utf8Error),
    /// Reading the upload from disk failed.
    Io(std::io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier(id) => {
                write!(f, "'{id}' is not a valid structure identifier")
            }
            Self::Unavailable { id } => {
                write!(f, "structure {id} not found or unavailable")
            }
            Self::UnsupportedFile(name) => {
                write!(f, "'{name}' is not a .pdb file")
            }
            Self::Decode(e) => write!(f, "upload is not UTF-8 text: {e}"),
            Self::Io(e) => write!(f, "failed to read upload: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidIdentifier(_)
            | Self::Unavailable { .. }
            | Self::UnsupportedFile(_) => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<std::str::Utf8Error> for SourceError {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_id_is_not_an_identifier() {
        assert_eq!(PdbId::parse("").unwrap(), None);
        assert_eq!(PdbId::parse("   \t").unwrap(), None);
    }

    #[test]
    fn id_is_trimmed_and_case_preserved() {
        let id = PdbId::parse("  1ake \n").unwrap().unwrap();
        assert_eq!(id.as_str(), "1ake");
        let id = PdbId::parse("pdb_00001ake").unwrap().unwrap();
        assert_eq!(id.to_string(), "pdb_00001ake");
    }

    #[test]
    fn id_with_url_characters_is_rejected() {
        let long = "A".repeat(PdbId::MAX_LEN + 1);
        for bad in ["1AKE/../x", "1 AKE", "1AKE?x=1", "ÄBCD", long.as_str()] {
            assert!(matches!(
                PdbId::parse(bad),
                Err(SourceError::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn unavailable_message_names_the_id() {
        let err = SourceError::Unavailable { id: "ZZZZ".into() };
        assert_eq!(err.to_string(), "structure ZZZZ not found or unavailable");
    }
}
