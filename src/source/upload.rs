//! Uploaded `.pdb` files.

use std::path::Path;

use super::{SourceError, StructureText};

/// Decode uploaded bytes as UTF-8 structure text. No format validation.
///
/// # Errors
///
/// [`SourceError::Decode`] when the bytes are not valid UTF-8.
pub fn load_from_upload(bytes: &[u8]) -> Result<StructureText, SourceError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(StructureText::new(text))
}

/// A single uploaded file: its display name and raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name as chosen by the user.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Accepted file extension (compared case-insensitively).
    pub const EXTENSION: &'static str = "pdb";

    /// Wrap in-memory contents, checking the file name's extension.
    ///
    /// # Errors
    ///
    /// [`SourceError::UnsupportedFile`] unless the name ends in `.pdb`.
    pub fn new(
        name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, SourceError> {
        let name = name.into();
        if !has_pdb_extension(Path::new(&name)) {
            return Err(SourceError::UnsupportedFile(name));
        }
        Ok(Self { name, bytes })
    }

    /// Read a `.pdb` file from disk.
    ///
    /// # Errors
    ///
    /// [`SourceError::UnsupportedFile`] for other extensions,
    /// [`SourceError::Io`] when the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        if !has_pdb_extension(path) {
            return Err(SourceError::UnsupportedFile(name));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Decode the contents as structure text.
    ///
    /// # Errors
    ///
    /// See [`load_from_upload`].
    pub fn decode(&self) -> Result<StructureText, SourceError> {
        load_from_upload(&self.bytes)
    }
}

fn has_pdb_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(Upload::EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "ATOM      1  CA  ALA A   1      11.104   6.134  -6.504  1.00  0.00           C\nEND\n";

    #[test]
    fn upload_text_equals_file_content() {
        let text = load_from_upload(RECORD.as_bytes()).unwrap();
        assert_eq!(text.as_str(), RECORD);
    }

    #[test]
    fn empty_upload_is_accepted() {
        let text = load_from_upload(&[]).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = load_from_upload(&[b'A', 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn only_pdb_extension_is_accepted() {
        assert!(Upload::new("1ake.pdb", Vec::new()).is_ok());
        assert!(Upload::new("1AKE.PDB", Vec::new()).is_ok());
        assert!(matches!(
            Upload::new("1ake.cif", Vec::new()),
            Err(SourceError::UnsupportedFile(name)) if name == "1ake.cif"
        ));
        assert!(Upload::new("pdb", Vec::new()).is_err());
    }

    #[test]
    fn from_path_reads_bytes() {
        let dir = std::env::temp_dir().join("pdbview-upload-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mini.pdb");
        std::fs::write(&path, RECORD).unwrap();

        let upload = Upload::from_path(&path).unwrap();
        assert_eq!(upload.name, "mini.pdb");
        assert_eq!(upload.decode().unwrap().as_str(), RECORD);

        let missing = dir.join("missing.pdb");
        assert!(matches!(
            Upload::from_path(&missing),
            Err(SourceError::Io(_))
        ));
    }
}
