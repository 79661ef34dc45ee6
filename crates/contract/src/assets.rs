//! Signature and attachment inputs, and loading of image assets

use pdf_core::{ImageHandle, PdfDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Who signs the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureRole {
    Buyer,
    Seller,
    Witness1,
    Witness2,
}

impl SignatureRole {
    pub const ALL: [SignatureRole; 4] = [
        SignatureRole::Buyer,
        SignatureRole::Seller,
        SignatureRole::Witness1,
        SignatureRole::Witness2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignatureRole::Buyer => "buyer",
            SignatureRole::Seller => "seller",
            SignatureRole::Witness1 => "witness1",
            SignatureRole::Witness2 => "witness2",
        }
    }
}

impl fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional signature image per role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSet {
    paths: BTreeMap<SignatureRole, PathBuf>,
}

impl SignatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: SignatureRole, path: impl Into<PathBuf>) -> Self {
        self.set(role, path);
        self
    }

    pub fn set(&mut self, role: SignatureRole, path: impl Into<PathBuf>) {
        self.paths.insert(role, path.into());
    }

    pub fn get(&self, role: SignatureRole) -> Option<&Path> {
        self.paths.get(&role).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Ordered attachment image paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentList(Vec<PathBuf>);

impl AttachmentList {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for AttachmentList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Which asset a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Signature(SignatureRole),
    /// Position in the attachment list (0-based)
    Attachment(usize),
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Logo => f.write_str("logo"),
            AssetKind::Signature(role) => write!(f, "signature ({role})"),
            AssetKind::Attachment(index) => write!(f, "attachment #{}", index + 1),
        }
    }
}

/// Why an image asset could not be used
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {reason}", path.display())]
    Undecodable { path: PathBuf, reason: String },
}

impl AssetError {
    pub fn path(&self) -> &Path {
        match self {
            AssetError::Missing(path)
            | AssetError::Unreadable { path, .. }
            | AssetError::Undecodable { path, .. } => path,
        }
    }
}

/// A non-fatal asset problem absorbed during a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetWarning {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub message: String,
}

impl AssetWarning {
    pub(crate) fn new(kind: AssetKind, error: &AssetError) -> Self {
        let warning = Self {
            kind,
            path: error.path().to_path_buf(),
            message: error.to_string(),
        };
        log::warn!("Skipping {}: {}", warning.kind, warning.message);
        warning
    }
}

impl fmt::Display for AssetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Read an image file and embed it in `doc`
pub(crate) fn load_image(doc: &mut PdfDocument, path: &Path) -> Result<ImageHandle, AssetError> {
    if !path.is_file() {
        return Err(AssetError::Missing(path.to_path_buf()));
    }
    let data = std::fs::read(path).map_err(|source| AssetError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    doc.add_image(&data)
        .map_err(|err| AssetError::Undecodable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::PageSize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_signature_set() {
        let set = SignatureSet::new()
            .with(SignatureRole::Buyer, "/tmp/a.png")
            .with(SignatureRole::Witness2, "/tmp/b.png");

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(SignatureRole::Buyer), Some(Path::new("/tmp/a.png")));
        assert_eq!(set.get(SignatureRole::Seller), None);
        assert!(SignatureSet::default().is_empty());
    }

    #[test]
    fn test_attachment_list_keeps_order() {
        let list: AttachmentList = ["b.png", "a.png", "c.png"].into_iter().collect();
        let names: Vec<_> = list.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["b.png", "a.png", "c.png"]);
    }

    #[test]
    fn test_asset_kind_display() {
        assert_eq!(AssetKind::Logo.to_string(), "logo");
        assert_eq!(
            AssetKind::Signature(SignatureRole::Witness1).to_string(),
            "signature (witness1)"
        );
        assert_eq!(AssetKind::Attachment(0).to_string(), "attachment #1");
    }

    #[test]
    fn test_load_missing_image() {
        let mut doc = PdfDocument::new(PageSize::A4);
        let err = load_image(&mut doc, Path::new("/nonexistent/assinatura.png")).unwrap_err();
        assert!(matches!(err, AssetError::Missing(_)));

        let warning = AssetWarning::new(AssetKind::Signature(SignatureRole::Buyer), &err);
        assert_eq!(warning.path, PathBuf::from("/nonexistent/assinatura.png"));
        assert!(warning.message.contains("not found"));
    }

    #[test]
    fn test_load_undecodable_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrompido.png");
        std::fs::write(&path, b"this is not a png").unwrap();

        let mut doc = PdfDocument::new(PageSize::A4);
        let err = load_image(&mut doc, &path).unwrap_err();
        assert!(matches!(err, AssetError::Undecodable { .. }));
    }
}
