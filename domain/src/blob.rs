use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::dimensions::Dimensions;
use crate::error::{DomainError, DomainResult};

/// Logical object name. It keys both the uploaded photo and its thumbnail, so
/// it must be a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobName(String);

impl BlobName {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(DomainError::InvalidBlobName(
                "name cannot be empty".to_string(),
            ));
        }

        if raw == "." || raw == ".." {
            return Err(DomainError::InvalidBlobName(format!(
                "'{raw}' is not a valid name"
            )));
        }

        if raw.contains(['/', '\\', '\0']) {
            return Err(DomainError::InvalidBlobName(format!(
                "'{raw}' must be a single path segment"
            )));
        }

        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one upload of a blob. A re-upload under the same name yields a
/// different version unless both its size and modification time match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobVersion {
    size: u64,
    modified: Option<SystemTime>,
}

impl BlobVersion {
    #[must_use]
    pub fn new(size: u64, modified: Option<SystemTime>) -> Self {
        Self { size, modified }
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}

/// A listed blob: its name and the version seen at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    pub name: BlobName,
    pub version: BlobVersion,
}

/// An uploaded image as delivered by the trigger, still encoded.
#[derive(Clone)]
pub struct ImageBlob {
    name: BlobName,
    bytes: Arc<[u8]>,
}

impl ImageBlob {
    pub fn new(name: BlobName, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &BlobName {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

}

impl fmt::Debug for ImageBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBlob")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// JPEG thumbnail produced for exactly one [`ImageBlob`].
#[derive(Clone)]
pub struct ThumbnailResult {
    name: BlobName,
    bytes: Vec<u8>,
    dimensions: Dimensions,
}

impl ThumbnailResult {
    #[must_use]
    pub fn new(name: BlobName, bytes: Vec<u8>, dimensions: Dimensions) -> Self {
        Self {
            name,
            bytes,
            dimensions,
        }
    }

    #[must_use]
    pub fn name(&self) -> &BlobName {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

}

impl fmt::Debug for ThumbnailResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbnailResult")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.png")]
    #[case("b.jpg")]
    #[case("holiday photo (1).jpeg")]
    fn accepts_plain_names(#[case] raw: &str) -> DomainResult<()> {
        let name = BlobName::parse(raw)?;
        assert_eq!(name.as_str(), raw);
        Ok(())
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(".")]
    #[case("..")]
    #[case("nested/a.png")]
    #[case("..\\escape.png")]
    fn rejects_names_that_are_not_single_segments(#[case] raw: &str) {
        assert!(matches!(
            BlobName::parse(raw),
            Err(DomainError::InvalidBlobName(_))
        ));
    }

    #[test]
    fn blob_reports_length() -> DomainResult<()> {
        let blob = ImageBlob::new(BlobName::parse("a.png")?, vec![1_u8, 2, 3]);
        assert_eq!(blob.byte_len(), 3);
        assert_eq!(blob.name().as_str(), "a.png");
        Ok(())
    }

    #[test]
    fn reuploads_differ_by_size_or_mtime() {
        let at = SystemTime::UNIX_EPOCH;
        let later = at + std::time::Duration::from_secs(1);

        assert_eq!(BlobVersion::new(10, Some(at)), BlobVersion::new(10, Some(at)));
        assert_ne!(BlobVersion::new(10, Some(at)), BlobVersion::new(11, Some(at)));
        assert_ne!(BlobVersion::new(10, Some(at)), BlobVersion::new(10, Some(later)));
    }
}
