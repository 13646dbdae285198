//! Clip file loading
//!
//! Reads a clip file into one owned buffer and validates it once. Queries then
//! go through the borrowed [`Clip`] view returned by [`ClipFile::clip`].

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::clip::Clip;
use crate::error::ClipError;
use crate::format::{CLIP_MAGIC, ClipHeader};

/// An owned, validated clip blob
#[derive(Debug, Clone)]
pub struct ClipFile {
    bytes: Vec<u8>,
    header: ClipHeader,
}

impl ClipFile {
    /// Quick format check without full validation
    pub fn can_load(bytes: &[u8]) -> bool {
        bytes.len() >= CLIP_MAGIC.len() && bytes[..CLIP_MAGIC.len()] == CLIP_MAGIC
    }

    /// Read and validate a clip file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read clip file: {}", path.display()))?;
        Self::from_vec(bytes)
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "rejected clip file"))
            .with_context(|| format!("Failed to load clip: {}", path.display()))
    }

    /// Validate an owned buffer
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self, ClipError> {
        let header = *Clip::from_bytes(&bytes)?.header();
        Ok(Self { bytes, header })
    }

    pub fn clip(&self) -> Clip<'_> {
        Clip::from_validated(&self.bytes, self.header)
    }

    pub fn header(&self) -> &ClipHeader {
        &self.header
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ClipWriter, NodeSpec, TrackSpec};
    use glam::Vec3;

    fn sample_bytes() -> Vec<u8> {
        ClipWriter::new("file", 60.0, 2)
            .node(NodeSpec::new("hips").pos(TrackSpec::sampled(&[Vec3::ZERO, Vec3::Y])))
            .build()
            .unwrap()
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walk.mclp");
        std::fs::write(&path, sample_bytes()).unwrap();

        let file = ClipFile::load(&path).unwrap();
        let clip = file.clip();
        assert_eq!(clip.name(), "file");
        assert_eq!(clip.sample_rate(), 60.0);
        let hips = clip.find_node("hips").unwrap();
        assert_eq!(clip.get_pos(hips, 1), Vec3::Y);
        assert!((clip.eval_pos(hips, 0.5).y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClipFile::load(dir.path().join("missing.mclp")).unwrap_err();
        assert!(err.to_string().contains("Failed to read clip file"));
    }

    #[test]
    fn test_load_rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mclp");
        let mut bytes = sample_bytes();
        bytes[0] = b'X';
        std::fs::write(&path, bytes).unwrap();

        let err = ClipFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to load clip"));
        assert!(matches!(
            err.downcast_ref::<ClipError>(),
            Some(ClipError::BadMagic(_))
        ));
    }

    #[test]
    fn test_can_load() {
        assert!(ClipFile::can_load(&sample_bytes()));
        assert!(!ClipFile::can_load(b"MCL"));
        assert!(!ClipFile::can_load(b"RIFF...."));
    }

    #[test]
    fn test_from_vec_keeps_bytes() {
        let bytes = sample_bytes();
        let file = ClipFile::from_vec(bytes.clone()).unwrap();
        assert_eq!(file.as_bytes(), &bytes[..]);
        assert_eq!(file.header().frame_count, 2);
        assert_eq!(file.into_bytes(), bytes);
    }
}
