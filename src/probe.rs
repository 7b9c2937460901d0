//! Image Probe - Filesystem and Decoder Seam
//!
//! Checks never touch the filesystem directly; they ask an `ImageProbe`.

use image::ImageReader;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unrecognized image format")]
    UnknownFormat(PathBuf),
}

impl ProbeError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ProbeError::NotFound(path.to_path_buf())
        } else {
            ProbeError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Header-level facts about an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Lowercase primary extension for the detected format ("png", "jpg", "webp").
    pub format: String,
}

pub trait ImageProbe {
    fn file_len(&self, path: &Path) -> Result<u64, ProbeError>;
    fn inspect(&self, path: &Path) -> Result<ImageInfo, ProbeError>;
}

/// Reads the real filesystem and decodes headers with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl ImageProbe for FsProbe {
    fn file_len(&self, path: &Path) -> Result<u64, ProbeError> {
        let meta = fs::metadata(path).map_err(|e| ProbeError::from_io(path, e))?;
        Ok(meta.len())
    }

    fn inspect(&self, path: &Path) -> Result<ImageInfo, ProbeError> {
        // The reader owns the file handle; it is dropped on every return path.
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| ProbeError::from_io(path, e))?;

        let format = reader
            .format()
            .and_then(|f| f.extensions_str().first().copied())
            .ok_or_else(|| ProbeError::UnknownFormat(path.to_path_buf()))?
            .to_string();

        let (width, height) = reader
            .into_dimensions()
            .map_err(|source| ProbeError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(ImageInfo {
            width,
            height,
            format,
        })
    }
}
