//! Image storage: stage naming, grayscale decode, mask persistence.
//!
//! Naming contract: every derived file is `<source-stem>_<suffix>.tif` in
//! the output directory, with the suffix owned by [`Stage`] so no two
//! stages can collide. Saving overwrites any prior output, which is what
//! makes re-runs deterministic rather than accumulative.

use std::path::{Path, PathBuf};

use image::GrayImage;

/// Pipeline stage identifier, carrying the file-name suffix token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Noise-suppressed local-median mask.
    Median,
    /// Global segmentation mask.
    Seg,
    /// Externally-produced wire mask (precondition input, not an output).
    Wires,
    /// Isolated wire-region mask.
    WiresSeg,
}

impl Stage {
    /// The naming token appended to derived file names.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Seg => "seg",
            Self::Wires => "wires",
            Self::WiresSeg => "wires_seg",
        }
    }
}

/// Storage failure modes. All are terminal for the run.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The input path has no usable file stem to derive names from.
    #[error("cannot derive a base name from {}", .path.display())]
    InvalidSourceName {
        /// The offending path.
        path: PathBuf,
    },

    /// An image file could not be read or decoded.
    #[error("failed to read image {}: {source}", .path.display())]
    Read {
        /// The path that failed to load.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// A derived image could not be written.
    #[error("failed to write image {}: {source}", .path.display())]
    Write {
        /// The path that failed to save.
        path: PathBuf,
        /// Underlying encode error.
        #[source]
        source: image::ImageError,
    },

    /// The externally-prepared wire mask is not present. This is a
    /// required precondition, not recoverable inline.
    #[error("wire mask {} does not exist; the small-feature analysis must run first", .path.display())]
    MissingWireMask {
        /// The expected wire-mask path.
        path: PathBuf,
    },
}

/// Base name all derived files share: the source file name without its
/// extension.
///
/// # Errors
///
/// Returns [`StorageError::InvalidSourceName`] for paths with no UTF-8
/// file stem.
pub fn source_stem(image_path: &Path) -> Result<String, StorageError> {
    image_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .ok_or_else(|| StorageError::InvalidSourceName {
            path: image_path.to_path_buf(),
        })
}

/// Full path of a derived image for one stage.
#[must_use]
pub fn derived_path(output_dir: &Path, stem: &str, stage: Stage) -> PathBuf {
    output_dir.join(format!("{stem}_{}.tif", stage.suffix()))
}

/// Path prefix handed to the analysis scripts as their first argument:
/// `<output_dir>/<stem>_`, to which each script appends its own suffixes.
#[must_use]
pub fn script_prefix(output_dir: &Path, stem: &str) -> PathBuf {
    output_dir.join(format!("{stem}_"))
}

/// Load an image and convert it to 8-bit grayscale.
///
/// # Errors
///
/// Returns [`StorageError::Read`] if the file is missing or undecodable.
pub fn load_grayscale(path: &Path) -> Result<GrayImage, StorageError> {
    let image = image::open(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_luma8())
}

/// Load the externally-prepared wire mask, with a distinct error when the
/// precondition file is absent.
///
/// # Errors
///
/// Returns [`StorageError::MissingWireMask`] if the file does not exist,
/// [`StorageError::Read`] if it exists but cannot be decoded.
pub fn load_wire_mask(path: &Path) -> Result<GrayImage, StorageError> {
    if !path.exists() {
        return Err(StorageError::MissingWireMask {
            path: path.to_path_buf(),
        });
    }
    load_grayscale(path)
}

/// Persist a derived mask, overwriting any previous output at the path.
///
/// # Errors
///
/// Returns [`StorageError::Write`] on encode or filesystem failure.
pub fn save_mask(path: &Path, mask: &GrayImage) -> Result<(), StorageError> {
    mask.save(path).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
