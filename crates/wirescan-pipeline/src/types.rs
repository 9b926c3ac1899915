//! Shared types for the wirescan mask-derivation pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference raster data
/// without depending on `image` directly.
pub use image::GrayImage;

/// Pixel value marking mask membership.
///
/// Every derived mask holds only [`MASK_ON`] and [`MASK_OFF`]. A plain
/// 8-bit conversion of a binary image would yield 0/1, which is neither
/// visually nor numerically usable downstream, so membership is rescaled
/// to the full value range at derivation time.
pub const MASK_ON: u8 = 255;

/// Pixel value marking mask non-membership.
pub const MASK_OFF: u8 = 0;

/// Configuration for the mask-derivation stages.
///
/// Only the local median threshold is parameterized; the global minimum
/// threshold is a pure statistic over the whole image and takes no
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveConfig {
    /// Half-width of the square median neighborhood in pixels. The window
    /// spans `2 * median_radius + 1` pixels per side.
    pub median_radius: u32,

    /// Threshold offset: a pixel counts as locally bright only when it
    /// exceeds its neighborhood median by more than this amount.
    pub median_offset: i16,
}

impl DeriveConfig {
    /// Default median neighborhood half-width (a 31×31 window).
    pub const DEFAULT_MEDIAN_RADIUS: u32 = 15;

    /// Default median threshold offset.
    pub const DEFAULT_MEDIAN_OFFSET: i16 = 0;
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            median_radius: Self::DEFAULT_MEDIAN_RADIUS,
            median_offset: Self::DEFAULT_MEDIAN_OFFSET,
        }
    }
}

/// Errors that can occur during mask derivation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The intensity histogram never became bimodal, so no minimum
    /// threshold exists (e.g. a constant image).
    #[error("no bimodal histogram after {iterations} smoothing passes; cannot place a minimum threshold")]
    ThresholdNotFound {
        /// Number of smoothing passes attempted before giving up.
        iterations: usize,
    },

    /// The two masks handed to the region isolator do not share dimensions.
    #[error(
        "mask dimensions do not match: wire mask is {wires_width}x{wires_height}, segmentation mask is {seg_width}x{seg_height}"
    )]
    DimensionMismatch {
        /// Wire mask width.
        wires_width: u32,
        /// Wire mask height.
        wires_height: u32,
        /// Segmentation mask width.
        seg_width: u32,
        /// Segmentation mask height.
        seg_height: u32,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn derive_config_defaults() {
        let config = DeriveConfig::default();
        assert_eq!(config.median_radius, 15);
        assert_eq!(config.median_offset, 0);
    }

    #[test]
    fn derive_config_serde_round_trip() {
        let config = DeriveConfig {
            median_radius: 7,
            median_offset: -3,
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DeriveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn threshold_not_found_display() {
        let err = PipelineError::ThresholdNotFound { iterations: 10_000 };
        assert!(err.to_string().contains("10000 smoothing passes"));
    }

    #[test]
    fn dimension_mismatch_display_names_both_masks() {
        let err = PipelineError::DimensionMismatch {
            wires_width: 4,
            wires_height: 5,
            seg_width: 6,
            seg_height: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("4x5"), "unexpected message: {msg}");
        assert!(msg.contains("6x7"), "unexpected message: {msg}");
    }
}
